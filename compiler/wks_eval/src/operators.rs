//! Binary operator implementations for the evaluator.
//!
//! Direct enum dispatch: the value set is closed, so one `match` per
//! operand pair replaces any symbol-keyed function table. Integer
//! arithmetic is checked throughout; overflow is an `OverflowError`, never
//! a wrapped result.

use wks_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, math_domain_error, modulo_by_zero, negative_shift,
    not_comparable, type_error, unsupported_operands, EvalResult,
};
use crate::value::{DictMap, HashKey, SetItems, Value};

// Helpers for the repetitive checked-arithmetic patterns

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right` for every non-short-circuit operator.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => left.equals(right).map(Value::Bool),
        BinaryOp::NotEq => left.equals(right).map(|equal| Value::Bool(!equal)),
        BinaryOp::Is => Ok(Value::Bool(left.is_same(right))),
        BinaryOp::IsNot => Ok(Value::Bool(!left.is_same(right))),
        BinaryOp::In => contains(right, left).map(Value::Bool),
        BinaryOp::NotIn => contains(right, left).map(|found| Value::Bool(!found)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = left
                .compare(right)?
                .ok_or_else(|| not_comparable(op, left.type_name(), right.type_name()))?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::LtEq => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            }))
        }
        _ => evaluate_arithmetic(left, right, op),
    }
}

fn evaluate_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let unsupported = || unsupported_operands(op, left.type_name(), right.type_name());
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (a, b) = (left.as_float("")?, right.as_float("")?);
            eval_float_binary(a, b, op).ok_or_else(unsupported)?
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::BitAnd => Ok(Value::Bool(*a & *b)),
            BinaryOp::BitOr => Ok(Value::Bool(*a | *b)),
            BinaryOp::BitXor => Ok(Value::Bool(*a ^ *b)),
            _ => Err(unsupported()),
        },
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::str(joined))
        }
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s))
            if op == BinaryOp::Mul =>
        {
            let count = repeat_count(*n, s.len())?;
            Ok(Value::str(s.repeat(count)))
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items))
            if op == BinaryOp::Mul =>
        {
            Ok(Value::list(repeat_items(&items.borrow(), *n)?))
        }
        (Value::Tuple(a), Value::Tuple(b)) if op == BinaryOp::Add => {
            Ok(Value::tuple(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Tuple(items), Value::Int(n)) | (Value::Int(n), Value::Tuple(items))
            if op == BinaryOp::Mul =>
        {
            Ok(Value::tuple(repeat_items(items, *n)?))
        }
        (Value::Set(a), Value::Set(b)) => eval_set_binary(&a.borrow(), &b.borrow(), op)
            .map(Value::set)
            .ok_or_else(unsupported),
        (Value::Dict(a), Value::Dict(b)) if op == BinaryOp::BitOr => {
            let mut merged: DictMap = a.borrow().clone();
            merged.extend(b.borrow().iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(Value::dict(merged))
        }
        _ => Err(unsupported()),
    }
}

/// Binary operations on integers.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        BinaryOp::FloorDiv => {
            if b == 0 {
                return Err(division_by_zero());
            }
            let quotient = a
                .checked_div(b)
                .ok_or_else(|| integer_overflow("floor division"))?;
            // Round toward negative infinity.
            if a % b != 0 && ((a < 0) != (b < 0)) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            // The result takes the sign of the divisor.
            let remainder = a.wrapping_rem(b);
            if remainder != 0 && ((remainder < 0) != (b < 0)) {
                Ok(Value::Int(remainder + b))
            } else {
                Ok(Value::Int(remainder))
            }
        }
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exponent) => checked_arith(a.checked_pow(exponent), "exponentiation"),
            Err(_) if b < 0 => eval_float_pow(a as f64, b as f64),
            Err(_) => match a {
                0 | 1 => Ok(Value::Int(a)),
                -1 => Ok(Value::Int(if b % 2 == 0 { 1 } else { -1 })),
                _ => Err(integer_overflow("exponentiation")),
            },
        },
        BinaryOp::BitAnd => Ok(Value::Int(a & b)),
        BinaryOp::BitOr => Ok(Value::Int(a | b)),
        BinaryOp::BitXor => Ok(Value::Int(a ^ b)),
        BinaryOp::Shl => {
            if b < 0 {
                return Err(negative_shift());
            }
            if a == 0 {
                return Ok(Value::Int(0));
            }
            let shift = u32::try_from(b)
                .ok()
                .filter(|s| *s < 64)
                .ok_or_else(|| integer_overflow("left shift"))?;
            let shifted = a << shift;
            if shifted >> shift == a {
                Ok(Value::Int(shifted))
            } else {
                Err(integer_overflow("left shift"))
            }
        }
        BinaryOp::Shr => {
            if b < 0 {
                return Err(negative_shift());
            }
            match u32::try_from(b).ok().filter(|s| *s < 64) {
                Some(shift) => Ok(Value::Int(a >> shift)),
                None => Ok(Value::Int(if a < 0 { -1 } else { 0 })),
            }
        }
        _ => Err(unsupported_operands(op, "int", "int")),
    }
}

/// Binary operations on floats (ints already promoted). `None` when `op`
/// has no float meaning.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Option<EvalResult> {
    let result = match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float((a / b).floor()))
            }
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                Err(modulo_by_zero())
            } else {
                let remainder = a % b;
                if remainder != 0.0 && ((remainder < 0.0) != (b < 0.0)) {
                    Ok(Value::Float(remainder + b))
                } else {
                    Ok(Value::Float(remainder))
                }
            }
        }
        BinaryOp::Pow => eval_float_pow(a, b),
        _ => return None,
    };
    Some(result)
}

fn eval_float_pow(base: f64, exponent: f64) -> EvalResult {
    if base == 0.0 && exponent < 0.0 {
        return Err(division_by_zero());
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(math_domain_error());
    }
    Ok(Value::Float(base.powf(exponent)))
}

fn eval_set_binary(a: &SetItems, b: &SetItems, op: BinaryOp) -> Option<SetItems> {
    let items: SetItems = match op {
        BinaryOp::BitOr => a.union(b).cloned().collect(),
        BinaryOp::BitAnd => a.intersection(b).cloned().collect(),
        BinaryOp::BitXor => a.symmetric_difference(b).cloned().collect(),
        BinaryOp::Sub => a.difference(b).cloned().collect(),
        _ => return None,
    };
    Some(items)
}

/// Compound assignment: `target op= value`.
///
/// Mutable containers are updated in place and returned, so every alias
/// sees the change; everything else falls back to [`evaluate_binary`].
pub fn evaluate_in_place(target: &Value, value: &Value, op: BinaryOp) -> EvalResult {
    match (target, value, op) {
        (Value::List(items), _, BinaryOp::Add) => {
            let extra = value.to_vec()?;
            items.borrow_mut().extend(extra);
            Ok(target.clone())
        }
        (Value::List(items), Value::Int(n), BinaryOp::Mul) => {
            let repeated = repeat_items(&items.borrow(), *n)?;
            *items.borrow_mut() = repeated;
            Ok(target.clone())
        }
        (Value::Dict(map), Value::Dict(other), BinaryOp::BitOr) => {
            let entries: Vec<(HashKey, Value)> = other
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            map.borrow_mut().extend(entries);
            Ok(target.clone())
        }
        (Value::Set(items), Value::Set(other), _) => {
            let updated = eval_set_binary(&items.borrow(), &other.borrow(), op).ok_or_else(|| {
                unsupported_operands(op, target.type_name(), value.type_name())
            })?;
            *items.borrow_mut() = updated;
            Ok(target.clone())
        }
        _ => evaluate_binary(target, value, op),
    }
}

/// Number of copies for sequence repetition; negative counts mean none.
fn repeat_count(n: i64, unit_len: usize) -> EvalResult<usize> {
    let count = usize::try_from(n.max(0)).map_err(|_| integer_overflow("repetition"))?;
    unit_len
        .checked_mul(count)
        .ok_or_else(|| integer_overflow("repetition"))?;
    Ok(count)
}

fn repeat_items(items: &[Value], n: i64) -> EvalResult<Vec<Value>> {
    let count = repeat_count(n, items.len())?;
    let mut repeated = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        repeated.extend(items.iter().cloned());
    }
    Ok(repeated)
}

/// `item in container`.
pub fn contains(container: &Value, item: &Value) -> EvalResult<bool> {
    match container {
        Value::List(items) => contains_item(&items.borrow(), item),
        Value::Tuple(items) => contains_item(items, item),
        Value::Set(items) => Ok(items.borrow().contains(&HashKey::from_value(item)?)),
        Value::Dict(map) => Ok(map.borrow().contains_key(&HashKey::from_value(item)?)),
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(&**needle)),
            other => Err(type_error(format!(
                "'in <str>' requires str as left operand, not {}",
                other.type_name()
            ))),
        },
        Value::Range(range) => Ok(match item {
            Value::Int(i) => range.contains(*i),
            Value::Float(f) if f.fract() == 0.0 => range.contains(*f as i64),
            _ => false,
        }),
        Value::Namespace(fields) => match item {
            Value::Str(name) => Ok(fields.borrow().contains_key(&**name)),
            _ => Ok(false),
        },
        other => Err(type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

fn contains_item(items: &[Value], item: &Value) -> EvalResult<bool> {
    for candidate in items {
        if candidate.equals(item)? {
            return Ok(true);
        }
    }
    Ok(false)
}
