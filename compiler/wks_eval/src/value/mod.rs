//! Runtime values.
//!
//! [`Value`] is a closed set: every operator, method and property access
//! matches on it exhaustively. Mutable containers (`List`, `Dict`, `Set`,
//! `Namespace`) are shared by reference; everything else is immutable.

mod display;
mod function;
mod key;
mod range;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

pub use display::{format_float, quote_str};
pub use function::{
    Args, BoundMethod, BuiltinFn, BuiltinFunction, ExceptionValue, ModuleValue, ScriptFunction,
};
pub use key::HashKey;
pub use range::{RangeIter, RangeValue, SliceValue};

use wks_stack::ensure_sufficient_stack;

use crate::errors::{
    nesting_too_deep, not_iterable, wrong_arg_type, EvalResult, ExceptionKind,
};

pub type DictMap = BTreeMap<HashKey, Value>;
pub type SetItems = BTreeSet<HashKey>;

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Tuple(Rc<[Value]>),
    Dict(Rc<RefCell<DictMap>>),
    Set(Rc<RefCell<SetItems>>),
    Range(RangeValue),
    Slice(SliceValue),
    Function(Rc<ScriptFunction>),
    Builtin(BuiltinFunction),
    BoundMethod(Rc<BoundMethod>),
    Module(Rc<ModuleValue>),
    ExceptionClass(ExceptionKind),
    Exception(Rc<ExceptionValue>),
    /// Attribute bag from `namespace(**kw)`; the only value scripts may set
    /// properties on.
    Namespace(Rc<RefCell<BTreeMap<String, Value>>>),
}

// Factories

impl Value {
    pub fn str(s: impl AsRef<str>) -> Value {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Tuple(items.into())
    }

    pub fn dict(map: DictMap) -> Value {
        Value::Dict(Rc::new(RefCell::new(map)))
    }

    pub fn set(items: SetItems) -> Value {
        Value::Set(Rc::new(RefCell::new(items)))
    }

    pub fn namespace(fields: BTreeMap<String, Value>) -> Value {
        Value::Namespace(Rc::new(RefCell::new(fields)))
    }

    pub fn module(module: ModuleValue) -> Value {
        Value::Module(Rc::new(module))
    }

    pub fn exception(kind: ExceptionKind, message: impl Into<String>, args: Vec<Value>) -> Value {
        Value::Exception(Rc::new(ExceptionValue {
            kind,
            message: message.into(),
            args,
        }))
    }

    pub fn bound_method(receiver: Value, name: &'static str) -> Value {
        Value::BoundMethod(Rc::new(BoundMethod { receiver, name }))
    }

    /// A dict from string keys.
    pub fn str_dict<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
        Value::dict(
            entries
                .into_iter()
                .map(|(k, v)| (HashKey::Str(Rc::from(k)), v))
                .collect(),
        )
    }
}

// Introspection

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Range(_) => "range",
            Value::Slice(_) => "slice",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin_function",
            Value::BoundMethod(_) => "method",
            Value::Module(_) => "module",
            Value::ExceptionClass(_) => "type",
            Value::Exception(e) => e.kind.name(),
            Value::Namespace(_) => "namespace",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Dict(map) => !map.borrow().is_empty(),
            Value::Set(items) => !items.borrow().is_empty(),
            Value::Range(r) => !r.is_empty(),
            _ => true,
        }
    }

    /// Integer view of `self` for built-ins taking an int.
    pub fn as_int(&self, func: &str) -> EvalResult<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            other => Err(wrong_arg_type(func, "int", other.type_name())),
        }
    }

    /// Float view of `self`, promoting ints.
    pub fn as_float(&self, func: &str) -> EvalResult<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            other => Err(wrong_arg_type(func, "number", other.type_name())),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    /// The declared name exposed as `__name__`, for values that have one.
    pub fn declared_name(&self) -> Option<String> {
        match self {
            Value::Function(f) => Some(f.name().to_string()),
            Value::Builtin(b) => Some(b.name.to_string()),
            Value::BoundMethod(m) => Some(m.name.to_string()),
            Value::Module(m) => Some(m.name.clone()),
            Value::ExceptionClass(kind) => Some(kind.name().to_string()),
            _ => None,
        }
    }

    /// The qualified name exposed as `__qualname__`.
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            Value::Builtin(b) => Some(b.qualname()),
            Value::BoundMethod(m) => Some(format!("{}.{}", m.receiver.type_name(), m.name)),
            other => other.declared_name(),
        }
    }
}

// Equality, ordering, identity

/// Containers nested deeper than this cannot be compared; a list that
/// contains itself would otherwise recurse until the host stack is gone.
const MAX_COMPARE_DEPTH: usize = 500;

impl Value {
    /// Script-level `==`.
    ///
    /// Fails with `OverflowError` when the operands nest past
    /// [`MAX_COMPARE_DEPTH`], as two distinct self-containing lists do.
    pub fn equals(&self, other: &Value) -> EvalResult<bool> {
        equals_at(self, other, 0)
    }

    /// Script-level `is`: reference identity for shared objects, value
    /// identity for immutable scalars.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b),
            (Value::Dict(a), Value::Dict(b)) => Rc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => {
                a.name == b.name && a.module == b.module
            }
            (Value::BoundMethod(a), Value::BoundMethod(b)) => {
                a.name == b.name && a.receiver.is_same(&b.receiver)
            }
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            (Value::Exception(a), Value::Exception(b)) => Rc::ptr_eq(a, b),
            (Value::Namespace(a), Value::Namespace(b)) => Rc::ptr_eq(a, b),
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => a == b,
            (Value::ExceptionClass(a), Value::ExceptionClass(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering for `<`, `sorted`, `min`, `max`; `Ok(None)` when the pair
    /// is not orderable.
    pub fn compare(&self, other: &Value) -> EvalResult<Option<Ordering>> {
        compare_at(self, other, 0)
    }
}

fn equals_at(left: &Value, right: &Value, depth: usize) -> EvalResult<bool> {
    if depth > MAX_COMPARE_DEPTH {
        return Err(nesting_too_deep("comparison"));
    }
    Ok(match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return Ok(true);
            }
            let (a, b) = (a.borrow(), b.borrow());
            seq_equals(&a, &b, depth)?
        }
        (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b) || seq_equals(a, b, depth)?,
        (Value::Dict(a), Value::Dict(b)) => {
            if Rc::ptr_eq(a, b) {
                return Ok(true);
            }
            let (a, b) = (a.borrow(), b.borrow());
            map_equals(a.iter(), b.iter(), depth)?
        }
        (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
        (Value::Range(a), Value::Range(b)) => a == b,
        (Value::Slice(a), Value::Slice(b)) => a == b,
        (Value::ExceptionClass(a), Value::ExceptionClass(b)) => a == b,
        (Value::Exception(a), Value::Exception(b)) => {
            a.kind == b.kind && a.message == b.message && seq_equals(&a.args, &b.args, depth)?
        }
        (Value::Namespace(a), Value::Namespace(b)) => {
            if Rc::ptr_eq(a, b) {
                return Ok(true);
            }
            let (a, b) = (a.borrow(), b.borrow());
            map_equals(a.iter(), b.iter(), depth)?
        }
        _ => left.is_same(right),
    })
}

fn seq_equals(a: &[Value], b: &[Value], depth: usize) -> EvalResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    ensure_sufficient_stack(|| -> EvalResult<bool> {
        for (x, y) in a.iter().zip(b) {
            if !equals_at(x, y, depth + 1)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn map_equals<'a, K: PartialEq + 'a>(
    a: impl ExactSizeIterator<Item = (&'a K, &'a Value)>,
    b: impl ExactSizeIterator<Item = (&'a K, &'a Value)>,
    depth: usize,
) -> EvalResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    ensure_sufficient_stack(|| -> EvalResult<bool> {
        for ((ka, va), (kb, vb)) in a.zip(b) {
            if ka != kb || !equals_at(va, vb, depth + 1)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn compare_at(left: &Value, right: &Value, depth: usize) -> EvalResult<Option<Ordering>> {
    if depth > MAX_COMPARE_DEPTH {
        return Err(nesting_too_deep("comparison"));
    }
    Ok(match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (a, b) if a.is_number() && b.is_number() => {
            let (x, y) = (a.as_float("compare")?, b.as_float("compare")?);
            x.partial_cmp(&y)
        }
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return Ok(Some(Ordering::Equal));
            }
            let (a, b) = (a.borrow(), b.borrow());
            compare_seq(&a, &b, depth)?
        }
        (Value::Tuple(a), Value::Tuple(b)) => compare_seq(a, b, depth)?,
        _ => None,
    })
}

fn compare_seq(a: &[Value], b: &[Value], depth: usize) -> EvalResult<Option<Ordering>> {
    ensure_sufficient_stack(|| -> EvalResult<Option<Ordering>> {
        for (x, y) in a.iter().zip(b) {
            if !equals_at(x, y, depth + 1)? {
                return compare_at(x, y, depth + 1);
            }
        }
        Ok(Some(a.len().cmp(&b.len())))
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

// Iteration

impl Value {
    /// Iterate a sequence-like value. Containers are snapshotted, so the
    /// loop body may mutate them freely.
    pub fn iter(&self) -> EvalResult<ValueIter> {
        Ok(match self {
            Value::List(items) => ValueIter::Items(items.borrow().clone().into_iter()),
            Value::Tuple(items) => ValueIter::Items(items.to_vec().into_iter()),
            Value::Str(s) => ValueIter::Items(
                s.chars()
                    .map(|c| Value::str(c.encode_utf8(&mut [0; 4])))
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            Value::Dict(map) => ValueIter::Items(
                map.borrow()
                    .keys()
                    .map(HashKey::to_value)
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            Value::Set(items) => ValueIter::Items(
                items
                    .borrow()
                    .iter()
                    .map(HashKey::to_value)
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            Value::Range(r) => ValueIter::Range(r.iter()),
            other => return Err(not_iterable(other.type_name())),
        })
    }

    /// Materialise an iterable into a vector.
    pub fn to_vec(&self) -> EvalResult<Vec<Value>> {
        Ok(self.iter()?.collect())
    }
}

/// Iterator over a value's elements.
pub enum ValueIter {
    Items(std::vec::IntoIter<Value>),
    Range(RangeIter),
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ValueIter::Items(items) => items.next(),
            ValueIter::Range(range) => range.next().map(Value::Int),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ValueIter::Items(items) => items.size_hint(),
            ValueIter::Range(range) => range.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests;
