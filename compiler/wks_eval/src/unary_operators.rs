//! Unary operator implementations for the evaluator.
//!
//! Direct enum dispatch, like the binary operators. `not` works on every
//! value through truthiness; `-` and `~` only on numbers.

use wks_ir::UnaryOp;

use crate::errors::{bad_operand_for_unary, integer_overflow, EvalResult};
use crate::Value;

pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (_, UnaryOp::Not) => Ok(Value::Bool(!value.is_truthy())),

        // Numeric negation
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),

        // Bitwise not
        (Value::Int(n), UnaryOp::BitNot) => Ok(Value::Int(!*n)),

        _ => Err(bad_operand_for_unary(op, value.type_name())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::ExceptionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn negation() {
        assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::Neg).unwrap(), Value::Int(-5));
        assert_eq!(
            evaluate_unary(&Value::Float(1.5), UnaryOp::Neg).unwrap(),
            Value::Float(-1.5)
        );
        assert_eq!(
            evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).unwrap_err().kind,
            ExceptionKind::OverflowError
        );
    }

    #[test]
    fn bitwise_not() {
        assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::BitNot).unwrap(), Value::Int(-6));
    }

    #[test]
    fn logical_not_uses_truthiness() {
        assert_eq!(evaluate_unary(&Value::str(""), UnaryOp::Not).unwrap(), Value::Bool(true));
        assert_eq!(
            evaluate_unary(&Value::list(vec![Value::Null]), UnaryOp::Not).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn invalid_operand() {
        let err = evaluate_unary(&Value::str("x"), UnaryOp::Neg).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::TypeError);
        assert_eq!(err.message, "bad operand type for unary -: 'str'");
    }
}
