//! Evaluation errors and the exception class hierarchy.
//!
//! Every runtime failure, host-raised or script-raised, is one
//! [`EvalError`]: an exception class, a message, and the position of the
//! innermost node that failed. `try`/`except` matches on the class.
//!
//! Construction goes through the `#[cold]` factory functions below so all
//! evaluator messages live in one place.

use std::fmt;

use thiserror::Error;
use wks_ir::{BinaryOp, Span, UnaryOp};

/// Result of evaluating an expression.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Built-in exception classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExceptionKind {
    Exception,
    ArithmeticError,
    ZeroDivisionError,
    OverflowError,
    LookupError,
    IndexError,
    KeyError,
    NameError,
    AttributeError,
    TypeError,
    ValueError,
    SyntaxError,
    ImportError,
    RuntimeError,
    NotImplementedError,
}

impl ExceptionKind {
    /// Every class, root first.
    pub const ALL: [ExceptionKind; 15] = [
        Self::Exception,
        Self::ArithmeticError,
        Self::ZeroDivisionError,
        Self::OverflowError,
        Self::LookupError,
        Self::IndexError,
        Self::KeyError,
        Self::NameError,
        Self::AttributeError,
        Self::TypeError,
        Self::ValueError,
        Self::SyntaxError,
        Self::ImportError,
        Self::RuntimeError,
        Self::NotImplementedError,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Exception => "Exception",
            Self::ArithmeticError => "ArithmeticError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::OverflowError => "OverflowError",
            Self::LookupError => "LookupError",
            Self::IndexError => "IndexError",
            Self::KeyError => "KeyError",
            Self::NameError => "NameError",
            Self::AttributeError => "AttributeError",
            Self::TypeError => "TypeError",
            Self::ValueError => "ValueError",
            Self::SyntaxError => "SyntaxError",
            Self::ImportError => "ImportError",
            Self::RuntimeError => "RuntimeError",
            Self::NotImplementedError => "NotImplementedError",
        }
    }

    /// Direct superclass; `None` for the root.
    pub const fn parent(self) -> Option<ExceptionKind> {
        match self {
            Self::Exception => None,
            Self::ZeroDivisionError | Self::OverflowError => Some(Self::ArithmeticError),
            Self::IndexError | Self::KeyError => Some(Self::LookupError),
            Self::NotImplementedError => Some(Self::RuntimeError),
            _ => Some(Self::Exception),
        }
    }

    /// Whether `self` is `class` or one of its descendants.
    pub fn is_subclass_of(self, class: ExceptionKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == class {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime failure.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}: {message}{}", LocationSuffix(.span))]
pub struct EvalError {
    pub kind: ExceptionKind,
    pub message: String,
    /// Innermost failing node; [`Span::SYNTHETIC`] until one is attached.
    pub span: Span,
}

struct LocationSuffix<'a>(&'a Span);

impl fmt::Display for LocationSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_known() {
            write!(f, " ({})", self.0)
        } else {
            Ok(())
        }
    }
}

impl EvalError {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            span: Span::SYNTHETIC,
        }
    }

    /// Attach `span` unless a more precise position is already known.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if !self.span.is_known() {
            self.span = span;
        }
        self
    }

    pub fn line(&self) -> i32 {
        self.span.line
    }

    pub fn column(&self) -> i32 {
        self.span.column
    }
}

// Name and scope errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::NameError,
        format!("name '{name}' is not defined"),
    )
}

#[cold]
pub fn cannot_delete_outer(name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::NameError,
        format!("cannot delete '{name}': it is defined in an enclosing scope"),
    )
}

// Attribute errors

/// The one attribute-error shape: never reveals whether `name` exists.
#[cold]
pub fn attribute_not_allowed(type_name: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::AttributeError,
        format!("'{type_name}' object has no attribute '{name}'"),
    )
}

#[cold]
pub fn readonly_attribute(type_name: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::AttributeError,
        format!("cannot set attribute '{name}' of '{type_name}' object"),
    )
}

// Type errors

#[cold]
pub fn unsupported_operands(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!(
            "unsupported operand type(s) for {}: '{left}' and '{right}'",
            op.as_symbol()
        ),
    )
}

#[cold]
pub fn bad_operand_for_unary(op: UnaryOp, type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("bad operand type for unary {}: '{type_name}'", op.as_symbol()),
    )
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not callable"),
    )
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not iterable"),
    )
}

#[cold]
pub fn not_subscriptable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not subscriptable"),
    )
}

#[cold]
pub fn item_assignment_unsupported(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object does not support item assignment"),
    )
}

#[cold]
pub fn item_deletion_unsupported(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object does not support item deletion"),
    )
}

#[cold]
pub fn unhashable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("unhashable type: '{type_name}'"),
    )
}

#[cold]
pub fn wrong_arg_type(func: &str, expected: &str, got: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() expected {expected}, got '{got}'"),
    )
}

#[cold]
pub fn not_comparable(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!(
            "'{}' not supported between instances of '{left}' and '{right}'",
            op.as_symbol()
        ),
    )
}

#[cold]
pub fn not_an_exception_class(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("catching '{type_name}' is not allowed: except clauses need exception classes"),
    )
}

#[cold]
pub fn raise_non_exception(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("exceptions must be exception classes or instances, not '{type_name}'"),
    )
}

// Call errors

#[cold]
pub fn wrong_arg_count(func: &str, expected: usize, got: usize) -> EvalError {
    let word = if expected == 1 { "argument" } else { "arguments" };
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() takes {expected} {word} but {got} were given"),
    )
}

#[cold]
pub fn wrong_arg_range(func: &str, min: usize, max: usize, got: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() takes from {min} to {max} arguments but {got} were given"),
    )
}

#[cold]
pub fn too_few_args(func: &str, min: usize, got: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() takes at least {min} arguments but {got} were given"),
    )
}

#[cold]
pub fn missing_argument(func: &str, param: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() missing required argument: '{param}'"),
    )
}

#[cold]
pub fn unexpected_keyword(func: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() got an unexpected keyword argument '{name}'"),
    )
}

#[cold]
pub fn duplicate_argument(func: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{func}() got multiple values for argument '{name}'"),
    )
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::OverflowError,
        format!("maximum call depth of {limit} exceeded"),
    )
}

#[cold]
pub fn nesting_too_deep(operation: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OverflowError,
        format!("maximum nesting depth exceeded in {operation}"),
    )
}

// Control flow

#[cold]
pub fn unexpected_signal(what: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::SyntaxError,
        format!("unexpected statement: '{what}' outside of its enclosing construct"),
    )
}

// Unpacking

#[cold]
pub fn unpack_mismatch(expected: usize, got: usize) -> EvalError {
    let message = if got > expected {
        format!("too many values to unpack (expected {expected})")
    } else {
        format!("not enough values to unpack (expected {expected}, got {got})")
    };
    EvalError::new(ExceptionKind::ValueError, message)
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(ExceptionKind::ZeroDivisionError, "division by zero")
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::new(ExceptionKind::ZeroDivisionError, "integer modulo by zero")
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OverflowError,
        format!("integer overflow in {operation}"),
    )
}

#[cold]
pub fn negative_shift() -> EvalError {
    EvalError::new(ExceptionKind::ValueError, "negative shift count")
}

// Lookup

#[cold]
pub fn index_out_of_range(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::IndexError,
        format!("{type_name} index out of range"),
    )
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::new(ExceptionKind::KeyError, key.to_string())
}

// Modules

#[cold]
pub fn no_module_named(name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::ImportError,
        format!("no module named '{name}'"),
    )
}

#[cold]
pub fn imports_disabled(name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::ImportError,
        format!("cannot import '{name}': module imports are disabled"),
    )
}

// Values

#[cold]
pub fn value_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::ValueError, message)
}

#[cold]
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::TypeError, message)
}

#[cold]
pub fn math_domain_error() -> EvalError {
    value_error("math domain error")
}

#[cold]
pub fn math_range_error() -> EvalError {
    EvalError::new(ExceptionKind::OverflowError, "math range error")
}
