//! Binary, logical, unary, and assignment operators.
//!
//! The transformer resolves operator tokens through the `from_symbol`
//! tables below; the evaluator dispatches on the resulting enum with a
//! single `match` per value pair.

/// Binary operators (both operands always evaluated).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Identity and membership
    Is,
    IsNot,
    In,
    NotIn,
}

impl BinaryOp {
    /// Look up a binary operator by its source symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "//" => Self::FloorDiv,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "is" => Self::Is,
            "is not" => Self::IsNot,
            "in" => Self::In,
            "not in" => Self::NotIn,
            _ => return None,
        };
        Some(op)
    }

    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    /// Whether this operator compares its operands (result is always a bool).
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::Is
                | Self::IsNot
                | Self::In
                | Self::NotIn
        )
    }
}

/// Short-circuit boolean operators.
///
/// Kept apart from [`BinaryOp`] because the right operand is only
/// evaluated when the left one does not decide the result.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    BitNot,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Neg),
            "~" => Some(Self::BitNot),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::BitNot => "~",
            Self::Not => "not",
        }
    }
}

/// Assignment operators: plain `=` or a compound `op=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
}

impl AssignOp {
    /// Look up an assignment operator by its source symbol.
    ///
    /// Only the thirteen assignment forms of the grammar are accepted; `===`
    /// style near-misses and comparison operators return `None`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        if symbol == "=" {
            return Some(Self::Assign);
        }
        let base = symbol.strip_suffix('=')?;
        let op = BinaryOp::from_symbol(base)?;
        match op {
            BinaryOp::Pow
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::FloorDiv
            | BinaryOp::Mod
            | BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr => Some(Self::Compound(op)),
            _ => None,
        }
    }

    /// The in-place operator applied before writing back, if any.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::Compound(op) => Some(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binary_symbols_round_trip() {
        for symbol in ["+", "//", "**", "<<", "is not", "not in", ">="] {
            let op = BinaryOp::from_symbol(symbol);
            assert_eq!(op.map(BinaryOp::as_symbol), Some(symbol));
        }
        assert_eq!(BinaryOp::from_symbol("and"), None);
    }

    #[test]
    fn assignment_operators() {
        assert_eq!(AssignOp::from_symbol("="), Some(AssignOp::Assign));
        assert_eq!(
            AssignOp::from_symbol("//="),
            Some(AssignOp::Compound(BinaryOp::FloorDiv))
        );
        assert_eq!(
            AssignOp::from_symbol(">>="),
            Some(AssignOp::Compound(BinaryOp::Shr))
        );
        assert_eq!(AssignOp::from_symbol("=="), None);
        assert_eq!(AssignOp::from_symbol("<="), None);
    }

    #[test]
    fn all_thirteen_assignment_forms_resolve() {
        let symbols = [
            "=", "**=", "*=", "/=", "//=", "%=", "+=", "-=", "&=", "|=", "^=", "<<=", ">>=",
        ];
        for symbol in symbols {
            assert!(AssignOp::from_symbol(symbol).is_some(), "{symbol}");
        }
    }

    #[test]
    fn comparison_classification() {
        assert!(BinaryOp::In.is_comparison());
        assert!(!BinaryOp::Pow.is_comparison());
    }
}
