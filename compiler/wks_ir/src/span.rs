//! Source positions.
//!
//! Script errors are reported to page authors as line/column pairs, so the
//! AST stores those directly instead of byte ranges.

use std::fmt;

/// A 1-based line/column position in script source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Span {
    pub line: i32,
    pub column: i32,
}

impl Span {
    /// Position used for nodes with no defining token (bare `break`,
    /// `continue`, boolean and null literals).
    pub const SYNTHETIC: Span = Span {
        line: -1,
        column: -1,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(line: i32, column: i32) -> Self {
        Span { line, column }
    }

    /// Returns `true` unless this is [`Span::SYNTHETIC`].
    #[inline]
    pub const fn is_known(self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::SYNTHETIC
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_span_is_unknown() {
        assert!(!Span::SYNTHETIC.is_known());
        assert!(Span::new(1, 1).is_known());
        assert_eq!(Span::default(), Span::SYNTHETIC);
    }

    #[test]
    fn display_names_line_and_column() {
        assert_eq!(Span::new(3, 14).to_string(), "line 3, column 14");
    }
}
