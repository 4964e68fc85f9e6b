//! Numeric literal parsing.

/// Parse an integer literal in decimal, `0x` hex, `0o` octal, or `0b`
/// binary. Underscore digit separators are ignored.
///
/// Returns `None` when the value does not fit in an `i64` or no digits
/// remain after the prefix.
pub fn parse_int(text: &str) -> Option<i64> {
    let (radix, digits) = match text.get(..2) {
        Some("0x" | "0X") => (16, &text[2..]),
        Some("0o" | "0O") => (8, &text[2..]),
        Some("0b" | "0B") => (2, &text[2..]),
        _ => (10, text),
    };
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    i64::from_str_radix(&cleaned, radix).ok()
}

/// Parse a float literal, ignoring underscore separators.
pub fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn radix_prefixes() {
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0o17"), Some(15));
        assert_eq!(parse_int("0b101"), Some(5));
        assert_eq!(parse_int("017"), Some(17));
        assert_eq!(parse_int("1_000"), Some(1000));
    }

    #[test]
    fn empty_and_overflowing_literals() {
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("0x_"), None);
        assert_eq!(parse_int("9223372036854775808"), None);
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("2.5E-3"), Some(0.0025));
        assert_eq!(parse_float("1_0.0"), Some(10.0));
    }

    proptest! {
        #[test]
        fn hex_literals_parse_to_value(n in 0..=i64::MAX) {
            prop_assert_eq!(parse_int(&format!("0x{n:x}")), Some(n));
        }

        #[test]
        fn octal_literals_parse_to_value(n in 0..=i64::MAX) {
            prop_assert_eq!(parse_int(&format!("0o{n:o}")), Some(n));
        }

        #[test]
        fn binary_literals_parse_to_value(n in 0..=i64::MAX) {
            prop_assert_eq!(parse_int(&format!("0b{n:b}")), Some(n));
        }

        #[test]
        fn decimal_literals_parse_to_value(n in 0..=i64::MAX) {
            prop_assert_eq!(parse_int(&n.to_string()), Some(n));
        }
    }
}
