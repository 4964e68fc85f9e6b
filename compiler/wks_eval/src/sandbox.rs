//! Attribute-access policy.
//!
//! Every property read or write from script code passes through
//! [`check_attribute`] first. A denied name and a genuinely missing one
//! produce the same error, so scripts cannot probe for internals.

use crate::errors::{attribute_not_allowed, EvalResult};

/// Introspection names exempt from the underscore rule.
const ALLOWED_DUNDERS: [&str; 2] = ["__name__", "__qualname__"];

/// Whether scripts may touch an attribute called `name`.
pub fn is_attribute_allowed(name: &str) -> bool {
    !name.starts_with('_') || ALLOWED_DUNDERS.contains(&name)
}

/// Gate a property access on a value of type `type_name`.
pub fn check_attribute(type_name: &str, name: &str) -> EvalResult<()> {
    if is_attribute_allowed(name) {
        Ok(())
    } else {
        Err(attribute_not_allowed(type_name, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExceptionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn underscore_names_are_denied() {
        assert!(!is_attribute_allowed("_private"));
        assert!(!is_attribute_allowed("__class__"));
        assert!(!is_attribute_allowed("__dict__"));
        assert!(is_attribute_allowed("upper"));
    }

    #[test]
    fn introspection_names_are_allowed() {
        assert!(is_attribute_allowed("__name__"));
        assert!(is_attribute_allowed("__qualname__"));
    }

    #[test]
    fn denial_matches_missing_attribute_shape() {
        let denied = check_attribute("str", "_secret").err();
        let missing = crate::errors::attribute_not_allowed("str", "_secret");
        assert_eq!(denied, Some(missing));
        assert_eq!(
            check_attribute("list", "__class__").map_err(|e| e.kind),
            Err(ExceptionKind::AttributeError)
        );
    }
}
