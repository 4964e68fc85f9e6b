#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::str("").is_truthy());
    assert!(!Value::list(Vec::new()).is_truthy());
    assert!(Value::tuple(ints(&[0])).is_truthy());
    assert!(Value::Float(0.5).is_truthy());
}

#[test]
fn numeric_equality_crosses_int_and_float() {
    assert!(Value::Int(2).equals(&Value::Float(2.0)).unwrap());
    assert!(!Value::Int(1).equals(&Value::Bool(true)).unwrap());
    assert!(Value::list(ints(&[1, 2])).equals(&Value::list(ints(&[1, 2]))).unwrap());
    assert!(!Value::list(ints(&[1, 2])).equals(&Value::tuple(ints(&[1, 2]))).unwrap());
}

#[test]
fn identity_of_shared_objects() {
    let a = Value::list(Vec::new());
    let b = a.clone();
    assert!(a.is_same(&b));
    assert!(!a.is_same(&Value::list(Vec::new())));
    assert!(Value::Null.is_same(&Value::Null));
}

#[test]
fn sequence_ordering_is_lexicographic() {
    let a = Value::tuple(ints(&[1, 2]));
    let b = Value::tuple(ints(&[1, 3]));
    assert_eq!(a.compare(&b).unwrap(), Some(Ordering::Less));
    assert_eq!(
        Value::str("b").compare(&Value::str("a")).unwrap(),
        Some(Ordering::Greater)
    );
    assert_eq!(Value::str("a").compare(&Value::Int(1)).unwrap(), None);
}

fn self_containing_list() -> Value {
    let list = Value::list(vec![Value::Int(1)]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    list
}

#[test]
fn self_containing_list_equals_itself() {
    let a = self_containing_list();
    assert!(a.equals(&a.clone()).unwrap());
    assert_eq!(a.compare(&a.clone()).unwrap(), Some(Ordering::Equal));
}

#[test]
fn distinct_cyclic_lists_overflow_instead_of_recursing() {
    let a = self_containing_list();
    let b = self_containing_list();
    let err = a.equals(&b).unwrap_err();
    assert_eq!(err.kind, ExceptionKind::OverflowError);
    assert_eq!(err.message, "maximum nesting depth exceeded in comparison");
    assert_eq!(a.compare(&b).unwrap_err().kind, ExceptionKind::OverflowError);
    assert!(a != b);
}

#[test]
fn cyclic_dicts_overflow_instead_of_recursing() {
    let make = || {
        let dict = Value::dict(DictMap::new());
        if let Value::Dict(map) = &dict {
            map.borrow_mut().insert(HashKey::Str("me".into()), dict.clone());
        }
        dict
    };
    let (a, b) = (make(), make());
    assert!(a.equals(&a.clone()).unwrap());
    assert_eq!(a.equals(&b).unwrap_err().kind, ExceptionKind::OverflowError);
}

#[test]
fn deep_but_finite_nesting_still_compares() {
    let nest = || {
        let mut value = Value::Int(0);
        for _ in 0..400 {
            value = Value::list(vec![value]);
        }
        value
    };
    assert!(nest().equals(&nest()).unwrap());
    assert_eq!(nest().compare(&nest()).unwrap(), Some(Ordering::Equal));
}

#[test]
fn hash_keys_normalise_integral_floats() {
    let one = HashKey::from_value(&Value::Int(1)).ok();
    let one_float = HashKey::from_value(&Value::Float(1.0)).ok();
    assert_eq!(one, one_float);
    assert!(HashKey::from_value(&Value::list(Vec::new())).is_err());
    let nested = Value::tuple(vec![Value::Int(1), Value::str("a")]);
    assert!(HashKey::from_value(&nested).is_ok());
}

#[test]
fn repr_forms() {
    assert_eq!(Value::Null.repr(), "null");
    assert_eq!(Value::Bool(true).repr(), "true");
    assert_eq!(Value::Float(1.0).repr(), "1.0");
    assert_eq!(Value::Float(1e20).repr(), "1e+20");
    assert_eq!(Value::Float(1.5e-7).repr(), "1.5e-07");
    assert_eq!(Value::str("it's").repr(), "\"it's\"");
    assert_eq!(Value::str("a\nb").repr(), "'a\\nb'");
    assert_eq!(Value::tuple(ints(&[1])).repr(), "(1,)");
    assert_eq!(Value::set(SetItems::new()).repr(), "set()");
    let dict = Value::str_dict([("b", Value::Int(2)), ("a", Value::Int(1))]);
    assert_eq!(dict.repr(), "{'a': 1, 'b': 2}");
}

#[test]
fn str_of_string_is_unquoted() {
    assert_eq!(Value::str("hi").to_str(), "hi");
    assert_eq!(Value::list(vec![Value::str("hi")]).to_str(), "['hi']");
}

#[test]
fn self_referencing_list_renders() {
    let list = Value::list(Vec::new());
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    assert!(list.repr().contains("..."));
}

#[test]
fn iterating_a_string_yields_characters() {
    let chars = Value::str("ab").to_vec().unwrap_or_default();
    assert_eq!(chars, vec![Value::str("a"), Value::str("b")]);
}

#[test]
fn iterating_a_range_is_lazy() {
    let range = Value::Range(RangeValue { start: 0, stop: i64::MAX, step: 1 });
    let first: Vec<Value> = range.iter().map(|it| it.take(3).collect()).unwrap_or_default();
    assert_eq!(first, ints(&[0, 1, 2]));
}
