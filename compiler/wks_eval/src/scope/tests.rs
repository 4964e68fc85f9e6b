#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::ExceptionKind;
use pretty_assertions::assert_eq;

fn child_of(parent: &LocalScope<Scope>) -> LocalScope<Scope> {
    LocalScope::new(Scope::with_parent(parent.clone()))
}

#[test]
fn set_then_get() {
    let mut scope = Scope::new();
    scope.set_variable("x", Value::Int(42));
    assert_eq!(scope.lookup("x").unwrap(), Value::Int(42));
    assert!(scope.contains("x"));
    assert!(!scope.contains("y"));
}

#[test]
fn lookup_walks_parents() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().set_variable("x", Value::Int(1));
    let child = child_of(&parent);

    assert_eq!(child.borrow().lookup("x").unwrap(), Value::Int(1));
    let err = child.borrow().get_variable("x", true).unwrap_err();
    assert_eq!(err.kind, ExceptionKind::NameError);
}

#[test]
fn child_assignment_shadows_parent() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().set_variable("x", Value::Int(1));
    let child = child_of(&parent);
    child.borrow_mut().set_variable("x", Value::Int(2));

    assert_eq!(child.borrow().lookup("x").unwrap(), Value::Int(2));
    assert_eq!(parent.borrow().lookup("x").unwrap(), Value::Int(1));
}

#[test]
fn visibility_follows_leading_underscore() {
    let mut scope = Scope::new();
    scope.set_variable("shown", Value::Int(1));
    scope.set_variable("_hidden", Value::Int(2));

    assert!(scope.get_variable("shown", true).unwrap().public);
    assert!(!scope.get_variable("_hidden", true).unwrap().public);
    assert_eq!(
        scope.public_variables(),
        vec![("shown".to_string(), Value::Int(1))]
    );
}

#[test]
fn rebinding_keeps_visibility() {
    let mut scope = Scope::new();
    scope.set_variable("_x", Value::Int(1));
    scope.set_variable("_x", Value::Int(2));
    let variable = scope.get_variable("_x", true).unwrap();
    assert_eq!(variable.value, Value::Int(2));
    assert!(!variable.public);
}

#[test]
fn delete_local() {
    let mut scope = Scope::new();
    scope.set_variable("x", Value::Int(1));
    scope.delete_variable("x").unwrap();
    assert!(!scope.contains("x"));
    assert_eq!(
        scope.delete_variable("x").unwrap_err().kind,
        ExceptionKind::NameError
    );
}

#[test]
fn delete_outer_is_rejected() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().set_variable("x", Value::Int(1));
    let child = child_of(&parent);

    let err = child.borrow_mut().delete_variable("x").unwrap_err();
    assert_eq!(err.kind, ExceptionKind::NameError);
    assert!(err.message.contains("enclosing scope"));
    assert!(parent.borrow().contains("x"));
}

#[test]
fn copy_is_detached_from_later_bindings() {
    let parent = LocalScope::new(Scope::new());
    let original = child_of(&parent);
    original.borrow_mut().set_variable("x", Value::Int(1));

    let copied = LocalScope::new(original.borrow().copy());
    original.borrow_mut().set_variable("x", Value::Int(2));
    original.borrow_mut().set_variable("y", Value::Int(3));

    assert_eq!(copied.borrow().lookup("x").unwrap(), Value::Int(1));
    assert!(!copied.borrow().contains("y"));
    assert!(copied.borrow().parent().unwrap().ptr_eq(&parent));
}

#[test]
fn copy_shares_mutable_values() {
    let mut scope = Scope::new();
    let items = Value::list(vec![]);
    scope.set_variable("items", items.clone());
    let copied = scope.copy();

    if let Value::List(list) = &items {
        list.borrow_mut().push(Value::Int(1));
    }
    assert_eq!(
        copied.lookup("items").unwrap(),
        Value::list(vec![Value::Int(1)])
    );
}

#[test]
fn local_scope_clone_shares_allocation() {
    let first = LocalScope::new(Scope::new());
    let second = first.clone();
    first.borrow_mut().set_variable("x", Value::Null);
    assert!(second.borrow().contains("x"));
    assert!(first.ptr_eq(&second));
}
