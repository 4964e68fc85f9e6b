//! Lexical scopes for the evaluator.
//!
//! A [`Scope`] maps names to [`Variable`]s and links to its parent. Scopes
//! are shared through [`LocalScope`]: a function value and the frame that
//! defined it may both hold the same scope. Borrows are never held across
//! evaluation, so the `RefCell` inside cannot be re-entered.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{cannot_delete_outer, undefined_variable, EvalResult};
use crate::Value;

/// A single-threaded shared scope handle.
#[derive(Debug)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same scope.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A bound name.
#[derive(Clone, Debug)]
pub struct Variable {
    pub value: Value,
    /// Fixed when the name is first bound: `false` for `_`-prefixed names.
    pub public: bool,
}

impl Variable {
    pub fn new(name: &str, value: Value) -> Self {
        Variable {
            value,
            public: !name.starts_with('_'),
        }
    }
}

/// One lexical environment.
#[derive(Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Variable>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            variables: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Whether `name` resolves here or in any ancestor.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().contains(name))
    }

    /// Resolve `name`, walking the parent chain unless `current_only`.
    pub fn get_variable(&self, name: &str, current_only: bool) -> EvalResult<Variable> {
        if let Some(variable) = self.variables.get(name) {
            return Ok(variable.clone());
        }
        match &self.parent {
            Some(parent) if !current_only => parent.borrow().get_variable(name, false),
            _ => Err(undefined_variable(name)),
        }
    }

    /// Value bound to `name`.
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.get_variable(name, false).map(|variable| variable.value)
    }

    /// Bind `name` in this scope. An existing local binding keeps its
    /// visibility; outer bindings are shadowed, never written through.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        match self.variables.get_mut(name) {
            Some(variable) => variable.value = value,
            None => {
                self.variables
                    .insert(name.to_string(), Variable::new(name, value));
            }
        }
    }

    /// Unbind a local name. Names visible only through a parent cannot be
    /// deleted from here.
    pub fn delete_variable(&mut self, name: &str) -> EvalResult<()> {
        if self.variables.remove(name).is_some() {
            return Ok(());
        }
        let in_parent = self
            .parent
            .as_ref()
            .is_some_and(|parent| parent.borrow().contains(name));
        if in_parent {
            Err(cannot_delete_outer(name))
        } else {
            Err(undefined_variable(name))
        }
    }

    /// Shallow copy: fresh bindings over the same values and parent.
    #[must_use]
    pub fn copy(&self) -> Scope {
        Scope {
            variables: self.variables.clone(),
            parent: self.parent.clone(),
        }
    }

    /// Public local bindings, sorted by name.
    pub fn public_variables(&self) -> Vec<(String, Value)> {
        let mut public: Vec<(String, Value)> = self
            .variables
            .iter()
            .filter(|(_, variable)| variable.public)
            .map(|(name, variable)| (name.clone(), variable.value.clone()))
            .collect();
        public.sort_by(|a, b| a.0.cmp(&b.0));
        public
    }
}

#[cfg(test)]
mod tests;
