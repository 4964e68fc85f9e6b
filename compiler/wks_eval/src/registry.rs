//! Built-in module registry.
//!
//! A process-wide, immutable table of module descriptors. Descriptors hold
//! only `fn` pointers and static names, so the table is `Send + Sync`;
//! [`ModuleRegistry::get_module`] materialises a fresh module value per call
//! and no script ever observes another script's module state.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{no_module_named, EvalResult};
use crate::modules;
use crate::value::{BuiltinFn, BuiltinFunction, ModuleValue, Value};

/// What a module member is bound to.
#[derive(Copy, Clone)]
pub enum MemberKind {
    Function(BuiltinFn),
    /// Constants are rebuilt per materialisation; values are not `Sync`.
    Constant(fn() -> Value),
    /// Another registered module, by full dotted name.
    Submodule(&'static str),
}

#[derive(Copy, Clone)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
}

impl Member {
    pub const fn function(name: &'static str, func: BuiltinFn) -> Self {
        Member {
            name,
            kind: MemberKind::Function(func),
        }
    }

    pub const fn constant(name: &'static str, value: fn() -> Value) -> Self {
        Member {
            name,
            kind: MemberKind::Constant(value),
        }
    }

    pub const fn submodule(name: &'static str, path: &'static str) -> Self {
        Member {
            name,
            kind: MemberKind::Submodule(path),
        }
    }
}

/// The allow-listed members of one built-in module.
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub members: &'static [Member],
}

/// Global registry of built-in modules.
pub struct ModuleRegistry {
    modules: FxHashMap<&'static str, ModuleDescriptor>,
}

impl ModuleRegistry {
    fn new() -> Self {
        let mut modules = FxHashMap::default();
        for descriptor in modules::descriptors() {
            modules.insert(descriptor.name, descriptor);
        }
        debug!(modules = modules.len(), "built-in module registry initialised");
        ModuleRegistry { modules }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered module names, sorted.
    pub fn module_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.modules.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Member names of a registered module, in declaration order.
    pub fn member_names(&self, name: &str) -> Option<Vec<&'static str>> {
        self.modules
            .get(name)
            .map(|descriptor| descriptor.members.iter().map(|m| m.name).collect())
    }

    /// Build a fresh module value for `name`.
    pub fn get_module(&self, name: &str) -> EvalResult {
        let descriptor = self.modules.get(name).ok_or_else(|| no_module_named(name))?;
        let mut members = BTreeMap::new();
        for member in descriptor.members {
            let value = match member.kind {
                MemberKind::Function(func) => Value::Builtin(BuiltinFunction {
                    name: member.name,
                    module: Some(descriptor.name),
                    func,
                }),
                MemberKind::Constant(make) => make(),
                MemberKind::Submodule(path) => self.get_module(path)?,
            };
            members.insert(member.name.to_string(), value);
        }
        debug!(module = name, members = members.len(), "materialised module");
        Ok(Value::module(ModuleValue {
            name: descriptor.name.to_string(),
            members,
        }))
    }
}

static REGISTRY: OnceLock<ModuleRegistry> = OnceLock::new();

/// The process-wide registry, built on first use.
pub fn registry() -> &'static ModuleRegistry {
    REGISTRY.get_or_init(ModuleRegistry::new)
}
