//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! [`Interpreter`] holds host configuration and outlives every run; it is
//! read-only during evaluation. [`Evaluator`] is the per-frame state: the
//! current scope and call stack. A function call builds a fresh
//! `Evaluator` over a child scope of the callee's closure and a pushed
//! call stack, so nothing is restored on return.
//!
//! Statement and expression rules live in `crate::exec`:
//!
//! - `exec::stmt` - statements and control signals
//! - `exec::expr` - expressions, indexing, literals
//! - `exec::call` - function calls, argument binding
//! - `exec::assign` - assignment targets and unpacking

mod builder;

pub use builder::InterpreterBuilder;

use crate::call_stack::{CallStack, DEFAULT_MAX_DEPTH};
use crate::errors::{imports_disabled, EvalResult};
use crate::module::{compile, ScriptError, ScriptModule};
use crate::print_handler::SharedPrintHandler;
use crate::registry::registry;
use crate::scope::{LocalScope, Scope};
use crate::Value;

/// Host-side interpreter configuration.
pub struct Interpreter {
    pub(crate) module_name: String,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) max_depth: usize,
    pub(crate) imports_enabled: bool,
}

impl Interpreter {
    /// An interpreter printing to stdout with the default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Default name for modules run through [`Interpreter::run`].
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn imports_enabled(&self) -> bool {
        self.imports_enabled
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Text printed so far (buffer handler only).
    pub fn output(&self) -> String {
        self.print_handler.get_output()
    }

    /// Write text through the print handler.
    pub fn print(&self, text: &str) {
        self.print_handler.print(text);
    }

    /// Compile and execute `source` under the configured module name.
    pub fn run(&self, source: &str) -> Result<ScriptModule, ScriptError> {
        let mut module = compile(&self.module_name, source)?;
        module.execute(self)?;
        Ok(module)
    }

    /// Materialise a built-in module, honouring the import switch.
    pub fn import_module(&self, name: &str) -> EvalResult {
        if !self.imports_enabled {
            return Err(imports_disabled(name));
        }
        registry().get_module(name)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Evaluation state for one frame.
pub struct Evaluator<'a> {
    pub(crate) interpreter: &'a Interpreter,
    pub(crate) scope: LocalScope<Scope>,
    pub(crate) stack: CallStack,
}

impl<'a> Evaluator<'a> {
    pub fn new(interpreter: &'a Interpreter, scope: LocalScope<Scope>, stack: CallStack) -> Self {
        Evaluator {
            interpreter,
            scope,
            stack,
        }
    }

    /// Evaluator for a module's top level.
    pub fn for_module(
        interpreter: &'a Interpreter,
        scope: LocalScope<Scope>,
        module_name: &str,
    ) -> Self {
        let stack = CallStack::root(module_name, interpreter.max_depth);
        Evaluator::new(interpreter, scope, stack)
    }

    pub fn interpreter(&self) -> &'a Interpreter {
        self.interpreter
    }

    pub fn scope(&self) -> &LocalScope<Scope> {
        &self.scope
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// Same frame, different scope.
    pub(crate) fn with_scope(&self, scope: LocalScope<Scope>) -> Evaluator<'a> {
        Evaluator::new(self.interpreter, scope, self.stack.clone())
    }

    /// Bind `name` in the current scope.
    pub fn define(&self, name: &str, value: Value) {
        self.scope.borrow_mut().set_variable(name, value);
    }

    pub fn lookup(&self, name: &str) -> EvalResult {
        self.scope.borrow().lookup(name)
    }
}

pub(crate) fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[cfg(test)]
mod tests;
