//! Script modules: the unit the host compiles, runs, and inspects.

use thiserror::Error;
use tracing::debug;
use wks_ir::Statement;
use wks_parse::{parse_module, ParseError};

use crate::builtins::builtins_scope;
use crate::errors::{attribute_not_allowed, readonly_attribute, unexpected_signal, EvalError, EvalResult};
use crate::exec::Signal;
use crate::interpreter::{Evaluator, Interpreter};
use crate::scope::{LocalScope, Scope};
use crate::Value;

/// Why a script could not be compiled or run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl ScriptError {
    /// Source line of the failure, or -1 when unknown.
    pub fn line(&self) -> i32 {
        match self {
            ScriptError::Syntax(err) => err.span.line,
            ScriptError::Runtime(err) => err.line(),
        }
    }

    pub fn column(&self) -> i32 {
        match self {
            ScriptError::Syntax(err) => err.span.column,
            ScriptError::Runtime(err) => err.column(),
        }
    }
}

/// A compiled script: its statements and its root scope.
///
/// The root scope's parent holds the built-ins, so [`public_variables`]
/// and [`get`] only ever see what the script itself bound.
///
/// [`public_variables`]: ScriptModule::public_variables
/// [`get`]: ScriptModule::get
#[derive(Debug)]
pub struct ScriptModule {
    name: String,
    statements: Vec<Statement>,
    scope: LocalScope<Scope>,
}

impl ScriptModule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Run the top-level statements in order against the root scope.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.name))]
    pub fn execute(&mut self, interpreter: &Interpreter) -> Result<(), EvalError> {
        let evaluator = Evaluator::for_module(interpreter, self.scope.clone(), &self.name);
        for statement in &self.statements {
            match evaluator.exec_statement(statement)? {
                Signal::None => {}
                signal => {
                    return Err(unexpected_signal(signal.keyword()).with_span(statement.span));
                }
            }
        }
        debug!(statements = self.statements.len(), "module executed");
        Ok(())
    }

    /// Read a module-level variable from outside. Private and absent names
    /// fail the same way.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        match self.scope.borrow().get_variable(name, true) {
            Ok(variable) if variable.public => Ok(variable.value),
            _ => Err(attribute_not_allowed("module", name)),
        }
    }

    /// Modules are read-only from outside.
    pub fn set(&self, name: &str, _value: Value) -> EvalResult<()> {
        Err(readonly_attribute("module", name))
    }

    /// Public module-level bindings, sorted by name.
    pub fn public_variables(&self) -> Vec<(String, Value)> {
        self.scope.borrow().public_variables()
    }
}

/// Parse `source` into a module named `name`, ready to execute.
pub fn compile(name: &str, source: &str) -> Result<ScriptModule, ScriptError> {
    let statements = parse_module(source)?;
    let builtins = LocalScope::new(builtins_scope());
    Ok(ScriptModule {
        name: name.to_string(),
        statements,
        scope: LocalScope::new(Scope::with_parent(builtins)),
    })
}

/// Compile and execute in one step.
pub fn run(name: &str, source: &str, interpreter: &Interpreter) -> Result<ScriptModule, ScriptError> {
    let mut module = compile(name, source)?;
    module.execute(interpreter)?;
    Ok(module)
}
