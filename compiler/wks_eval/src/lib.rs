//! WikiScript Eval - tree-walking interpreter and runtime for WikiScript.
//!
//! # Architecture
//!
//! - `Scope` / `LocalScope`: lexical environments with parent chaining
//! - `CallStack`: depth-bounded frame chain for recursion limiting
//! - `Evaluator`: executes statements and evaluates expressions
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `methods`: per-variant property and method tables behind the sandbox
//! - `registry`: process-wide table of built-in modules
//! - `ScriptModule`: a compiled script, its root scope, and the host view
//!   of its public variables
//!
//! # Example
//!
//! ```
//! use wks_eval::{buffer_handler, Interpreter};
//!
//! let interpreter = Interpreter::builder()
//!     .print_handler(buffer_handler())
//!     .build();
//! let module = interpreter.run("total = 2 + 3; print(total);").unwrap();
//! assert_eq!(interpreter.output(), "5\n");
//! assert_eq!(module.get("total").unwrap().repr(), "5");
//! ```

mod builtins;
mod call_stack;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod methods;
mod module;
mod modules;
mod operators;
mod print_handler;
pub mod registry;
mod sandbox;
mod scope;
mod unary_operators;
pub mod value;

pub use builtins::{builtin_names, builtins_scope};
pub use call_stack::{CallStack, DEFAULT_MAX_DEPTH};
pub use errors::{EvalError, EvalResult, ExceptionKind};
pub use interpreter::{Evaluator, Interpreter, InterpreterBuilder};
pub use module::{compile, run, ScriptError, ScriptModule};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use registry::registry;
pub use sandbox::{check_attribute, is_attribute_allowed};
pub use scope::{LocalScope, Scope, Variable};
pub use unary_operators::evaluate_unary;
pub use value::Value;
