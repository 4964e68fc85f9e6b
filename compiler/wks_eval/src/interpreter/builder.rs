//! `InterpreterBuilder` for creating [`Interpreter`] instances.

use super::{default_max_depth, Interpreter};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: module name `"__main__"`, output to stdout, a call depth of
/// 500 frames, built-in modules importable.
pub struct InterpreterBuilder {
    module_name: String,
    print_handler: Option<SharedPrintHandler>,
    max_depth: usize,
    imports_enabled: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            module_name: "__main__".to_string(),
            print_handler: None,
            max_depth: default_max_depth(),
            imports_enabled: true,
        }
    }

    #[must_use]
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Where `print` output goes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum call depth, counting the module frame. Clamped to at least 1.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Whether `import_module` may load built-in modules.
    #[must_use]
    pub fn imports_enabled(mut self, enabled: bool) -> Self {
        self.imports_enabled = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            module_name: self.module_name,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_depth: self.max_depth,
            imports_enabled: self.imports_enabled,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder::new()
    }
}
