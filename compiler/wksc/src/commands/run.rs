//! The `run` command: compile, execute, and report a script module.

use wks_eval::{compile, silent_handler, stdout_handler, Interpreter, ScriptError};

use super::{located, read_file, RunOptions};

/// Run a script file. `print` output goes to stdout (or nowhere with
/// `--quiet`); afterwards the module's public variables are listed.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let name = module_name(path);

    let mut module = match compile(&name, &source) {
        Ok(module) => module,
        Err(err) => exit_with(path, &err),
    };
    if options.dump_ast {
        println!("{:#?}", module.statements());
    }

    let handler = if options.quiet {
        silent_handler()
    } else {
        stdout_handler()
    };
    let interpreter = Interpreter::builder()
        .module_name(name.as_str())
        .max_depth(options.max_depth)
        .print_handler(handler)
        .build();

    if let Err(err) = module.execute(&interpreter) {
        exit_with(path, &ScriptError::Runtime(err));
    }

    let variables = module.public_variables();
    if !variables.is_empty() {
        println!();
        println!("Module '{}':", module.name());
        for (name, value) in variables {
            println!("  {name} = {}", value.repr());
        }
    }
}

/// The file stem, which is what pages use as the module name.
fn module_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("__main__")
        .to_string()
}

fn exit_with(path: &str, err: &ScriptError) -> ! {
    eprintln!("{}", located(path, err.line(), err.column(), &describe(err)));
    std::process::exit(1);
}

fn describe(err: &ScriptError) -> String {
    match err {
        ScriptError::Syntax(err) => format!("SyntaxError: {}", err.kind),
        ScriptError::Runtime(err) => format!("{}: {}", err.kind, err.message),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn module_name_is_the_file_stem() {
        assert_eq!(module_name("pages/Main_Page.wks"), "Main_Page");
        assert_eq!(module_name(""), "__main__");
    }

    fn failure(source: &str) -> ScriptError {
        let interpreter = Interpreter::builder()
            .print_handler(silent_handler())
            .build();
        match interpreter.run(source) {
            Err(err) => err,
            Ok(_) => panic!("script succeeded"),
        }
    }

    #[test]
    fn errors_are_described_by_class() {
        let err = failure("x = 1 // 0;");
        assert_eq!(describe(&err), "ZeroDivisionError: division by zero");

        let err = failure("x = ;");
        assert!(describe(&err).starts_with("SyntaxError: "));
    }
}
