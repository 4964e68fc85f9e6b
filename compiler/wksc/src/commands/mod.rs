//! Command handlers for the WikiScript CLI.
//!
//! Each submodule implements one command. Option parsing and `read_file`
//! live here.

mod debug;
mod modules;
mod run;

pub use debug::{lex_file, parse_file};
pub use modules::list_modules;
pub use run::run_file;

use wks_eval::DEFAULT_MAX_DEPTH;

/// Options for `wks run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub max_depth: usize,
    pub quiet: bool,
    pub dump_ast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            quiet: false,
            dump_ast: false,
        }
    }
}

impl RunOptions {
    /// Parse the arguments after `run`: one path plus flags in any order.
    pub fn parse(args: &[String]) -> Result<(String, RunOptions), String> {
        let mut options = RunOptions::default();
        let mut path = None;
        for arg in args {
            if let Some(depth) = arg.strip_prefix("--max-depth=") {
                options.max_depth = depth
                    .parse()
                    .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            } else if arg == "--quiet" || arg == "-q" {
                options.quiet = true;
            } else if arg == "--dump-ast" {
                options.dump_ast = true;
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }
        let path = path.ok_or_else(|| "missing file path".to_string())?;
        Ok((path, options))
    }
}

/// Options for `wks parse`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub dump_ast: bool,
}

impl ParseOptions {
    pub fn parse(args: &[String]) -> Result<(String, ParseOptions), String> {
        let mut options = ParseOptions::default();
        let mut path = None;
        for arg in args {
            if arg == "--dump-ast" {
                options.dump_ast = true;
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }
        let path = path.ok_or_else(|| "missing file path".to_string())?;
        Ok((path, options))
    }
}

/// Read a source file, exiting with a readable message on failure.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// `path:line:column: message`, omitting an unknown position.
pub(super) fn located(path: &str, line: i32, column: i32, message: &str) -> String {
    if line >= 0 && column >= 0 {
        format!("{path}:{line}:{column}: {message}")
    } else {
        format!("{path}: {message}")
    }
}
