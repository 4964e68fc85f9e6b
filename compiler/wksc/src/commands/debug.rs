//! Debug commands: `parse` and `lex` for inspecting front-end output.

use wks_lexer::lex;
use wks_parse::{parse, parse_module};

use super::{located, read_file, ParseOptions};

/// Parse a file and print its syntax tree, or the typed AST with
/// `--dump-ast`.
pub fn parse_file(path: &str, options: &ParseOptions) {
    let source = read_file(path);
    if options.dump_ast {
        match parse_module(&source) {
            Ok(statements) => {
                println!("AST for '{path}' ({} statements):", statements.len());
                println!("{statements:#?}");
            }
            Err(err) => fail(path, err.line(), err.column(), &err.to_string()),
        }
        return;
    }
    match parse(&source) {
        Ok(tree) => {
            println!("Syntax tree for '{path}':");
            println!("{tree}");
        }
        Err(err) => fail(path, err.line(), err.column(), &err.to_string()),
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    match lex(&source) {
        Ok(tokens) => {
            println!("Tokens for '{}' ({} tokens):", path, tokens.len());
            for token in &tokens {
                println!("  {:?} @ {}", token.kind, token.span);
            }
        }
        Err(err) => fail(path, err.span.line, err.span.column, &err.to_string()),
    }
}

fn fail(path: &str, line: i32, column: i32, message: &str) -> ! {
    eprintln!("{}", located(path, line, column, message));
    std::process::exit(1);
}
