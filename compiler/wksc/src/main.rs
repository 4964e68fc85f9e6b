//! WikiScript CLI
//!
//! Runs scripts the way a page renderer would, plus inspection commands
//! for the lexer, parser and module registry.

mod commands;
mod tracing_setup;

use commands::{lex_file, list_modules, parse_file, run_file, ParseOptions, RunOptions};

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (path, options) = match RunOptions::parse(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: wks run <file.wks> [--max-depth=N] [--quiet] [--dump-ast]");
                    std::process::exit(1);
                }
            };
            run_file(&path, &options);
        }
        "parse" => {
            let (path, options) = match ParseOptions::parse(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: wks parse <file.wks> [--dump-ast]");
                    std::process::exit(1);
                }
            };
            parse_file(&path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: wks lex <file.wks>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "modules" => {
            list_modules(args.get(2).map(String::as_str));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("WikiScript {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare script path runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wks"))
            {
                run_file(command, &RunOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("WikiScript");
    println!();
    println!("Usage: wks <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.wks>       Execute a script and print its public variables");
    println!("  parse <file.wks>     Parse and display the syntax tree");
    println!("  lex <file.wks>       Tokenize and display tokens");
    println!("  modules [name]       List built-in modules, or one module's members");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=N        Call depth limit (default: 500)");
    println!("  --quiet, -q          Discard print() output");
    println!("  --dump-ast           Print the typed AST before running");
    println!();
    println!("Parse options:");
    println!("  --dump-ast           Print the typed AST instead of the syntax tree");
    println!();
    println!("Logging is off unless RUST_LOG is set, e.g. RUST_LOG=wks_eval=debug.");
    println!();
    println!("Examples:");
    println!("  wks run page.wks");
    println!("  wks run page.wks --max-depth=100 --quiet");
    println!("  wks parse page.wks --dump-ast");
    println!("  wks modules html.entities");
}
