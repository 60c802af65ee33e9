//! Command-line entry point: run a Lox script file, or start the interactive
//! session when no script is given. Exit code is 0 on success and 1 on any
//! reported error.

use std::{env, fs, process};

use log::debug;

use rlox::config::Config;
use rlox::error::LoxError;
use rlox::repl::Repl;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut verbose = false;
    let mut script: Option<&str> = None;

    for arg in &args {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
            other if script.is_none() => script = Some(other),
            _ => {
                eprintln!("expected at most one script");
                print_usage();
                process::exit(1);
            }
        }
    }

    let level = if verbose { log::Level::Debug } else { log::Level::Warn };
    let _ = simple_logger::init_with_level(level);

    match script {
        Some(path) => {
            if let Err(err) = run_file(path) {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
        None => {
            if let Err(err) = Repl::new(Config::load()).run() {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("rlox - Lox interpreter");
    println!();
    println!("Usage:");
    println!("  rlox                 Start an interactive session");
    println!("  rlox <script>        Run a Lox script");
    println!();
    println!("Options:");
    println!("  -v, --verbose        Enable debug logging");
    println!("  -h, --help           Show this help");
}

fn run_file(path: &str) -> Result<(), LoxError> {
    let source = fs::read_to_string(path)?;

    let tokens = rlox::tokenize(&source)?;
    debug!("scanned {} token(s)", tokens.len());

    let program = rlox::parse(tokens)?;
    debug!("parsed {} statement(s)", program.statements.len());

    rlox::interpret(&program)?;
    Ok(())
}
