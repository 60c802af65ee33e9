//! Interactive session driver.
//!
//! Reads one line at a time, keeps interpreter state across lines and
//! understands a few `.`-prefixed meta-commands alongside ordinary Lox input.
//! Errors are printed and the session continues; only `.exit` or end of input
//! ends it.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::config::Config;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::printer;

const META_HELP: &str = "\
.help       show this help
.env        dump the environment chain
.newscope   push a fresh scope
.endscope   pop the current scope
.ast        toggle echoing the parsed tree before running
.exit       leave the session";

pub struct Repl {
    interpreter: Interpreter,
    config: Config,
}

impl Repl {
    pub fn new(config: Config) -> Self {
        Self {
            interpreter: Interpreter::new(),
            config,
        }
    }

    /// Runs until `.exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("{}", self.config.prompt);
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break; // end of input
            };
            let line = line?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if line == ".exit" {
                break;
            }
            if line.starts_with('.') {
                self.meta_command(line);
                continue;
            }
            self.run_line(line);
        }

        Ok(())
    }

    fn meta_command(&mut self, command: &str) {
        match command {
            ".help" => println!("{}", META_HELP),
            ".env" => print!("{}", self.interpreter.environment()),
            ".newscope" => self.interpreter.push_scope(),
            ".endscope" => {
                if let Err(err) = self.interpreter.pop_scope() {
                    eprintln!("{}", err);
                }
            }
            ".ast" => {
                self.config.show_ast = !self.config.show_ast;
                println!(
                    "ast echo {}",
                    if self.config.show_ast { "on" } else { "off" }
                );
                if let Err(err) = self.config.save() {
                    warn!("cannot save config: {}", err);
                }
            }
            other => eprintln!("unknown command '{}', try .help", other),
        }
    }

    fn run_line(&mut self, line: &str) {
        let tokens = match Lexer::new(line).tokenize() {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };

        let program = match Parser::new(tokens).parse() {
            Ok(program) => program,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };

        if self.config.show_ast {
            print!("{}", printer::format_program(&program));
            println!("=================================");
        }

        if let Err(err) = self.interpreter.interpret(&program) {
            eprintln!("{}", err);
        }
    }
}
