//! A tree-walking interpreter for Lox, a small dynamically typed scripting
//! language with C-like syntax, lexical scoping and short-circuit logic.
//!
//! The pipeline is [`tokenize`] → [`parse`] → [`interpret`]; each stage
//! returns the first error it hits. The binary target layers a file runner
//! and an interactive session on top of these entry points.

pub mod ast;
pub mod builtin;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;

pub use ast::{Expr, Literal, Program, Stmt, Value};
pub use error::{LexError, LoxError, ParseError, RuntimeError};
pub use interpreter::Interpreter;
pub use lexer::{Token, TokenKind};

/// Scans source text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    lexer::Lexer::new(source).tokenize()
}

/// Parses a token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    parser::Parser::new(tokens).parse()
}

/// Runs a program against a fresh interpreter.
pub fn interpret(program: &Program) -> Result<(), RuntimeError> {
    Interpreter::new().interpret(program)
}
