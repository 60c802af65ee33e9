//! Error types for the interpreter pipeline.
//!
//! Each pipeline stage owns one error family: [`LexError`] from tokenization,
//! [`ParseError`] from syntax analysis and [`RuntimeError`] from execution.
//! [`LoxError`] wraps all three (plus I/O) for the binary, which only needs to
//! report whatever the pipeline surfaced first.

use std::error::Error;
use std::fmt;
use std::io;

use crate::lexer::Token;

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    MalformedNumber,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub span: (usize, usize),
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, span: (usize, usize)) -> Self {
        Self { kind, line, span }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(c) => {
                write!(f, "lex error: unexpected character '{}' at line {}", c, self.line)
            }
            LexErrorKind::UnterminatedString => {
                write!(f, "lex error: unterminated string literal at line {}", self.line)
            }
            LexErrorKind::MalformedNumber => {
                write!(f, "lex error: malformed number literal at line {}", self.line)
            }
        }
    }
}

impl Error for LexError {}

pub type LexResult<T> = std::result::Result<T, LexError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken,
    ExpectedToken,
    UnexpectedEof,
    TooManyArguments,
    Unreachable,
}

/// A syntax error, carrying the set of token kinds that would have been
/// acceptable and the token the parser actually saw (absent at end of input).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub expected: Vec<&'static str>,
    pub found: Option<Token>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, expected: Vec<&'static str>, found: Option<Token>) -> Self {
        Self { kind, expected, found }
    }

    /// An `ExpectedToken` error, downgraded to `UnexpectedEof` when the
    /// cursor has run out of tokens.
    pub fn expected(expected: Vec<&'static str>, found: Option<Token>) -> Self {
        let kind = if found.is_some() {
            ParseErrorKind::ExpectedToken
        } else {
            ParseErrorKind::UnexpectedEof
        };
        Self { kind, expected, found }
    }

    pub fn too_many_arguments(found: Option<Token>) -> Self {
        Self::new(ParseErrorKind::TooManyArguments, Vec::new(), found)
    }

    pub fn unreachable() -> Self {
        Self::new(ParseErrorKind::Unreachable, Vec::new(), None)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: ")?;
        match self.kind {
            ParseErrorKind::UnexpectedToken => write!(f, "unexpected token")?,
            ParseErrorKind::ExpectedToken => write!(f, "expected token")?,
            ParseErrorKind::UnexpectedEof => write!(f, "unexpected end of input")?,
            ParseErrorKind::TooManyArguments => write!(f, "call has more than 255 arguments")?,
            ParseErrorKind::Unreachable => write!(f, "unreachable parser state")?,
        }
        if !self.expected.is_empty() {
            write!(f, ", expected {}", self.expected.join(" | "))?;
        }
        if let Some(token) = &self.found {
            write!(f, " (near {} at line {})", token.kind, token.line)?;
        }
        Ok(())
    }
}

impl Error for ParseError {}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// Lookup or assignment of an undefined name.
    Name,
    /// A value of the wrong shape, e.g. calling a string.
    Type,
    /// A value of the right shape but an unusable content, e.g. `number("x")`.
    Value,
    /// Anything else, arity mismatches included.
    Generic,
    /// Interpreter bookkeeping violation, e.g. popping the global scope.
    InvalidState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
}

impl RuntimeError {
    pub fn name(message: impl Into<String>) -> Self {
        Self { kind: RuntimeErrorKind::Name, message: message.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self { kind: RuntimeErrorKind::Type, message: message.into() }
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self { kind: RuntimeErrorKind::Value, message: message.into() }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self { kind: RuntimeErrorKind::Generic, message: message.into() }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self { kind: RuntimeErrorKind::InvalidState, message: message.into() }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RuntimeErrorKind::Name => "name error",
            RuntimeErrorKind::Type => "type error",
            RuntimeErrorKind::Value => "value error",
            RuntimeErrorKind::Generic => "runtime error",
            RuntimeErrorKind::InvalidState => "invalid state",
        };
        write!(f, "{}: {}", kind, self.message)
    }
}

impl Error for RuntimeError {}

pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;

/// Umbrella error for the binary's load-and-run pipeline.
#[derive(Debug)]
pub enum LoxError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
    Io(io::Error),
}

impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoxError::Lex(err) => err.fmt(f),
            LoxError::Parse(err) => err.fmt(f),
            LoxError::Runtime(err) => err.fmt(f),
            LoxError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl Error for LoxError {}

impl From<LexError> for LoxError {
    fn from(err: LexError) -> Self {
        LoxError::Lex(err)
    }
}

impl From<ParseError> for LoxError {
    fn from(err: ParseError) -> Self {
        LoxError::Parse(err)
    }
}

impl From<RuntimeError> for LoxError {
    fn from(err: RuntimeError) -> Self {
        LoxError::Runtime(err)
    }
}

impl From<io::Error> for LoxError {
    fn from(err: io::Error) -> Self {
        LoxError::Io(err)
    }
}
