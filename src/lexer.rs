//! Lexical analyzer for Lox source text.
//!
//! The lexer walks the input character by character with one- and two-char
//! lookahead, producing the token stream the parser consumes. Every token
//! records its line and the `(start, end)` character span it covers, so later
//! stages can point back into the source. Whitespace and `//` comments are
//! skipped; a newline increments the line counter.
//!
//! The first lexical error aborts the scan; no partial token stream is
//! surfaced.

use std::fmt;

use crate::error::{LexError, LexErrorKind, LexResult};

/// Every token kind of the language. Literal kinds carry their decoded
/// payload: numbers are parsed to `f64` here, strings hold the interior
/// content without the delimiters.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier(String),
    String(String),
    Number(f64),

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}

impl TokenKind {
    /// Stable name used in "expected ..." diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Semicolon => "';'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Bang => "'!'",
            TokenKind::BangEqual => "'!='",
            TokenKind::Equal => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::String(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::And => "'and'",
            TokenKind::Class => "'class'",
            TokenKind::Else => "'else'",
            TokenKind::False => "'false'",
            TokenKind::Fun => "'fun'",
            TokenKind::For => "'for'",
            TokenKind::If => "'if'",
            TokenKind::Nil => "'nil'",
            TokenKind::Or => "'or'",
            TokenKind::Print => "'print'",
            TokenKind::Return => "'return'",
            TokenKind::Super => "'super'",
            TokenKind::This => "'this'",
            TokenKind::True => "'true'",
            TokenKind::Var => "'var'",
            TokenKind::While => "'while'",
        }
    }
}

impl fmt::Display for TokenKind {
    /// The surface text of the token, as it would appear in source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::String(content) => write!(f, "\"{}\"", content),
            TokenKind::Number(value) => write!(f, "{}", value),
            TokenKind::LeftParen => f.write_str("("),
            TokenKind::RightParen => f.write_str(")"),
            TokenKind::LeftBrace => f.write_str("{"),
            TokenKind::RightBrace => f.write_str("}"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::BangEqual => f.write_str("!="),
            TokenKind::Equal => f.write_str("="),
            TokenKind::EqualEqual => f.write_str("=="),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::GreaterEqual => f.write_str(">="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::LessEqual => f.write_str("<="),
            TokenKind::And => f.write_str("and"),
            TokenKind::Class => f.write_str("class"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::False => f.write_str("false"),
            TokenKind::Fun => f.write_str("fun"),
            TokenKind::For => f.write_str("for"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Nil => f.write_str("nil"),
            TokenKind::Or => f.write_str("or"),
            TokenKind::Print => f.write_str("print"),
            TokenKind::Return => f.write_str("return"),
            TokenKind::Super => f.write_str("super"),
            TokenKind::This => f.write_str("this"),
            TokenKind::True => f.write_str("true"),
            TokenKind::Var => f.write_str("var"),
            TokenKind::While => f.write_str("while"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub span: (usize, usize),
}

/// Reserved-word table. Anything not listed here lexes as an identifier.
fn keyword(lexeme: &str) -> Option<TokenKind> {
    let kind = match lexeme {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "fun" => TokenKind::Fun,
        "for" => TokenKind::For,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => return None,
    };
    Some(kind)
}

pub struct Lexer {
    /// Source as a char vector for cheap indexed lookahead.
    input: Vec<char>,
    /// First character of the token being scanned.
    start: usize,
    /// Current position in the character stream.
    position: usize,
    /// Current line, 1-based.
    line: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            position: 0,
            line: 1,
        }
    }

    /// Scans the whole input. Empty input yields an empty vector; there is
    /// no end-of-file sentinel token.
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_blanks();
            if self.is_at_end() {
                break;
            }
            self.start = self.position;
            tokens.push(self.scan_token()?);
        }

        Ok(tokens)
    }

    fn scan_token(&mut self) -> LexResult<Token> {
        let c = self.advance();

        match c {
            '(' => Ok(self.make(TokenKind::LeftParen)),
            ')' => Ok(self.make(TokenKind::RightParen)),
            '{' => Ok(self.make(TokenKind::LeftBrace)),
            '}' => Ok(self.make(TokenKind::RightBrace)),
            ',' => Ok(self.make(TokenKind::Comma)),
            '.' => Ok(self.make(TokenKind::Dot)),
            '-' => Ok(self.make(TokenKind::Minus)),
            '+' => Ok(self.make(TokenKind::Plus)),
            ';' => Ok(self.make(TokenKind::Semicolon)),
            '/' => Ok(self.make(TokenKind::Slash)),
            '*' => Ok(self.make(TokenKind::Star)),
            '!' => {
                let kind = if self.match_char('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                Ok(self.make(kind))
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                Ok(self.make(kind))
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::LessEqual } else { TokenKind::Less };
                Ok(self.make(kind))
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                Ok(self.make(kind))
            }
            '"' => self.string_literal(),
            c if c.is_ascii_digit() => self.number_literal(),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.identifier_or_keyword()),
            c => Err(self.error(LexErrorKind::UnexpectedCharacter(c))),
        }
    }

    /// `"` ... `"` with no escape processing; the interior is kept verbatim.
    fn string_literal(&mut self) -> LexResult<Token> {
        while self.peek() != '"' {
            if self.is_at_end() {
                return Err(self.error(LexErrorKind::UnterminatedString));
            }
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        let content: String = self.input[self.start + 1..self.position].iter().collect();
        self.advance(); // closing "

        Ok(self.make(TokenKind::String(content)))
    }

    /// `[0-9]+(.[0-9]+)?`. A second `.` after the fractional part is a
    /// malformed number, not two tokens.
    fn number_literal(&mut self) -> LexResult<Token> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            if self.peek() == '.' {
                return Err(self.error(LexErrorKind::MalformedNumber));
            }
        }

        let lexeme: String = self.input[self.start..self.position].iter().collect();
        let value = lexeme
            .parse::<f64>()
            .map_err(|_| self.error(LexErrorKind::MalformedNumber))?;

        Ok(self.make(TokenKind::Number(value)))
    }

    fn identifier_or_keyword(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme: String = self.input[self.start..self.position].iter().collect();
        let kind = keyword(&lexeme).unwrap_or(TokenKind::Identifier(lexeme));
        self.make(kind)
    }

    /// Skips whitespace and `//` line comments, counting newlines.
    fn skip_blanks(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\r' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            line: self.line,
            span: (self.start, self.position),
        }
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.line, (self.start, self.position))
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            let c = self.input[self.position];
            self.position += 1;
            c
        }
    }

    /// Consumes the next character only when it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn peek_next(&self) -> char {
        if self.position + 1 >= self.input.len() {
            '\0'
        } else {
            self.input[self.position + 1]
        }
    }
}
