//! Two-stage recognizer for file commands.
//!
//! - `tokenizer` turns a line into classified tokens ending in `EndOfInput`.
//! - `validator` walks the tokens against the static shape table and yields a
//!   `Command` or a `Rejection` naming the first mismatch.
use std::fmt;

mod shapes;
mod tokenizer;
mod validator;

pub use shapes::{shape_for, CommandKind, Shape, Slot, TrailingPolicy, CONNECTORS, SHAPES};
pub use tokenizer::{is_keyword, tokenize};
pub use validator::{validate, validate_with, Rejection, RejectReason, ValidatorOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Filename,
    Connector,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword => write!(f, "keyword"),
            TokenKind::Filename => write!(f, "filename"),
            TokenKind::Connector => write!(f, "connector"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of `text` in the tokenized line.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    pub fn end(offset: usize) -> Self {
        Token::new(TokenKind::EndOfInput, String::new(), offset)
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// A validated command, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub operands: Vec<String>,
}

impl Command {
    /// The only operand of create/delete, or the source of copy/rename.
    pub fn source(&self) -> Option<&str> {
        self.operands.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.operands.get(1).map(String::as_str)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

/// Tokenize and validate a single line with default options.
pub fn parse_command(input: &str) -> Result<Command, Rejection> {
    validate(&tokenize(input))
}

pub fn parse_command_with(input: &str, options: ValidatorOptions) -> Result<Command, Rejection> {
    validate_with(&tokenize(input), options)
}
