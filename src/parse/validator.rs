//! Validator for tokenized command lines.
//!
//! Walks the token stream against the shape selected by the first word:
//! Start -> one await state per slot -> trailing check -> Accept / Reject.
//! The first mismatch wins and is reported with its token index and offset.
use std::fmt;

use crate::parse::shapes::{shape_for, CommandKind, Shape, Slot, TrailingPolicy};
use crate::parse::{Command, Token, TokenKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Reject trailing tokens for every shape, including `exit`.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    UnknownCommand(String),
    /// `found` is `None` when the line ended first.
    ExpectedMarker {
        expected: &'static str,
        found: Option<String>,
    },
    ExpectedConnector {
        expected: &'static str,
        found: Option<String>,
    },
    ExpectedFilename {
        found: Option<String>,
    },
    TrailingToken(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "empty command"),
            RejectReason::UnknownCommand(word) => write!(f, "unknown command '{word}'"),
            RejectReason::ExpectedMarker { expected, found } => {
                write!(f, "expected '{expected}' marker, found {}", describe(found))
            }
            RejectReason::ExpectedConnector { expected, found } => {
                write!(f, "expected connector '{expected}', found {}", describe(found))
            }
            RejectReason::ExpectedFilename { found } => {
                write!(f, "expected filename, found {}", describe(found))
            }
            RejectReason::TrailingToken(word) => write!(f, "unexpected trailing token '{word}'"),
        }
    }
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(text) => format!("'{text}'"),
        None => "end of input".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
    /// Index of the offending token.
    pub index: usize,
    /// Byte offset of the offending token in the input line.
    pub offset: usize,
    /// Set once the first word selected a shape.
    pub command: Option<CommandKind>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.reason.fmt(f)
    }
}

impl std::error::Error for Rejection {}

pub fn validate(tokens: &[Token]) -> Result<Command, Rejection> {
    validate_with(tokens, ValidatorOptions::default())
}

pub fn validate_with(tokens: &[Token], options: ValidatorOptions) -> Result<Command, Rejection> {
    let mut cursor = Cursor { tokens, index: 0 };

    let shape = match cursor.peek() {
        None => return Err(cursor.reject(RejectReason::Empty)),
        Some(head) if head.is_end() => return Err(cursor.reject(RejectReason::Empty)),
        Some(head) => match shape_for(&head.text) {
            Some(shape) => shape,
            None => {
                let word = head.text.clone();
                return Err(cursor.reject(RejectReason::UnknownCommand(word)));
            }
        },
    };
    cursor.advance();
    match_slots(&mut cursor, shape, options).map_err(|rejection| Rejection {
        command: Some(shape.kind),
        ..rejection
    })
}

fn match_slots(
    cursor: &mut Cursor<'_>,
    shape: &Shape,
    options: ValidatorOptions,
) -> Result<Command, Rejection> {
    let mut operands = Vec::with_capacity(shape.arity());
    for slot in shape.slots {
        let found = cursor.peek().filter(|token| !token.is_end());
        match *slot {
            Slot::Literal { kind, text } => {
                let matched = found.is_some_and(|token| token.kind == kind && token.text == text);
                if !matched {
                    let found = found.map(|token| token.text.clone());
                    let reason = if kind == TokenKind::Connector {
                        RejectReason::ExpectedConnector {
                            expected: text,
                            found,
                        }
                    } else {
                        RejectReason::ExpectedMarker {
                            expected: text,
                            found,
                        }
                    };
                    return Err(cursor.reject(reason));
                }
            }
            Slot::Operand => match found {
                Some(token) if token.kind == TokenKind::Filename => {
                    operands.push(token.text.clone());
                }
                _ => {
                    let found = found.map(|token| token.text.clone());
                    return Err(cursor.reject(RejectReason::ExpectedFilename { found }));
                }
            },
        }
        cursor.advance();
    }

    check_trailing(cursor, shape, options)?;
    Ok(Command {
        kind: shape.kind,
        operands,
    })
}

fn check_trailing(
    cursor: &Cursor<'_>,
    shape: &Shape,
    options: ValidatorOptions,
) -> Result<(), Rejection> {
    let Some(token) = cursor.peek().filter(|token| !token.is_end()) else {
        return Ok(());
    };
    if shape.trailing == TrailingPolicy::Ignore && !options.strict {
        return Ok(());
    }
    Err(cursor.reject(RejectReason::TrailingToken(token.text.clone())))
}

struct Cursor<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn reject(&self, reason: RejectReason) -> Rejection {
        // A slice that stops short of its end marker points past the last token.
        let offset = match self.peek() {
            Some(token) => token.offset,
            None => self
                .tokens
                .last()
                .map(|token| token.offset + token.text.len())
                .unwrap_or(0),
        };
        Rejection {
            reason,
            index: self.index,
            offset,
            command: None,
        }
    }
}
