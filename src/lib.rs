//! Tokenizer and validator for file commands.
//!
//! This crate exposes a minimal API so fuzz targets and unit tests can link
//! only the recognizer without pulling in interactive deps.

mod parse;

pub use parse::{
    is_keyword, parse_command, parse_command_with, shape_for, tokenize, validate, validate_with,
    Command, CommandKind, RejectReason, Rejection, Shape, Slot, Token, TokenKind, TrailingPolicy,
    ValidatorOptions, CONNECTORS, SHAPES,
};

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let tokens = tokenize(&input);
    let strict = validate_with(&tokens, ValidatorOptions { strict: true });
    if let Ok(command) = validate(&tokens) {
        assert_eq!(command.operands.len(), command.kind.arity());
        if command.kind != CommandKind::Exit {
            assert_eq!(strict.as_ref().ok(), Some(&command));
        }
    }
}
