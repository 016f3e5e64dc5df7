//! Tokenizer for command lines.
//!
//! A word is a run of alphanumeric/underscore characters, optionally joined to
//! a second run by a single `.` so `name.ext` stays one word. Anything else is
//! skipped, so tokenizing never fails; rejection is left to the validator.
use std::iter::Peekable;
use std::str::CharIndices;

use crate::parse::shapes::{CONNECTORS, SHAPES};
use crate::parse::{Token, TokenKind};

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if !is_word_char(ch) {
            chars.next();
            continue;
        }
        let mut end = scan_run(&mut chars, input.len());
        if let Some(&(_, '.')) = chars.peek() {
            // Only one interior dot: `a.b.c` yields `a.b` and then `c`.
            let mut lookahead = chars.clone();
            lookahead.next();
            if lookahead.peek().is_some_and(|&(_, next)| is_word_char(next)) {
                chars = lookahead;
                end = scan_run(&mut chars, input.len());
            }
        }
        tokens.push(classify(&input[start..end], start));
    }

    tokens.push(Token::end(input.len()));
    tokens
}

pub fn is_keyword(word: &str) -> bool {
    SHAPES.iter().any(|shape| shape.keyword == word)
}

fn classify(word: &str, offset: usize) -> Token {
    let kind = if is_keyword(word) {
        TokenKind::Keyword
    } else if CONNECTORS.contains(&word) {
        TokenKind::Connector
    } else {
        TokenKind::Filename
    };
    Token::new(kind, word, offset)
}

/// Consume word characters and return the byte offset just past the run.
fn scan_run(chars: &mut Peekable<CharIndices<'_>>, len: usize) -> usize {
    while let Some(&(idx, ch)) = chars.peek() {
        if !is_word_char(ch) {
            return idx;
        }
        chars.next();
    }
    len
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
