//! Line-editor helper driven by the command shape table.
//!
//! Completion and hints look at which slot of the current shape the cursor
//! sits in: keywords first, then the fixed `file`/`to` words, and file names
//! from the working directory in operand slots.
use std::borrow::Cow;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::{DefaultHistory, SearchDirection};
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use filecmd::{shape_for, tokenize, Slot, Token, SHAPES};

use crate::colors::{resolve_color, ColorConfig};

pub(crate) mod matching;

use matching::best_suggestion;

pub struct LineHelper {
    completer: FilenameCompleter,
    hinter: HistoryAutosuggest,
    keywords: Vec<String>,
    colors: ColorConfig,
}

impl LineHelper {
    pub fn new() -> Self {
        Self {
            completer: FilenameCompleter::new(),
            hinter: HistoryAutosuggest,
            keywords: keyword_list(),
            colors: ColorConfig::default(),
        }
    }

    fn slot_hint(&self, line: &str, pos: usize) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, word) = current_word(line, pos);
        if !word.is_empty() {
            let candidates = match expected_at(line, start) {
                Expect::Keyword => self.keywords.clone(),
                Expect::Literal(text) => vec![text.to_string()],
                Expect::Filename | Expect::Nothing => return None,
            };
            let suggestion = best_suggestion(word, &candidates)?;
            if let Some(remainder) = suggestion.strip_prefix(word) {
                if remainder.is_empty() {
                    return None;
                }
                return Some(remainder.to_string());
            }
            return Some(format!(" -> {suggestion}"));
        }
        if !line.ends_with(char::is_whitespace) {
            return None;
        }
        remaining_usage(line)
    }
}

impl Default for LineHelper {
    fn default() -> Self {
        Self::new()
    }
}

struct HistoryAutosuggest;

impl Hinter for HistoryAutosuggest {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() {
            return None;
        }
        let history = ctx.history();
        let start = if ctx.history_index() == history.len() {
            ctx.history_index().saturating_sub(1)
        } else {
            ctx.history_index()
        };
        let result = history
            .starts_with(line, start, SearchDirection::Reverse)
            .ok()
            .flatten()?;
        if result.entry == line {
            return None;
        }
        let remainder = result.entry[pos..].to_string();
        if remainder.is_empty() {
            return None;
        }
        Some(remainder)
    }
}

pub fn update_completion_context(editor: &mut Editor<LineHelper, DefaultHistory>, colors: &ColorConfig) {
    if let Some(helper) = editor.helper_mut() {
        helper.colors = colors.clone();
    }
}

fn keyword_list() -> Vec<String> {
    SHAPES.iter().map(|shape| shape.keyword.to_string()).collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Expect {
    Keyword,
    Literal(&'static str),
    Filename,
    Nothing,
}

/// What the shape expects for a word starting at byte `start`.
fn expected_at(line: &str, start: usize) -> Expect {
    let tokens = tokenize(&line[..start]);
    let words: Vec<&Token> = tokens.iter().filter(|token| !token.is_end()).collect();
    let Some(head) = words.first() else {
        return Expect::Keyword;
    };
    let Some(shape) = shape_for(&head.text) else {
        return Expect::Nothing;
    };
    match shape.slots.get(words.len() - 1) {
        Some(Slot::Literal { text, .. }) => Expect::Literal(*text),
        Some(Slot::Operand) => Expect::Filename,
        None => Expect::Nothing,
    }
}

/// Labels of the slots still missing after a complete prefix,
/// e.g. `<name> to <name>` after `copy file `.
fn remaining_usage(line: &str) -> Option<String> {
    let tokens = tokenize(line);
    let words: Vec<&Token> = tokens.iter().filter(|token| !token.is_end()).collect();
    let shape = shape_for(&words.first()?.text)?;
    let rest = shape.slots.get(words.len() - 1..)?;
    if rest.is_empty() {
        return None;
    }
    let labels: Vec<&str> = rest.iter().map(Slot::label).collect();
    Some(labels.join(" "))
}

fn current_word(line: &str, pos: usize) -> (usize, &str) {
    let prefix = &line[..pos];
    let start = prefix
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| ch.is_alphanumeric() || ch == '_' || ch == '.')
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(pos);
    (start, &prefix[start..])
}

fn complete_from_list(prefix: &str, list: &[String]) -> Vec<Pair> {
    list.iter()
        .filter(|item| item.starts_with(prefix))
        .map(|item| Pair {
            display: item.clone(),
            replacement: format!("{item} "),
        })
        .collect()
}

impl Helper for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, word) = current_word(line, pos);
        match expected_at(line, start) {
            Expect::Keyword => Ok((start, complete_from_list(word, &self.keywords))),
            Expect::Literal(text) => Ok((start, complete_from_list(word, &[text.to_string()]))),
            Expect::Filename => self.completer.complete(line, pos, ctx),
            Expect::Nothing => Ok((start, Vec::new())),
        }
    }
}

impl Hinter for LineHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if let Some(hint) = self.hinter.hint(line, pos, ctx) {
            return Some(hint);
        }
        self.slot_hint(line, pos)
    }
}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        for token in tokenize(line) {
            if token.is_end() {
                break;
            }
            out.push_str(&line[last..token.offset]);
            let color = self.colors.for_token(token.kind);
            if color.is_empty() {
                out.push_str(&token.text);
            } else {
                out.push_str(&format!("{color}{}\x1b[0m", token.text));
            }
            last = token.offset + token.text.len();
        }
        out.push_str(&line[last..]);
        if out == line {
            return Cow::Borrowed(line);
        }
        Cow::Owned(out)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if hint.is_empty() {
            return Cow::Borrowed(hint);
        }
        let color = resolve_color(&self.colors.hint);
        if color.is_empty() {
            return Cow::Borrowed(hint);
        }
        Cow::Owned(format!("{color}{hint}\x1b[0m"))
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        true
    }
}

impl Validator for LineHelper {}
