use rustyline::history::DefaultHistory;
use rustyline::{Config, EditMode, Editor};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

use filecmd::{
    tokenize, validate_with, Command, RejectReason, Token, TokenKind, ValidatorOptions, SHAPES,
};
use log::debug;

use crate::completion::matching::best_suggestion;
use crate::completion::{update_completion_context, LineHelper};
use crate::config::{build_prompt, load_config, Settings};
use crate::error::ShellError;
use crate::file_ops::{self, Outcome};
use crate::io_helpers::{load_history, read_input_line, save_history};
use crate::CliOptions;

pub(crate) struct ShellState {
    pub(crate) editor: Editor<LineHelper, DefaultHistory>,
    pub(crate) settings: Settings,
    // File operands resolve against this directory.
    pub(crate) root: PathBuf,
    pub(crate) last_status: i32,
    pub(crate) interactive: bool,
    pub(crate) trace: bool,
}

pub(crate) enum Flow {
    Continue,
    Exit(i32),
}

pub(crate) fn init_state(cli: &CliOptions, interactive: bool) -> io::Result<ShellState> {
    let edit_mode = match env::var("FILECMD_EDITMODE").ok().as_deref() {
        Some("vi") | Some("VI") => EditMode::Vi,
        _ => EditMode::Emacs,
    };
    let config = Config::builder()
        .auto_add_history(true)
        .edit_mode(edit_mode)
        .build();
    let mut editor = Editor::with_config(config).map_err(io::Error::other)?;
    editor.set_helper(Some(LineHelper::new()));
    if interactive {
        load_history(&mut editor);
    }

    let mut settings = Settings::default();
    match load_config(&mut settings) {
        Ok(errors) => {
            for err in errors {
                eprintln!("{}", err.display_simple());
            }
        }
        Err(err) => eprintln!("config error: {err}"),
    }
    if let Some(strict) = cli.strict {
        settings.strict = strict;
    }
    let root = env::current_dir()?;
    debug!(
        "session event=start root={} interactive={} strict={}",
        root.display(),
        interactive,
        settings.strict
    );

    Ok(ShellState {
        editor,
        settings,
        root,
        last_status: 0,
        interactive,
        trace: cli.trace,
    })
}

pub(crate) fn run_once(state: &mut ShellState) -> io::Result<Flow> {
    if state.interactive {
        update_completion_context(&mut state.editor, &state.settings.colors);
    }
    let cwd = env::current_dir().unwrap_or_else(|_| state.root.clone());
    let prompt = build_prompt(state.interactive, &state.settings, state.last_status, &cwd);

    let line = match read_input_line(&mut state.editor, state.interactive, &prompt)? {
        Some(line) => line,
        None => {
            if state.interactive {
                println!();
                save_history(&mut state.editor);
            }
            return Ok(Flow::Exit(state.last_status));
        }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Flow::Continue);
    }

    let options = ValidatorOptions {
        strict: state.settings.strict,
    };
    match execute_line(trimmed, &state.root, options, state.trace) {
        Ok(Outcome::Exit) => {
            if state.interactive {
                save_history(&mut state.editor);
            }
            Ok(Flow::Exit(0))
        }
        Ok(Outcome::Done(message)) => {
            println!("{message}");
            state.last_status = 0;
            Ok(Flow::Continue)
        }
        Err(err) => {
            eprintln!("{}", err.display_with_input(trimmed));
            state.last_status = err.status();
            Ok(Flow::Continue)
        }
    }
}

/// Tokenize, validate and run one trimmed line.
pub(crate) fn execute_line(
    line: &str,
    root: &Path,
    options: ValidatorOptions,
    trace: bool,
) -> Result<Outcome, ShellError> {
    let tokens = tokenize(line);
    trace_tokens(trace, &tokens);

    let command = validate_with(&tokens, options).map_err(|rejection| {
        debug!("command event=rejected reason={:?}", rejection.reason);
        let suggestion = match rejection.reason {
            RejectReason::UnknownCommand(ref word) => suggest_command(word),
            _ => None,
        };
        let err = ShellError::from(rejection);
        match suggestion {
            Some(keyword) => err.with_context(format!("did you mean '{keyword}'?")),
            None => err,
        }
    })?;
    trace_command(trace, &command);
    debug!(
        "command event=accepted kind={} operands={}",
        command.kind,
        command.operands.len()
    );

    file_ops::execute(&command, root).map_err(ShellError::from)
}

fn suggest_command(word: &str) -> Option<String> {
    let keywords: Vec<String> = SHAPES.iter().map(|shape| shape.keyword.to_string()).collect();
    best_suggestion(word, &keywords)
}

fn trace_tokens(trace: bool, tokens: &[Token]) {
    if trace {
        let shown: Vec<String> = tokens
            .iter()
            .map(|token| match token.kind {
                TokenKind::EndOfInput => "EndOfInput".to_string(),
                kind => format!("{kind:?}({})", token.text),
            })
            .collect();
        eprintln!("trace: tokens: {}", shown.join(" "));
    }
}

fn trace_command(trace: bool, command: &Command) {
    if trace {
        eprintln!("trace: command: {} {:?}", command.kind, command.operands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    fn permissive() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    #[test]
    fn lines_drive_file_actions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let outcome = execute_line("create file a.txt", root, permissive(), false).unwrap();
        assert_eq!(outcome, Outcome::Done("created a.txt".to_string()));
        execute_line("copy file a.txt to b.txt", root, permissive(), false).unwrap();
        execute_line("rename file b.txt to c.txt", root, permissive(), false).unwrap();
        execute_line("delete file a.txt", root, permissive(), false).unwrap();
        assert!(!root.join("a.txt").exists());
        assert!(!root.join("b.txt").exists());
        assert!(root.join("c.txt").exists());
    }

    #[test]
    fn rejected_lines_touch_nothing() {
        let dir = tempdir().unwrap();
        let err = execute_line("create report.txt", dir.path(), permissive(), false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.status(), 2);
        assert!(err.message.contains("'file' marker"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unknown_command_suggests_keyword() {
        let dir = tempdir().unwrap();
        let err = execute_line("craete file a", dir.path(), permissive(), false).unwrap_err();
        assert_eq!(err.message, "unknown command 'craete'");
        assert_eq!(err.context.as_deref(), Some("did you mean 'create'?"));

        let err = execute_line("launch file a", dir.path(), permissive(), false).unwrap_err();
        assert!(err.context.is_none());
    }

    #[test]
    fn exit_respects_strictness() {
        let dir = tempdir().unwrap();
        let outcome = execute_line("exit now", dir.path(), permissive(), false).unwrap();
        assert_eq!(outcome, Outcome::Exit);

        let strict = ValidatorOptions { strict: true };
        let err = execute_line("exit now", dir.path(), strict, false).unwrap_err();
        assert_eq!(err.message, "unexpected trailing token 'now'");
    }

    #[test]
    fn file_errors_keep_session_alive() {
        let dir = tempdir().unwrap();
        let err = execute_line("delete file missing.txt", dir.path(), permissive(), false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileOp);
        assert_eq!(err.status(), 1);
    }
}
