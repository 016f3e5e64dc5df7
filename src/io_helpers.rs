use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

use log::warn;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::completion::LineHelper;

/// Read one line; `None` means end of input. Ctrl-C yields an empty line so
/// the loop simply prompts again.
pub fn read_input_line(
    editor: &mut Editor<LineHelper, DefaultHistory>,
    interactive: bool,
    prompt: &str,
) -> io::Result<Option<String>> {
    if interactive {
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(io::Error::other(err)),
        };
        Ok(Some(line))
    } else {
        read_plain_line(&mut io::stdin().lock())
    }
}

pub fn read_plain_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    let bytes = reader.read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
}

pub fn history_path() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".filecmd_history")
}

pub fn load_history(editor: &mut Editor<LineHelper, DefaultHistory>) {
    // A missing history file is normal on first run.
    let path = history_path();
    if path.exists() {
        if let Err(err) = editor.load_history(&path) {
            warn!("history event=load path={} error={}", path.display(), err);
        }
    }
}

pub fn save_history(editor: &mut Editor<LineHelper, DefaultHistory>) {
    let path = history_path();
    if let Err(err) = editor.save_history(&path) {
        warn!("history event=save path={} error={}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_lines_lose_line_endings() {
        let mut input = Cursor::new("create file a\r\nexit\n");
        assert_eq!(read_plain_line(&mut input).unwrap().as_deref(), Some("create file a"));
        assert_eq!(read_plain_line(&mut input).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_plain_line(&mut input).unwrap(), None);
    }
}
