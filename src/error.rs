//! Error types and reporting for the REPL.
//!
//! Rejections from the validator, file-operation failures and bad rc lines
//! all surface as a `ShellError`, which carries:
//! - Error kind (syntax, file operation, config)
//! - Human-readable message
//! - Optional hint (usage line, did-you-mean suggestion)
//! - Optional byte position for pointing at the offending word

use std::fmt;
use std::io;

use filecmd::{Rejection, RejectReason};

/// Categorized error types for better diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The line did not match any command shape
    Syntax,
    /// The file system refused a create/delete/copy/rename
    FileOp,
    /// Error loading/parsing configuration
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "Syntax error"),
            ErrorKind::FileOp => write!(f, "File error"),
            ErrorKind::Config => write!(f, "Config error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: Option<String>,
    /// Byte position in the input line where the error occurred
    pub position: Option<usize>,
}

impl ShellError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ShellError {
            kind,
            message: message.into(),
            context: None,
            position: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_position(mut self, pos: usize) -> Self {
        self.position = Some(pos);
        self
    }

    /// Status the REPL records after reporting this error.
    pub fn status(&self) -> i32 {
        match self.kind {
            ErrorKind::Syntax => 2,
            ErrorKind::FileOp | ErrorKind::Config => 1,
        }
    }

    /// Format error with the input line and a caret under the problem
    pub fn display_with_input(&self, input: &str) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);

        if let Some(pos) = self.position {
            if pos < input.len() {
                msg.push_str(&format!("\n  {input}"));
                let offset = input[..pos].chars().count();
                msg.push_str(&format!("\n  {}^", " ".repeat(offset)));
            } else {
                msg.push_str(&format!("\n  at position {} (end of input)", pos));
            }
        }
        if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {}", context));
        }

        msg
    }

    pub fn display_simple(&self) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);
        if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {}", context));
        }
        msg
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_simple())
    }
}

impl std::error::Error for ShellError {}

impl From<Rejection> for ShellError {
    fn from(rejection: Rejection) -> Self {
        let err = ShellError::new(ErrorKind::Syntax, rejection.to_string())
            .with_position(rejection.offset);
        match (&rejection.reason, rejection.command) {
            (RejectReason::Empty | RejectReason::UnknownCommand(_), _) | (_, None) => err,
            (_, Some(kind)) => err.with_context(format!("usage: {}", kind.shape().usage())),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::new(ErrorKind::FileOp, err.to_string())
    }
}
