//! Static command shape table.
//!
//! Each row names a keyword and the slots that must follow it. The tokenizer
//! derives its keyword set from this table and the validator walks the slots,
//! so a new command only needs a new row here.
use std::fmt;

use crate::parse::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Create,
    Delete,
    Copy,
    Rename,
    Exit,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Create => "create",
            CommandKind::Delete => "delete",
            CommandKind::Copy => "copy",
            CommandKind::Rename => "rename",
            CommandKind::Exit => "exit",
        }
    }

    pub fn shape(self) -> &'static Shape {
        // Row order in SHAPES follows the variant order.
        let row = match self {
            CommandKind::Create => 0,
            CommandKind::Delete => 1,
            CommandKind::Copy => 2,
            CommandKind::Rename => 3,
            CommandKind::Exit => 4,
        };
        &SHAPES[row]
    }

    pub fn arity(self) -> usize {
        self.shape().arity()
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One position after the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A fixed word that must appear verbatim with the given kind.
    Literal { kind: TokenKind, text: &'static str },
    /// A filename captured as an operand.
    Operand,
}

impl Slot {
    pub const FILE: Slot = Slot::Literal {
        kind: TokenKind::Filename,
        text: "file",
    };
    pub const TO: Slot = Slot::Literal {
        kind: TokenKind::Connector,
        text: "to",
    };

    /// The literal text, or `<name>` for an operand.
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Literal { text, .. } => *text,
            Slot::Operand => "<name>",
        }
    }
}

/// What to do with tokens left over once every slot has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingPolicy {
    Reject,
    Ignore,
}

#[derive(Debug)]
pub struct Shape {
    pub kind: CommandKind,
    pub keyword: &'static str,
    pub slots: &'static [Slot],
    pub trailing: TrailingPolicy,
}

impl Shape {
    pub fn arity(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Operand))
            .count()
    }

    /// Human-readable form used in hints, e.g. `copy file <name> to <name>`.
    pub fn usage(&self) -> String {
        let mut out = self.keyword.to_string();
        for slot in self.slots {
            out.push(' ');
            out.push_str(slot.label());
        }
        out
    }
}

pub static SHAPES: &[Shape] = &[
    Shape {
        kind: CommandKind::Create,
        keyword: "create",
        slots: &[Slot::FILE, Slot::Operand],
        trailing: TrailingPolicy::Reject,
    },
    Shape {
        kind: CommandKind::Delete,
        keyword: "delete",
        slots: &[Slot::FILE, Slot::Operand],
        trailing: TrailingPolicy::Reject,
    },
    Shape {
        kind: CommandKind::Copy,
        keyword: "copy",
        slots: &[Slot::FILE, Slot::Operand, Slot::TO, Slot::Operand],
        trailing: TrailingPolicy::Reject,
    },
    Shape {
        kind: CommandKind::Rename,
        keyword: "rename",
        slots: &[Slot::FILE, Slot::Operand, Slot::TO, Slot::Operand],
        trailing: TrailingPolicy::Reject,
    },
    Shape {
        kind: CommandKind::Exit,
        keyword: "exit",
        slots: &[],
        trailing: TrailingPolicy::Ignore,
    },
];

pub const CONNECTORS: &[&str] = &["to"];

pub fn shape_for(keyword: &str) -> Option<&'static Shape> {
    SHAPES.iter().find(|shape| shape.keyword == keyword)
}
