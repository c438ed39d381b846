//! Editing modes.
//!
//! | Mode    | Cursor shape | Key-map chain                   |
//! |---------|--------------|---------------------------------|
//! | Command | Block        | Global, Command                 |
//! | Insert  | Bar          | Global, Insert                  |
//! | Prompt  | Bar          | Prompt (overrides the chain)    |
//!
//! Command and Insert are peers that swap one slot of the dispatcher chain.
//! Prompt is a temporary override entered only through
//! [`Editor::prompt`](crate::editor::Editor::prompt).

use std::fmt;

use mini_term::ansi::CursorShape;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Keys are commands, not text.
    #[default]
    Command,
    /// Printable keys are inserted into the document.
    Insert,
    /// Keys edit the message-bar prompt.
    Prompt,
}

impl EditorMode {
    /// Name for the status bar.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Command => "COMMAND",
            Self::Insert => "INSERT",
            Self::Prompt => "PROMPT",
        }
    }

    #[must_use]
    pub const fn cursor_shape(self) -> CursorShape {
        match self {
            Self::Command => CursorShape::SteadyBlock,
            Self::Insert | Self::Prompt => CursorShape::SteadyBar,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_command() {
        assert_eq!(EditorMode::default(), EditorMode::Command);
    }

    #[test]
    fn names_and_shapes() {
        assert_eq!(EditorMode::Insert.to_string(), "INSERT");
        assert_eq!(EditorMode::Command.cursor_shape(), CursorShape::SteadyBlock);
        assert_eq!(EditorMode::Prompt.cursor_shape(), CursorShape::SteadyBar);
    }
}
