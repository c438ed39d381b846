//! Highlight categories — one tag per displayed character.
//!
//! The per-row highlighter assigns a [`Highlight`] to every character of a
//! row's render form. The renderer maps each tag to a terminal color at
//! draw time via [`Highlight::color`].

use mini_term::color::CellColor;

/// Category assigned to a single rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    /// Single-line comment.
    Comment,
    /// Multi-line comment, including its markers.
    MlComment,
    /// First keyword group (control flow, declarations).
    Keyword1,
    /// Second keyword group (types, builtins).
    Keyword2,
    String,
    Number,
    /// Current search match overlay. Never part of a row's baseline.
    Match,
}

impl Highlight {
    /// Foreground color used to draw this category.
    #[must_use]
    pub const fn color(self) -> CellColor {
        match self {
            Self::Comment | Self::MlComment => CellColor::BRIGHT_BLACK,
            Self::Keyword1 => CellColor::BRIGHT_BLUE,
            Self::Keyword2 => CellColor::BRIGHT_CYAN,
            Self::String => CellColor::CYAN,
            Self::Number => CellColor::YELLOW,
            Self::Match => CellColor::GREEN,
            Self::Normal => CellColor::WHITE,
        }
    }

    /// True for either comment category.
    #[inline]
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::MlComment)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
