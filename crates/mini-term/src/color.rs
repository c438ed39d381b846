// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// The editor only ever needs the 16 standard palette entries plus the
// terminal's own default, so `CellColor` is a thin wrapper around a
// palette index. The indices follow the usual ANSI numbering: 0-7 are
// the normal colors, 8-15 their bright variants.

use std::fmt;

/// A color as the terminal understands it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// The terminal's configured default color (SGR 39 / 49).
    #[default]
    Default,
    /// A palette index (0-255). Indices 0-15 use the compact SGR codes.
    Ansi256(u8),
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);
    pub const BRIGHT_BLACK: Self = Self::Ansi256(8);
    pub const BRIGHT_BLUE: Self = Self::Ansi256(12);
    pub const BRIGHT_CYAN: Self = Self::Ansi256(14);

    /// True for the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// True for the bright half of the 16-color palette.
    #[inline]
    #[must_use]
    pub const fn is_bright(self) -> bool {
        matches!(self, Self::Ansi256(8..=15))
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Ansi256(idx) => write!(f, "Ansi256({idx})"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
