// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state and no decisions about when to emit; the frame assembler decides
// that. This module only knows the byte-level encoding.
//
// Cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (CUP is 1-based).
use std::io::{self, Write};

use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using CUP.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to the top-left corner.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Swap foreground and background (SGR 7).
#[inline]
pub fn inverse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[7m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Standard colors use the compact SGR codes (30-37, 90-97); other
/// palette indices use the 256-color form.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
    }
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC Private Mode 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Cursor Shape ───────────────────────────────────────────────────────────

/// Terminal cursor shape (DECSCUSR).
///
/// Command mode draws a block, Insert and Prompt draw a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Terminal default (usually blinking block).
    #[default]
    Default,
    /// Steady (non-blinking) block cursor.
    SteadyBlock,
    /// Steady underline cursor.
    SteadyUnderline,
    /// Steady bar (I-beam) cursor.
    SteadyBar,
}

/// Set the cursor shape using DECSCUSR.
#[inline]
pub fn set_cursor_shape(w: &mut impl Write, shape: CursorShape) -> io::Result<()> {
    let n: u8 = match shape {
        CursorShape::Default => 0,
        CursorShape::SteadyBlock => 2,
        CursorShape::SteadyUnderline => 4,
        CursorShape::SteadyBar => 6,
    };
    write!(w, "\x1b[{n} q")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
