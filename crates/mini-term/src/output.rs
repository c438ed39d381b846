// SPDX-License-Identifier: MIT
//
// Output buffering and color tracking.
//
// Two components work together to keep terminal I/O small:
//
//   OutputBuffer — accumulates all ANSI bytes for a frame in memory so the
//   whole frame can be handed to the terminal in one write() syscall.
//
//   ColorWriter — remembers the foreground color the terminal is currently
//   using and only emits an SGR sequence when a character needs a
//   different one. A row of plain text costs one color change, not one
//   per character.

use std::io::{self, Write};

use crate::ansi;
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single `write()` syscall.
///
/// Default capacity: 16 KB, enough for a full frame without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Take the accumulated bytes, leaving the buffer empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(DEFAULT_CAPACITY))
    }

    /// Append a single character as UTF-8.
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf
            .extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Append a string verbatim.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // No-op. Real flushing happens via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── ColorWriter ─────────────────────────────────────────────────────────────

/// Writes characters while tracking the active foreground color.
///
/// The tracked color starts unknown, so the first styled character always
/// emits its color. After an explicit [`reset`](Self::reset) (for example
/// around inverted control-character glyphs) the tracking is invalidated
/// and the next character re-emits its color.
pub struct ColorWriter {
    last_fg: Option<CellColor>,
}

impl ColorWriter {
    /// Create a writer with no tracked state.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_fg: None }
    }

    /// Write `ch` in `color`, emitting SGR only on a change.
    pub fn put(&mut self, out: &mut OutputBuffer, ch: char, color: CellColor) {
        self.set_fg(out, color);
        out.push_char(ch);
    }

    /// Switch the foreground color if it differs from the tracked one.
    pub fn set_fg(&mut self, out: &mut OutputBuffer, color: CellColor) {
        if self.last_fg != Some(color) {
            ansi::fg(out, color).ok();
            self.last_fg = Some(color);
        }
    }

    /// Write `ch` with foreground and background swapped.
    ///
    /// Leaves the terminal in SGR 0 and the tracked color unknown.
    pub fn put_inverted(&mut self, out: &mut OutputBuffer, ch: char) {
        ansi::inverse(out).ok();
        out.push_char(ch);
        self.reset(out);
    }

    /// Emit SGR 0 and forget the tracked color.
    pub fn reset(&mut self, out: &mut OutputBuffer) {
        ansi::reset(out).ok();
        self.last_fg = None;
    }

    /// Return the terminal to its default foreground.
    pub fn finish(&mut self, out: &mut OutputBuffer) {
        self.set_fg(out, CellColor::Default);
    }
}

impl Default for ColorWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
