//! Viewport — the visible window onto the document.
//!
//! Scroll offsets are in row and display-column units. [`Viewport::scroll`]
//! runs once per frame, after the key's edits are applied, and moves the
//! window by the minimum needed to show the cursor.

use mini_term::terminal::Size;

use crate::cursor::Cursor;
use crate::document::Document;

/// Rows reserved below the text area: status bar and message bar.
pub const CHROME_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First document row on screen.
    pub row_offset: usize,
    /// First display column on screen.
    pub col_offset: usize,
    /// Text-area height.
    pub screen_rows: usize,
    /// Text-area width.
    pub screen_cols: usize,
    /// Cursor display column, refreshed by [`scroll`](Self::scroll).
    pub rx: usize,
}

impl Viewport {
    #[must_use]
    pub const fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows,
            screen_cols,
            rx: 0,
        }
    }

    /// Text area for a terminal of `size`, leaving room for the bars.
    #[must_use]
    pub fn for_terminal(size: Size) -> Self {
        Self::new(
            usize::from(size.rows).saturating_sub(CHROME_ROWS),
            usize::from(size.cols),
        )
    }

    /// Recompute `rx` and bring `(cursor.y, rx)` into view.
    pub fn scroll(&mut self, cursor: &Cursor, doc: &Document) {
        self.rx = if cursor.y < doc.len() {
            doc.cx_to_rx(cursor.y, cursor.x)
        } else {
            0
        };

        if cursor.y < self.row_offset {
            self.row_offset = cursor.y;
        }
        if self.screen_rows > 0 && cursor.y >= self.row_offset + self.screen_rows {
            self.row_offset = cursor.y + 1 - self.screen_rows;
        }
        if self.rx < self.col_offset {
            self.col_offset = self.rx;
        }
        if self.screen_cols > 0 && self.rx >= self.col_offset + self.screen_cols {
            self.col_offset = self.rx + 1 - self.screen_cols;
        }
    }

    /// Cursor position on screen, relative to the text area.
    #[must_use]
    pub const fn cursor_screen_pos(&self, cursor: &Cursor) -> (usize, usize) {
        (
            self.rx.saturating_sub(self.col_offset),
            cursor.y.saturating_sub(self.row_offset),
        )
    }
}
