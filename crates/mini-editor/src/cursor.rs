//! Cursor — a content-space position, kept inside document bounds.
//!
//! `x` indexes a row's `content` (not its render form); `y` indexes rows.
//! Every setter clamps afterward, so after any operation:
//!
//! - `y < len` (or `y == 0` for an empty document), and
//! - `x <= len(row y)` (or `x == 0` if row `y` doesn't exist or is empty).
//!
//! The cursor never holds a reference to the document; it is passed to the
//! methods that need bounds.

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    /// Cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    #[must_use]
    pub const fn at(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    // -- Clamping ------------------------------------------------------------

    /// Pull `y` back onto the last row.
    pub fn clamp_y(&mut self, doc: &Document) {
        let len = doc.len();
        if self.y >= len {
            self.y = len.saturating_sub(1);
        }
    }

    /// Pull `x` back inside the current row.
    pub fn clamp_x(&mut self, doc: &Document) {
        self.x = match doc.row(self.y) {
            Some(row) if !row.is_empty() => self.x.min(row.len()),
            _ => 0,
        };
    }

    pub fn clamp(&mut self, doc: &Document) {
        self.clamp_y(doc);
        self.clamp_x(doc);
    }

    // -- Setters -------------------------------------------------------------

    pub fn set_absolute_x(&mut self, x: usize, doc: &Document) {
        self.x = x;
        self.clamp(doc);
    }

    pub fn set_absolute_y(&mut self, y: usize, doc: &Document) {
        self.y = y;
        self.clamp(doc);
    }

    /// Move horizontally by `dx`, saturating at column 0.
    pub fn set_relative_x(&mut self, dx: isize, doc: &Document) {
        self.x = self.x.saturating_add_signed(dx);
        self.clamp(doc);
    }

    /// Move vertically by `dy`, saturating at row 0.
    pub fn set_relative_y(&mut self, dy: isize, doc: &Document) {
        self.y = self.y.saturating_add_signed(dy);
        self.clamp(doc);
    }

    /// End of the current row.
    pub fn set_max_x(&mut self, doc: &Document) {
        self.set_absolute_x(usize::MAX, doc);
    }

    /// Last row.
    pub fn set_max_y(&mut self, doc: &Document) {
        self.set_absolute_y(usize::MAX, doc);
    }

    /// Is the cursor inside document bounds?
    #[must_use]
    pub fn in_bounds(&self, doc: &Document) -> bool {
        let y_ok = self.y < doc.len() || (doc.is_empty() && self.y == 0);
        y_ok && self.x <= doc.row_len(self.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(lines: &[&str]) -> Document {
        Document::from_lines(lines)
    }

    #[test]
    fn clamp_y_on_empty_document() {
        let doc = Document::new();
        let mut c = Cursor::at(3, 7);
        c.clamp(&doc);
        assert_eq!(c, Cursor::new());
    }

    #[test]
    fn clamp_y_to_last_row() {
        let doc = doc_with(&["a", "bb"]);
        let mut c = Cursor::at(0, 5);
        c.clamp_y(&doc);
        assert_eq!(c.y, 1);
    }

    #[test]
    fn clamp_x_to_row_end() {
        let doc = doc_with(&["abc", ""]);
        let mut c = Cursor::at(10, 0);
        c.clamp_x(&doc);
        assert_eq!(c.x, 3);
        c.y = 1;
        c.clamp_x(&doc);
        assert_eq!(c.x, 0);
    }

    #[test]
    fn relative_moves_saturate_at_zero() {
        let doc = doc_with(&["abc", "def"]);
        let mut c = Cursor::new();
        c.set_relative_x(-1, &doc);
        c.set_relative_y(-4, &doc);
        assert_eq!(c, Cursor::new());
        c.set_relative_x(2, &doc);
        c.set_relative_y(1, &doc);
        assert_eq!(c, Cursor::at(2, 1));
    }

    #[test]
    fn vertical_move_onto_short_row_clamps_x() {
        let doc = doc_with(&["long line", "ab"]);
        let mut c = Cursor::at(8, 0);
        c.set_relative_y(1, &doc);
        assert_eq!(c, Cursor::at(2, 1));
    }

    #[test]
    fn max_setters() {
        let doc = doc_with(&["a", "bcd"]);
        let mut c = Cursor::new();
        c.set_max_y(&doc);
        c.set_max_x(&doc);
        assert_eq!(c, Cursor::at(3, 1));
    }

    #[test]
    fn setters_keep_cursor_in_bounds() {
        let doc = doc_with(&["x", "", "hello", "\tz"]);
        let mut c = Cursor::new();
        let moves: [(isize, isize); 8] = [(5, 0), (0, 2), (9, 9), (-3, -1), (0, -9), (4, 1), (-9, 3), (1, 1)];
        for (dx, dy) in moves {
            c.set_relative_x(dx, &doc);
            assert!(c.in_bounds(&doc), "{c:?}");
            c.set_relative_y(dy, &doc);
            assert!(c.in_bounds(&doc), "{c:?}");
        }
        c.set_absolute_y(usize::MAX, &doc);
        c.set_absolute_x(usize::MAX, &doc);
        assert!(c.in_bounds(&doc));
    }
}
