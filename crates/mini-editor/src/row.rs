//! A single line of the document.
//!
//! A [`Row`] owns its raw `content` plus two derived arrays that are always
//! recomputed together by the owning [`Document`](crate::document::Document):
//!
//! - `render` — the display form, tabs expanded to spaces up to the next
//!   tab stop. Every other character is copied through unchanged.
//! - `highlights` — one [`Highlight`] per `render` character.
//!
//! Three coordinate systems meet here:
//!
//! | Name         | Indexes               | Used by               |
//! |--------------|-----------------------|-----------------------|
//! | `cx`         | `content`             | cursor, edits, search |
//! | render index | `render`/`highlights` | highlighter, overlay  |
//! | `rx`         | terminal columns      | viewport, drawing     |
//!
//! Render index and `rx` only differ when the row has wide characters.

use mini_syntax::Highlight;
use unicode_width::UnicodeWidthChar;

/// Display width of one character. Control characters draw as a single
/// inverted glyph.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    if ch.is_control() {
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Columns a tab advances from display column `rx`.
#[inline]
const fn tab_advance(rx: usize, tab_stop: usize) -> usize {
    tab_stop - rx % tab_stop
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    content: Vec<char>,
    render: Vec<char>,
    highlights: Vec<Highlight>,
    /// Does an unterminated multi-line comment run past the end of this row?
    open_comment: bool,
}

impl Row {
    /// A row with `content` and no derived state yet.
    pub(crate) fn new(content: Vec<char>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    // -- Accessors -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn content(&self) -> &[char] {
        &self.content
    }

    /// Number of characters in `content`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn render(&self) -> &[char] {
        &self.render
    }

    #[inline]
    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    #[inline]
    #[must_use]
    pub const fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// The content as a `String`.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    pub(crate) fn content_mut(&mut self) -> &mut Vec<char> {
        &mut self.content
    }

    // -- Derived state -------------------------------------------------------

    /// Rebuild `render` from `content`. Highlights must be recomputed after.
    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        self.render.clear();
        let mut rx = 0;
        for &ch in &self.content {
            if ch == '\t' {
                let n = tab_advance(rx, tab_stop);
                self.render.extend(std::iter::repeat_n(' ', n));
                rx += n;
            } else {
                self.render.push(ch);
                rx += char_width(ch);
            }
        }
    }

    /// Install a freshly computed highlight array and trailing comment state.
    /// Returns `true` if `open_comment` changed.
    pub(crate) fn set_highlights(&mut self, highlights: Vec<Highlight>, open_comment: bool) -> bool {
        debug_assert_eq!(highlights.len(), self.render.len());
        self.highlights = highlights;
        let changed = self.open_comment != open_comment;
        self.open_comment = open_comment;
        changed
    }

    /// Seed `open_comment` for a row that hasn't been highlighted yet.
    pub(crate) const fn seed_open_comment(&mut self, open: bool) {
        self.open_comment = open;
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Content index → display column.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.content
            .iter()
            .take(cx)
            .fold(0, |rx, &ch| match ch {
                '\t' => rx + tab_advance(rx, tab_stop),
                _ => rx + char_width(ch),
            })
    }

    /// Display column → content index. Columns past the end map to `len()`.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur = 0;
        for (cx, &ch) in self.content.iter().enumerate() {
            cur += match ch {
                '\t' => tab_advance(cur, tab_stop),
                _ => char_width(ch),
            };
            if cur > rx {
                return cx;
            }
        }
        self.content.len()
    }

    /// Content index → index into `render` / `highlights`.
    #[must_use]
    pub fn cx_to_render_idx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        let mut idx = 0;
        for &ch in self.content.iter().take(cx) {
            if ch == '\t' {
                let n = tab_advance(rx, tab_stop);
                rx += n;
                idx += n;
            } else {
                rx += char_width(ch);
                idx += 1;
            }
        }
        idx
    }

    // -- Overlay -------------------------------------------------------------

    /// Paint `hl` over render indices `start..end` and return the previous
    /// highlight array so the caller can put it back.
    pub fn overlay(&mut self, start: usize, end: usize, hl: Highlight) -> Vec<Highlight> {
        let saved = self.highlights.clone();
        let len = self.highlights.len();
        let (start, end) = (start.min(len), end.min(len));
        if start < end {
            self.highlights[start..end].fill(hl);
        }
        saved
    }

    /// Put back a highlight array returned by [`overlay`](Self::overlay).
    ///
    /// Ignored if the row has been re-rendered to a different length since.
    pub fn restore_highlights(&mut self, saved: Vec<Highlight>) {
        if saved.len() == self.highlights.len() {
            self.highlights = saved;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(text: &str, tab_stop: usize) -> Row {
        let mut r = Row::new(text.chars().collect());
        r.update_render(tab_stop);
        let n = r.render.len();
        r.set_highlights(vec![Highlight::Normal; n], false);
        r
    }

    fn render(r: &Row) -> String {
        r.render().iter().collect()
    }

    // -- Render --------------------------------------------------------------

    #[test]
    fn render_copies_plain_text() {
        let r = row("hello", 8);
        assert_eq!(render(&r), "hello");
        assert_eq!(r.highlights().len(), 5);
    }

    #[test]
    fn render_expands_tabs_to_next_stop() {
        assert_eq!(render(&row("\tx", 8)), "        x");
        assert_eq!(render(&row("ab\tx", 4)), "ab  x");
        assert_eq!(render(&row("abcd\tx", 4)), "abcd    x");
    }

    #[test]
    fn zero_tab_stop_treated_as_one() {
        assert_eq!(render(&row("a\tb", 0)), "a b");
    }

    // -- Coordinates ---------------------------------------------------------

    #[test]
    fn cx_to_rx_plain() {
        let r = row("hello", 8);
        assert_eq!(r.cx_to_rx(0, 8), 0);
        assert_eq!(r.cx_to_rx(3, 8), 3);
        assert_eq!(r.cx_to_rx(99, 8), 5);
    }

    #[test]
    fn cx_to_rx_tabs() {
        let r = row("a\tb", 8);
        assert_eq!(r.cx_to_rx(1, 8), 1);
        assert_eq!(r.cx_to_rx(2, 8), 8);
        assert_eq!(r.cx_to_rx(3, 8), 9);
    }

    #[test]
    fn cx_to_rx_wide_chars() {
        let r = row("中a", 8);
        assert_eq!(r.cx_to_rx(1, 8), 2);
        assert_eq!(r.cx_to_rx(2, 8), 3);
        // Render index ignores width.
        assert_eq!(r.cx_to_render_idx(1, 8), 1);
    }

    #[test]
    fn rx_to_cx_inverts_cx_to_rx() {
        let r = row("a\tbc", 4);
        for cx in 0..=r.len() {
            let rx = r.cx_to_rx(cx, 4);
            assert_eq!(r.rx_to_cx(rx, 4), cx, "cx={cx} rx={rx}");
        }
    }

    #[test]
    fn rx_inside_tab_maps_to_the_tab() {
        let r = row("\tx", 8);
        assert_eq!(r.rx_to_cx(3, 8), 0);
        assert_eq!(r.rx_to_cx(100, 8), 2);
    }

    #[test]
    fn render_idx_follows_tab_expansion() {
        let r = row("\tfoo", 4);
        assert_eq!(r.cx_to_render_idx(1, 4), 4);
        assert_eq!(r.cx_to_render_idx(4, 4), 7);
    }

    // -- Overlay -------------------------------------------------------------

    #[test]
    fn overlay_and_restore() {
        let mut r = row("hello world", 8);
        let saved = r.overlay(6, 11, Highlight::Match);
        assert_eq!(r.highlights()[5], Highlight::Normal);
        assert!(r.highlights()[6..].iter().all(|&h| h == Highlight::Match));

        r.restore_highlights(saved);
        assert!(r.highlights().iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn overlay_clamps_out_of_range() {
        let mut r = row("abc", 8);
        let saved = r.overlay(2, 50, Highlight::Match);
        assert_eq!(r.highlights()[2], Highlight::Match);
        r.restore_highlights(saved);

        let saved = r.overlay(10, 20, Highlight::Match);
        assert_eq!(saved, r.highlights().to_vec());
    }

    #[test]
    fn control_chars_are_one_column() {
        assert_eq!(char_width('\x01'), 1);
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('中'), 2);
    }
}
