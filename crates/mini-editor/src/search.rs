//! Search — literal substring search over the document.
//!
//! Two forms:
//!
//! - **Static** ([`find_forward`]): one pass from just after the cursor to
//!   the end of the document. No wraparound. Used by `n`.
//! - **Interactive** ([`SearchSession`]): re-run on every prompt keystroke.
//!   Typing restarts the scan from the row the search began on; arrow keys
//!   step to the next or previous matching row, wrapping at either end.
//!
//! A session paints its current match with [`Highlight::Match`] over a copy
//! of the row's baseline highlights and puts the baseline back before the
//! next step, so the overlay never leaks into the document.

use mini_syntax::Highlight;
use tracing::debug;

use crate::cursor::Cursor;
use crate::document::Document;
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Substring search
// ---------------------------------------------------------------------------

/// Leftmost position where `query` occurs in `text`.
///
/// An empty query never matches.
#[must_use]
pub fn find_substring(text: &[char], query: &[char]) -> Option<usize> {
    if query.is_empty() || query.len() > text.len() {
        return None;
    }
    text.windows(query.len()).position(|w| w == query)
}

/// First match strictly after `from`, scanning the rest of `from`'s row and
/// then each later row. Stops at the end of the document.
#[must_use]
pub fn find_forward(doc: &Document, query: &[char], from: Cursor) -> Option<Cursor> {
    let row = doc.row(from.y)?;
    let start = from.x + 1;
    if let Some(x) = row.content().get(start..).and_then(|rest| find_substring(rest, query)) {
        return Some(Cursor::at(start + x, from.y));
    }
    (from.y + 1..doc.len()).find_map(|y| {
        let row = doc.row(y)?;
        find_substring(row.content(), query).map(|x| Cursor::at(x, y))
    })
}

/// First matching row in `rows` order, visiting each row at most once.
fn scan_rows<I>(doc: &Document, query: &[char], rows: I) -> Option<Cursor>
where
    I: Iterator<Item = usize>,
{
    rows.take(doc.len()).find_map(|y| {
        let row = doc.row(y)?;
        find_substring(row.content(), query).map(|x| Cursor::at(x, y))
    })
}

/// Leftmost match in the first matching row after `after_row`, wrapping.
#[must_use]
pub fn find_next(doc: &Document, query: &[char], after_row: usize) -> Option<Cursor> {
    let len = doc.len();
    if len == 0 {
        return None;
    }
    let first = (after_row + 1) % len;
    scan_rows(doc, query, (0..len).map(|i| (first + i) % len))
}

/// Leftmost match in the first matching row before `before_row`, wrapping.
#[must_use]
pub fn find_previous(doc: &Document, query: &[char], before_row: usize) -> Option<Cursor> {
    let len = doc.len();
    if len == 0 {
        return None;
    }
    let first = (before_row % len + len - 1) % len;
    scan_rows(doc, query, (0..len).map(|i| (first + len - i) % len))
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// What the last prompt keystroke asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// The query changed: scan again from where the search began.
    Restart,
    /// Jump to the next matching row.
    Next,
    /// Jump to the previous matching row.
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// Transient state of an interactive search, including the snapshot that
/// [`cancel`](Self::cancel) restores.
#[derive(Debug)]
pub struct SearchSession {
    saved_cursor: Cursor,
    saved_row_offset: usize,
    saved_col_offset: usize,
    query: Vec<char>,
    last_match: Option<usize>,
    direction: SearchDirection,
    /// Row carrying the match overlay and its baseline highlights.
    overlay: Option<(usize, Vec<Highlight>)>,
}

impl SearchSession {
    /// Snapshot the cursor and scroll position.
    #[must_use]
    pub const fn begin(cursor: Cursor, viewport: &Viewport) -> Self {
        Self {
            saved_cursor: cursor,
            saved_row_offset: viewport.row_offset,
            saved_col_offset: viewport.col_offset,
            query: Vec::new(),
            last_match: None,
            direction: SearchDirection::Forward,
            overlay: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.query.iter().collect()
    }

    #[must_use]
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    #[must_use]
    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Re-run the search for `query`.
    ///
    /// On a match the cursor moves onto it, the viewport is pushed past the
    /// end so the next scroll brings the match row to the top, and the
    /// match is overlaid. With no match the cursor stays put.
    pub fn step(
        &mut self,
        query: &str,
        step: SearchStep,
        doc: &mut Document,
        cursor: &mut Cursor,
        viewport: &mut Viewport,
    ) {
        self.clear_overlay(doc);
        let query: Vec<char> = query.chars().collect();
        let changed = query != self.query;
        self.query = query;

        let step = if changed { SearchStep::Restart } else { step };
        let found = match (step, self.last_match) {
            (SearchStep::Next, Some(y)) => {
                self.direction = SearchDirection::Forward;
                find_next(doc, &self.query, y)
            }
            (SearchStep::Previous, Some(y)) => {
                self.direction = SearchDirection::Backward;
                find_previous(doc, &self.query, y)
            }
            _ => {
                self.direction = SearchDirection::Forward;
                let origin = self.saved_cursor.y;
                // Inclusive of the origin row: start the wrap one row earlier.
                find_next(doc, &self.query, origin + doc.len().saturating_sub(1))
            }
        };

        self.last_match = found.map(|m| m.y);
        debug!(query = %self.query(), ?step, found = ?found, "search step");

        if let Some(m) = found {
            *cursor = m;
            viewport.row_offset = doc.len();
            self.overlay = doc
                .overlay_match(m.y, m.x, self.query.len())
                .map(|saved| (m.y, saved));
        }
    }

    /// Keep the cursor where the search left it. Returns the final query.
    pub fn commit(mut self, doc: &mut Document) -> String {
        self.clear_overlay(doc);
        self.query()
    }

    /// Roll back the cursor and scroll position to the snapshot.
    pub fn cancel(mut self, doc: &mut Document, cursor: &mut Cursor, viewport: &mut Viewport) {
        self.clear_overlay(doc);
        *cursor = self.saved_cursor;
        viewport.row_offset = self.saved_row_offset;
        viewport.col_offset = self.saved_col_offset;
    }

    fn clear_overlay(&mut self, doc: &mut Document) {
        if let Some((y, saved)) = self.overlay.take() {
            doc.restore_highlights(y, saved);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
