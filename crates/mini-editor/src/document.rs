//! The Row Store — an ordered sequence of [`Row`]s plus file metadata.
//!
//! A row's position in the vector is its index; nothing caches row indices,
//! so structural edits never leave a stale one behind. Every content
//! mutation immediately rebuilds that row's render form and highlights,
//! and when the row's trailing comment state flips the following rows are
//! re-highlighted in a loop until the state stops changing.
//!
//! Out-of-range coordinates are silently ignored: key handlers can call
//! these freely without pre-validating.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mini_syntax::{Highlight, SyntaxProfile};
use tracing::{debug, info};

use crate::error::{EditorError, Result};
use crate::highlight::highlight_line;
use crate::row::Row;

pub const DEFAULT_TAB_STOP: usize = 8;

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    tab_stop: usize,
    syntax: Option<&'static SyntaxProfile>,
    filename: Option<PathBuf>,
    modified: bool,
}

impl Document {
    /// An empty, unnamed document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: DEFAULT_TAB_STOP,
            syntax: None,
            filename: None,
            modified: false,
        }
    }

    /// Build from lines of text. The result is unmodified.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Self::new();
        doc.rows = lines
            .into_iter()
            .map(|l| Row::new(l.as_ref().chars().collect()))
            .collect();
        doc.refresh_all();
        doc
    }

    /// Load `path`. A missing file gives an empty document with that name,
    /// marked modified so the first save creates it.
    ///
    /// Line endings (`\n` or `\r\n`) are stripped; invalid UTF-8 is
    /// replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// [`EditorError::Io`] for any read failure other than not-found.
    pub fn load(path: &Path, tab_stop: usize) -> Result<Self> {
        let (mut doc, modified) = match fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                (Self::from_lines(text.lines()), false)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "new file");
                (Self::new(), true)
            }
            Err(e) => return Err(EditorError::io(path, e)),
        };
        doc.tab_stop = tab_stop.max(1);
        doc.filename = Some(path.to_path_buf());
        doc.syntax = path.to_str().and_then(mini_syntax::detect);
        doc.refresh_all();
        doc.modified = modified;
        info!(path = %path.display(), rows = doc.len(), filetype = doc.filetype(), "opened");
        Ok(doc)
    }

    // -- Accessors -----------------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Content length of row `y`, 0 if out of range.
    #[must_use]
    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, Row::len)
    }

    /// Every row's content as a `String`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(Row::text).collect()
    }

    #[inline]
    #[must_use]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    #[inline]
    #[must_use]
    pub const fn syntax(&self) -> Option<&'static SyntaxProfile> {
        self.syntax
    }

    /// Name of the active filetype, if any.
    #[must_use]
    pub fn filetype(&self) -> Option<&'static str> {
        self.syntax.map(|s| s.name)
    }

    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Display column of content index `x` in row `y`.
    #[must_use]
    pub fn cx_to_rx(&self, y: usize, x: usize) -> usize {
        self.rows.get(y).map_or(0, |r| r.cx_to_rx(x, self.tab_stop))
    }

    // -- Settings ------------------------------------------------------------

    /// Change the tab stop and rebuild every row.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = tab_stop.max(1);
        self.refresh_all();
    }

    /// Change the highlighting profile and re-highlight every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxProfile>) {
        self.syntax = syntax;
        self.refresh_all();
    }

    /// Rename the document and re-detect its filetype from the new name.
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let syntax = path.to_str().and_then(mini_syntax::detect);
        self.filename = Some(path);
        self.set_syntax(syntax);
    }

    // -- Structural edits ----------------------------------------------------

    /// Insert a row at `at` (`0..=len`).
    pub fn insert_row(&mut self, at: usize, content: impl IntoIterator<Item = char>) {
        if at > self.rows.len() {
            return;
        }
        let mut row = Row::new(content.into_iter().collect());
        // The successor was seeded by our predecessor; start from that so a
        // change in our own comment state is detected.
        row.seed_open_comment(self.open_comment_before(at));
        self.rows.insert(at, row);
        self.update_row(at);
        self.modified = true;
    }

    /// Remove row `at`.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        let removed = self.rows.remove(at);
        if at < self.rows.len() && removed.open_comment() != self.open_comment_before(at) {
            self.rehighlight_from(at);
        }
        self.modified = true;
    }

    /// Replace the content of row `at`.
    pub fn set_row(&mut self, at: usize, content: impl IntoIterator<Item = char>) {
        let Some(row) = self.rows.get_mut(at) else {
            return;
        };
        *row.content_mut() = content.into_iter().collect();
        self.update_row(at);
        self.modified = true;
    }

    /// Split row `y` at `x`: the tail moves to a new row `y + 1`.
    ///
    /// Splitting at column 0 inserts an empty row above, which is also
    /// valid at `y == len` (appending a row).
    pub fn split_row(&mut self, y: usize, x: usize) {
        if x == 0 {
            self.insert_row(y, std::iter::empty());
            return;
        }
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let x = x.min(row.len());
        let tail = row.content_mut().split_off(x);
        self.update_row(y);
        self.insert_row(y + 1, tail);
    }

    /// Append row `y` to row `y - 1` and remove it.
    ///
    /// Returns the previous row's old length (where the cursor belongs),
    /// or `None` if `y` is 0 or out of range.
    pub fn merge_with_previous(&mut self, y: usize) -> Option<usize> {
        if y == 0 || y >= self.rows.len() {
            return None;
        }
        let tail = std::mem::take(self.rows[y].content_mut());
        let prev = &mut self.rows[y - 1];
        let join_at = prev.len();
        prev.content_mut().extend(tail);
        self.update_row(y - 1);
        self.delete_row(y);
        Some(join_at)
    }

    // -- Character edits -----------------------------------------------------

    /// Insert `ch` into row `y` before index `x` (clamped to the row end).
    pub fn insert_char(&mut self, y: usize, x: usize, ch: char) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let x = x.min(row.len());
        row.content_mut().insert(x, ch);
        self.update_row(y);
        self.modified = true;
    }

    /// Remove the character at index `x` of row `y`.
    pub fn delete_char(&mut self, y: usize, x: usize) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        if x >= row.len() {
            return;
        }
        row.content_mut().remove(x);
        self.update_row(y);
        self.modified = true;
    }

    /// Remove characters `start..end` of row `y` (clamped).
    pub fn delete_range(&mut self, y: usize, start: usize, end: usize) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let end = end.min(row.len());
        if start >= end {
            return;
        }
        row.content_mut().drain(start..end);
        self.update_row(y);
        self.modified = true;
    }

    // -- Search overlay ------------------------------------------------------

    /// Paint a match over content `x..x + len` of row `y`. Returns the
    /// baseline highlights to hand back to
    /// [`restore_highlights`](Self::restore_highlights).
    pub fn overlay_match(&mut self, y: usize, x: usize, len: usize) -> Option<Vec<Highlight>> {
        let tab_stop = self.tab_stop;
        let row = self.rows.get_mut(y)?;
        let start = row.cx_to_render_idx(x, tab_stop);
        let end = row.cx_to_render_idx(x + len, tab_stop);
        Some(row.overlay(start, end, Highlight::Match))
    }

    pub fn restore_highlights(&mut self, y: usize, saved: Vec<Highlight>) {
        if let Some(row) = self.rows.get_mut(y) {
            row.restore_highlights(saved);
        }
    }

    // -- Persistence ---------------------------------------------------------

    /// The bytes a save writes: each row followed by `\n`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for row in &self.rows {
            out.extend(row.content());
            out.push('\n');
        }
        out.into_bytes()
    }

    /// Write to `path`, clear the modified flag, return bytes written.
    ///
    /// # Errors
    ///
    /// [`EditorError::Io`] if the write fails.
    pub fn save_to(&mut self, path: &Path) -> Result<usize> {
        let bytes = self.to_bytes();
        fs::write(path, &bytes).map_err(|e| EditorError::io(path, e))?;
        self.modified = false;
        info!(path = %path.display(), bytes = bytes.len(), "saved");
        Ok(bytes.len())
    }

    /// Write to the document's own filename.
    ///
    /// # Errors
    ///
    /// [`EditorError::EmptyFilename`] if unnamed, otherwise as
    /// [`save_to`](Self::save_to).
    pub fn save(&mut self) -> Result<usize> {
        let path = self.filename.clone().ok_or(EditorError::EmptyFilename)?;
        self.save_to(&path)
    }

    // -- Highlight maintenance -----------------------------------------------

    fn open_comment_before(&self, y: usize) -> bool {
        y.checked_sub(1)
            .and_then(|p| self.rows.get(p))
            .is_some_and(Row::open_comment)
    }

    /// Rebuild row `y`'s render form and re-highlight from there.
    fn update_row(&mut self, y: usize) {
        if let Some(row) = self.rows.get_mut(y) {
            row.update_render(self.tab_stop);
            self.rehighlight_from(y);
        }
    }

    /// Re-highlight row `start`, then each following row for as long as
    /// the previous row's trailing comment state changed.
    fn rehighlight_from(&mut self, start: usize) {
        let mut y = start;
        while y < self.rows.len() {
            let seed = self.open_comment_before(y);
            let row = &mut self.rows[y];
            let out = highlight_line(row.render(), self.syntax, seed);
            if !row.set_highlights(out.highlights, out.open_comment) {
                break;
            }
            y += 1;
        }
        if y > start + 1 {
            debug!(start, through = y, "comment state propagated");
        }
    }

    /// Re-render and re-highlight every row top to bottom.
    fn refresh_all(&mut self) {
        let mut open = false;
        for row in &mut self.rows {
            row.update_render(self.tab_stop);
            let out = highlight_line(row.render(), self.syntax, open);
            open = out.open_comment;
            row.set_highlights(out.highlights, out.open_comment);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
