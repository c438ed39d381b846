//! The `Editor` aggregate and its main loop.
//!
//! One key is read, fully dispatched (including any nested prompt loop),
//! then one frame is rendered, before the next key is read. Everything
//! lives on this one struct and is mutated in place; there is no shared
//! state and no background work.

use std::path::Path;
use std::time::Instant;

use mini_term::input::KeyEvent;
use mini_term::terminal::Size;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::error::{EditorError, Result};
use crate::host::{FrameSink, KeySource};
use crate::keymap::{Dispatcher, Keymap};
use crate::mode::EditorMode;
use crate::prompt::{PromptKind, PromptState};
use crate::render::Frame;
use crate::search::{self, SearchSession};
use crate::viewport::Viewport;

/// Transient text on the message bar.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

pub struct Editor {
    pub(crate) doc: Document,
    pub(crate) cursor: Cursor,
    pub(crate) viewport: Viewport,
    pub(crate) mode: EditorMode,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) prompt: Option<PromptState>,
    pub(crate) search: Option<SearchSession>,
    last_query: Option<String>,
    message: StatusMessage,
    config: Config,
    quit_counter: u32,
    quit: bool,
    pub(crate) keys: Box<dyn KeySource>,
    sink: Box<dyn FrameSink>,
}

impl Editor {
    pub fn new(
        config: Config,
        size: Size,
        keys: Box<dyn KeySource>,
        sink: Box<dyn FrameSink>,
    ) -> Self {
        let mut doc = Document::new();
        doc.set_tab_stop(config.tab_stop);
        Self {
            doc,
            cursor: Cursor::new(),
            viewport: Viewport::for_terminal(size),
            mode: EditorMode::Command,
            dispatcher: Dispatcher::new(),
            prompt: None,
            search: None,
            last_query: None,
            message: StatusMessage {
                text: String::new(),
                set_at: Instant::now(),
            },
            config,
            quit_counter: 0,
            quit: false,
            keys,
            sink,
        }
    }

    // -- Accessors -----------------------------------------------------------

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// The message-bar text, unless empty or expired.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let m = &self.message;
        (!m.text.is_empty() && m.set_at.elapsed() < self.config.message_timeout())
            .then_some(m.text.as_str())
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        };
    }

    // -- Main loop -----------------------------------------------------------

    /// Render and process keys until quit.
    ///
    /// # Errors
    ///
    /// Fatal input/output errors.
    pub fn run(&mut self) -> Result<()> {
        info!(mode = %self.mode, "editor started");
        while !self.quit {
            let cycle = self.refresh_screen().and_then(|()| self.process_key());
            if let Err(e) = cycle {
                error!(error = %e, "editor loop failed");
                return Err(e);
            }
        }
        info!("editor quit");
        Ok(())
    }

    /// Read one key and handle it.
    ///
    /// # Errors
    ///
    /// Fatal input/output errors.
    pub fn process_key(&mut self) -> Result<()> {
        let key = self.keys.read_key()?;
        self.handle_key(key)
    }

    /// Dispatch one key and settle the cursor.
    ///
    /// # Errors
    ///
    /// Fatal input/output errors from nested prompts.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.dispatch(key)?;
        if !key.is_ctrl('q') {
            self.quit_counter = 0;
        }
        self.cursor.clamp(&self.doc);
        Ok(())
    }

    /// Scroll to the cursor, assemble a frame and send it to the sink.
    ///
    /// # Errors
    ///
    /// [`EditorError::Output`] if the sink fails.
    pub fn refresh_screen(&mut self) -> Result<()> {
        self.cursor.clamp(&self.doc);
        self.viewport.scroll(&self.cursor, &self.doc);
        let frame = self.frame().render();
        self.sink.write_frame(&frame)
    }

    /// A view of the current state for rendering.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            doc: &self.doc,
            cursor: self.cursor,
            viewport: &self.viewport,
            mode: self.mode,
            message: self.message(),
        }
    }

    /// Switch between Command and Insert. Prompt mode is entered only via
    /// [`prompt`](Self::prompt).
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == EditorMode::Prompt {
            return;
        }
        self.dispatcher.set_mode_slot(Keymap::for_mode(mode));
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode switch");
        }
        self.mode = mode;
    }

    /// Turn a command result into a message. Only fatal errors survive.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e),
            Err(EditorError::PromptCancelled) => {
                self.set_message("");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                self.set_message(e.to_string());
                Ok(())
            }
        }
    }

    // -- Files ---------------------------------------------------------------

    /// Replace the document with the contents of `path`.
    ///
    /// # Errors
    ///
    /// [`EditorError::EmptyFilename`] for an empty path, [`EditorError::Io`]
    /// if the file exists but can't be read.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(EditorError::EmptyFilename);
        }
        self.doc = Document::load(path, self.config.tab_stop)?;
        self.cursor = Cursor::new();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        Ok(())
    }

    /// Save the document, asking for a name first if it has none.
    ///
    /// # Errors
    ///
    /// [`EditorError::PromptCancelled`] if the name prompt is escaped,
    /// [`EditorError::EmptyFilename`] for an empty name,
    /// [`EditorError::Io`] on write failure.
    pub fn save(&mut self) -> Result<usize> {
        if self.doc.filename().is_none() {
            let name = self.prompt(PromptKind::SaveAs)?;
            if name.is_empty() {
                return Err(EditorError::EmptyFilename);
            }
            self.doc.set_filename(name);
        }
        self.doc.save()
    }

    pub(crate) fn save_command(&mut self) -> Result<()> {
        match self.save() {
            Ok(n) => self.set_message(format!("{n} bytes written to disk")),
            Err(EditorError::PromptCancelled) => self.set_message("Save aborted"),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e @ EditorError::EmptyFilename) => self.set_message(e.to_string()),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.set_message(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }

    pub(crate) fn open_command(&mut self) -> Result<()> {
        let result = self
            .prompt(PromptKind::Open)
            .and_then(|name| self.open_file(Path::new(&name)));
        self.report(result)
    }

    pub(crate) fn quit_command(&mut self) {
        if self.doc.is_modified() && self.quit_counter < self.config.quit_times {
            let left = self.config.quit_times - self.quit_counter;
            self.set_message(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {left} more times to quit."
            ));
            self.quit_counter += 1;
            return;
        }
        self.quit = true;
    }

    // -- Search --------------------------------------------------------------

    /// Interactive search. Enter keeps the cursor on the match; Escape puts
    /// the cursor and scroll position back.
    ///
    /// # Errors
    ///
    /// [`EditorError::PromptCancelled`] on Escape, fatal input/output errors.
    pub fn find(&mut self) -> Result<()> {
        self.search = Some(SearchSession::begin(self.cursor, &self.viewport));
        let result = self.prompt(PromptKind::Search);
        let Some(session) = self.search.take() else {
            return result.map(|_| ());
        };
        match result {
            Ok(_) => {
                let query = session.commit(&mut self.doc);
                if !query.is_empty() {
                    self.last_query = Some(query);
                }
                Ok(())
            }
            Err(e) => {
                session.cancel(&mut self.doc, &mut self.cursor, &mut self.viewport);
                Err(e)
            }
        }
    }

    pub(crate) fn find_command(&mut self) -> Result<()> {
        let result = self.find();
        self.report(result)
    }

    /// Static search for the last committed query, forward from the cursor.
    pub(crate) fn find_again(&mut self) {
        let Some(query) = self.last_query.clone() else {
            self.set_message("No previous search");
            return;
        };
        let chars: Vec<char> = query.chars().collect();
        match search::find_forward(&self.doc, &chars, self.cursor) {
            Some(found) => self.cursor = found,
            None => self.set_message(format!("Pattern not found: {query}")),
        }
    }

    // -- Editing -------------------------------------------------------------

    /// Insert `ch` at the cursor, creating a row if the document is empty.
    pub fn insert_char(&mut self, ch: char) {
        if self.cursor.y >= self.doc.len() {
            self.doc.insert_row(self.doc.len(), std::iter::empty());
            self.cursor.y = self.doc.len() - 1;
        }
        let Cursor { x, y } = self.cursor;
        let x = x.min(self.doc.row_len(y));
        self.doc.insert_char(y, x, ch);
        self.cursor.x = x + 1;
    }

    /// Split the row at the cursor and move to the start of the new row.
    pub fn insert_newline(&mut self) {
        if self.doc.is_empty() {
            self.doc.insert_row(0, std::iter::empty());
        }
        let Cursor { x, y } = self.cursor;
        self.doc.split_row(y, x);
        self.cursor = Cursor::at(0, y + 1);
    }

    /// Backspace: delete left of the cursor, joining with the previous row
    /// at column 0.
    pub fn delete_char(&mut self) {
        let Cursor { x, y } = self.cursor;
        if y >= self.doc.len() || (x == 0 && y == 0) {
            return;
        }
        if x > 0 {
            self.doc.delete_char(y, x - 1);
            self.cursor.x = x - 1;
        } else if let Some(join_at) = self.doc.merge_with_previous(y) {
            self.cursor = Cursor::at(join_at, y - 1);
        }
    }

    /// Delete under the cursor, joining the next row at end of line.
    pub fn delete_forward(&mut self) {
        let Cursor { x, y } = self.cursor;
        if x < self.doc.row_len(y) {
            self.doc.delete_char(y, x);
        } else {
            self.doc.merge_with_previous(y + 1);
        }
    }

    /// Delete under the cursor without leaving the row.
    pub(crate) fn delete_under_cursor(&mut self) {
        let Cursor { x, y } = self.cursor;
        self.doc.delete_char(y, x);
        self.cursor.clamp(&self.doc);
    }

    /// Delete back to the nearest `ch` left of the cursor (inclusive), or to
    /// the start of the row.
    pub fn delete_until(&mut self, ch: char) {
        let Cursor { x, y } = self.cursor;
        let Some(row) = self.doc.row(y) else {
            return;
        };
        let x = x.min(row.len());
        let start = row.content()[..x].iter().rposition(|&c| c == ch).unwrap_or(0);
        self.doc.delete_range(y, start, x);
        self.cursor.x = start;
    }

    pub(crate) fn open_line_below(&mut self) {
        let at = if self.doc.is_empty() { 0 } else { self.cursor.y + 1 };
        self.doc.insert_row(at, std::iter::empty());
        self.cursor = Cursor::at(0, at);
        self.set_mode(EditorMode::Insert);
    }

    pub(crate) fn delete_current_row(&mut self) {
        self.doc.delete_row(self.cursor.y);
        self.cursor.clamp(&self.doc);
    }

    pub(crate) fn clear_current_row(&mut self) {
        self.doc.set_row(self.cursor.y, std::iter::empty());
        self.cursor.x = 0;
    }

    // -- Motion --------------------------------------------------------------

    /// Move to the start of the next word on this row; stay put if there
    /// is none.
    pub fn word_forward(&mut self) {
        let Some(row) = self.doc.row(self.cursor.y) else {
            return;
        };
        let chars = row.content();
        let x = self.cursor.x.min(chars.len());
        let Some(gap) = chars[x..].iter().position(|&c| is_blank(c)) else {
            return;
        };
        if let Some(word) = chars[x + gap..].iter().position(|&c| !is_blank(c)) {
            self.cursor.x = x + gap + word;
        }
    }

    /// Move to the start of this or the previous word on this row.
    pub fn word_back(&mut self) {
        let Some(row) = self.doc.row(self.cursor.y) else {
            return;
        };
        let chars = row.content();
        let mut x = self.cursor.x.min(chars.len());
        while x > 0 && is_blank(chars[x - 1]) {
            x -= 1;
        }
        while x > 0 && !is_blank(chars[x - 1]) {
            x -= 1;
        }
        self.cursor.x = x;
    }

    pub fn set_absolute_x(&mut self, x: usize) {
        self.cursor.set_absolute_x(x, &self.doc);
    }

    pub fn set_absolute_y(&mut self, y: usize) {
        self.cursor.set_absolute_y(y, &self.doc);
    }

    pub fn set_relative_x(&mut self, dx: isize) {
        self.cursor.set_relative_x(dx, &self.doc);
    }

    pub fn set_relative_y(&mut self, dy: isize) {
        self.cursor.set_relative_y(dy, &self.doc);
    }

    pub fn set_max_x(&mut self) {
        self.cursor.set_max_x(&self.doc);
    }

    pub fn set_max_y(&mut self) {
        self.cursor.set_max_y(&self.doc);
    }

    /// Jump to the top of the screen, then one screen up.
    pub(crate) fn page_up(&mut self) {
        let top = self.viewport.row_offset;
        self.set_absolute_y(top.saturating_sub(self.viewport.screen_rows));
    }

    /// Jump to the bottom of the screen, then one screen down.
    pub(crate) fn page_down(&mut self) {
        let rows = self.viewport.screen_rows;
        let bottom = (self.viewport.row_offset + rows)
            .saturating_sub(1)
            .min(self.doc.len());
        self.set_absolute_y(bottom + rows);
    }
}

const fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedKeys;
    use mini_term::input::KeyCode;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn editor_with(lines: &[&str], keys: Vec<KeyEvent>) -> Editor {
        editor_with_config(lines, keys, Config::default())
    }

    fn editor_with_config(lines: &[&str], keys: Vec<KeyEvent>, config: Config) -> Editor {
        let mut ed = Editor::new(
            config,
            Size { cols: 80, rows: 24 },
            Box::new(ScriptedKeys::new(keys)),
            Box::new(Vec::<u8>::new()),
        );
        ed.doc = Document::from_lines(lines);
        ed
    }

    fn press(ed: &mut Editor, keys: &[KeyEvent]) {
        for &k in keys {
            ed.handle_key(k).unwrap();
        }
    }

    fn chars(s: &str) -> Vec<KeyEvent> {
        s.chars().map(KeyEvent::char).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::ctrl(ch)
    }

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("mini-editor-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    // -- Modes ---------------------------------------------------------------

    #[test]
    fn starts_in_command_mode() {
        let ed = editor_with(&[], vec![]);
        assert_eq!(ed.mode(), EditorMode::Command);
        assert_eq!(ed.dispatcher.chain(), &[Keymap::Global, Keymap::Command]);
    }

    #[test]
    fn i_and_escape_swap_one_slot() {
        let mut ed = editor_with(&["x"], vec![]);
        press(&mut ed, &chars("i"));
        assert_eq!(ed.mode(), EditorMode::Insert);
        assert_eq!(ed.dispatcher.chain(), &[Keymap::Global, Keymap::Insert]);
        press(&mut ed, &[key(KeyCode::Escape)]);
        assert_eq!(ed.mode(), EditorMode::Command);
        assert_eq!(ed.dispatcher.chain(), &[Keymap::Global, Keymap::Command]);
    }

    #[test]
    fn ctrl_c_returns_to_command() {
        let mut ed = editor_with(&["x"], vec![]);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[ctrl('c')]);
        assert_eq!(ed.mode(), EditorMode::Command);
    }

    #[test]
    fn set_mode_prompt_is_ignored() {
        let mut ed = editor_with(&[], vec![]);
        ed.set_mode(EditorMode::Prompt);
        assert_eq!(ed.mode(), EditorMode::Command);
    }

    #[test]
    fn unclaimed_command_key_is_dropped() {
        let mut ed = editor_with(&["abc"], vec![]);
        assert!(!ed.dispatch(KeyEvent::char('z')).unwrap());
        assert!(ed.dispatch(key(KeyCode::Escape)).unwrap());
        assert_eq!(ed.document().lines(), vec!["abc"]);
        assert!(!ed.document().is_modified());
    }

    // -- Insert mode ---------------------------------------------------------

    #[test]
    fn typing_into_empty_document() {
        let mut ed = editor_with(&[], vec![]);
        press(&mut ed, &chars("ihi"));
        assert_eq!(ed.document().lines(), vec!["hi"]);
        assert_eq!(ed.cursor(), Cursor::at(2, 0));
        assert!(ed.document().is_modified());
    }

    #[test]
    fn enter_at_end_of_row_opens_empty_row() {
        let mut ed = editor_with(&[], vec![]);
        press(&mut ed, &chars("iab"));
        press(&mut ed, &[key(KeyCode::Enter)]);
        assert_eq!(ed.document().lines(), vec!["ab", ""]);
        assert_eq!(ed.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn enter_mid_row_splits() {
        let mut ed = editor_with(&["hello"], vec![]);
        ed.cursor = Cursor::at(2, 0);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[key(KeyCode::Enter)]);
        assert_eq!(ed.document().lines(), vec!["he", "llo"]);
        assert_eq!(ed.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn backspace_merges_at_column_zero() {
        let mut ed = editor_with(&["foo", "bar"], vec![]);
        ed.cursor = Cursor::at(0, 1);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[key(KeyCode::Backspace)]);
        assert_eq!(ed.document().lines(), vec!["foobar"]);
        assert_eq!(ed.cursor(), Cursor::at(3, 0));
        press(&mut ed, &[ctrl('h')]);
        assert_eq!(ed.document().lines(), vec!["fobar"]);
        assert_eq!(ed.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut ed = editor_with(&["a"], vec![]);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[key(KeyCode::Backspace)]);
        assert_eq!(ed.document().lines(), vec!["a"]);
        assert!(!ed.document().is_modified());
    }

    #[test]
    fn delete_joins_next_row_at_end() {
        let mut ed = editor_with(&["ab", "cd"], vec![]);
        ed.cursor = Cursor::at(2, 0);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[key(KeyCode::Delete)]);
        assert_eq!(ed.document().lines(), vec!["abcd"]);
        assert_eq!(ed.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn tab_inserts_tab() {
        let mut ed = editor_with(&["x"], vec![]);
        press(&mut ed, &chars("i"));
        press(&mut ed, &[key(KeyCode::Tab)]);
        assert_eq!(ed.document().lines(), vec!["\tx"]);
    }

    #[test]
    fn ctrl_w_deletes_back_to_space() {
        let mut ed = editor_with(&["foo bar"], vec![]);
        ed.cursor = Cursor::at(7, 0);
        press(&mut ed, &[ctrl('w')]);
        assert_eq!(ed.document().lines(), vec!["foo"]);
        assert_eq!(ed.cursor(), Cursor::at(3, 0));
        press(&mut ed, &[ctrl('w')]);
        assert_eq!(ed.document().lines(), vec![""]);
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
    }

    // -- Command mode --------------------------------------------------------

    #[test]
    fn w_walks_words_and_stops_at_last() {
        let mut ed = editor_with(&["the quick fox"], vec![]);
        press(&mut ed, &chars("w"));
        assert_eq!(ed.cursor().x, 4);
        press(&mut ed, &chars("ww"));
        assert_eq!(ed.cursor().x, 10);
    }

    #[test]
    fn b_walks_back() {
        let mut ed = editor_with(&["the quick fox"], vec![]);
        ed.cursor = Cursor::at(12, 0);
        press(&mut ed, &chars("b"));
        assert_eq!(ed.cursor().x, 10);
        press(&mut ed, &chars("b"));
        assert_eq!(ed.cursor().x, 4);
        press(&mut ed, &chars("bb"));
        assert_eq!(ed.cursor().x, 0);
    }

    #[test]
    fn hjkl_and_jumps() {
        let mut ed = editor_with(&["abc", "de", "fghij"], vec![]);
        press(&mut ed, &chars("ll"));
        assert_eq!(ed.cursor(), Cursor::at(2, 0));
        press(&mut ed, &chars("j"));
        assert_eq!(ed.cursor(), Cursor::at(2, 1));
        press(&mut ed, &chars("h"));
        assert_eq!(ed.cursor(), Cursor::at(1, 1));
        press(&mut ed, &chars("G$"));
        assert_eq!(ed.cursor(), Cursor::at(5, 2));
        press(&mut ed, &chars("0"));
        assert_eq!(ed.cursor(), Cursor::at(0, 2));
        press(&mut ed, &chars("gk"));
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn a_appends_after_cursor() {
        let mut ed = editor_with(&["ac"], vec![]);
        press(&mut ed, &chars("ab"));
        assert_eq!(ed.document().lines(), vec!["abc"]);
        assert_eq!(ed.mode(), EditorMode::Insert);
    }

    #[test]
    fn o_opens_line_below() {
        let mut ed = editor_with(&["one", "three"], vec![]);
        press(&mut ed, &chars("otwo"));
        assert_eq!(ed.document().lines(), vec!["one", "two", "three"]);
        assert_eq!(ed.cursor(), Cursor::at(3, 1));
    }

    #[test]
    fn d_deletes_row_and_keeps_cursor_in_bounds() {
        let mut ed = editor_with(&["a", "b"], vec![]);
        ed.cursor = Cursor::at(0, 1);
        press(&mut ed, &chars("D"));
        assert_eq!(ed.document().lines(), vec!["a"]);
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
        press(&mut ed, &chars("D"));
        assert!(ed.document().is_empty());
        assert_eq!(ed.cursor(), Cursor::new());
        press(&mut ed, &chars("D"));
        assert!(ed.document().is_empty());
    }

    #[test]
    fn c_clears_row_and_x_deletes_char() {
        let mut ed = editor_with(&["abc", "def"], vec![]);
        ed.cursor = Cursor::at(2, 0);
        press(&mut ed, &chars("x"));
        assert_eq!(ed.document().lines(), vec!["ab", "def"]);
        assert_eq!(ed.cursor(), Cursor::at(2, 0));
        press(&mut ed, &chars("x"));
        assert_eq!(ed.document().lines(), vec!["ab", "def"]);
        press(&mut ed, &chars("jC"));
        assert_eq!(ed.document().lines(), vec!["ab", ""]);
        assert_eq!(ed.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn arrows_and_home_end() {
        let mut ed = editor_with(&["abcdef", "x"], vec![]);
        press(&mut ed, &[key(KeyCode::End)]);
        assert_eq!(ed.cursor(), Cursor::at(6, 0));
        press(&mut ed, &[key(KeyCode::Left), key(KeyCode::Down)]);
        assert_eq!(ed.cursor(), Cursor::at(1, 1));
        press(&mut ed, &[key(KeyCode::Up), key(KeyCode::Home)]);
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
        press(&mut ed, &[key(KeyCode::Right)]);
        assert_eq!(ed.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn page_down_and_up() {
        let lines: Vec<String> = (0..100).map(|i| format!("{i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut ed = editor_with(&refs, vec![]);
        // 24 rows minus the two bars.
        press(&mut ed, &[key(KeyCode::PageDown)]);
        assert_eq!(ed.cursor().y, 43);
        ed.refresh_screen().unwrap();
        assert_eq!(ed.viewport().row_offset, 22);
        press(&mut ed, &[key(KeyCode::PageUp)]);
        assert_eq!(ed.cursor().y, 0);
    }

    #[test]
    fn cursor_stays_in_bounds_for_any_key_sequence() {
        let mut ed = editor_with(&["short", "", "a much longer row", "\tx"], vec![]);
        let script = "jjj$kkxDlllGhhhwbbwo0$iq";
        for ch in script.chars() {
            ed.handle_key(KeyEvent::char(ch)).unwrap();
            assert!(ed.cursor().in_bounds(ed.document()), "after {ch:?}: {:?}", ed.cursor());
        }
        for code in [KeyCode::Escape, KeyCode::Up, KeyCode::End, KeyCode::PageDown, KeyCode::Right] {
            ed.handle_key(key(code)).unwrap();
            assert!(ed.cursor().in_bounds(ed.document()));
        }
    }

    // -- Search --------------------------------------------------------------

    #[test]
    fn search_commit_keeps_match() {
        let mut keys = vec![ctrl('f')];
        keys.extend(chars("bar"));
        keys.push(key(KeyCode::Enter));
        let mut ed = editor_with(&["hello world", "foo bar"], keys);

        ed.process_key().unwrap();
        assert_eq!(ed.cursor(), Cursor::at(4, 1));
        assert_eq!(ed.last_query(), Some("bar"));
        assert_eq!(ed.mode(), EditorMode::Command);
        assert!(ed.document().rows().iter().all(|r| {
            r.highlights().iter().all(|&h| h != mini_syntax::Highlight::Match)
        }));
    }

    #[test]
    fn search_cancel_restores_cursor_and_viewport() {
        let mut keys = vec![ctrl('f')];
        keys.extend(chars("bar"));
        keys.push(key(KeyCode::Escape));
        let mut ed = editor_with(&["hello world", "foo bar"], keys);
        let before = *ed.viewport();

        ed.process_key().unwrap();
        assert_eq!(ed.cursor(), Cursor::new());
        assert_eq!(ed.viewport().row_offset, before.row_offset);
        assert_eq!(ed.viewport().col_offset, before.col_offset);
        assert_eq!(ed.last_query(), None);
        assert_eq!(ed.message(), None);
    }

    #[test]
    fn slash_starts_search_and_n_repeats() {
        let mut keys = vec![KeyEvent::char('/')];
        keys.extend(chars("ab"));
        keys.push(key(KeyCode::Enter));
        let mut ed = editor_with(&["ab ab", "x", "ab"], keys);

        ed.process_key().unwrap();
        assert_eq!(ed.cursor(), Cursor::at(0, 0));
        press(&mut ed, &chars("n"));
        assert_eq!(ed.cursor(), Cursor::at(3, 0));
        press(&mut ed, &chars("n"));
        assert_eq!(ed.cursor(), Cursor::at(0, 2));
        press(&mut ed, &chars("n"));
        assert_eq!(ed.cursor(), Cursor::at(0, 2));
        assert_eq!(ed.message(), Some("Pattern not found: ab"));
    }

    #[test]
    fn n_without_previous_search() {
        let mut ed = editor_with(&["ab"], vec![]);
        press(&mut ed, &chars("n"));
        assert_eq!(ed.message(), Some("No previous search"));
    }

    #[test]
    fn search_arrows_step_between_rows() {
        let mut keys = vec![ctrl('f')];
        keys.extend(chars("hit"));
        keys.push(key(KeyCode::Down));
        keys.push(key(KeyCode::Down));
        keys.push(key(KeyCode::Enter));
        let mut ed = editor_with(&["hit", "x", "a hit", "hit"], keys);
        ed.process_key().unwrap();
        assert_eq!(ed.cursor(), Cursor::at(0, 3));
    }

    // -- Files ---------------------------------------------------------------

    #[test]
    fn save_unnamed_prompts_for_name() {
        let dir = temp_dir("saveas");
        let path = dir.join("out.c");
        let mut keys = vec![ctrl('s')];
        keys.extend(chars(path.to_str().unwrap()));
        keys.push(key(KeyCode::Enter));
        let mut ed = editor_with(&["int x;"], keys);
        ed.doc.insert_char(0, 0, ' ');

        ed.process_key().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), " int x;\n");
        assert_eq!(ed.message(), Some("8 bytes written to disk"));
        assert!(!ed.document().is_modified());
        assert_eq!(ed.document().filetype(), Some("c"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_as_escape_aborts() {
        let mut ed = editor_with(&["x"], vec![ctrl('s'), key(KeyCode::Escape)]);
        ed.process_key().unwrap();
        assert_eq!(ed.message(), Some("Save aborted"));
        assert!(ed.document().filename().is_none());
    }

    #[test]
    fn save_failure_is_reported() {
        let mut ed = editor_with(&["x"], vec![]);
        ed.doc.set_filename(std::env::temp_dir().join("mini-no-such-dir-q").join("f"));
        press(&mut ed, &[ctrl('s')]);
        let msg = ed.message().unwrap();
        assert!(msg.starts_with("Can't save! I/O error: "), "{msg}");
    }

    #[test]
    fn open_prompt_loads_file() {
        let dir = temp_dir("open");
        let path = dir.join("in.py");
        fs::write(&path, "def f():\n    pass\n").unwrap();
        let mut keys = vec![ctrl('o')];
        keys.extend(chars(path.to_str().unwrap()));
        keys.push(key(KeyCode::Enter));
        let mut ed = editor_with(&["old"], keys);
        ed.cursor = Cursor::at(1, 0);

        ed.process_key().unwrap();
        assert_eq!(ed.document().lines(), vec!["def f():", "    pass"]);
        assert_eq!(ed.cursor(), Cursor::new());
        assert_eq!(ed.document().filetype(), Some("python"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn open_empty_name_reports_and_keeps_document() {
        let mut ed = editor_with(&["keep"], vec![ctrl('o'), key(KeyCode::Enter)]);
        ed.process_key().unwrap();
        assert_eq!(ed.message(), Some("No filename given"));
        assert_eq!(ed.document().lines(), vec!["keep"]);
    }

    // -- Quit ----------------------------------------------------------------

    #[test]
    fn quit_unmodified_is_immediate() {
        let mut ed = editor_with(&["x"], vec![ctrl('q')]);
        ed.run().unwrap();
        assert!(ed.should_quit());
    }

    #[test]
    fn quit_with_changes_counts_down() {
        let config = Config {
            quit_times: 2,
            ..Config::default()
        };
        let mut ed = editor_with_config(&[], vec![], config);
        press(&mut ed, &chars("ix"));

        press(&mut ed, &[ctrl('q')]);
        assert_eq!(
            ed.message(),
            Some("WARNING!!! File has unsaved changes. Press Ctrl-Q 2 more times to quit.")
        );
        press(&mut ed, &[ctrl('q')]);
        assert_eq!(
            ed.message(),
            Some("WARNING!!! File has unsaved changes. Press Ctrl-Q 1 more times to quit.")
        );
        press(&mut ed, &[ctrl('q')]);
        assert!(ed.should_quit());
    }

    #[test]
    fn other_key_resets_quit_counter() {
        let config = Config {
            quit_times: 1,
            ..Config::default()
        };
        let mut ed = editor_with_config(&[], vec![], config);
        press(&mut ed, &chars("ix"));
        press(&mut ed, &[ctrl('q'), key(KeyCode::Left), ctrl('q')]);
        assert!(!ed.should_quit());
        press(&mut ed, &[ctrl('q')]);
        assert!(ed.should_quit());
    }

    #[test]
    fn run_ends_with_input_closed() {
        let mut ed = editor_with(&["x"], chars("jj"));
        let err = ed.run().unwrap_err();
        assert!(matches!(err, EditorError::InputClosed));
    }

    // -- Messages ------------------------------------------------------------

    #[test]
    fn message_expires() {
        let config = Config {
            message_timeout_secs: 0,
            ..Config::default()
        };
        let mut ed = editor_with_config(&[], vec![], config);
        ed.set_message("gone");
        assert_eq!(ed.message(), None);
    }
}
