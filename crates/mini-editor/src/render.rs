//! Frame assembly.
//!
//! A [`Frame`] borrows the editor state for one cycle and turns it into the
//! bytes of a full repaint:
//!
//! ```text
//!   hide cursor, home
//!   text rows  (screen_rows lines, each ended with EL + CRLF)
//!   status bar (inverted)
//!   message bar
//!   place cursor, set shape, show cursor
//! ```
//!
//! Colors come from each character's [`Highlight`](mini_syntax::Highlight);
//! the [`ColorWriter`] only emits SGR when the color changes.

use mini_term::ansi;
use mini_term::output::{ColorWriter, OutputBuffer};

use crate::cursor::Cursor;
use crate::document::Document;
use crate::mode::EditorMode;
use crate::row::{Row, char_width};
use crate::viewport::Viewport;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Borrowed editor state for one repaint.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub doc: &'a Document,
    pub cursor: Cursor,
    pub viewport: &'a Viewport,
    pub mode: EditorMode,
    pub message: Option<&'a str>,
}

impl Frame<'_> {
    /// Assemble the full frame. Expects the viewport to be scrolled already.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let mut out = OutputBuffer::new();
        ansi::cursor_hide(&mut out).ok();
        ansi::cursor_home(&mut out).ok();

        self.draw_rows(&mut out);
        self.draw_status_bar(&mut out);
        self.draw_message_bar(&mut out);

        let (x, y) = self.viewport.cursor_screen_pos(&self.cursor);
        ansi::cursor_to(&mut out, to_u16(x), to_u16(y)).ok();
        ansi::set_cursor_shape(&mut out, self.mode.cursor_shape()).ok();
        ansi::cursor_show(&mut out).ok();
        out.take()
    }

    fn show_welcome(&self) -> bool {
        self.doc.is_empty() && self.doc.filename().is_none()
    }

    fn draw_rows(&self, out: &mut OutputBuffer) {
        let vp = self.viewport;
        for y in 0..vp.screen_rows {
            match self.doc.row(y + vp.row_offset) {
                Some(row) => self.draw_text_row(out, row),
                None if self.show_welcome() && y == vp.screen_rows / 3 => {
                    self.draw_welcome(out);
                }
                None => out.push_char('~'),
            }
            ansi::clear_line(out).ok();
            out.push_str("\r\n");
        }
    }

    /// The visible slice of `row`'s render form, in display columns.
    fn draw_text_row(&self, out: &mut OutputBuffer, row: &Row) {
        let start = self.viewport.col_offset;
        let end = start + self.viewport.screen_cols;
        let mut colors = ColorWriter::new();
        let mut col = 0;

        for (&ch, &hl) in row.render().iter().zip(row.highlights()) {
            let w = char_width(ch);
            if col < start {
                col += w;
                continue;
            }
            if col + w > end {
                break;
            }
            if ch.is_control() {
                colors.put_inverted(out, control_glyph(ch));
            } else {
                colors.put(out, ch, hl.color());
            }
            col += w;
        }
        colors.finish(out);
    }

    fn draw_welcome(&self, out: &mut OutputBuffer) {
        let cols = self.viewport.screen_cols;
        let text = format!("Mini editor -- version {VERSION}");
        let text = truncate(&text, cols);
        let mut padding = (cols - str_width(text)) / 2;
        if padding > 0 {
            out.push_char('~');
            padding -= 1;
        }
        for _ in 0..padding {
            out.push_char(' ');
        }
        out.push_str(text);
    }

    fn draw_status_bar(&self, out: &mut OutputBuffer) {
        let cols = self.viewport.screen_cols;
        let doc = self.doc;
        let name = doc
            .filename()
            .map_or_else(|| "[No Name]".to_owned(), |p| p.display().to_string());
        let modified = if doc.is_modified() { " (modified)" } else { "" };
        let left = format!("{name:.20} - {} lines{modified} [{}]", doc.len(), self.mode);
        let right = format!(
            "{} | {}/{}",
            doc.filetype().unwrap_or("no ft"),
            self.cursor.y + 1,
            doc.len()
        );

        ansi::inverse(out).ok();
        let left = truncate(&left, cols);
        out.push_str(left);
        let right_width = str_width(&right);
        let mut len = str_width(left);
        while len < cols {
            if cols - len == right_width {
                out.push_str(&right);
                break;
            }
            out.push_char(' ');
            len += 1;
        }
        ansi::reset(out).ok();
        out.push_str("\r\n");
    }

    fn draw_message_bar(&self, out: &mut OutputBuffer) {
        ansi::clear_line(out).ok();
        if let Some(msg) = self.message {
            out.push_str(truncate(msg, self.viewport.screen_cols));
        }
    }
}

/// Visible stand-in for a control character: `@`+code, or `?`.
fn control_glyph(ch: char) -> char {
    u8::try_from(u32::from(ch))
        .ok()
        .filter(|&c| c < 26)
        .map_or('?', |c| char::from(b'@' + c))
}

fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` at most `cols` display columns wide.
fn truncate(s: &str, cols: usize) -> &str {
    let mut width = 0;
    for (i, ch) in s.char_indices() {
        width += char_width(ch);
        if width > cols {
            return &s[..i];
        }
    }
    s
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mini_syntax::filetypes::C;

    fn frame_text(doc: &Document, cursor: Cursor, vp: &Viewport, mode: EditorMode, msg: Option<&str>) -> String {
        let frame = Frame {
            doc,
            cursor,
            viewport: vp,
            mode,
            message: msg,
        };
        String::from_utf8(frame.render()).unwrap()
    }

    fn render(doc: &Document, vp: &Viewport) -> String {
        frame_text(doc, Cursor::new(), vp, EditorMode::Command, None)
    }

    /// Screen lines of the text area plus the status bar.
    fn lines(text: &str) -> Vec<&str> {
        text.split("\r\n").collect()
    }

    // -- Text area -----------------------------------------------------------

    #[test]
    fn empty_document_shows_welcome() {
        let vp = Viewport::new(6, 40);
        let text = render(&Document::new(), &vp);
        let rows = lines(&text);
        assert!(rows[2].contains("Mini editor -- version"));
        assert!(rows[2].starts_with('~'));
        assert!(rows[1].starts_with('~'));
        assert!(!rows[1].contains("Mini"));
    }

    #[test]
    fn named_empty_document_has_no_welcome() {
        let mut doc = Document::new();
        doc.set_filename("new.txt");
        let text = render(&doc, &Viewport::new(6, 40));
        assert!(!text.contains("Mini editor"));
    }

    #[test]
    fn every_screen_row_is_cleared() {
        let vp = Viewport::new(3, 20);
        let text = render(&Document::from_lines(["a"]), &vp);
        assert_eq!(text.matches("\x1b[K\r\n").count(), 3);
    }

    #[test]
    fn keywords_are_colored() {
        let mut doc = Document::from_lines(["int x;"]);
        doc.set_syntax(Some(&C));
        let text = render(&doc, &Viewport::new(3, 20));
        assert!(text.contains("\x1b[96mint\x1b[37m x;\x1b[39m"), "{text:?}");
    }

    #[test]
    fn control_chars_drawn_inverted() {
        let doc = Document::from_lines(["a\u{1}b"]);
        let text = render(&doc, &Viewport::new(3, 20));
        assert!(text.contains("\x1b[37ma\x1b[7mA\x1b[0m\x1b[37mb"), "{text:?}");
    }

    #[test]
    fn rows_clip_to_viewport() {
        let doc = Document::from_lines(["abcdefghij"]);
        let mut vp = Viewport::new(3, 4);
        vp.col_offset = 3;
        let text = render(&doc, &vp);
        let first = lines(&text)[0];
        assert!(first.contains("defg"));
        assert!(!first.contains('h'));
        assert!(!first.contains('c'));
    }

    #[test]
    fn rows_follow_row_offset() {
        let doc = Document::from_lines(["zero", "one", "two"]);
        let mut vp = Viewport::new(2, 20);
        vp.row_offset = 1;
        let text = render(&doc, &vp);
        let rows = lines(&text);
        assert!(rows[0].contains("one"));
        assert!(rows[1].contains("two"));
        assert!(!text.contains("zero"));
    }

    #[test]
    fn wide_chars_count_two_columns() {
        let doc = Document::from_lines(["中文字"]);
        let text = render(&doc, &Viewport::new(2, 5));
        assert!(lines(&text)[0].contains("中文"));
        assert!(!text.contains('字'));
    }

    // -- Bars ----------------------------------------------------------------

    #[test]
    fn status_bar_layout() {
        let mut doc = Document::from_lines(["int x;", "y"]);
        doc.set_filename("main.c");
        doc.insert_char(1, 0, 'z');
        let vp = Viewport::new(2, 60);
        let text = frame_text(&doc, Cursor::at(0, 1), &vp, EditorMode::Insert, None);
        let status = lines(&text)[2];
        assert!(status.starts_with("\x1b[7mmain.c - 2 lines (modified) [INSERT]"), "{status:?}");
        assert!(status.ends_with("c | 2/2\x1b[0m"), "{status:?}");
        let visible = status.trim_start_matches("\x1b[7m").trim_end_matches("\x1b[0m");
        assert_eq!(visible.chars().count(), 60);
    }

    #[test]
    fn status_bar_unnamed() {
        let text = render(&Document::new(), &Viewport::new(2, 60));
        assert!(text.contains("[No Name] - 0 lines [COMMAND]"));
        assert!(text.contains("no ft | 1/0"));
    }

    #[test]
    fn message_bar_truncates() {
        let vp = Viewport::new(1, 5);
        let text = frame_text(&Document::new(), Cursor::new(), &vp, EditorMode::Command, Some("hello world"));
        let msg_line = lines(&text)[2];
        assert!(msg_line.starts_with("\x1b[Khello\x1b["), "{msg_line:?}");
    }

    // -- Cursor --------------------------------------------------------------

    #[test]
    fn cursor_placed_relative_to_offsets() {
        let doc = Document::from_lines(["\tab", "x", "y"]);
        let mut vp = Viewport::new(5, 40);
        let cursor = Cursor::at(1, 0);
        vp.scroll(&cursor, &doc);
        let text = frame_text(&doc, cursor, &vp, EditorMode::Command, None);
        assert!(text.ends_with("\x1b[1;9H\x1b[2 q\x1b[?25h"), "{text:?}");

        vp.row_offset = 1;
        let cursor = Cursor::at(0, 2);
        vp.scroll(&cursor, &doc);
        let text = frame_text(&doc, cursor, &vp, EditorMode::Insert, None);
        assert!(text.ends_with("\x1b[2;1H\x1b[6 q\x1b[?25h"), "{text:?}");
    }

    #[test]
    fn frame_starts_hidden_and_homed() {
        let text = render(&Document::new(), &Viewport::new(1, 10));
        assert!(text.starts_with("\x1b[?25l\x1b[H"));
    }

    #[test]
    fn glyphs() {
        assert_eq!(control_glyph('\u{1}'), 'A');
        assert_eq!(control_glyph('\0'), '@');
        assert_eq!(control_glyph('\u{7f}'), '?');
    }
}
