// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into symbolic key events. Handles what a plain
// raw-mode terminal sends us:
//
// - Legacy CSI sequences (arrows, editing keys, function keys)
// - SS3 sequences (arrows / Home / End / F1-F4 from some terminals)
// - Control characters (Ctrl+letter arrives as 0x01..=0x1A)
// - Alt+key (ESC followed by a printable character)
// - UTF-8 multi-byte characters
//
// # Design
//
// The parser keeps a small internal byte buffer because an escape
// sequence can be split across `read()` calls. Feed bytes with
// [`Parser::advance`]; after a short timeout with no new bytes, call
// [`Parser::flush`] to emit a pending lone ESC as a real Escape key.

use bitflags::bitflags;

// ─── Key Types ──────────────────────────────────────────────────────────────

/// A decoded key press: key identity plus active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with the given modifiers.
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// A plain character key.
    #[inline]
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// Ctrl+character.
    #[inline]
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), Modifiers::CTRL)
    }

    /// True if this is Ctrl+`ch` (and no Alt).
    #[inline]
    #[must_use]
    pub fn is_ctrl(self, ch: char) -> bool {
        self.code == KeyCode::Char(ch)
            && self.modifiers.contains(Modifiers::CTRL)
            && !self.modifiers.contains(Modifiers::ALT)
    }

    /// The character this key would insert, if any.
    ///
    /// Control combinations, Alt combinations and non-printing
    /// characters yield `None`. Shift is allowed (it is already folded
    /// into the character by the terminal).
    #[must_use]
    pub fn printable(self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(ch)
            }
            _ => None,
        }
    }
}

/// Identity of a key.
///
/// Named keys have dedicated variants; printable characters use
/// [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F20.
    F(u8),
}

impl KeyCode {
    /// True for the four arrow keys.
    #[inline]
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding where `param = 1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Terminal input parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect decoded
/// [`KeyEvent`]s. Incomplete sequences stay buffered until more bytes
/// arrive.
///
/// # Escape vs escape-sequence ambiguity
///
/// A bare `ESC` byte could be the Escape key or the start of a sequence.
/// The parser keeps a lone ESC pending; the caller waits a short timeout
/// and then calls [`flush`](Parser::flush).
#[derive(Debug)]
pub struct Parser {
    /// Accumulated raw bytes waiting to be parsed.
    buf: Vec<u8>,
}

impl Parser {
    /// Create a new parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(16),
        }
    }

    /// Feed raw bytes and return every key that can be decoded so far.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut keys = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(key, consumed) => {
                    keys.push(key);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        keys
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal keys.
    ///
    /// A lone ESC becomes an Escape key; the bytes of an unfinished
    /// sequence become individual keys.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut keys = Vec::new();
        for &byte in &self.buf {
            let code = match byte {
                0x1B => KeyCode::Escape,
                0x00 => KeyCode::Char('@'),
                b @ 0x01..=0x1A => KeyCode::Char((b + b'a' - 1) as char),
                0x7F => KeyCode::Backspace,
                b @ 0x20..=0x7E => KeyCode::Char(b as char),
                _ => continue,
            };
            let modifiers = match byte {
                0x00..=0x1A => Modifiers::CTRL,
                _ => Modifiers::empty(),
            };
            keys.push(KeyEvent::new(code, modifiers));
        }
        self.buf.clear();
        keys
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────

/// Result of trying to parse one key from the buffer.
enum Parsed {
    /// Decoded a key, consuming `usize` bytes.
    Key(KeyEvent, usize),
    /// Sequence is incomplete; need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&first) = buf.first() else {
        return Parsed::Skip(0);
    };

    match first {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Key(KeyEvent::ctrl('@'), 1),
        0x08 | 0x7F => Parsed::Key(KeyEvent::plain(KeyCode::Backspace), 1),
        0x09 => Parsed::Key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(KeyEvent::plain(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => Parsed::Key(KeyEvent::ctrl((b + b'a' - 1) as char), 1),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::char(b as char), 1),
        0xC0..=0xFF => parse_utf8(buf),
        // 0x1C..=0x1F and stray continuation bytes.
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        0x1B => Parsed::Key(KeyEvent::new(KeyCode::Escape, Modifiers::ALT), 2),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::new(KeyCode::Char(b as char), Modifiers::ALT), 2),
        b @ 0x01..=0x1A => Parsed::Key(
            KeyEvent::new(
                KeyCode::Char((b + b'a' - 1) as char),
                Modifiers::ALT | Modifiers::CTRL,
            ),
            2,
        ),
        // Unknown byte after ESC: emit a standalone Escape.
        _ => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    // Scan for the final byte (0x40..=0x7E). Parameter bytes are
    // 0x30..=0x3F, intermediates 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_csi_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params
        .get(1)
        .map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    if final_byte == b'~' {
        let code = match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Parsed::Skip(consumed),
        };
        return Parsed::Key(KeyEvent::new(code, modifiers), consumed);
    }

    let code = match final_byte {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'Z' => return Parsed::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT), consumed),
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Key(KeyEvent::new(code, modifiers), consumed)
}

// ── SS3 (Single Shift 3) ───────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'O');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };

    Parsed::Key(KeyEvent::plain(code), 3)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected]).map_or(Parsed::Skip(1), |s| {
        s.chars()
            .next()
            .map_or(Parsed::Skip(expected), |ch| Parsed::Key(KeyEvent::char(ch), expected))
    })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Parse semicolon-separated CSI parameters. Empty fields read as 0.
fn parse_csi_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Decode the xterm modifier parameter (`1 + bitmask`).
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
