//! Host boundary — where keys come from and where frames go.
//!
//! The editor core never touches the terminal device. It pulls decoded keys
//! from a [`KeySource`] and pushes assembled frames to a [`FrameSink`]. The
//! binary wires in [`KeyReader`] and stdout; tests use [`ScriptedKeys`] and
//! a `Vec<u8>`.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use mini_term::input::KeyEvent;
use mini_term::reader::KeyReader;

use crate::error::{EditorError, Result};

/// Blocking supplier of key events.
pub trait KeySource {
    /// Wait for the next key.
    ///
    /// # Errors
    ///
    /// [`EditorError::InputClosed`] at end of input, [`EditorError::Input`]
    /// on a read failure. Both are fatal.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Consumer of rendered frames.
pub trait FrameSink {
    /// Write one complete frame.
    ///
    /// # Errors
    ///
    /// [`EditorError::Output`] if the write fails.
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;
}

impl<R: Read> KeySource for KeyReader<R> {
    fn read_key(&mut self) -> Result<KeyEvent> {
        Self::read_key(self).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => EditorError::InputClosed,
            _ => EditorError::Input(e),
        })
    }
}

impl<W: Write> FrameSink for W {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.write_all(frame)
            .and_then(|()| self.flush())
            .map_err(EditorError::Output)
    }
}

/// A fixed queue of keys. Reports [`EditorError::InputClosed`] once drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys(VecDeque<KeyEvent>);

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self(keys.into_iter().collect())
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.0.push_back(key);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<KeyEvent> {
        self.0.pop_front().ok_or(EditorError::InputClosed)
    }
}
