// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Blocking key reader — turns a byte source into one key at a time.
//
// The editor is single-threaded: it renders a frame, then blocks until
// the next key arrives. `KeyReader` owns the byte source and an input
// `Parser`, and hands out decoded keys one by one.
//
// The only timing concern is the lone-ESC ambiguity. When the parser is
// holding a bare ESC (or a half-finished sequence) we poll the fd for
// `ESC_TIMEOUT_MS`; if nothing else arrives the pending bytes are
// flushed as literal keys. Sources without an fd (tests, pipes wrapped
// in memory) skip the poll and flush only at end of input.
//
// stdin is read through `FdReader` rather than `io::Stdin` because the
// latter buffers internally, and poll() can't see bytes already sitting
// in a userspace buffer.

use std::collections::VecDeque;
use std::io::{self, Read};

use crate::input::{KeyEvent, Parser};

/// Read chunk size. A keypress is 1-6 bytes, a paste a few KB.
const READ_BUF_SIZE: usize = 4096;

/// How long a lone ESC waits for the rest of a sequence (milliseconds).
const ESC_TIMEOUT_MS: i32 = 10;

// ─── FdReader ───────────────────────────────────────────────────────────────

/// Unbuffered reader over a raw file descriptor.
#[cfg(unix)]
pub struct FdReader {
    fd: i32,
}

#[cfg(unix)]
impl Read for FdReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n >= 0 checked above.
        Ok(n as usize)
    }
}

// ─── KeyReader ──────────────────────────────────────────────────────────────

/// Blocking source of decoded key events.
pub struct KeyReader<R: Read> {
    source: R,
    /// Descriptor to poll for the ESC timeout, if the source has one.
    poll_fd: Option<i32>,
    parser: Parser,
    queue: VecDeque<KeyEvent>,
    buf: Box<[u8; READ_BUF_SIZE]>,
}

#[cfg(unix)]
impl KeyReader<FdReader> {
    /// Read keys from the process's stdin.
    #[must_use]
    pub fn stdin() -> Self {
        let mut reader = Self::new(FdReader {
            fd: libc::STDIN_FILENO,
        });
        reader.poll_fd = Some(libc::STDIN_FILENO);
        reader
    }
}

#[cfg(not(unix))]
impl KeyReader<io::Stdin> {
    /// Read keys from the process's stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> KeyReader<R> {
    /// Wrap an arbitrary byte source. No ESC timeout is applied.
    pub fn new(source: R) -> Self {
        Self {
            source,
            poll_fd: None,
            parser: Parser::new(),
            queue: VecDeque::new(),
            buf: Box::new([0u8; READ_BUF_SIZE]),
        }
    }

    /// Block until the next key is available.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] once the source is
    /// exhausted and every pending byte has been delivered, or the
    /// underlying read error.
    pub fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Some(key) = self.queue.pop_front() {
                return Ok(key);
            }

            if self.parser.has_pending() && !self.wait_readable()? {
                self.queue.extend(self.parser.flush());
                continue;
            }

            let n = match self.source.read(&mut self.buf[..]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if n == 0 {
                self.queue.extend(self.parser.flush());
                if self.queue.is_empty() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input closed",
                    ));
                }
                continue;
            }

            let keys = self.parser.advance(&self.buf[..n]);
            self.queue.extend(keys);
        }
    }

    /// Wait up to [`ESC_TIMEOUT_MS`] for more bytes. Sources without an fd
    /// report readable, so the next read decides.
    #[cfg(unix)]
    fn wait_readable(&self) -> io::Result<bool> {
        let Some(fd) = self.poll_fd else {
            return Ok(true);
        };
        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, ESC_TIMEOUT_MS)
        };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(ready > 0)
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    fn wait_readable(&self) -> io::Result<bool> {
        Ok(self.poll_fd.is_none())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use pretty_assertions::assert_eq;

    /// A source that hands out one chunk per read call.
    struct Chunks(VecDeque<Vec<u8>>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(chunk) = self.0.pop_front() else {
                return Ok(0);
            };
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    fn chunks(parts: &[&[u8]]) -> Chunks {
        Chunks(parts.iter().map(|p| p.to_vec()).collect())
    }

    #[test]
    fn esc_timeout_reasonable() {
        assert!(ESC_TIMEOUT_MS >= 5);
        assert!(ESC_TIMEOUT_MS <= 100);
    }

    #[test]
    fn reads_keys_in_order() {
        let mut r = KeyReader::new(&b"ab\r"[..]);
        assert_eq!(r.read_key().unwrap(), KeyEvent::char('a'));
        assert_eq!(r.read_key().unwrap(), KeyEvent::char('b'));
        assert_eq!(r.read_key().unwrap(), KeyEvent::plain(KeyCode::Enter));
    }

    #[test]
    fn eof_is_unexpected_eof() {
        let mut r = KeyReader::new(&b""[..]);
        let err = r.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn trailing_escape_flushed_at_eof() {
        let mut r = KeyReader::new(&b"x\x1b"[..]);
        assert_eq!(r.read_key().unwrap(), KeyEvent::char('x'));
        assert_eq!(r.read_key().unwrap(), KeyEvent::plain(KeyCode::Escape));
        assert!(r.read_key().is_err());
    }

    #[test]
    fn sequence_split_across_reads() {
        let mut r = KeyReader::new(chunks(&[b"\x1b[", b"B"]));
        assert_eq!(r.read_key().unwrap(), KeyEvent::plain(KeyCode::Down));
    }
}
