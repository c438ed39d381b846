// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, alternate screen, and RAII cleanup.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl (TIOCGWINSZ), isatty and
// raw fd writes are the POSIX interfaces for terminal control. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// `Terminal` owns the raw state. It enters raw mode, switches to the
// alternate screen, and guarantees cleanup on drop, even if the editor
// panics mid-frame.
//
// The panic hook bypasses Rust's stdout lock and writes a pre-built
// restore sequence straight to fd 1, so a panic raised while the lock is
// held (during a frame flush) cannot deadlock. After that the original
// panic handler prints its message to a working terminal.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns.
    pub cols: u16,
    /// Number of rows.
    pub rows: u16,
}

impl Size {
    /// Fallback when the size can't be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global copy of the original termios for the panic hook.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Restore sequence for emergency use: reset SGR, reset cursor shape,
/// show cursor, exit the alternate screen (last, so the shell content
/// comes back clean).
#[rustfmt::skip]
const EMERGENCY_RESTORE: &[u8] = b"\
    \x1b[0m\
    \x1b[0 q\
    \x1b[?25h\
    \x1b[?1049l";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// ```no_run
/// use mini_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... render frames, read keys ...
/// // Terminal is restored on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    original_termios: Option<libc::termios>,
    size: Size,
    active: bool,
}

impl Terminal {
    /// Create a handle and query the current size (80x24 if unknown).
    ///
    /// Does not touch the terminal; call [`enter`](Self::enter) for that.
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            original_termios: None,
            size: get_size().unwrap_or(Size::FALLBACK),
            active: false,
        }
    }

    /// Cached terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the size from the OS and cache it.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            self.size = s;
        }
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter raw mode and the alternate screen. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.enable_raw_mode()?;

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        ansi::cursor_home(&mut lock)?;
        lock.flush()?;

        self.active = true;
        Ok(())
    }

    /// Leave the alternate screen and restore cooked mode. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::reset(&mut lock)?;
        ansi::set_cursor_shape(&mut lock, ansi::CursorShape::Default)?;
        ansi::cursor_show(&mut lock)?;
        ansi::exit_alt_screen(&mut lock)?;
        lock.flush()?;
        drop(lock);

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    // ── Raw Mode (termios) ──────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if !is_tty() {
            return Ok(());
        }

        let fd = libc::STDIN_FILENO;

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            termios.c_iflag &=
                !(libc::BRKINT | libc::INPCK | libc::ISTRIP | libc::ICRNL | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag |= libc::CS8;

            // read() blocks until at least one byte arrives.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            unsafe {
                if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_size() {
        assert_eq!(Size::FALLBACK, Size { cols: 80, rows: 24 });
    }

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    // ── Emergency restore sequence ──────────────────────────────────

    #[test]
    fn emergency_restore_exits_alt_screen_last() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.ends_with("\x1b[?1049l"));
        assert!(s.contains("\x1b[?25h"), "must show cursor");
        assert!(s.contains("\x1b[0m"), "must reset SGR attributes");
    }

    // ── Terminal struct ─────────────────────────────────────────────

    #[test]
    fn terminal_new_is_inactive() {
        let term = Terminal::new();
        assert!(!term.is_active());
        assert!(term.size().cols > 0);
        assert!(term.size().rows > 0);
    }

    #[test]
    fn terminal_enter_leave_cycle() {
        let mut term = Terminal::new();
        term.enter().unwrap();
        assert!(term.is_active());
        term.enter().unwrap();
        term.leave().unwrap();
        assert!(!term.is_active());
        term.leave().unwrap();
    }

    #[test]
    fn terminal_drop_after_enter() {
        let mut term = Terminal::new();
        term.enter().unwrap();
        drop(term);
    }

    #[test]
    fn terminal_refresh_size_caches() {
        let mut term = Terminal::new();
        let s = term.refresh_size();
        assert_eq!(s, term.size());
    }
}
