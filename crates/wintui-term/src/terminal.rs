// SPDX-License-Identifier: MIT
//
// Terminal control: raw mode, alternate screen, blocking key reads.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl (TIOCGWINSZ), isatty,
// poll and raw fd reads/writes are POSIX interfaces with no safe
// wrapper in std. Each unsafe block is kept to the single call.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. `enter` switches to raw mode
// and the alternate screen; `leave` (or drop) puts everything back. A
// panic hook writes a pre-built restore sequence straight to fd 1,
// bypassing the stdout lock, so a panic mid-frame still leaves a usable
// shell behind it.
//
// Input is read synchronously: `read_input` blocks until at least one
// byte arrives, and `poll_input` waits a bounded time, which is all the
// event loop needs to tell a lone ESC from the start of a sequence.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ────────────────────────────────────────────────────────────────────

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Fallback when the size cannot be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.cols as u32 * self.rows as u32
    }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Current terminal size via `ioctl(TIOCGWINSZ)`, `None` if stdout is not
/// a terminal.
#[cfg(unix)]
fn get_size() -> Option<Size> {
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
fn get_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal.
#[cfg(unix)]
fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
fn is_tty() -> bool {
    false
}

// ─── Panic-Safe Restore ──────────────────────────────────────────────────────

/// Copy of the original termios for the panic hook, which cannot reach
/// the `Terminal` value.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

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

/// End synchronized output, reset colours, show the cursor, leave the
/// alternate screen. The screen switch goes last so the shell reappears
/// clean.
#[rustfmt::skip]
const EMERGENCY_RESTORE: &[u8] = b"\
    \x1b[?2026l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

static PANIC_HOOK_INSTALLED: Once = Once::new();

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

// ─── Terminal ────────────────────────────────────────────────────────────────

/// Terminal handle. Restores the terminal on drop.
///
/// ```no_run
/// use wintui_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// let mut buf = [0u8; 64];
/// let n = term.read_input(&mut buf)?;
/// # let _ = n;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    original_termios: Option<libc::termios>,
    size: Size,
    active: bool,
}

impl Terminal {
    /// A handle for the controlling terminal. Does not enter raw mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            original_termios: None,
            size: get_size().unwrap_or(Size::FALLBACK),
            active: false,
        }
    }

    /// Cached size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query and cache the size (after SIGWINCH).
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            self.size = s;
        }
        self.size
    }

    /// Raw mode, alternate screen, hidden cursor. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if termios or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.enable_raw_mode()?;

        let mut lock = io::stdout().lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::cursor_hide(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        lock.flush()?;

        self.active = true;
        Ok(())
    }

    /// Undo [`enter`](Self::enter). Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let mut lock = io::stdout().lock();
        ansi::end_sync(&mut lock)?;
        ansi::reset(&mut lock)?;
        ansi::cursor_show(&mut lock)?;
        ansi::exit_alt_screen(&mut lock)?;
        lock.flush()?;
        drop(lock);

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Block until stdin has bytes and read them into `buf`.
    ///
    /// Returns 0 at end of input.
    ///
    /// # Errors
    ///
    /// Returns the OS error, including `Interrupted` when a signal such
    /// as SIGWINCH arrives before any byte.
    #[cfg(unix)]
    pub fn read_input(&self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe {
            libc::read(
                libc::STDIN_FILENO,
                buf.as_mut_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }

    #[cfg(not(unix))]
    pub fn read_input(&self, buf: &mut [u8]) -> io::Result<usize> {
        use std::io::Read;
        io::stdin().read(buf)
    }

    /// Wait up to `timeout_ms` for stdin to become readable.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `poll`.
    #[cfg(unix)]
    pub fn poll_input(&self, timeout_ms: i32) -> io::Result<bool> {
        let mut fds = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let n = unsafe { libc::poll(&raw mut fds, 1, timeout_ms) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n > 0 && fds.revents & libc::POLLIN != 0)
    }

    #[cfg(not(unix))]
    pub fn poll_input(&self, _timeout_ms: i32) -> io::Result<bool> {
        Ok(false)
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

            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            // read() blocks until at least one byte.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
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
    fn size_area() {
        assert_eq!(Size { cols: 80, rows: 24 }.area(), 1920);
        assert_eq!(Size { cols: 0, rows: 24 }.area(), 0);
        assert_eq!(
            Size {
                cols: u16::MAX,
                rows: u16::MAX
            }
            .area(),
            u32::from(u16::MAX) * u32::from(u16::MAX)
        );
    }

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
        let _ = is_tty();
    }

    #[test]
    fn emergency_restore_exits_alt_screen_last() {
        assert!(EMERGENCY_RESTORE.ends_with(b"\x1b[?1049l"));
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains("\x1b[?25h"));
        assert!(s.contains("\x1b[0m"));
    }

    #[test]
    fn new_terminal_is_inactive_with_usable_size() {
        let term = Terminal::new();
        assert!(!term.active);
        assert!(term.size().cols > 0);
        assert!(term.size().rows > 0);
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let mut term = Terminal::new();
        assert!(term.leave().is_ok());
        assert!(!term.active);
    }
}
