// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: paint, deliver one key, repeat.
//
// The toolkit is strictly synchronous: nothing animates and nothing runs
// in the background, so the loop blocks in `read()` until the user
// presses a key. Each iteration:
//
//   1. The application paints a full frame into the FrameBuffer.
//   2. The diff renderer emits only the changed cells, then the cursor
//      is placed (or hidden) where the application asks.
//   3. The next key is delivered. Keys are parsed into a queue, and stdin
//      is only read (blocking) when the queue is empty, so a read that
//      carries several keys still gets a fresh frame before each one.
//
// # Escape timeout
//
// A lone ESC could be the Escape key or the start of an arrow-key
// sequence. When the parser is left holding bytes, the loop polls stdin
// for `escape_timeout_ms`; if nothing follows, the pending bytes are
// flushed as literal keys.
//
// # SIGWINCH
//
// The resize handler only sets an `AtomicBool`. It is installed without
// SA_RESTART so a blocked read() returns `Interrupted`, and the loop
// repaints at the new size without waiting for a key.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{KeyEvent, Parser};
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the loop does after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Application interface for the event loop.
///
/// Per iteration the loop calls [`paint`](App::paint), then
/// [`cursor`](App::cursor), then [`on_key`](App::on_key) with exactly one
/// key, blocking for input when none is queued.
pub trait App {
    /// Handle one key. Return [`Action::Quit`] to leave the loop.
    fn on_key(&mut self, key: KeyEvent) -> Action;

    /// The terminal was resized. The frame buffer already has the new
    /// size.
    fn on_resize(&mut self, _size: Size) {}

    /// Paint the whole frame. The buffer is cleared beforehand.
    fn paint(&mut self, buf: &mut FrameBuffer);

    /// Where to show the hardware cursor after painting, `None` to hide it.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Event loop settings.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long a lone ESC waits for the rest of a sequence.
    pub escape_timeout_ms: u16,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: 25,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal, parser and renderer.
///
/// ```no_run
/// use wintui_term::buffer::FrameBuffer;
/// use wintui_term::event_loop::{Action, App, EventLoop};
/// use wintui_term::input::{KeyCode, KeyEvent};
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn on_key(&mut self, key: KeyEvent) -> Action {
///         if key.code == KeyCode::Char('q') {
///             Action::Quit
///         } else {
///             Action::Continue
///         }
///     }
///
///     fn paint(&mut self, _buf: &mut FrameBuffer) {}
/// }
///
/// EventLoop::new().run(&mut Quitter)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    keys: KeyQueue,
    renderer: DiffRenderer,
    config: LoopConfig,
}

const READ_BUF_SIZE: usize = 1024;

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            keys: KeyQueue::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the application quits or stdin closes.
    ///
    /// The terminal is restored on exit, including on error.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, reading or output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = self.run_inner(app);

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let mut bytes = [0u8; READ_BUF_SIZE];

        'frame: loop {
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
            }

            self.present(app, &mut frame)?;

            let key = loop {
                if let Some(key) = self.keys.pop() {
                    break key;
                }
                match self.read_keys(&mut bytes) {
                    Ok(true) => {}
                    Ok(false) => return Ok(()),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue 'frame,
                    Err(e) => return Err(e),
                }
            };
            if app.on_key(key) == Action::Quit {
                return Ok(());
            }
        }
    }

    /// Block for input and queue the keys it holds. `false` at end of input.
    fn read_keys(&mut self, bytes: &mut [u8]) -> io::Result<bool> {
        let n = self.terminal.read_input(bytes)?;
        if n == 0 {
            return Ok(false);
        }
        self.keys.push(&bytes[..n]);
        if self.keys.has_partial()
            && !self
                .terminal
                .poll_input(i32::from(self.config.escape_timeout_ms))
                .unwrap_or(false)
        {
            self.keys.flush();
        }
        Ok(true)
    }

    /// Paint, diff, place the cursor, write.
    fn present(&mut self, app: &mut impl App, frame: &mut FrameBuffer) -> io::Result<()> {
        frame.clear();
        app.paint(frame);
        self.renderer.render(frame);

        let out = self.renderer.output_mut();
        match app.cursor() {
            Some((x, y)) => {
                ansi::cursor_to(out, x, y)?;
                ansi::cursor_show(out)?;
            }
            None => ansi::cursor_hide(out)?,
        }

        let mut stdout = io::stdout().lock();
        self.renderer.flush_to(&mut stdout)?;
        stdout.flush()
    }
}

/// Keys parsed but not yet delivered.
struct KeyQueue {
    parser: Parser,
    keys: VecDeque<KeyEvent>,
}

impl KeyQueue {
    fn new() -> Self {
        Self {
            parser: Parser::new(),
            keys: VecDeque::new(),
        }
    }

    fn push(&mut self, data: &[u8]) {
        let keys = self.parser.advance(data);
        self.keys.extend(keys);
    }

    /// The parser holds the start of an unfinished sequence.
    fn has_partial(&self) -> bool {
        self.parser.has_pending()
    }

    fn flush(&mut self) {
        let keys = self.parser.flush();
        self.keys.extend(keys);
    }

    fn pop(&mut self) -> Option<KeyEvent> {
        self.keys.pop_front()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn default_escape_timeout() {
        assert_eq!(LoopConfig::default().escape_timeout_ms, 25);
    }

    #[test]
    fn one_read_is_delivered_key_by_key() {
        let mut queue = KeyQueue::new();
        queue.push(b"ab\x1b[A");
        assert_eq!(queue.pop(), Some(KeyEvent::plain(KeyCode::Char('a'))));
        assert_eq!(queue.pop(), Some(KeyEvent::plain(KeyCode::Char('b'))));
        queue.push(b"c");
        assert_eq!(queue.pop(), Some(KeyEvent::plain(KeyCode::Up)));
        assert_eq!(queue.pop(), Some(KeyEvent::plain(KeyCode::Char('c'))));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut queue = KeyQueue::new();
        queue.push(b"\x1b");
        assert!(queue.has_partial());
        assert_eq!(queue.pop(), None);
        queue.flush();
        assert!(!queue.has_partial());
        assert_eq!(queue.pop(), Some(KeyEvent::plain(KeyCode::Escape)));
    }

    #[test]
    fn event_loop_uses_config() {
        let ev = EventLoop::with_config(LoopConfig {
            escape_timeout_ms: 5,
        });
        assert_eq!(ev.config.escape_timeout_ms, 5);
        assert!(ev.size().cols > 0);
    }
}
