//! Single-line text input.
//!
//! An [`Input`] is plain state an application keeps in a window payload.
//! It edits a fixed-capacity buffer and keeps a display string ready for a
//! text pane: the visible part of the buffer with a cursor directive at the
//! edit position, so painting the pane also places the terminal cursor.
//!
//! ```
//! use wintui_core::{Input, KeyCode, KeyEvent};
//!
//! let mut input = Input::new(8);
//! for ch in "aapl".chars() {
//!     input.handle_key(KeyEvent::plain(KeyCode::Char(ch)));
//! }
//! input.handle_key(KeyEvent::plain(KeyCode::Backspace));
//! assert_eq!(input.value(), "aap");
//! assert_eq!(input.cursor(), 3);
//! ```

use tracing::trace;
use wintui_term::buffer::char_width;
use wintui_term::input::{KeyCode, KeyEvent};

use crate::error::{Error, Result};
use crate::markup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    buffer: Vec<char>,
    capacity: usize,
    cursor: usize,
    scroll: usize,
    /// Columns shown at once; 0 shows everything.
    width: usize,
    secret: bool,
    display: String,
}

impl Input {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut input = Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            scroll: 0,
            width: 0,
            secret: false,
            display: String::new(),
        };
        input.refresh();
        input
    }

    /// Show `*` instead of the characters typed.
    #[must_use]
    pub fn with_secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self.refresh();
        self
    }

    /// Show at most `width` columns, scrolling to keep the cursor in
    /// view.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.set_width(width);
        self
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.refresh();
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Edit position, in characters.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible character.
    #[inline]
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.buffer.iter().collect()
    }

    /// String for a text pane, with the cursor directive in place.
    #[inline]
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Insert at the cursor and move past it.
    ///
    /// # Errors
    ///
    /// [`Error::InputFull`] when the buffer is at capacity.
    pub fn insert(&mut self, ch: char) -> Result<()> {
        if self.buffer.len() >= self.capacity {
            return Err(Error::InputFull {
                capacity: self.capacity,
            });
        }
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        self.refresh();
        Ok(())
    }

    /// Delete before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        self.refresh();
        true
    }

    /// Delete at the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        self.refresh();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_to(self.cursor.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> bool {
        self.move_to((self.cursor + 1).min(self.buffer.len()))
    }

    pub fn move_home(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn move_end(&mut self) -> bool {
        self.move_to(self.buffer.len())
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        if cursor == self.cursor {
            return false;
        }
        self.cursor = cursor;
        self.refresh();
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.refresh();
    }

    /// Replace the contents, cursor at the end.
    ///
    /// # Errors
    ///
    /// [`Error::InputFull`] if `value` is longer than the capacity; the
    /// input is left unchanged.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() > self.capacity {
            return Err(Error::InputFull {
                capacity: self.capacity,
            });
        }
        self.cursor = chars.len();
        self.buffer = chars;
        self.refresh();
        Ok(())
    }

    /// Apply an editing key. Returns `true` if the input changed.
    ///
    /// Printable characters insert; Backspace (or Ctrl-H), Delete, Left,
    /// Right, Home and End edit and move. Anything else is left for other
    /// handlers.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.is_ctrl('h') {
            return self.backspace();
        }
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => key.printable().is_some_and(|ch| match self.insert(ch) {
                Ok(()) => true,
                Err(err) => {
                    trace!(%err, "key dropped");
                    false
                }
            }),
        }
    }

    /// Columns `buffer[range]` takes on screen.
    fn columns(&self, range: std::ops::Range<usize>) -> usize {
        if self.secret {
            return range.len();
        }
        self.buffer[range].iter().map(|&c| char_width(c)).sum()
    }

    fn refresh(&mut self) {
        let len = self.buffer.len();
        let end = if self.width == 0 {
            self.scroll = 0;
            len
        } else {
            // The cursor sits on a cell of its own past the last character.
            let cursor_cell = if self.cursor < len {
                self.columns(self.cursor..self.cursor + 1).max(1)
            } else {
                1
            };
            if self.cursor < self.scroll {
                self.scroll = self.cursor;
            }
            while self.scroll < self.cursor
                && self.columns(self.scroll..self.cursor) + cursor_cell > self.width
            {
                self.scroll += 1;
            }
            while self.scroll > 0 && self.columns(self.scroll - 1..len) < self.width {
                self.scroll -= 1;
            }
            let mut end = self.cursor;
            while end < len && self.columns(self.scroll..end + 1) <= self.width {
                end += 1;
            }
            end
        };

        let secret = self.secret;
        let shown = |&c: &char| if secret { '*' } else { c };
        self.display.clear();
        self.display
            .extend(self.buffer[self.scroll..self.cursor].iter().map(shown));
        self.display.push_str(markup::RESET);
        self.display.push_str(markup::CURSOR);
        self.display
            .extend(self.buffer[self.cursor..end].iter().map(shown));
        // A cell for the cursor to sit on past the last character.
        self.display.push(' ');
    }
}
