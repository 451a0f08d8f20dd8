// SPDX-License-Identifier: MIT
//
// Output buffering and stateful cell rendering.
//
//   OutputBuffer: collects a whole frame's bytes in memory so the frame
//   goes out in a single write().
//
//   CellWriter: remembers the terminal's cursor position and current
//   colours, and only emits the escapes that change something. A run of
//   same-coloured cells on one row costs one cursor move and one pair of
//   SGR sequences, then bare characters.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::Cell;
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// In-memory byte sink for one frame of ANSI output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 8_192;

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a character as UTF-8.
    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Drop accumulated bytes, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write everything to stdout and clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write everything to `w` and clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing goes through flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// Cell renderer that skips escapes the terminal does not need.
///
/// - Cursor moves are skipped when the next cell directly follows the
///   last one on the same row.
/// - Colours are only emitted when they differ from the last emitted.
/// - A continuation cell right after its wide character emits nothing;
///   an orphaned one is drawn as a space.
#[allow(clippy::struct_field_names)]
pub struct CellWriter {
    last_x: i32,
    last_y: i32,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
}

impl CellWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
        }
    }

    /// Forget all tracked state. Call after a reset or screen clear.
    #[allow(clippy::missing_const_for_fn)]
    pub fn reset_state(&mut self) {
        *self = Self::new();
    }

    /// Render one cell at `(x, y)`.
    pub fn render_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        let xi = i32::from(x);
        let yi = i32::from(y);

        if cell.is_continuation() && xi > 0 && self.last_x == xi - 1 && self.last_y == yi {
            self.last_x = xi;
            return;
        }

        if yi != self.last_y || xi != self.last_x + 1 {
            ansi::cursor_to(out, x, y).ok();
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }

        out.push_char(cell.character().unwrap_or(' '));

        self.last_x = xi;
        self.last_y = yi;
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn output_buffer_write_trait() {
        let mut buf = OutputBuffer::new();
        assert!(buf.is_empty());
        write!(buf, "hello {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn push_char_encodes_utf8() {
        let mut buf = OutputBuffer::new();
        buf.push_char('A');
        buf.push_char('中');
        assert_eq!(buf.as_bytes(), "A中".as_bytes());
    }

    #[test]
    fn flush_to_drains() {
        let mut buf = OutputBuffer::new();
        buf.push_char('x');
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"x");
        assert!(buf.is_empty());
    }

    // ── CellWriter ──────────────────────────────────────────────────────

    fn render_seq(cells: &[(u16, u16, Cell)]) -> String {
        let mut out = OutputBuffer::new();
        let mut writer = CellWriter::new();
        for (x, y, cell) in cells {
            writer.render_cell(&mut out, *x, *y, cell);
        }
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn first_cell_emits_move_and_colors() {
        let s = render_seq(&[(2, 1, Cell::new('a'))]);
        assert_eq!(s, "\x1b[2;3H\x1b[39m\x1b[49ma");
    }

    #[test]
    fn sequential_cells_skip_move_and_colors() {
        let s = render_seq(&[(0, 0, Cell::new('a')), (1, 0, Cell::new('b'))]);
        assert_eq!(s, "\x1b[1;1H\x1b[39m\x1b[49mab");
    }

    #[test]
    fn gap_or_new_row_moves_cursor() {
        let s = render_seq(&[(0, 0, Cell::new('a')), (3, 0, Cell::new('b'))]);
        assert!(s.contains("\x1b[1;4Hb"));
        let s = render_seq(&[(0, 0, Cell::new('a')), (1, 1, Cell::new('b'))]);
        assert!(s.contains("\x1b[2;2Hb"));
    }

    #[test]
    fn color_change_emits_only_changed_channel() {
        let red = Cell::styled('b', Color::Red.into(), CellColor::Default);
        let s = render_seq(&[(0, 0, Cell::new('a')), (1, 0, red)]);
        assert_eq!(s, "\x1b[1;1H\x1b[39m\x1b[49ma\x1b[31mb");
    }

    #[test]
    fn continuation_after_wide_char_is_skipped() {
        let s = render_seq(&[
            (0, 0, Cell::new('中')),
            (1, 0, Cell::continuation(CellColor::Default, CellColor::Default)),
            (2, 0, Cell::new('x')),
        ]);
        assert_eq!(s, "\x1b[1;1H\x1b[39m\x1b[49m中x");
    }

    #[test]
    fn orphan_continuation_renders_space() {
        let s = render_seq(&[(
            4,
            0,
            Cell::continuation(CellColor::Default, CellColor::Default),
        )]);
        assert_eq!(s, "\x1b[1;5H\x1b[39m\x1b[49m ");
    }

    #[test]
    fn reset_state_forces_reemit() {
        let mut out = OutputBuffer::new();
        let mut writer = CellWriter::new();
        writer.render_cell(&mut out, 0, 0, &Cell::new('a'));
        writer.reset_state();
        out.clear();
        writer.render_cell(&mut out, 1, 0, &Cell::new('b'));
        assert_eq!(out.as_bytes(), b"\x1b[1;2H\x1b[39m\x1b[49mb");
    }
}
