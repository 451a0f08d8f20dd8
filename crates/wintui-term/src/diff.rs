// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// The toolkit repaints every window every frame, but between two key
// presses only a few cells usually change (a list highlight moves, an
// input line gains a character). Comparing the new frame against the
// previous one turns a full repaint into a handful of writes.
//
// Per frame:
//
//   1. Windows paint into a FrameBuffer.
//   2. render() compares it row by row against the stored previous frame.
//      Identical rows are skipped with one slice comparison.
//   3. Changed cells go through the CellWriter into an OutputBuffer.
//   4. flush() writes the frame with a single syscall, wrapped in
//      synchronized output so the terminal never shows a half frame.
//
// A size change, or the first frame, clears the screen and redraws
// everything.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::output::{CellWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells that differed from the previous frame.
    pub cells_rendered: usize,
    /// Cells that matched and were skipped.
    pub cells_skipped: usize,
    /// Bytes of ANSI output generated.
    pub bytes_written: usize,
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Emits ANSI output only for cells that changed since the last frame.
///
/// ```no_run
/// use wintui_term::buffer::FrameBuffer;
/// use wintui_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// let stats = renderer.render(&frame);
/// renderer.flush().unwrap();
/// assert_eq!(stats.cells_rendered, 80 * 24);
/// ```
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the previous frame and buffer the output.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
        }

        for y in 0..height {
            let Some(row) = current.row(y) else { break };
            let prev_row = previous.and_then(|p| p.row(y));

            if prev_row == Some(row) {
                stats.cells_skipped += row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                if prev_row.and_then(|p| p.get(usize::from(x))) == Some(cell) {
                    stats.cells_skipped += 1;
                } else {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();

        stats.bytes_written = self.output.len();
        self.store_frame(current);
        stats
    }

    /// ANSI bytes from the last render.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Append bytes after the frame (cursor placement, visibility).
    pub fn output_mut(&mut self) -> &mut OutputBuffer {
        &mut self.output
    }

    /// Write the buffered frame to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write the buffered frame to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Forget the previous frame so the next render draws everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) => prev.clone_from(current),
            None => self.previous = Some(current.clone()),
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn output(renderer: &DiffRenderer) -> String {
        String::from_utf8(renderer.output_bytes().to_vec()).unwrap()
    }

    #[test]
    fn first_render_draws_everything() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(3, 2);
        let stats = renderer.render(&frame);
        assert_eq!(stats.cells_rendered, 6);
        assert_eq!(stats.cells_skipped, 0);
        assert!(output(&renderer).contains("\x1b[2J"));
    }

    #[test]
    fn identical_frame_renders_nothing() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(4, 3);
        renderer.render(&frame);
        let stats = renderer.render(&frame);
        assert_eq!(stats.cells_rendered, 0);
        assert_eq!(stats.cells_skipped, 12);
        assert_eq!(output(&renderer), "\x1b[?2026h\x1b[0m\x1b[?2026l");
    }

    #[test]
    fn single_change_emits_single_cell() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(4, 3);
        renderer.render(&frame);

        frame.set(2, 1, Cell::new('Z'));
        let stats = renderer.render(&frame);
        assert_eq!(stats.cells_rendered, 1);
        assert_eq!(stats.cells_rendered + stats.cells_skipped, 12);
        assert!(output(&renderer).contains("\x1b[2;3H"));
        assert!(output(&renderer).contains('Z'));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(2, 2));
        let stats = renderer.render(&FrameBuffer::new(3, 2));
        assert_eq!(stats.cells_rendered, 6);
        assert!(output(&renderer).contains("\x1b[2J"));
    }

    #[test]
    fn force_redraw_repaints() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(2, 1);
        renderer.render(&frame);
        renderer.force_redraw();
        assert_eq!(renderer.render(&frame).cells_rendered, 2);
    }

    #[test]
    fn zero_size_frame_renders_nothing() {
        let mut renderer = DiffRenderer::new();
        let stats = renderer.render(&FrameBuffer::new(0, 0));
        assert_eq!(stats, RenderStats::default());
        assert!(renderer.output_bytes().is_empty());
    }

    #[test]
    fn flush_to_drains_output() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(1, 1));
        let mut sink = Vec::new();
        renderer.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(renderer.output_bytes().is_empty());
    }
}
