// SPDX-License-Identifier: MIT
//
// FrameBuffer: the 2D cell grid every window paints into.
//
// Each character position on screen is a cell in this buffer. Windows
// never touch the terminal directly: they paint into their own
// sub-surface (see `surface.rs`), which writes here with clipping. The
// diff renderer then compares this frame against the previous one and
// emits the changed cells.
//
// Layout:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are
//     contiguous, so the renderer's left-to-right scan is linear.
//
//   - Writes take an optional `ClipRect`. A window paints freely in its
//     own coordinates; the clip keeps it inside its rect.
//
//   - Wide characters occupy two columns. The first cell holds the
//     character, the second a continuation cell. Overwriting either half
//     breaks the pair so no orphan reaches the terminal.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::CellColor;

// ─── ClipRect ────────────────────────────────────────────────────────────────

/// A clipping rectangle in screen coordinates.
///
/// The origin is signed so a rectangle can hang off the top or left edge
/// of the screen; only the visible part ever receives writes.
///
/// ```
/// use wintui_term::buffer::ClipRect;
///
/// let clip = ClipRect::new(10, 5, 80, 24);
/// assert!(clip.contains(10, 5));
/// assert!(clip.contains(89, 28));
/// assert!(!clip.contains(9, 5));
/// assert!(!clip.contains(90, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl ClipRect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height as i32
    }

    /// Whether a screen position is inside this rectangle.
    #[inline]
    #[must_use]
    pub fn contains(self, px: u16, py: u16) -> bool {
        let px = i32::from(px);
        let py = i32::from(py);
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlap of two rectangles, `None` if they are disjoint.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            // Both spans are positive and bounded by the input u16 extents.
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            Some(Self {
                x: x1,
                y: y1,
                width: (x2 - x1) as u16,
                height: (y2 - y1) as u16,
            })
        } else {
            None
        }
    }
}

// ─── FrameBuffer ─────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells.
///
/// ```
/// use wintui_term::buffer::FrameBuffer;
/// use wintui_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).map(|c| c.ch), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A buffer of blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    const fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// One row as a slice, `None` past the bottom.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// The characters of one row as a `String`, continuation cells
    /// omitted. Handy for asserting on painted output.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| row.iter().filter_map(|c| c.character()).collect())
            .unwrap_or_default()
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    /// Reset every cell to a blank default-coloured space.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, discarding all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Bounds-checked raw write. No clipping, no wide-char cleanup.
    ///
    /// Returns `true` if the position was in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Break any wide character touching `(x, y)`.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = ' ';
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next].ch = ' ';
            }
        }
    }

    /// Fill a rectangle with `cell`, clipped to the buffer and `clip`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn fill(&mut self, rect: ClipRect, cell: Cell, clip: Option<&ClipRect>) {
        let Some(mut area) = rect.intersect(self.bounds()) else {
            return;
        };
        if let Some(clip) = clip {
            let Some(clipped) = area.intersect(*clip) else {
                return;
            };
            area = clipped;
        }

        // Intersection with the buffer bounds keeps these non-negative.
        let x1 = area.x as u16;
        let y1 = area.y as u16;
        let x2 = area.right() as u16;
        let y2 = area.bottom() as u16;

        for row in y1..y2 {
            self.break_wide_char_at(x1, row);
            self.break_wide_char_at(x2 - 1, row);
            let start = self.index(x1, row);
            let end = self.index(x2, row);
            self.cells[start..end].fill(cell);
        }
    }

    /// Write one character, clipped.
    ///
    /// A wide character also writes its continuation cell. If the
    /// continuation would fall outside the buffer or the clip, a space is
    /// written instead so no half glyph reaches the terminal. Zero-width
    /// characters are dropped.
    ///
    /// Returns the number of columns the character advances, whether or
    /// not it was visible.
    pub fn put_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: CellColor,
        bg: CellColor,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let w = char_width(ch);
        if w == 0 {
            return 0;
        }
        let visible = |px: u16| self.in_bounds(px, y) && clip.is_none_or(|c| c.contains(px, y));

        if !visible(x) {
            // w is 1 or 2.
            #[allow(clippy::cast_possible_truncation)]
            return w as u16;
        }

        if w == 2 && !visible(x.saturating_add(1)) {
            self.break_wide_char_at(x, y);
            let idx = self.index(x, y);
            self.cells[idx] = Cell::styled(' ', fg, bg);
            return 2;
        }

        self.break_wide_char_at(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = Cell::styled(ch, fg, bg);

        if w == 2 {
            self.break_wide_char_at(x + 1, y);
            let cont = self.index(x + 1, y);
            self.cells[cont] = Cell::continuation(fg, bg);
            2
        } else {
            1
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width ──────────────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// ```
/// use wintui_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
