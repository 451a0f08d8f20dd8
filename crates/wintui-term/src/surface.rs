// SPDX-License-Identifier: MIT
//
// Surface: a rectangular sub-region of the frame buffer.
//
// Every visible window owns one surface matching its computed rect. The
// window paints in local coordinates, (0, 0) being its own top-left
// corner, and the surface translates and clips every write so a window
// can never scribble outside its rect. Children get their own surfaces
// and paint after their parent, landing on top.
//
// A surface is only a rectangle; the cells live in the shared
// FrameBuffer passed to each call. Creating or resizing one is free,
// which is what lets the layout pass recompute every rect every frame.
//
// Zero-sized rectangles have no surface at all: `Surface::new` returns
// `None`, and the window is skipped when painting.

use crate::buffer::{char_width, ClipRect, FrameBuffer};
use crate::cell::Cell;
use crate::color::CellColor;

/// Box-drawing glyphs for borders.
mod glyph {
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const TOP_LEFT: char = '┌';
    pub const TOP_RIGHT: char = '┐';
    pub const BOTTOM_LEFT: char = '└';
    pub const BOTTOM_RIGHT: char = '┘';
}

/// A clipped, translated view onto part of the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    rect: ClipRect,
}

impl Surface {
    /// A surface covering `width × height` cells at screen `(x, y)`.
    ///
    /// Returns `None` when either dimension is not positive.
    ///
    /// ```
    /// use wintui_term::surface::Surface;
    ///
    /// assert!(Surface::new(0, 0, 10, 2).is_some());
    /// assert!(Surface::new(0, 0, 0, 2).is_none());
    /// ```
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        let width = u16::try_from(width).ok().filter(|&w| w > 0)?;
        let height = u16::try_from(height).ok().filter(|&h| h > 0)?;
        Some(Self {
            rect: ClipRect::new(x, y, width, height),
        })
    }

    /// Move and resize in place. Returns `false`, leaving the surface
    /// unchanged, when the new size is empty.
    pub fn resize(&mut self, x: i32, y: i32, width: i32, height: i32) -> bool {
        match Self::new(x, y, width, height) {
            Some(moved) => {
                *self = moved;
                true
            }
            None => false,
        }
    }

    /// Screen rectangle covered by this surface.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> ClipRect {
        self.rect
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.rect.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.rect.height
    }

    /// Translate a local position to screen coordinates.
    #[inline]
    #[must_use]
    pub const fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (self.rect.x + x, self.rect.y + y)
    }

    /// Fill the whole surface with blank cells in the given colours.
    pub fn erase(&self, buf: &mut FrameBuffer, fg: CellColor, bg: CellColor) {
        buf.fill(self.rect, Cell::styled(' ', fg, bg), None);
    }

    /// Write one character at a local position.
    ///
    /// Returns the columns it advances (0 for zero-width characters),
    /// whether or not it landed inside the surface.
    pub fn put(
        &self,
        buf: &mut FrameBuffer,
        x: i32,
        y: i32,
        ch: char,
        fg: CellColor,
        bg: CellColor,
    ) -> i32 {
        let (sx, sy) = self.to_screen(x, y);
        match (u16::try_from(sx), u16::try_from(sy)) {
            (Ok(sx), Ok(sy)) => i32::from(buf.put_char(sx, sy, ch, fg, bg, Some(&self.rect))),
            // Off the top or left of the screen.
            _ => i32::try_from(char_width(ch)).unwrap_or(0),
        }
    }

    /// Write a string starting at a local position.
    ///
    /// Returns the columns consumed.
    pub fn put_str(
        &self,
        buf: &mut FrameBuffer,
        x: i32,
        y: i32,
        text: &str,
        fg: CellColor,
        bg: CellColor,
    ) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            if col >= i32::from(self.rect.width) {
                break;
            }
            col += self.put(buf, col, y, ch, fg, bg);
        }
        col - x
    }

    /// Draw a single-line box along the surface edges.
    pub fn border(&self, buf: &mut FrameBuffer, fg: CellColor, bg: CellColor) {
        let right = i32::from(self.rect.width) - 1;
        let bottom = i32::from(self.rect.height) - 1;

        for x in 1..right {
            self.put(buf, x, 0, glyph::HORIZONTAL, fg, bg);
            self.put(buf, x, bottom, glyph::HORIZONTAL, fg, bg);
        }
        for y in 1..bottom {
            self.put(buf, 0, y, glyph::VERTICAL, fg, bg);
            self.put(buf, right, y, glyph::VERTICAL, fg, bg);
        }
        self.put(buf, 0, 0, glyph::TOP_LEFT, fg, bg);
        self.put(buf, right, 0, glyph::TOP_RIGHT, fg, bg);
        self.put(buf, 0, bottom, glyph::BOTTOM_LEFT, fg, bg);
        self.put(buf, right, bottom, glyph::BOTTOM_RIGHT, fg, bg);
    }
}
