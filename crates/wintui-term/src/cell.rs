// SPDX-License-Identifier: MIT
//
// Cell: one character position on screen.
//
// A cell is a character plus a foreground and background colour. The
// toolkit has no text attributes (no bold, no underline), so a cell is
// 12 bytes and compares with a plain derived `PartialEq`.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the character; the second is a continuation cell holding '\0'.
// The output writer skips continuation cells that directly follow their
// wide character and fills orphaned ones with a space.

use crate::color::CellColor;

/// Continuation marker for the second column of a wide character.
const CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display, or `'\0'` for a continuation cell.
    pub ch: char,
    /// Foreground colour.
    pub fg: CellColor,
    /// Background colour.
    pub bg: CellColor,
}

impl Cell {
    /// A space with terminal default colours.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// A cell with the given character and default colours.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
        }
    }

    /// A cell with character and both colours.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self { ch, fg, bg }
    }

    /// Continuation cell for the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
        }
    }

    /// Whether this is the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The displayed character, `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.is_continuation() {
            None
        } else {
            Some(self.ch)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
