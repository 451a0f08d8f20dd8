// SPDX-License-Identifier: MIT
//
// Color: the eight-colour terminal palette.
//
// The toolkit styles windows with the eight classic ANSI colours for both
// foreground and background. That is the whole palette: no 256-colour
// indices, no true colour. Every terminal since the VT100 era renders
// these, and the SGR encoding is a single digit.
//
// Two types live here:
//
//   Color    : one of the eight named colours. This is what applications
//               and window configurations talk about.
//
//   CellColor: what a cell actually stores. Either a named colour or the
//               terminal's own default (SGR 39 / 49), which is what a cell
//               gets when nothing in the window chain picked a colour.
//
// Transparency is not a cell concern. The toolkit models "no colour
// chosen" as `Option<Color>` and resolves it against ancestors before a
// cell is ever written; a fully transparent chain lands here as
// `CellColor::Default`.

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// One of the eight ANSI colours.
///
/// The discriminant is the SGR offset: foreground is `30 + index`,
/// background is `40 + index`.
///
/// ```
/// use wintui_term::color::Color;
///
/// assert_eq!(Color::Red.index(), 1);
/// assert_eq!(Color::from_index(7), Some(Color::White));
/// assert_eq!(Color::from_index(8), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// All eight colours in palette order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Palette index (0–7).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Colour for a palette index, `None` outside 0–7.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Blue),
            5 => Some(Self::Magenta),
            6 => Some(Self::Cyan),
            7 => Some(Self::White),
            _ => None,
        }
    }

    /// Lowercase colour name, as used in logs and debug output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Colour stored in a terminal cell.
///
/// Small and `Copy` so the diff renderer can compare cells cheaply.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// Terminal default colour (SGR 39 / 49).
    #[default]
    Default,
    /// One of the eight palette colours.
    Named(Color),
}

impl CellColor {
    /// Whether this is the terminal default colour.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// The palette colour, if any.
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Named(c) => Some(c),
            Self::Default => None,
        }
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(c) => write!(f, "{c}"),
            Self::Default => f.write_str("default"),
        }
    }
}

impl From<Color> for CellColor {
    fn from(color: Color) -> Self {
        Self::Named(color)
    }
}

impl From<Option<Color>> for CellColor {
    fn from(color: Option<Color>) -> Self {
        color.map_or(Self::Default, Self::Named)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_from_index() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), Some(color));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Color::from_index(8), None);
        assert_eq!(Color::from_index(255), None);
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Color::Magenta.to_string(), "magenta");
        assert_eq!(format!("{:?}", CellColor::Named(Color::Cyan)), "cyan");
        assert_eq!(format!("{:?}", CellColor::Default), "default");
    }

    #[test]
    fn cell_color_from_option() {
        assert_eq!(CellColor::from(None), CellColor::Default);
        assert_eq!(
            CellColor::from(Some(Color::Green)),
            CellColor::Named(Color::Green)
        );
    }

    #[test]
    fn cell_color_queries() {
        assert!(CellColor::Default.is_default());
        assert!(!CellColor::Named(Color::Black).is_default());
        assert_eq!(CellColor::Named(Color::Blue).color(), Some(Color::Blue));
        assert_eq!(CellColor::Default.color(), None);
    }
}
