//! Colour pairs with transparent channels.
//!
//! Every window declares a [`ColorPair`]; `None` in a channel means
//! "inherit". The painter resolves each window against the effective
//! colour of whatever encloses it (parent container, then menu, then the
//! toolkit base) with [`ColorPair::over`].

use wintui_term::color::{CellColor, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ColorPair {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl ColorPair {
    /// Fully transparent.
    pub const NONE: Self = Self { fg: None, bg: None };

    #[inline]
    #[must_use]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
        }
    }

    /// Foreground only.
    #[inline]
    #[must_use]
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: None,
        }
    }

    /// Background only.
    #[inline]
    #[must_use]
    pub const fn bg(bg: Color) -> Self {
        Self {
            fg: None,
            bg: Some(bg),
        }
    }

    /// Layer `self` over `base`: each opaque channel of `self` wins.
    ///
    /// ```
    /// use wintui_core::{Color, ColorPair};
    ///
    /// let base = ColorPair::new(Color::White, Color::Black);
    /// let over = ColorPair::bg(Color::Red).over(base);
    /// assert_eq!(over, ColorPair::new(Color::White, Color::Red));
    /// ```
    #[inline]
    #[must_use]
    pub const fn over(self, base: Self) -> Self {
        Self {
            fg: match self.fg {
                Some(c) => Some(c),
                None => base.fg,
            },
            bg: match self.bg {
                Some(c) => Some(c),
                None => base.bg,
            },
        }
    }

    /// Both channels set.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.fg.is_some() && self.bg.is_some()
    }

    /// Terminal colours for painting; still-transparent channels use the
    /// terminal default.
    #[inline]
    #[must_use]
    pub fn cell_colors(self) -> (CellColor, CellColor) {
        (CellColor::from(self.fg), CellColor::from(self.bg))
    }
}
