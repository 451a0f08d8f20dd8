//! Rects, sizes and the layout modes that place children along an axis.
//!
//! Coordinates are signed: explicit rects use negative values as
//! far-edge anchors, and a rect may hang off the screen before clipping.

/// Width and height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const ZERO: Self = Self { w: 0, h: 0 };

    #[inline]
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn main(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Extent across `axis`.
    #[inline]
    #[must_use]
    pub const fn cross(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.h,
            Axis::Vertical => self.w,
        }
    }

    /// Build a size from main and cross extents.
    #[inline]
    #[must_use]
    pub const fn from_axis(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self { w: main, h: cross },
            Axis::Vertical => Self { w: cross, h: main },
        }
    }
}

/// A rectangle. Explicit rects are relative to the parent interior;
/// computed rects are absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The explicit rect `{0, 0, 0, 0}`: fill the parent.
    pub const FILL: Self = Self::new(0, 0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.w, self.h)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Position along `axis`.
    #[inline]
    #[must_use]
    pub const fn main_pos(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Position across `axis`.
    #[inline]
    #[must_use]
    pub const fn cross_pos(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.y,
            Axis::Vertical => self.x,
        }
    }

    /// Build a rect from main and cross position and extent.
    #[must_use]
    pub const fn from_axis(axis: Axis, main_pos: i32, cross_pos: i32, size: Size) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main_pos, cross_pos, size.w, size.h),
            Axis::Vertical => Self::new(cross_pos, main_pos, size.w, size.h),
        }
    }

    /// Shrink by `n` cells on every side, never below zero size.
    #[must_use]
    pub fn inset(self, n: i32) -> Self {
        Self {
            x: self.x + n,
            y: self.y + n,
            w: (self.w - 2 * n).max(0),
            h: (self.h - 2 * n).max(0),
        }
    }

    /// Overlap of two rects; zero-sized when they do not meet.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = (self.x + self.w).min(other.x + other.w);
        let bottom = (self.y + self.h).min(other.y + other.h);
        Self {
            x,
            y,
            w: (right - x).max(0),
            h: (bottom - y).max(0),
        }
    }

    /// Resolve an explicit rect against a parent area of `parent` size.
    ///
    /// A width or height `<= 0` means "parent size minus its magnitude"; a
    /// negative x or y anchors from the far edge, `-1` being flush with it.
    /// The result is clamped inside the parent. Position is relative to
    /// the parent origin.
    #[must_use]
    pub fn resolve(self, parent: Size) -> Self {
        let (x, w) = resolve_axis(self.x, self.w, parent.w);
        let (y, h) = resolve_axis(self.y, self.h, parent.h);
        Self { x, y, w, h }
    }
}

fn resolve_axis(pos: i32, len: i32, parent: i32) -> (i32, i32) {
    let parent = parent.max(0);
    let len = if len <= 0 { parent + len } else { len };
    let len = len.clamp(0, parent);
    let pos = if pos < 0 { parent - len + pos + 1 } else { pos };
    (pos.clamp(0, parent - len), len)
}

/// Direction a container stacks its auto children in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// How leftover main-axis space is shared among auto children.
///
/// Text panes use the same modes to place each line horizontally, where
/// only `Center` and `End` differ from `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Between,
    Around,
    Evenly,
}

/// Where a child sits on the cross axis, or a text block vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Pos {
    #[default]
    Start,
    Center,
    End,
}

impl Pos {
    /// Offset of an item of size `used` inside `space` cells.
    #[inline]
    #[must_use]
    pub const fn offset(self, space: i32, used: i32) -> i32 {
        let left = space - used;
        if left <= 0 {
            return 0;
        }
        match self {
            Self::Start => 0,
            Self::Center => left / 2,
            Self::End => left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PARENT: Size = Size::new(20, 10);

    // ── explicit rects ──

    #[test]
    fn zero_rect_fills_parent() {
        assert_eq!(Rect::FILL.resolve(PARENT), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn non_positive_size_is_parent_minus() {
        assert_eq!(Rect::new(0, 0, -4, -2).resolve(PARENT), Rect::new(0, 0, 16, 8));
    }

    #[test]
    fn negative_position_anchors_far_edge() {
        assert_eq!(Rect::new(-1, -1, 5, 2).resolve(PARENT), Rect::new(15, 8, 5, 2));
        assert_eq!(Rect::new(-3, 0, 5, 2).resolve(PARENT), Rect::new(13, 0, 5, 2));
    }

    #[test]
    fn oversized_rect_is_clamped() {
        assert_eq!(Rect::new(18, 0, 50, 3).resolve(PARENT), Rect::new(0, 0, 20, 3));
        assert_eq!(Rect::new(18, 0, 5, 3).resolve(PARENT), Rect::new(15, 0, 5, 3));
        assert_eq!(Rect::new(0, 0, -30, 1).resolve(PARENT), Rect::new(0, 0, 0, 1));
    }

    // ── rect arithmetic ──

    #[test]
    fn inset_never_goes_negative() {
        assert_eq!(Rect::new(2, 2, 6, 4).inset(1), Rect::new(3, 3, 4, 2));
        assert_eq!(Rect::new(0, 0, 1, 1).inset(1), Rect::new(1, 1, 0, 0));
    }

    #[test]
    fn intersect_overlap_and_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(Rect::new(5, 5, 10, 10)), Rect::new(5, 5, 5, 5));
        assert!(a.intersect(Rect::new(20, 0, 3, 3)).is_empty());
    }

    #[test]
    fn axis_accessors() {
        let s = Size::new(7, 3);
        assert_eq!(s.main(Axis::Vertical), 3);
        assert_eq!(s.cross(Axis::Vertical), 7);
        assert_eq!(Size::from_axis(Axis::Vertical, 3, 7), s);
        let r = Rect::from_axis(Axis::Vertical, 4, 1, s);
        assert_eq!(r, Rect::new(1, 4, 7, 3));
        assert_eq!(r.main_pos(Axis::Vertical), 4);
        assert_eq!(r.cross_pos(Axis::Horizontal), 4);
    }

    #[test]
    fn pos_offsets() {
        assert_eq!(Pos::Start.offset(10, 4), 0);
        assert_eq!(Pos::Center.offset(10, 4), 3);
        assert_eq!(Pos::End.offset(10, 4), 6);
        assert_eq!(Pos::End.offset(3, 4), 0);
    }
}
