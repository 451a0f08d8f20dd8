//! Two-pass layout.
//!
//! **Size pass** (bottom-up). Every visible window gets an intrinsic size:
//! text panes from their wrapped plain text, grids from their declared
//! size, containers from their children. An explicit rect overrides the
//! computed size. Along a container's axis the auto children (no explicit
//! rect) add up, across it the largest wins; children with an explicit
//! rect only push out a separate extent. Padding puts one cell before and
//! after each auto child along the axis, and two columns (vertical
//! container) or one row (horizontal container) on each side across it.
//! A border adds one cell on every side.
//!
//! **Rect pass** (top-down). Top-level windows get their explicit rect
//! resolved against the screen, or their intrinsic size centred on it.
//! Inside a container, explicit children are placed relative to its
//! interior and auto children are laid out in order along the axis, with
//! the leftover space shared by [`distribute`].
//!
//! Every remainder cell goes to the earliest child or gap, so a layout is
//! reproducible cell for cell.

use tracing::trace;
use wintui_term::surface::Surface;

use crate::geometry::{Align, Axis, Pos, Rect, Size};
use crate::text;
use crate::tui::Tui;
use crate::window::{Kind, WindowId};

/// How the leftover main-axis space of a container is spent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    /// Space before the first child.
    pub leading: i32,
    /// Space after each child but the last.
    pub gaps: Vec<i32>,
    /// Space after the last child.
    pub trailing: i32,
    /// Extra length given to each child.
    pub extra: Vec<i32>,
}

impl Distribution {
    /// Everything laid end to end: children, extras and gaps.
    #[must_use]
    pub fn total(&self, sizes: &[i32]) -> i32 {
        self.leading
            + sizes.iter().sum::<i32>()
            + self.extra.iter().sum::<i32>()
            + self.gaps.iter().sum::<i32>()
            + self.trailing
    }
}

fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Split `share * parts + rem` so part `k` gets one extra cell when
/// `k < rem`.
fn part(share: i32, rem: i32, k: usize) -> i32 {
    share + i32::from(count(k) < rem)
}

/// Share the space `interior` leaves around children of main-axis
/// `sizes` (padding included).
///
/// Growing children take all of it, evenly. Otherwise `align` decides:
/// `Start`, `Center` and `End` put it before the first child in full, half
/// or not at all; `Between` spreads it over the gaps between children;
/// `Around` puts an equal gap before and after every child, leftovers
/// going to the leading gap; `Evenly` makes all `n + 1` gaps equal.
///
/// ```
/// use wintui_core::layout::distribute;
/// use wintui_core::Align;
///
/// let d = distribute(Align::Between, &[1, 1, 1], &[false; 3], 10);
/// assert_eq!(d.gaps, [4, 3]);
/// assert_eq!(d.total(&[1, 1, 1]), 10);
/// ```
#[must_use]
pub fn distribute(align: Align, sizes: &[i32], grows: &[bool], interior: i32) -> Distribution {
    let n = sizes.len();
    let mut d = Distribution {
        leading: 0,
        gaps: vec![0; n.saturating_sub(1)],
        trailing: 0,
        extra: vec![0; n],
    };
    let space = (interior - sizes.iter().sum::<i32>()).max(0);
    if n == 0 {
        d.trailing = space;
        return d;
    }

    let growing: Vec<usize> = (0..n)
        .filter(|&i| grows.get(i).copied().unwrap_or(false))
        .collect();
    if !growing.is_empty() {
        let parts = count(growing.len());
        let (share, rem) = (space / parts, space % parts);
        for (k, &i) in growing.iter().enumerate() {
            d.extra[i] = part(share, rem, k);
        }
        return d;
    }

    match align {
        Align::Between if n > 1 => {
            let parts = count(n - 1);
            let (share, rem) = (space / parts, space % parts);
            for (k, gap) in d.gaps.iter_mut().enumerate() {
                *gap = part(share, rem, k);
            }
        }
        Align::Around => {
            let parts = count(n + 1);
            let (share, rem) = (space / parts, space % parts);
            d.leading = share + rem;
            d.gaps.fill(share);
            d.trailing = share;
        }
        Align::Evenly => {
            let parts = count(n + 1);
            let (share, rem) = (space / parts, space % parts);
            d.leading = part(share, rem, 0);
            for (k, gap) in d.gaps.iter_mut().enumerate() {
                *gap = part(share, rem, k + 1);
            }
            d.trailing = part(share, rem, n);
        }
        Align::Center => {
            d.leading = space / 2;
            d.trailing = space - d.leading;
        }
        Align::End => d.leading = space,
        Align::Start | Align::Between => d.trailing = space,
    }
    d
}

/// Padding of a container: (per side along the axis, per side across it).
const fn padding(axis: Axis, enabled: bool) -> (i32, i32) {
    if !enabled {
        return (0, 0);
    }
    match axis {
        Axis::Vertical => (1, 2),
        Axis::Horizontal => (1, 1),
    }
}

/// Intrinsic size of plain text: as few lines as the screen width allows,
/// then as narrow as those lines allow.
fn text_size(plain: &str, screen_w: i32) -> Size {
    let max_w = usize::try_from(screen_w.max(1)).unwrap_or(1);
    text::height_for_width(plain, max_w).map_or_else(
        || Size::new(count(text::total_width(plain).min(max_w)), 1),
        |h| Size::new(count(text::width_for_height(plain, h)), count(h)),
    )
}

/// What a container needs from its node for either pass.
struct Frame {
    children: Vec<WindowId>,
    axis: Axis,
    inflate: bool,
    border: bool,
    padding: bool,
    align: Align,
    pos: Pos,
}

enum Plan {
    Leaf(Size),
    Container(Frame),
}

impl Tui {
    pub(crate) fn layout(&mut self) {
        let screen = self.screen;
        for id in self.scope_roots() {
            if self.is_hidden(id) {
                continue;
            }
            let size = self.measure(id);
            let Some(explicit) = self.windows.get(id.0).map(|n| n.explicit) else {
                continue;
            };
            let rect = explicit.map_or_else(
                || {
                    let w = size.w.min(screen.w);
                    let h = size.h.min(screen.h);
                    Rect::new((screen.w - w) / 2, (screen.h - h) / 2, w, h)
                },
                |r| r.resolve(screen),
            );
            self.place(id, rect);
        }
    }

    fn frame_of(&self, id: WindowId) -> Option<Frame> {
        match &self.windows.get(id.0)?.kind {
            Kind::Container(c) => Some(Frame {
                children: c.children.clone(),
                axis: c.axis,
                inflate: c.inflate,
                border: c.border.active,
                padding: c.padding,
                align: c.align,
                pos: c.pos,
            }),
            Kind::Text(_) | Kind::Grid(_) => None,
        }
    }

    // ── size pass ──

    fn measure(&mut self, id: WindowId) -> Size {
        let Some(node) = self.windows.get(id.0) else {
            return Size::ZERO;
        };
        let explicit = node
            .explicit
            .map(|r| Size::new(r.w.max(0), r.h.max(0)));
        let plan = match &node.kind {
            Kind::Text(t) => Plan::Leaf(explicit.unwrap_or_else(|| text_size(&t.plain, self.screen.w))),
            Kind::Grid(g) => Plan::Leaf(explicit.unwrap_or(g.size)),
            Kind::Container(_) => match self.frame_of(id) {
                Some(frame) => Plan::Container(frame),
                None => Plan::Leaf(Size::ZERO),
            },
        };

        let size = match plan {
            Plan::Leaf(size) => size,
            Plan::Container(frame) => {
                let content = self.measure_children(&frame);
                explicit.unwrap_or(content)
            }
        };
        if let Some(node) = self.windows.get_mut(id.0) {
            node.size = size;
        }
        size
    }

    fn measure_children(&mut self, frame: &Frame) -> Size {
        let axis = frame.axis;
        let (pad_main, pad_cross) = padding(axis, frame.padding);
        let mut main = 0;
        let mut cross = 0;
        let mut extent = Size::ZERO;
        let mut autos = 0;

        for &child in &frame.children {
            if self.is_hidden(child) {
                continue;
            }
            let size = self.measure(child);
            match self.windows.get(child.0).and_then(|n| n.explicit) {
                Some(r) => {
                    extent.w = extent.w.max(r.x.max(0) + size.w);
                    extent.h = extent.h.max(r.y.max(0) + size.h);
                }
                None => {
                    main += size.main(axis) + 2 * pad_main;
                    cross = cross.max(size.cross(axis));
                    autos += 1;
                }
            }
        }
        if autos > 0 {
            cross += 2 * pad_cross;
        }

        let aligned = Size::from_axis(axis, main, cross);
        let border = if frame.border { 2 } else { 0 };
        Size::new(
            aligned.w.max(extent.w) + border,
            aligned.h.max(extent.h) + border,
        )
    }

    // ── rect pass ──

    fn place(&mut self, id: WindowId, rect: Rect) {
        let Some(node) = self.windows.get_mut(id.0) else {
            return;
        };
        node.rect = rect;
        let resized = node
            .surface
            .as_mut()
            .is_some_and(|s| s.resize(rect.x, rect.y, rect.w, rect.h));
        if !resized {
            node.surface = Surface::new(rect.x, rect.y, rect.w, rect.h);
            if node.surface.is_none() {
                trace!(window = %id, ?rect, "zero-sized, no surface");
            }
        }

        if let Some(frame) = self.frame_of(id) {
            let interior = if frame.border { rect.inset(1) } else { rect };
            self.place_children(interior, &frame);
        }
    }

    fn place_children(&mut self, interior: Rect, frame: &Frame) {
        let axis = frame.axis;
        let (pad_main, pad_cross) = padding(axis, frame.padding);

        let mut autos = Vec::new();
        for &child in &frame.children {
            let Some(node) = self.windows.get(child.0) else {
                continue;
            };
            if node.hidden {
                continue;
            }
            if let Some(explicit) = node.explicit {
                let r = explicit.resolve(interior.size());
                self.place(child, Rect::new(interior.x + r.x, interior.y + r.y, r.w, r.h));
            } else {
                autos.push((child, node.size, node.grows(axis), node.grows(axis.cross())));
            }
        }

        let slots: Vec<i32> = autos
            .iter()
            .map(|&(_, size, _, _)| size.main(axis) + 2 * pad_main)
            .collect();
        let grows: Vec<bool> = autos.iter().map(|&(_, _, grow, _)| grow).collect();
        let d = distribute(frame.align, &slots, &grows, interior.size().main(axis));

        let cross_space = (interior.size().cross(axis) - 2 * pad_cross).max(0);
        let mut cursor = interior.main_pos(axis) + d.leading;
        for (i, &(child, size, _, grow_cross)) in autos.iter().enumerate() {
            let main_len = size.main(axis) + d.extra[i];
            let cross_len = if grow_cross || frame.inflate {
                cross_space
            } else {
                size.cross(axis).min(cross_space)
            };
            let cross_pos =
                interior.cross_pos(axis) + pad_cross + frame.pos.offset(cross_space, cross_len);
            let rect = Rect::from_axis(
                axis,
                cursor + pad_main,
                cross_pos,
                Size::from_axis(axis, main_len, cross_len),
            )
            .intersect(interior);
            self.place(child, rect);
            cursor += slots[i] + d.extra[i] + d.gaps.get(i).copied().unwrap_or(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{ContainerConfig, GridConfig, Parent, TextConfig, WindowConfig};
    use pretty_assertions::assert_eq;
    use wintui_term::buffer::FrameBuffer;

    const MODES: [Align; 6] = [
        Align::Start,
        Align::Center,
        Align::End,
        Align::Between,
        Align::Around,
        Align::Evenly,
    ];

    // ── distribute ──

    #[test]
    fn distribution_is_exact_for_every_mode() {
        for mode in MODES {
            for sizes in [vec![3], vec![2, 5], vec![1, 2, 3, 1, 2]] {
                for interior in [sizes.iter().sum::<i32>(), 17, 23, 40] {
                    let none = vec![false; sizes.len()];
                    let d = distribute(mode, &sizes, &none, interior);
                    assert_eq!(d.total(&sizes), interior, "{mode:?} {sizes:?} in {interior}");

                    let mut first = none.clone();
                    first[0] = true;
                    let d = distribute(mode, &sizes, &first, interior);
                    assert_eq!(d.total(&sizes), interior, "grow {mode:?} {sizes:?}");
                }
            }
        }
    }

    #[test]
    fn grow_splits_remainder_to_earliest() {
        let d = distribute(Align::Start, &[1, 1, 1], &[true, false, true], 8);
        assert_eq!(d.extra, vec![3, 0, 2]);
        assert_eq!(d.leading, 0);
        assert_eq!(d.trailing, 0);
    }

    #[test]
    fn start_center_end_put_slack_before() {
        assert_eq!(distribute(Align::Start, &[2], &[false], 7).leading, 0);
        assert_eq!(distribute(Align::Center, &[2], &[false], 7).leading, 2);
        assert_eq!(distribute(Align::End, &[2], &[false], 7).leading, 5);
    }

    #[test]
    fn between_remainder_goes_to_first_gap() {
        let d = distribute(Align::Between, &[1, 1, 1], &[false; 3], 10);
        assert_eq!((d.leading, d.gaps.clone(), d.trailing), (0, vec![4, 3], 0));
        let single = distribute(Align::Between, &[2], &[false], 6);
        assert_eq!((single.leading, single.trailing), (0, 4));
    }

    #[test]
    fn around_remainder_goes_to_leading_gap() {
        let d = distribute(Align::Around, &[1, 1], &[false; 2], 10);
        assert_eq!((d.leading, d.gaps.clone(), d.trailing), (4, vec![2], 2));
    }

    #[test]
    fn evenly_remainder_goes_to_earliest_gaps() {
        let d = distribute(Align::Evenly, &[1, 1], &[false; 2], 10);
        assert_eq!((d.leading, d.gaps.clone(), d.trailing), (3, vec![3], 2));
    }

    #[test]
    fn overflow_leaves_no_space() {
        let d = distribute(Align::Center, &[6, 6], &[false; 2], 10);
        assert_eq!((d.leading, d.trailing), (0, 0));
    }

    // ── tree layout ──

    fn text(string: &str) -> TextConfig {
        TextConfig {
            string: string.into(),
            ..Default::default()
        }
    }

    fn column(tui: &mut Tui, padding: bool, align: Align) -> WindowId {
        tui.create_container(
            Parent::Root,
            ContainerConfig {
                window: WindowConfig {
                    rect: Some(Rect::new(0, 0, 20, 10)),
                    ..Default::default()
                },
                axis: Axis::Vertical,
                padding,
                align,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn rects(tui: &Tui, ids: &[WindowId]) -> Vec<Rect> {
        ids.iter().filter_map(|&id| tui.rect(id)).collect()
    }

    #[test]
    fn between_with_padding_scenario() {
        let mut tui = Tui::default();
        let col = column(&mut tui, true, Align::Between);
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|s| tui.create_text(col, text(s)).unwrap())
            .collect();
        tui.frame(&mut FrameBuffer::new(20, 10));
        assert_eq!(
            rects(&tui, &ids),
            vec![
                Rect::new(2, 1, 1, 1),
                Rect::new(2, 5, 1, 1),
                Rect::new(2, 8, 1, 1)
            ]
        );
    }

    #[test]
    fn between_without_padding_scenario() {
        let mut tui = Tui::default();
        let col = column(&mut tui, false, Align::Between);
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|s| tui.create_text(col, text(s)).unwrap())
            .collect();
        tui.frame(&mut FrameBuffer::new(20, 10));
        let ys: Vec<i32> = rects(&tui, &ids).iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0, 5, 9]);
    }

    #[test]
    fn container_intrinsic_size_sums_and_maxes() {
        let mut tui = Tui::default();
        let row = tui
            .create_container(
                Parent::Root,
                ContainerConfig {
                    padding: true,
                    border: crate::window::Border::plain(),
                    ..Default::default()
                },
            )
            .unwrap();
        tui.create_text(row, text("abc")).unwrap();
        tui.create_text(row, text("de")).unwrap();
        tui.create_grid(
            row,
            GridConfig {
                window: WindowConfig {
                    rect: Some(Rect::new(1, 2, 4, 3)),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .unwrap();
        tui.frame(&mut FrameBuffer::new(40, 20));
        // Width: (3 + 2) + (2 + 2) = 9, height: 1 + 2 * 1 = 3; explicit grid
        // reaches y 5. Border adds 2 each way.
        assert_eq!(tui.intrinsic_size(row), Some(Size::new(11, 7)));
        // Centred on screen.
        assert_eq!(tui.rect(row), Some(Rect::new(14, 6, 11, 7)));
    }

    #[test]
    fn grow_and_cross_axis() {
        let mut tui = Tui::default();
        let row = tui
            .create_container(
                Parent::Root,
                ContainerConfig {
                    window: WindowConfig {
                        rect: Some(Rect::FILL),
                        ..Default::default()
                    },
                    pos: Pos::Center,
                    ..Default::default()
                },
            )
            .unwrap();
        let fixed = tui.create_text(row, text("ab")).unwrap();
        let grow = tui
            .create_text(
                row,
                TextConfig {
                    window: WindowConfig {
                        grow_w: true,
                        grow_h: true,
                        ..Default::default()
                    },
                    string: "x".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        tui.frame(&mut FrameBuffer::new(10, 5));
        assert_eq!(tui.rect(fixed), Some(Rect::new(0, 2, 2, 1)));
        assert_eq!(tui.rect(grow), Some(Rect::new(2, 0, 8, 5)));
    }

    #[test]
    fn explicit_children_anchor_inside_border() {
        let mut tui = Tui::default();
        let frame = tui
            .create_container(
                Parent::Root,
                ContainerConfig {
                    window: WindowConfig {
                        rect: Some(Rect::FILL),
                        ..Default::default()
                    },
                    border: crate::window::Border::plain(),
                    ..Default::default()
                },
            )
            .unwrap();
        let corner = tui
            .create_text(
                frame,
                TextConfig {
                    window: WindowConfig {
                        rect: Some(Rect::new(-1, -1, 3, 1)),
                        ..Default::default()
                    },
                    string: "end".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        tui.frame(&mut FrameBuffer::new(12, 6));
        assert_eq!(tui.rect(corner), Some(Rect::new(8, 4, 3, 1)));
    }

    #[test]
    fn text_wraps_to_screen_width() {
        let mut tui = Tui::default();
        let pane = tui.create_text(Parent::Root, text("ab cd ef")).unwrap();
        tui.frame(&mut FrameBuffer::new(5, 10));
        assert_eq!(tui.intrinsic_size(pane), Some(Size::new(5, 2)));
    }

    #[test]
    fn hidden_children_take_no_space() {
        let mut tui = Tui::default();
        let row = tui.create_container(Parent::Root, ContainerConfig::default()).unwrap();
        tui.create_text(row, text("abc")).unwrap();
        let hidden = tui
            .create_text(
                row,
                TextConfig {
                    window: WindowConfig {
                        hidden: true,
                        ..Default::default()
                    },
                    string: "hidden".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        tui.frame(&mut FrameBuffer::new(20, 4));
        assert_eq!(tui.intrinsic_size(row), Some(Size::new(3, 1)));
        assert!(tui.is_hidden(hidden));
    }
}
