//! Painting windows into the frame buffer.
//!
//! Windows paint top-down: a window first, its children over it. Each
//! window's effective colour is its own pair over the effective colour of
//! whatever holds it (parent container, menu over the toolkit base, or the
//! base for menu-independent windows). The active window is painted once
//! more at the end so nothing a sibling draws can cover it.

use tracing::trace;
use wintui_term::buffer::{FrameBuffer, char_width};
use wintui_term::surface::Surface;

use crate::color::ColorPair;
use crate::geometry::{Align, Pos};
use crate::markup::{self, Token};
use crate::text::{self, Line};
use crate::tui::Tui;
use crate::window::{Grid, Kind, Parent, Text, WindowId};

impl Tui {
    pub(crate) fn paint(&mut self, buf: &mut FrameBuffer) {
        self.cursor = None;
        let base = self.color;

        let menu = self.active_menu.and_then(|m| self.menus.get(m.0));
        if let Some((windows, color)) = menu.map(|m| (m.windows.clone(), m.color.over(base))) {
            for id in windows {
                self.paint_tree(buf, id, color, true);
            }
        }
        for id in self.root.clone() {
            self.paint_tree(buf, id, base, true);
        }

        if let Some(active) = self.active_window {
            if self.is_on_screen(active) {
                let inherited = self.inherited_color(active);
                self.paint_tree(buf, active, inherited, false);
            }
        }
    }

    /// In the painted scope with no hidden ancestor.
    fn is_on_screen(&self, id: WindowId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.windows.get(current.0) else {
                return false;
            };
            if node.hidden {
                return false;
            }
            match node.parent {
                Parent::Window(p) => current = p,
                Parent::Menu(m) => return self.active_menu == Some(m),
                Parent::Root => return true,
            }
        }
    }

    /// Colour a window inherits, from its parent's last paint.
    fn inherited_color(&self, id: WindowId) -> ColorPair {
        match self.parent(id) {
            Some(Parent::Window(p)) => self.effective_color(p).unwrap_or(self.color),
            Some(Parent::Menu(m)) => self
                .menus
                .get(m.0)
                .map_or(self.color, |menu| menu.color.over(self.color)),
            Some(Parent::Root) | None => self.color,
        }
    }

    /// Paint `id` and its subtree. `render` runs the render hooks first;
    /// the repaint of the active window passes `false` so each hook runs
    /// once per frame.
    fn paint_tree(
        &mut self,
        buf: &mut FrameBuffer,
        id: WindowId,
        inherited: ColorPair,
        render: bool,
    ) {
        let hook = match self.windows.get(id.0) {
            Some(node) if !node.hidden => node.hooks.render,
            _ => return,
        };
        if let Some(hook) = hook.filter(|_| render) {
            hook(self, id);
        }

        let active = self.active_window == Some(id);
        let Some(node) = self.windows.get_mut(id.0) else {
            return;
        };
        if node.hidden {
            return;
        }
        let effective = node.color.over(inherited);
        node.effective = effective;
        let Some(surface) = node.surface else {
            trace!(window = %id, "no surface, skipped");
            return;
        };

        let (fg, bg) = effective.cell_colors();
        surface.erase(buf, fg, bg);
        let mut cursor = None;
        let children = match &node.kind {
            Kind::Container(c) => {
                if c.border.active {
                    let (fg, bg) = c.border.color.over(effective).cell_colors();
                    surface.border(buf, fg, bg);
                }
                c.children.clone()
            }
            Kind::Text(t) => {
                match paint_text(buf, &surface, t, effective, active) {
                    Some(at) => cursor = at,
                    None => trace!(window = %id, "text does not fit, skipped"),
                }
                Vec::new()
            }
            Kind::Grid(g) => {
                paint_grid(buf, &surface, g, effective);
                Vec::new()
            }
        };
        if cursor.is_some() {
            self.cursor = cursor;
        }

        for child in children {
            self.paint_tree(buf, child, effective, render);
        }
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Horizontal offset of a line of `used` columns in `space` columns.
const fn line_offset(align: Align, space: i32, used: i32) -> i32 {
    match align {
        Align::Center => Pos::Center.offset(space, used),
        Align::End => Pos::End.offset(space, used),
        Align::Start | Align::Between | Align::Around | Align::Evenly => 0,
    }
}

/// Paint a text pane. Returns `None` when the text cannot wrap at the
/// pane's width, otherwise the screen position of the cursor directive if
/// the pane is active and has one.
fn paint_text(
    buf: &mut FrameBuffer,
    surface: &Surface,
    pane: &Text,
    effective: ColorPair,
    active: bool,
) -> Option<Option<(i32, i32)>> {
    let width = i32::from(surface.width());
    let lines = text::wrap(&pane.plain, usize::from(surface.width()))?;
    let top = pane.pos.offset(i32::from(surface.height()), to_i32(lines.len()));
    let lefts: Vec<i32> = lines
        .iter()
        .map(|l| line_offset(pane.align, width, to_i32(l.width)))
        .collect();

    // Where each plain character lands; `None` for newlines and the
    // spaces swallowed by wrapping.
    let chars: Vec<char> = pane.plain.chars().collect();
    let mut place = vec![None; chars.len()];
    for (row, line) in lines.iter().enumerate() {
        let mut x = lefts[row];
        for i in line.start..line.end {
            place[i] = Some((x, top + to_i32(row)));
            x += to_i32(char_width(chars[i]));
        }
    }

    let mut color = effective;
    let mut index = 0;
    let mut cursor = None;
    for token in markup::parse(&pane.string) {
        match token {
            Token::Color(pair) => color = pair.over(effective),
            Token::Cursor => {
                if active {
                    let (x, y) = place
                        .get(index)
                        .copied()
                        .flatten()
                        .unwrap_or_else(|| cursor_between(&lines, &lefts, top, index));
                    cursor = Some(surface.to_screen(x, y));
                }
            }
            Token::Char(ch) => {
                if let Some(Some((x, y))) = place.get(index) {
                    let glyph = if pane.secret { '*' } else { ch };
                    let (fg, bg) = color.cell_colors();
                    surface.put(buf, *x, *y, glyph, fg, bg);
                }
                index += 1;
            }
        }
    }
    Some(cursor)
}

/// Position for a cursor at a char index that is not painted: the end of
/// the line it follows, or the start of the next line.
fn cursor_between(lines: &[Line], lefts: &[i32], top: i32, index: usize) -> (i32, i32) {
    for (row, line) in lines.iter().enumerate() {
        if index <= line.end {
            let x = if index <= line.start {
                lefts[row]
            } else {
                lefts[row] + to_i32(line.width)
            };
            return (x, top + to_i32(row));
        }
    }
    let row = lines.len().saturating_sub(1);
    let x = lines
        .last()
        .map_or(0, |line| lefts[row] + to_i32(line.width));
    (x, top + to_i32(row))
}

fn paint_grid(buf: &mut FrameBuffer, surface: &Surface, grid: &Grid, effective: ColorPair) {
    for y in 0..grid.size.h {
        for x in 0..grid.size.w {
            let Some(i) = grid.index(x, y) else {
                continue;
            };
            let cell = grid.cells[i];
            let (fg, bg) = cell.color.over(effective).cell_colors();
            surface.put(buf, x, y, cell.symbol, fg, bg);
        }
    }
}
