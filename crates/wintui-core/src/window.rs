//! Window handles, configuration records and hooks.
//!
//! Windows come in three kinds: containers lay out children, text panes
//! show wrapped strings, grids show a 2-D array of cells. Each is created
//! from a config record whose common fields live in [`WindowConfig`]:
//!
//! ```
//! use wintui_core::{Axis, Border, ContainerConfig, WindowConfig};
//!
//! let config = ContainerConfig {
//!     window: WindowConfig {
//!         name: "list".into(),
//!         grow_h: true,
//!         ..Default::default()
//!     },
//!     axis: Axis::Vertical,
//!     border: Border::plain(),
//!     ..Default::default()
//! };
//! assert!(config.border.active);
//! ```
//!
//! Hooks are plain function pointers taking the toolkit itself, so a hook
//! can create, delete, find and focus windows. Per-window state lives in
//! the payload.

use std::any::Any;
use std::fmt;

use slotmap::{Key, new_key_type};
use wintui_term::input::KeyEvent;

use crate::color::ColorPair;
use crate::geometry::{Align, Axis, Pos, Rect, Size};
use crate::tui::Tui;

// ─── Handles ─────────────────────────────────────────────────────────────────

new_key_type! {
    pub(crate) struct WindowKey;
    pub(crate) struct MenuKey;
}

/// Handle to a window. Stays valid until the window is deleted; after that
/// every lookup with it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) WindowKey);

/// Handle to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) MenuKey);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{:?}", self.0.data())
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{:?}", self.0.data())
    }
}

/// Where a window hangs: inside a container, directly in a menu, or at
/// the toolkit root independent of menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Menu(MenuId),
    Window(WindowId),
}

impl From<WindowId> for Parent {
    fn from(id: WindowId) -> Self {
        Self::Window(id)
    }
}

impl From<MenuId> for Parent {
    fn from(id: MenuId) -> Self {
        Self::Menu(id)
    }
}

// ─── Hooks ───────────────────────────────────────────────────────────────────

pub type WindowHook = fn(&mut Tui, WindowId);

/// Returns `true` when the key was handled.
pub type KeyHook = fn(&mut Tui, WindowId, KeyEvent) -> bool;

pub type MenuHook = fn(&mut Tui, MenuId);

pub type MenuKeyHook = fn(&mut Tui, MenuId, KeyEvent) -> bool;

pub type TuiKeyHook = fn(&mut Tui, KeyEvent) -> bool;

/// Window event hooks, all optional.
///
/// - `init` runs right after creation.
/// - `free` runs before deletion, after the children are gone.
/// - `enter` / `exit` run when the window gains / loses focus.
/// - `update` runs at the start of every frame.
/// - `render` runs just before the window is painted.
/// - `key` gets keys while the window or a descendant has focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hooks {
    pub init: Option<WindowHook>,
    pub free: Option<WindowHook>,
    pub enter: Option<WindowHook>,
    pub exit: Option<WindowHook>,
    pub update: Option<WindowHook>,
    pub render: Option<WindowHook>,
    pub key: Option<KeyHook>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuHooks {
    pub enter: Option<MenuHook>,
    pub exit: Option<MenuHook>,
    pub key: Option<MenuKeyHook>,
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Fields shared by every window kind.
#[derive(Default)]
pub struct WindowConfig {
    /// Name used by path search. Need not be unique.
    pub name: String,
    /// Fixed placement relative to the parent interior, bypassing the
    /// automatic layout. See [`Rect::resolve`].
    pub rect: Option<Rect>,
    pub grow_w: bool,
    pub grow_h: bool,
    pub color: ColorPair,
    pub hidden: bool,
    pub hooks: Hooks,
    pub payload: Option<Box<dyn Any>>,
}

impl fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowConfig")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("grow_w", &self.grow_w)
            .field("grow_h", &self.grow_h)
            .field("color", &self.color)
            .field("hidden", &self.hidden)
            .field("payload", &self.payload.is_some())
            .finish_non_exhaustive()
    }
}

/// Border flag and its colour, layered over the window's effective colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub active: bool,
    pub color: ColorPair,
}

impl Border {
    /// An active border in the window's own colour.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            active: true,
            color: ColorPair::NONE,
        }
    }

    #[must_use]
    pub const fn colored(color: ColorPair) -> Self {
        Self {
            active: true,
            color,
        }
    }
}

#[derive(Debug, Default)]
pub struct ContainerConfig {
    pub window: WindowConfig,
    pub axis: Axis,
    /// Stretch every auto child across the full cross axis.
    pub inflate: bool,
    pub border: Border,
    pub padding: bool,
    pub align: Align,
    pub pos: Pos,
}

#[derive(Debug, Default)]
pub struct TextConfig {
    pub window: WindowConfig,
    /// Display string, possibly with [`markup`](crate::markup) directives.
    pub string: String,
    /// Paint every character as `*`.
    pub secret: bool,
    pub align: Align,
    pub pos: Pos,
}

#[derive(Debug, Default)]
pub struct GridConfig {
    pub window: WindowConfig,
    pub size: Size,
}

#[derive(Debug, Default)]
pub struct MenuConfig {
    pub name: String,
    pub color: ColorPair,
    pub hooks: MenuHooks,
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// One grid cell. Transparent channels take the grid's effective colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub symbol: char,
    pub color: ColorPair,
}

impl GridCell {
    pub const BLANK: Self = Self {
        symbol: ' ',
        color: ColorPair::NONE,
    };

    #[must_use]
    pub const fn new(symbol: char, color: ColorPair) -> Self {
        Self { symbol, color }
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::BLANK
    }
}

pub(crate) struct Container {
    pub children: Vec<WindowId>,
    pub axis: Axis,
    pub inflate: bool,
    pub border: Border,
    pub padding: bool,
    pub align: Align,
    pub pos: Pos,
}

pub(crate) struct Text {
    pub string: String,
    pub plain: String,
    pub secret: bool,
    pub align: Align,
    pub pos: Pos,
}

impl Text {
    pub fn set(&mut self, string: String) {
        self.plain = crate::markup::strip(&string);
        self.string = string;
    }
}

pub(crate) struct Grid {
    pub size: Size,
    pub cells: Vec<GridCell>,
}

impl Grid {
    pub fn new(size: Size) -> Self {
        let size = Size::new(size.w.max(0), size.h.max(0));
        let len = usize::try_from(size.w * size.h).unwrap_or(0);
        Self {
            size,
            cells: vec![GridCell::BLANK; len],
        }
    }

    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return None;
        }
        usize::try_from(y * self.size.w + x).ok()
    }
}

pub(crate) enum Kind {
    Container(Container),
    Text(Text),
    Grid(Grid),
}

/// A window in the slot map.
pub(crate) struct Node {
    pub name: String,
    pub parent: Parent,
    /// Menu this window belongs to, inherited from its top-level ancestor.
    pub menu: Option<MenuId>,
    pub explicit: Option<Rect>,
    pub grow_w: bool,
    pub grow_h: bool,
    pub color: ColorPair,
    pub hidden: bool,
    pub hooks: Hooks,
    pub payload: Option<Box<dyn Any>>,
    pub kind: Kind,

    // Recomputed every frame.
    pub size: Size,
    pub rect: Rect,
    pub effective: ColorPair,
    pub surface: Option<wintui_term::surface::Surface>,
}

impl Node {
    pub fn new(config: WindowConfig, parent: Parent, menu: Option<MenuId>, kind: Kind) -> Self {
        Self {
            name: config.name,
            parent,
            menu,
            explicit: config.rect,
            grow_w: config.grow_w,
            grow_h: config.grow_h,
            color: config.color,
            hidden: config.hidden,
            hooks: config.hooks,
            payload: config.payload,
            kind,
            size: Size::ZERO,
            rect: Rect::default(),
            effective: ColorPair::NONE,
            surface: None,
        }
    }

    pub const fn grows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.grow_w,
            Axis::Vertical => self.grow_h,
        }
    }

    pub fn children(&self) -> &[WindowId] {
        match &self.kind {
            Kind::Container(c) => &c.children,
            Kind::Text(_) | Kind::Grid(_) => &[],
        }
    }
}
