//! The toolkit value.
//!
//! [`Tui`] owns every window and menu, the focus state and the base
//! colour. There is no global state: hooks receive `&mut Tui` and do all
//! their work through it.
//!
//! A frame is driven by [`Tui::frame`]: update hooks, then the size pass,
//! the rect pass and painting into the frame buffer. [`Tui::run`] hands the
//! toolkit to the terminal event loop, which paints a frame, blocks for a
//! key, dispatches it and repeats until [`Tui::stop`] is called.

use std::io;

use slotmap::SlotMap;
use tracing::debug;
use wintui_term::buffer::FrameBuffer;
use wintui_term::event_loop::{Action, App, EventLoop, LoopConfig};
use wintui_term::input::KeyEvent;
use wintui_term::terminal::Size as TermSize;

use crate::color::ColorPair;
use crate::geometry::Size;
use crate::window::{MenuHooks, MenuId, MenuKey, Node, TuiKeyHook, WindowId, WindowKey};

/// A named set of top-level windows. Only the active menu is drawn.
pub(crate) struct Menu {
    pub name: String,
    pub color: ColorPair,
    pub hooks: MenuHooks,
    pub windows: Vec<WindowId>,
}

/// Toolkit-wide settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiConfig {
    /// Base colour every window inherits from.
    pub color: ColorPair,
    /// Last stop for keys nothing else handled.
    pub key: Option<TuiKeyHook>,
}

pub struct Tui {
    pub(crate) windows: SlotMap<WindowKey, Node>,
    pub(crate) menus: SlotMap<MenuKey, Menu>,
    pub(crate) menu_order: Vec<MenuId>,
    pub(crate) root: Vec<WindowId>,
    pub(crate) active_window: Option<WindowId>,
    pub(crate) active_menu: Option<MenuId>,
    pub(crate) color: ColorPair,
    pub(crate) key: Option<TuiKeyHook>,
    pub(crate) screen: Size,
    pub(crate) cursor: Option<(i32, i32)>,
    running: bool,
}

impl Tui {
    /// An empty toolkit. The screen size is taken from the frame buffer
    /// on every frame; until then it is 80×24.
    #[must_use]
    pub fn new(config: TuiConfig) -> Self {
        Self {
            windows: SlotMap::with_key(),
            menus: SlotMap::with_key(),
            menu_order: Vec::new(),
            root: Vec::new(),
            active_window: None,
            active_menu: None,
            color: config.color,
            key: config.key,
            screen: Size::new(80, 24),
            cursor: None,
            running: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Leave [`run`](Self::run) after the current key.
    pub fn stop(&mut self) {
        debug!("stop requested");
        self.running = false;
    }

    #[inline]
    #[must_use]
    pub const fn screen_size(&self) -> Size {
        self.screen
    }

    pub const fn set_screen_size(&mut self, size: Size) {
        self.screen = size;
    }

    #[inline]
    #[must_use]
    pub const fn base_color(&self) -> ColorPair {
        self.color
    }

    pub const fn set_base_color(&mut self, color: ColorPair) {
        self.color = color;
    }

    /// Number of live windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Show the terminal cursor at a screen position this frame.
    ///
    /// Meant for render hooks; the position is forgotten when the next
    /// frame starts.
    pub const fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Some((x, y));
    }

    /// Cursor position for this frame, if it is on screen.
    #[must_use]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        let (x, y) = self.cursor?;
        if x >= self.screen.w || y >= self.screen.h {
            return None;
        }
        Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
    }

    /// Update, lay out and paint one frame into `buf`.
    pub fn frame(&mut self, buf: &mut FrameBuffer) {
        self.screen = Size::new(i32::from(buf.width()), i32::from(buf.height()));
        self.run_update_hooks();
        self.layout();
        self.paint(buf);
    }

    /// Top-level windows of the active menu, then the menu-independent ones.
    pub(crate) fn scope_roots(&self) -> Vec<WindowId> {
        let mut roots = self
            .active_menu
            .and_then(|m| self.menus.get(m.0))
            .map(|m| m.windows.clone())
            .unwrap_or_default();
        roots.extend_from_slice(&self.root);
        roots
    }

    fn run_update_hooks(&mut self) {
        let order = self.preorder(&self.scope_roots());
        for id in order {
            let hook = self.windows.get(id.0).and_then(|n| n.hooks.update);
            if let Some(update) = hook {
                update(self, id);
            }
        }
    }

    /// Run in the terminal until stopped or stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or written.
    pub fn run(&mut self) -> io::Result<()> {
        self.run_with(LoopConfig::default())
    }

    /// [`run`](Self::run) with explicit event loop settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or written.
    pub fn run_with(&mut self, config: LoopConfig) -> io::Result<()> {
        self.running = true;
        let mut event_loop = EventLoop::with_config(config);
        let size = event_loop.size();
        self.screen = Size::new(i32::from(size.cols), i32::from(size.rows));
        event_loop.run(self)
    }

    fn teardown(&mut self) {
        for menu in self.menu_order.clone() {
            let _ = self.delete_menu(menu);
        }
        for id in self.root.clone() {
            let _ = self.delete_window(id);
        }
    }
}

impl App for Tui {
    fn on_key(&mut self, key: KeyEvent) -> Action {
        self.dispatch_key(key);
        if self.running {
            Action::Continue
        } else {
            Action::Quit
        }
    }

    fn on_resize(&mut self, size: TermSize) {
        self.screen = Size::new(i32::from(size.cols), i32::from(size.rows));
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        self.frame(buf);
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        Self::cursor(self)
    }
}

impl Default for Tui {
    fn default() -> Self {
        Self::new(TuiConfig::default())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.teardown();
    }
}
