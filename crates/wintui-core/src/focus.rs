//! Focus, key dispatch and tab order.
//!
//! One window and one menu are active at a time. A key goes to the active
//! window's `key` hook, then up through its containers, then to the active
//! menu, then to the toolkit hook. The first hook to return `true` ends
//! the walk. Unhandled Ctrl-C stops the toolkit.
//!
//! Tab order is the pre-order of visible windows in the active scope: the
//! active window's menu, or the menu-independent windows. Containers are
//! stops like any other window.

use tracing::debug;
use wintui_term::input::KeyEvent;

use crate::error::Result;
use crate::tui::Tui;
use crate::window::{MenuId, Parent, WindowId};

impl Tui {
    #[inline]
    #[must_use]
    pub const fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    #[inline]
    #[must_use]
    pub const fn active_menu(&self) -> Option<MenuId> {
        self.active_menu
    }

    /// Focus a window.
    ///
    /// The previous window's `exit` hook runs first, then the new window
    /// becomes active and its `enter` hook runs; `enter` may pass focus on
    /// by activating another window. The menu of whichever window ends up
    /// active becomes the active menu.
    ///
    /// # Errors
    ///
    /// [`Error::StaleWindow`](crate::Error::StaleWindow) if `id` is gone.
    pub fn set_active_window(&mut self, id: WindowId) -> Result<()> {
        self.node(id)?;
        if self.active_window == Some(id) {
            return Ok(());
        }
        debug!(from = ?self.active_window, to = %id, "focus");

        if let Some(old) = self.active_window {
            let exit = self.windows.get(old.0).and_then(|n| n.hooks.exit);
            if let Some(exit) = exit {
                exit(self, old);
            }
        }
        self.active_window = Some(id);
        let enter = self.windows.get(id.0).and_then(|n| n.hooks.enter);
        if let Some(enter) = enter {
            enter(self, id);
        }

        let menu = self.active_window.and_then(|w| self.menu_of(w));
        if let Some(menu) = menu {
            if self.active_menu != Some(menu) {
                self.switch_menu(menu);
            }
        }
        Ok(())
    }

    /// Drop focus, running the active window's `exit` hook.
    pub fn clear_active_window(&mut self) {
        if let Some(old) = self.active_window.take() {
            debug!(from = %old, "focus cleared");
            let exit = self.windows.get(old.0).and_then(|n| n.hooks.exit);
            if let Some(exit) = exit {
                exit(self, old);
            }
        }
    }

    /// Show a menu. Unless the active window is already in it, its first
    /// visible window is focused.
    ///
    /// # Errors
    ///
    /// [`Error::StaleMenu`](crate::Error::StaleMenu) if `id` is gone, or an
    /// error from focusing its first window.
    pub fn set_active_menu(&mut self, id: MenuId) -> Result<()> {
        let windows = self.menu(id)?.windows.clone();
        if self.active_menu != Some(id) {
            self.switch_menu(id);
        }
        let inside = self.active_window.and_then(|w| self.menu_of(w)) == Some(id);
        if !inside {
            if let Some(&first) = self.preorder(&windows).first() {
                self.set_active_window(first)?;
            }
        }
        Ok(())
    }

    fn switch_menu(&mut self, id: MenuId) {
        debug!(from = ?self.active_menu, to = %id, "menu");
        if let Some(old) = self.active_menu {
            let exit = self.menus.get(old.0).and_then(|m| m.hooks.exit);
            if let Some(exit) = exit {
                exit(self, old);
            }
        }
        self.active_menu = Some(id);
        let enter = self.menus.get(id.0).and_then(|m| m.hooks.enter);
        if let Some(enter) = enter {
            enter(self, id);
        }
    }

    /// Route a key through the focus chain. Returns `true` if something
    /// handled it.
    pub fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        let mut current = self.active_window;
        while let Some(id) = current {
            let Some(node) = self.windows.get(id.0) else {
                break;
            };
            let (hook, parent) = (node.hooks.key, node.parent);
            if let Some(hook) = hook {
                if hook(self, id, key) {
                    return true;
                }
            }
            current = match parent {
                Parent::Window(p) => Some(p),
                Parent::Menu(_) | Parent::Root => None,
            };
        }

        if let Some(menu) = self.active_menu {
            let hook = self.menus.get(menu.0).and_then(|m| m.hooks.key);
            if let Some(hook) = hook {
                if hook(self, menu, key) {
                    return true;
                }
            }
        }

        if let Some(hook) = self.key {
            if hook(self, key) {
                return true;
            }
        }

        if key == KeyEvent::ctrl('c') {
            self.stop();
            return true;
        }
        false
    }

    /// Focus the next window in tab order. Returns `true` if focus moved.
    pub fn tab_forward(&mut self) -> bool {
        self.tab(true)
    }

    /// Focus the previous window in tab order. Returns `true` if focus
    /// moved.
    pub fn tab_backward(&mut self) -> bool {
        self.tab(false)
    }

    /// Visible windows of the active scope, in tab order.
    #[must_use]
    pub fn tab_order(&self) -> Vec<WindowId> {
        let menu = match self.active_window {
            Some(w) => self.menu_of(w),
            None => self.active_menu,
        };
        let roots = menu.map_or_else(|| self.root.clone(), |m| self.menu_windows(m).to_vec());
        self.preorder(&roots)
    }

    fn tab(&mut self, forward: bool) -> bool {
        let order = self.tab_order();
        let n = order.len();
        if n == 0 {
            return false;
        }
        let at = self
            .active_window
            .and_then(|a| order.iter().position(|&w| w == a));
        let next = match (at, forward) {
            (Some(i), true) => order[(i + 1) % n],
            (Some(i), false) => order[(i + n - 1) % n],
            (None, true) => order[0],
            (None, false) => order[n - 1],
        };
        if self.active_window == Some(next) {
            return false;
        }
        self.set_active_window(next).is_ok()
    }
}
