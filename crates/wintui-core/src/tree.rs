//! Building, tearing down and querying the window tree.

use std::any::Any;

use tracing::debug;

use crate::color::ColorPair;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::tui::{Menu, Tui};
use crate::window::{
    Container, ContainerConfig, Grid, GridCell, GridConfig, Kind, MenuConfig, MenuId, Node,
    Parent, Text, TextConfig, WindowConfig, WindowHook, WindowId,
};

/// Where a path search currently stands.
#[derive(Clone, Copy)]
enum Scope {
    Window(WindowId),
    Menu(MenuId),
    Root,
}

impl Tui {
    // ── menus ──

    pub fn create_menu(&mut self, config: MenuConfig) -> MenuId {
        let id = MenuId(self.menus.insert(Menu {
            name: config.name,
            color: config.color,
            hooks: config.hooks,
            windows: Vec::new(),
        }));
        self.menu_order.push(id);
        debug!(menu = %id, "created menu");
        id
    }

    /// Delete a menu and every window in it.
    ///
    /// # Errors
    ///
    /// [`Error::StaleMenu`] if the menu is already gone.
    pub fn delete_menu(&mut self, id: MenuId) -> Result<()> {
        let windows = self.menu(id)?.windows.clone();
        for window in windows {
            if self.contains(window) {
                self.delete_window(window)?;
            }
        }
        self.menus.remove(id.0);
        self.menu_order.retain(|&m| m != id);
        if self.active_menu == Some(id) {
            self.active_menu = None;
        }
        debug!(menu = %id, "deleted menu");
        Ok(())
    }

    /// First menu with this name.
    #[must_use]
    pub fn find_menu(&self, name: &str) -> Option<MenuId> {
        self.menu_order
            .iter()
            .copied()
            .find(|&m| self.menus.get(m.0).is_some_and(|menu| menu.name == name))
    }

    #[must_use]
    pub fn menu_name(&self, id: MenuId) -> Option<&str> {
        self.menus.get(id.0).map(|m| m.name.as_str())
    }

    /// Top-level windows of a menu in creation order.
    #[must_use]
    pub fn menu_windows(&self, id: MenuId) -> &[WindowId] {
        self.menus.get(id.0).map_or(&[], |m| m.windows.as_slice())
    }

    /// # Errors
    ///
    /// [`Error::StaleMenu`] if the menu is gone.
    pub fn set_menu_color(&mut self, id: MenuId, color: ColorPair) -> Result<()> {
        self.menus
            .get_mut(id.0)
            .ok_or(Error::StaleMenu(id))?
            .color = color;
        Ok(())
    }

    pub(crate) fn menu(&self, id: MenuId) -> Result<&Menu> {
        self.menus.get(id.0).ok_or(Error::StaleMenu(id))
    }

    // ── creation ──

    /// Create a container and run its `init` hook.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is stale or not a container.
    pub fn create_container(
        &mut self,
        parent: impl Into<Parent>,
        config: ContainerConfig,
    ) -> Result<WindowId> {
        let kind = Kind::Container(Container {
            children: Vec::new(),
            axis: config.axis,
            inflate: config.inflate,
            border: config.border,
            padding: config.padding,
            align: config.align,
            pos: config.pos,
        });
        self.attach(parent.into(), config.window, kind)
    }

    /// Create a text pane and run its `init` hook.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is stale or not a container.
    pub fn create_text(&mut self, parent: impl Into<Parent>, config: TextConfig) -> Result<WindowId> {
        let mut text = Text {
            string: String::new(),
            plain: String::new(),
            secret: config.secret,
            align: config.align,
            pos: config.pos,
        };
        text.set(config.string);
        self.attach(parent.into(), config.window, Kind::Text(text))
    }

    /// Create a cell grid and run its `init` hook.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is stale or not a container.
    pub fn create_grid(&mut self, parent: impl Into<Parent>, config: GridConfig) -> Result<WindowId> {
        self.attach(parent.into(), config.window, Kind::Grid(Grid::new(config.size)))
    }

    fn attach(&mut self, parent: Parent, config: WindowConfig, kind: Kind) -> Result<WindowId> {
        let menu = match parent {
            Parent::Root => None,
            Parent::Menu(m) => {
                self.menu(m)?;
                Some(m)
            }
            Parent::Window(p) => {
                let node = self.node(p)?;
                if !matches!(node.kind, Kind::Container(_)) {
                    return Err(Error::NotAContainer(p));
                }
                node.menu
            }
        };

        let init = config.hooks.init;
        let id = WindowId(self.windows.insert(Node::new(config, parent, menu, kind)));
        match parent {
            Parent::Root => self.root.push(id),
            Parent::Menu(m) => {
                if let Some(menu) = self.menus.get_mut(m.0) {
                    menu.windows.push(id);
                }
            }
            Parent::Window(p) => {
                if let Some(Node {
                    kind: Kind::Container(c),
                    ..
                }) = self.windows.get_mut(p.0)
                {
                    c.children.push(id);
                }
            }
        }
        debug!(window = %id, name = self.name(id).unwrap_or(""), ?parent, "created window");

        if let Some(init) = init {
            init(self, id);
        }
        Ok(id)
    }

    // ── deletion ──

    /// Delete a window and everything under it.
    ///
    /// Children go first, depth-first. Each window's `free` hook runs while
    /// its payload is still there, then it is unlinked. Deleting the active
    /// window leaves no window active.
    ///
    /// # Errors
    ///
    /// [`Error::StaleWindow`] if the window is already gone.
    pub fn delete_window(&mut self, id: WindowId) -> Result<()> {
        let children = self.node(id)?.children().to_vec();
        for child in children {
            if self.contains(child) {
                self.delete_window(child)?;
            }
        }

        let free = self.node_mut(id)?.hooks.free.take();
        if let Some(free) = free {
            free(self, id);
        }

        let Some(node) = self.windows.remove(id.0) else {
            return Ok(());
        };
        match node.parent {
            Parent::Root => self.root.retain(|&w| w != id),
            Parent::Menu(m) => {
                if let Some(menu) = self.menus.get_mut(m.0) {
                    menu.windows.retain(|&w| w != id);
                }
            }
            Parent::Window(p) => {
                if let Some(Node {
                    kind: Kind::Container(c),
                    ..
                }) = self.windows.get_mut(p.0)
                {
                    c.children.retain(|&w| w != id);
                }
            }
        }
        if self.active_window == Some(id) {
            self.active_window = None;
        }
        debug!(window = %id, name = %node.name, "deleted window");
        Ok(())
    }

    // ── lookup ──

    #[must_use]
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(id.0)
    }

    pub(crate) fn node(&self, id: WindowId) -> Result<&Node> {
        self.windows.get(id.0).ok_or(Error::StaleWindow(id))
    }

    pub(crate) fn node_mut(&mut self, id: WindowId) -> Result<&mut Node> {
        self.windows.get_mut(id.0).ok_or(Error::StaleWindow(id))
    }

    /// Follow a space-separated path of names from `from`.
    ///
    /// `.` steps out to the enclosing container, or to the menu (or root)
    /// holding a top-level window. Any other token picks the first child of
    /// that name. Stepping out past a menu or the root, a missing name, or
    /// a path that ends outside any window all give `None`.
    ///
    /// ```
    /// use wintui_core::{ContainerConfig, TextConfig, Tui, WindowConfig};
    ///
    /// let mut tui = Tui::default();
    /// let named = |name: &str| WindowConfig { name: name.into(), ..Default::default() };
    /// let top = tui.create_container(wintui_core::Parent::Root, ContainerConfig {
    ///     window: named("top"),
    ///     ..Default::default()
    /// })?;
    /// let left = tui.create_container(top, ContainerConfig { window: named("left"), ..Default::default() })?;
    /// let leaf = tui.create_text(left, TextConfig { window: named("leaf"), ..Default::default() })?;
    /// let right = tui.create_text(top, TextConfig { window: named("right"), ..Default::default() })?;
    ///
    /// assert_eq!(tui.find(leaf, ". . right"), Some(right));
    /// assert_eq!(tui.find(top, ". ."), None);
    /// # Ok::<(), wintui_core::Error>(())
    /// ```
    #[must_use]
    pub fn find(&self, from: WindowId, path: &str) -> Option<WindowId> {
        self.node(from).ok()?;
        let mut at = Scope::Window(from);
        for token in path.split_whitespace() {
            at = if token == "." {
                match at {
                    Scope::Window(w) => match self.node(w).ok()?.parent {
                        Parent::Window(p) => Scope::Window(p),
                        Parent::Menu(m) => Scope::Menu(m),
                        Parent::Root => Scope::Root,
                    },
                    Scope::Menu(_) | Scope::Root => return None,
                }
            } else {
                let candidates = match at {
                    Scope::Window(w) => self.children(w),
                    Scope::Menu(m) => self.menu_windows(m),
                    Scope::Root => &self.root,
                };
                let found = candidates
                    .iter()
                    .copied()
                    .find(|&c| self.name(c) == Some(token))?;
                Scope::Window(found)
            };
        }
        match at {
            Scope::Window(w) => Some(w),
            Scope::Menu(_) | Scope::Root => None,
        }
    }

    /// Visible windows under `roots` in pre-order. Hidden windows hide
    /// their whole subtree.
    pub(crate) fn preorder(&self, roots: &[WindowId]) -> Vec<WindowId> {
        let mut out = Vec::new();
        for &root in roots {
            self.collect_visible(root, &mut out);
        }
        out
    }

    fn collect_visible(&self, id: WindowId, out: &mut Vec<WindowId>) {
        let Some(node) = self.windows.get(id.0) else {
            return;
        };
        if node.hidden {
            return;
        }
        out.push(id);
        for &child in node.children() {
            self.collect_visible(child, out);
        }
    }

    // ── window properties ──

    #[must_use]
    pub fn name(&self, id: WindowId) -> Option<&str> {
        self.windows.get(id.0).map(|n| n.name.as_str())
    }

    #[must_use]
    pub fn parent(&self, id: WindowId) -> Option<Parent> {
        self.windows.get(id.0).map(|n| n.parent)
    }

    /// Menu the window belongs to, `None` for menu-independent windows.
    #[must_use]
    pub fn menu_of(&self, id: WindowId) -> Option<MenuId> {
        self.windows.get(id.0).and_then(|n| n.menu)
    }

    /// Children in creation order; empty for non-containers.
    #[must_use]
    pub fn children(&self, id: WindowId) -> &[WindowId] {
        self.windows.get(id.0).map_or(&[], Node::children)
    }

    /// Rect from the last layout pass.
    #[must_use]
    pub fn rect(&self, id: WindowId) -> Option<Rect> {
        self.windows.get(id.0).map(|n| n.rect)
    }

    /// Intrinsic size from the last layout pass.
    #[must_use]
    pub fn intrinsic_size(&self, id: WindowId) -> Option<Size> {
        self.windows.get(id.0).map(|n| n.size)
    }

    #[must_use]
    pub fn is_hidden(&self, id: WindowId) -> bool {
        self.windows.get(id.0).is_some_and(|n| n.hidden)
    }

    /// # Errors
    ///
    /// [`Error::StaleWindow`] if the window is gone.
    pub fn set_hidden(&mut self, id: WindowId, hidden: bool) -> Result<()> {
        self.node_mut(id)?.hidden = hidden;
        Ok(())
    }

    #[must_use]
    pub fn color(&self, id: WindowId) -> Option<ColorPair> {
        self.windows.get(id.0).map(|n| n.color)
    }

    /// Colour after inheritance, as of the last paint.
    #[must_use]
    pub fn effective_color(&self, id: WindowId) -> Option<ColorPair> {
        self.windows.get(id.0).map(|n| n.effective)
    }

    /// # Errors
    ///
    /// [`Error::StaleWindow`] if the window is gone.
    pub fn set_color(&mut self, id: WindowId, color: ColorPair) -> Result<()> {
        self.node_mut(id)?.color = color;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if the window is gone or not a container.
    pub fn set_border_color(&mut self, id: WindowId, color: ColorPair) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            Kind::Container(c) => {
                c.border.color = color;
                Ok(())
            }
            Kind::Text(_) | Kind::Grid(_) => Err(Error::NotAContainer(id)),
        }
    }

    /// # Errors
    ///
    /// [`Error::StaleWindow`] if the window is gone.
    pub fn set_render_hook(&mut self, id: WindowId, hook: Option<WindowHook>) -> Result<()> {
        self.node_mut(id)?.hooks.render = hook;
        Ok(())
    }

    // ── text ──

    /// Replace a text pane's display string.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or not a text pane.
    pub fn set_text(&mut self, id: WindowId, string: impl Into<String>) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            Kind::Text(text) => {
                text.set(string.into());
                Ok(())
            }
            Kind::Container(_) | Kind::Grid(_) => Err(Error::NotAText(id)),
        }
    }

    /// Display string of a text pane, directives included.
    #[must_use]
    pub fn text(&self, id: WindowId) -> Option<&str> {
        match &self.windows.get(id.0)?.kind {
            Kind::Text(text) => Some(&text.string),
            Kind::Container(_) | Kind::Grid(_) => None,
        }
    }

    /// Text of a text pane with directives removed.
    #[must_use]
    pub fn plain_text(&self, id: WindowId) -> Option<&str> {
        match &self.windows.get(id.0)?.kind {
            Kind::Text(text) => Some(&text.plain),
            Kind::Container(_) | Kind::Grid(_) => None,
        }
    }

    // ── grids ──

    fn grid_mut(&mut self, id: WindowId) -> Result<&mut Grid> {
        match &mut self.node_mut(id)?.kind {
            Kind::Grid(grid) => Ok(grid),
            Kind::Container(_) | Kind::Text(_) => Err(Error::NotAGrid(id)),
        }
    }

    #[must_use]
    pub fn grid_size(&self, id: WindowId) -> Option<Size> {
        match &self.windows.get(id.0)?.kind {
            Kind::Grid(grid) => Some(grid.size),
            Kind::Container(_) | Kind::Text(_) => None,
        }
    }

    /// Resize a grid, blanking every cell. A no-op when the size is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or not a grid.
    pub fn grid_resize(&mut self, id: WindowId, size: Size) -> Result<()> {
        let grid = self.grid_mut(id)?;
        if grid.size != size {
            *grid = Grid::new(size);
        }
        Ok(())
    }

    /// Blank every cell.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or not a grid.
    pub fn grid_clear(&mut self, id: WindowId) -> Result<()> {
        self.grid_mut(id)?.cells.fill(GridCell::BLANK);
        Ok(())
    }

    #[must_use]
    pub fn grid_cell(&self, id: WindowId, x: i32, y: i32) -> Option<GridCell> {
        match &self.windows.get(id.0)?.kind {
            Kind::Grid(grid) => grid.index(x, y).map(|i| grid.cells[i]),
            Kind::Container(_) | Kind::Text(_) => None,
        }
    }

    pub fn grid_cell_mut(&mut self, id: WindowId, x: i32, y: i32) -> Option<&mut GridCell> {
        let grid = self.grid_mut(id).ok()?;
        let i = grid.index(x, y)?;
        grid.cells.get_mut(i)
    }

    /// Set one cell. Returns `false` when `(x, y)` is outside the grid.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or not a grid.
    pub fn grid_set(&mut self, id: WindowId, x: i32, y: i32, cell: GridCell) -> Result<bool> {
        let grid = self.grid_mut(id)?;
        Ok(grid.index(x, y).is_some_and(|i| {
            grid.cells[i] = cell;
            true
        }))
    }

    // ── payload ──

    /// The window's payload if it is a `T`.
    #[must_use]
    pub fn payload<T: Any>(&self, id: WindowId) -> Option<&T> {
        self.windows.get(id.0)?.payload.as_ref()?.downcast_ref()
    }

    pub fn payload_mut<T: Any>(&mut self, id: WindowId) -> Option<&mut T> {
        self.windows.get_mut(id.0)?.payload.as_mut()?.downcast_mut()
    }

    /// Replace the payload, returning the old one.
    ///
    /// # Errors
    ///
    /// [`Error::StaleWindow`] if the window is gone.
    pub fn set_payload(
        &mut self,
        id: WindowId,
        payload: Option<Box<dyn Any>>,
    ) -> Result<Option<Box<dyn Any>>> {
        Ok(std::mem::replace(&mut self.node_mut(id)?.payload, payload))
    }

    /// Run `f` with the payload taken out of the window, so `f` can use the
    /// toolkit and the payload together. The payload is put back afterwards
    /// if the window still exists.
    ///
    /// Returns `None` if the window is gone or its payload is not a `T`.
    pub fn with_payload<T: Any, R>(
        &mut self,
        id: WindowId,
        f: impl FnOnce(&mut Self, &mut T) -> R,
    ) -> Option<R> {
        let mut boxed = self.windows.get_mut(id.0)?.payload.take()?;
        let result = boxed.downcast_mut::<T>().map(|payload| f(self, payload));
        if let Some(node) = self.windows.get_mut(id.0) {
            if node.payload.is_none() {
                node.payload = Some(boxed);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Hooks;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    thread_local! {
        static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn log_free(tui: &mut Tui, id: WindowId) {
        let name = tui.name(id).unwrap_or("?").to_string();
        LOG.with(|l| l.borrow_mut().push(name));
    }

    fn take_log() -> Vec<String> {
        LOG.with(|l| std::mem::take(&mut *l.borrow_mut()))
    }

    fn named(name: &str) -> WindowConfig {
        WindowConfig {
            name: name.into(),
            hooks: Hooks {
                free: Some(log_free),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn container(tui: &mut Tui, parent: impl Into<Parent>, name: &str) -> WindowId {
        tui.create_container(
            parent,
            ContainerConfig {
                window: named(name),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn text(tui: &mut Tui, parent: impl Into<Parent>, name: &str) -> WindowId {
        tui.create_text(
            parent,
            TextConfig {
                window: named(name),
                string: name.into(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    // ── creation ──

    #[test]
    fn children_keep_creation_order() {
        let mut tui = Tui::default();
        let top = container(&mut tui, Parent::Root, "top");
        let a = text(&mut tui, top, "a");
        let b = text(&mut tui, top, "b");
        assert_eq!(tui.children(top), &[a, b]);
        assert_eq!(tui.parent(a), Some(Parent::Window(top)));
        assert_eq!(tui.parent(top), Some(Parent::Root));
    }

    #[test]
    fn children_inherit_menu() {
        let mut tui = Tui::default();
        let menu = tui.create_menu(MenuConfig {
            name: "main".into(),
            ..Default::default()
        });
        let top = container(&mut tui, menu, "top");
        let leaf = text(&mut tui, top, "leaf");
        assert_eq!(tui.menu_of(leaf), Some(menu));
        assert_eq!(tui.menu_windows(menu), &[top]);
        assert_eq!(tui.find_menu("main"), Some(menu));
        assert_eq!(tui.find_menu("other"), None);
    }

    #[test]
    fn text_parent_is_rejected() {
        let mut tui = Tui::default();
        let leaf = text(&mut tui, Parent::Root, "leaf");
        let err = tui.create_text(leaf, TextConfig::default()).unwrap_err();
        assert_eq!(err, Error::NotAContainer(leaf));
    }

    #[test]
    fn init_hook_runs_on_creation() {
        fn add_child(tui: &mut Tui, id: WindowId) {
            tui.create_text(id, TextConfig::default()).unwrap();
        }
        let mut tui = Tui::default();
        let top = tui
            .create_container(
                Parent::Root,
                ContainerConfig {
                    window: WindowConfig {
                        hooks: Hooks {
                            init: Some(add_child),
                            ..Default::default()
                        },
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(tui.children(top).len(), 1);
    }

    // ── deletion ──

    #[test]
    fn delete_is_depth_first_and_unlinks() {
        let mut tui = Tui::default();
        take_log();
        let top = container(&mut tui, Parent::Root, "top");
        let mid = container(&mut tui, top, "mid");
        text(&mut tui, mid, "leaf");
        let keep = text(&mut tui, top, "keep");

        tui.delete_window(mid).unwrap();
        assert_eq!(take_log(), vec!["leaf", "mid"]);
        assert_eq!(tui.children(top), &[keep]);
        assert!(!tui.contains(mid));
        assert_eq!(tui.delete_window(mid), Err(Error::StaleWindow(mid)));

        tui.delete_window(top).unwrap();
        assert_eq!(take_log(), vec!["keep", "top"]);
        assert_eq!(tui.window_count(), 0);
    }

    #[test]
    fn reused_slot_rejects_old_handle() {
        let mut tui = Tui::default();
        let old = text(&mut tui, Parent::Root, "old");
        tui.delete_window(old).unwrap();
        let new = text(&mut tui, Parent::Root, "new");
        assert_ne!(old, new);
        assert!(!tui.contains(old));
        assert_eq!(tui.name(old), None);
        assert_eq!(tui.name(new), Some("new"));
        assert_eq!(tui.delete_window(old), Err(Error::StaleWindow(old)));
        take_log();
    }

    #[test]
    fn deleting_active_window_clears_focus() {
        let mut tui = Tui::default();
        let leaf = text(&mut tui, Parent::Root, "leaf");
        tui.set_active_window(leaf).unwrap();
        tui.delete_window(leaf).unwrap();
        assert_eq!(tui.active_window(), None);
        take_log();
    }

    #[test]
    fn delete_menu_frees_its_windows() {
        let mut tui = Tui::default();
        take_log();
        let menu = tui.create_menu(MenuConfig::default());
        let top = container(&mut tui, menu, "top");
        text(&mut tui, top, "leaf");
        tui.delete_menu(menu).unwrap();
        assert_eq!(take_log(), vec!["leaf", "top"]);
        assert_eq!(tui.window_count(), 0);
        assert_eq!(tui.delete_menu(menu), Err(Error::StaleMenu(menu)));
    }

    // ── path search ──

    fn stock_tree(tui: &mut Tui) -> (WindowId, WindowId, WindowId, WindowId) {
        let menu = tui.create_menu(MenuConfig::default());
        let root = container(tui, menu, "root");
        let stocks = container(tui, root, "stocks");
        let search = text(tui, stocks, "search");
        let stock = container(tui, root, "stock");
        (root, stocks, search, stock)
    }

    #[test]
    fn find_steps_out_then_in() {
        let mut tui = Tui::default();
        let (root, stocks, search, stock) = stock_tree(&mut tui);
        assert_eq!(tui.find(search, ". . stock"), Some(stock));
        assert_eq!(tui.find(search, "."), Some(stocks));
        assert_eq!(tui.find(root, "stocks search"), Some(search));
        assert_eq!(tui.find(search, ""), Some(search));
        take_log();
    }

    #[test]
    fn find_past_the_top_is_none() {
        let mut tui = Tui::default();
        let (root, _, search, _) = stock_tree(&mut tui);
        assert_eq!(tui.find(root, ". ."), None);
        assert_eq!(tui.find(root, "."), None);
        assert_eq!(tui.find(search, ". . . root"), Some(root));
        assert_eq!(tui.find(search, "missing"), None);
        take_log();
    }

    #[test]
    fn find_from_root_window_searches_root_list() {
        let mut tui = Tui::default();
        let a = text(&mut tui, Parent::Root, "a");
        let b = text(&mut tui, Parent::Root, "b");
        assert_eq!(tui.find(a, ". b"), Some(b));
        take_log();
    }

    // ── properties ──

    #[test]
    fn set_text_rederives_plain() {
        let mut tui = Tui::default();
        let leaf = text(&mut tui, Parent::Root, "leaf");
        tui.set_text(leaf, format!("a{}b", crate::markup::CURSOR)).unwrap();
        assert_eq!(tui.plain_text(leaf), Some("ab"));
        assert_eq!(tui.text(leaf), Some("a\x1bcb"));
        let top = container(&mut tui, Parent::Root, "top");
        assert_eq!(tui.set_text(top, "x"), Err(Error::NotAText(top)));
        take_log();
    }

    #[test]
    fn grid_cells() {
        let mut tui = Tui::default();
        let grid = tui
            .create_grid(
                Parent::Root,
                GridConfig {
                    size: Size::new(3, 2),
                    ..Default::default()
                },
            )
            .unwrap();
        let x = GridCell::new('x', ColorPair::NONE);
        assert_eq!(tui.grid_set(grid, 2, 1, x), Ok(true));
        assert_eq!(tui.grid_set(grid, 3, 1, x), Ok(false));
        assert_eq!(tui.grid_cell(grid, 2, 1), Some(x));
        if let Some(cell) = tui.grid_cell_mut(grid, 0, 0) {
            cell.symbol = 'o';
        }
        assert_eq!(tui.grid_cell(grid, 0, 0).map(|c| c.symbol), Some('o'));
        tui.grid_resize(grid, Size::new(4, 4)).unwrap();
        assert_eq!(tui.grid_size(grid), Some(Size::new(4, 4)));
        assert_eq!(tui.grid_cell(grid, 2, 1), Some(GridCell::BLANK));
    }

    #[test]
    fn payload_access() {
        let mut tui = Tui::default();
        let leaf = tui
            .create_text(
                Parent::Root,
                TextConfig {
                    window: WindowConfig {
                        payload: Some(Box::new(41_u32)),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(tui.payload::<u32>(leaf), Some(&41));
        assert_eq!(tui.payload::<String>(leaf), None);
        if let Some(n) = tui.payload_mut::<u32>(leaf) {
            *n += 1;
        }
        let doubled = tui.with_payload(leaf, |tui: &mut Tui, n: &mut u32| {
            assert!(tui.payload::<u32>(leaf).is_none());
            *n * 2
        });
        assert_eq!(doubled, Some(84));
        assert_eq!(tui.payload::<u32>(leaf), Some(&42));
    }
}
