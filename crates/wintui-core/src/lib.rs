//! # wintui-core: window toolkit core for wintui
//!
//! A tree of windows that sizes itself, paints into a
//! [`FrameBuffer`](wintui_term::buffer::FrameBuffer) and routes keys through
//! a focus chain:
//!
//! - **[`text`]**: greedy word wrap and the size metrics derived from it
//! - **[`markup`]**: inline colour and cursor directives in text panes
//! - **[`geometry`]**: rects, sizes, axes and alignment modes
//! - **[`color`]**: colour pairs with transparent channels
//! - **[`window`]**: handles, configuration records, hooks
//! - **[`tui`]**: the toolkit value owning every window and menu
//! - **[`layout`]**: the intrinsic-size and rect passes
//! - **[`input`]** / **[`list`]**: helpers applications keep in payloads
//!
//! Tree building, painting and focus handling are `impl Tui` blocks split
//! across `tree`, `paint` and `focus`.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod list;
pub mod markup;
pub mod text;
pub mod tui;
pub mod window;

mod focus;
mod paint;
mod tree;

pub use color::ColorPair;
pub use error::{Error, Result};
pub use geometry::{Align, Axis, Pos, Rect, Size};
pub use input::Input;
pub use list::List;
pub use tui::{Tui, TuiConfig};
pub use window::{
    Border, ContainerConfig, GridCell, GridConfig, Hooks, KeyHook, MenuConfig, MenuHook,
    MenuHooks, MenuId, MenuKeyHook, Parent, TextConfig, TuiKeyHook, WindowConfig, WindowHook,
    WindowId,
};
pub use wintui_term::color::Color;
pub use wintui_term::input::{KeyCode, KeyEvent, Modifiers};
