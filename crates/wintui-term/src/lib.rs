// SPDX-License-Identifier: MIT
//
// wintui-term: Terminal backend for the wintui window toolkit.
//
// Everything the toolkit needs from a terminal and nothing more: an
// eight-colour cell grid, rectangular sub-surfaces carved out of it,
// differential ANSI output, raw-mode terminal control, and a key parser
// fed by blocking reads. The toolkit paints windows into sub-surfaces;
// this crate turns the resulting frame into the fewest bytes it can.
//
// No external TUI framework sits underneath. Escape sequences are
// written by hand, raw mode is entered through termios, and every
// frame is diffed against the previous one before output.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod surface;
pub mod terminal;
