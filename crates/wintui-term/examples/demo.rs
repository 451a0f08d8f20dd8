// SPDX-License-Identifier: MIT
//
// Backend demo: a bordered box that echoes the last key pressed.
//
// Run with `cargo run -p wintui-term --example demo`. Press q to quit.

use wintui_term::buffer::FrameBuffer;
use wintui_term::color::{CellColor, Color};
use wintui_term::event_loop::{Action, App, EventLoop};
use wintui_term::input::{KeyCode, KeyEvent};
use wintui_term::surface::Surface;

struct Echo {
    last: String,
}

impl App for Echo {
    fn on_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('q') {
            return Action::Quit;
        }
        self.last = format!("{key:?}");
        Action::Continue
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        let fg = CellColor::Named(Color::White);
        let bg = CellColor::Named(Color::Blue);
        let w = i32::from(buf.width()).min(60);
        let Some(surface) = Surface::new(1, 1, w - 2, 5) else {
            return;
        };
        surface.erase(buf, fg, bg);
        surface.border(buf, CellColor::Named(Color::Yellow), bg);
        surface.put_str(buf, 2, 1, "last key (q quits):", fg, bg);
        surface.put_str(buf, 2, 3, &self.last, fg, bg);
    }
}

fn main() -> std::io::Result<()> {
    let mut app = Echo {
        last: String::from("-"),
    };
    EventLoop::new().run(&mut app)
}
