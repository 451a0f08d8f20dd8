// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state
// and no decisions about when to emit; that is the `CellWriter`'s job.
// This module only knows the byte encoding of the handful of commands the
// toolkit needs: cursor placement, eight-colour SGR, screen clearing,
// synchronized output and the alternate screen.
//
// Cursor positions are 0-indexed in our API and converted to the
// terminal's 1-indexed CUP coordinates here.

use std::io::{self, Write};

use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` (CUP).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR state to terminal defaults (SGR 0).
///
/// The stateful writer must forget its tracked colours after this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colour ──────────────────────────────────────────────────────────────────

/// Set the foreground colour: SGR 30–37, or 39 for the default.
#[inline]
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Named(c) => write!(w, "\x1b[{}m", 30 + c.index()),
    }
}

/// Set the background colour: SGR 40–47, or 49 for the default.
#[inline]
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Named(c) => write!(w, "\x1b[{}m", 40 + c.index()),
    }
}

// ─── Synchronized Output ─────────────────────────────────────────────────────
//
// Mode 2026 asks the terminal to hold rendering until the frame is
// complete. Terminals that do not know it ignore the sequence.

#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Alternate Screen ────────────────────────────────────────────────────────

/// Switch to the alternate screen buffer (mode 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Return to the main screen buffer.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cursor_to_is_one_indexed() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(emit(|w| cursor_to(w, 9, 4)), "\x1b[5;10H");
    }

    #[test]
    fn cursor_to_max_coordinates_do_not_overflow() {
        assert_eq!(
            emit(|w| cursor_to(w, u16::MAX, u16::MAX)),
            "\x1b[65536;65536H"
        );
    }

    #[test]
    fn foreground_codes() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| fg(w, Color::Black.into())), "\x1b[30m");
        assert_eq!(emit(|w| fg(w, Color::White.into())), "\x1b[37m");
    }

    #[test]
    fn background_codes() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
        assert_eq!(emit(|w| bg(w, Color::Red.into())), "\x1b[41m");
        assert_eq!(emit(|w| bg(w, Color::Cyan.into())), "\x1b[46m");
    }

    #[test]
    fn screen_and_mode_sequences() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
        assert_eq!(emit(|w| begin_sync(w)), "\x1b[?2026h");
        assert_eq!(emit(|w| end_sync(w)), "\x1b[?2026l");
        assert_eq!(emit(|w| enter_alt_screen(w)), "\x1b[?1049h");
        assert_eq!(emit(|w| exit_alt_screen(w)), "\x1b[?1049l");
    }
}
