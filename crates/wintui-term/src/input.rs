// SPDX-License-Identifier: MIT
//
// Terminal key parser.
//
// Turns raw stdin bytes into key events. The toolkit only consumes the
// keyboard, so this covers exactly what a plain xterm-compatible terminal
// sends for keys:
//
// - ASCII printable characters and C0 control keys (Ctrl+letter)
// - UTF-8 multi-byte characters
// - CSI sequences: arrows, Home/End, tilde-terminated editing and
//   function keys, Shift-Tab (`CSI Z`), xterm modifier parameters
// - SS3 sequences: arrows and F1–F4 in application cursor mode
// - Alt+key as ESC followed by a printable character
//
// Escape sequences can span several `read()` calls, so the parser keeps
// unconsumed bytes between calls. A lone ESC is ambiguous until either
// another byte arrives or the caller gives up waiting and calls
// [`Parser::flush`], which reports it as the Escape key.

use bitflags::bitflags;

// ─── Key Types ───────────────────────────────────────────────────────────────

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Modifier keys held with it.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Ctrl plus a letter, as the terminal reports C0 controls.
    #[inline]
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), Modifiers::CTRL)
    }

    /// Whether this is Ctrl+`ch` with no other modifiers.
    #[inline]
    #[must_use]
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.code == KeyCode::Char(ch) && self.modifiers == Modifiers::CTRL
    }

    /// The character of a printable key without Ctrl or Alt.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F20.
    F(u8),
}

bitflags! {
    /// Modifier keys, in xterm's `param = 1 + bitmask` encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Incremental key parser.
///
/// ```
/// use wintui_term::input::{KeyCode, Parser};
///
/// let mut parser = Parser::new();
/// let keys = parser.advance(b"a\x1b[A");
/// assert_eq!(keys[0].code, KeyCode::Char('a'));
/// assert_eq!(keys[1].code, KeyCode::Up);
/// ```
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
        }
    }

    /// Feed bytes and return every complete key.
    ///
    /// Incomplete sequences stay buffered for the next call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut keys = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(key, consumed) => {
                    keys.push(key);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        keys
    }

    /// Whether bytes are waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Give up waiting and report pending bytes as literal keys.
    ///
    /// A lone ESC becomes [`KeyCode::Escape`]; a truncated sequence
    /// becomes Escape followed by its remaining characters.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let keys = self
            .buf
            .iter()
            .filter_map(|&byte| match byte {
                0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(b as char))),
                _ => None,
            })
            .collect();
        self.buf.clear();
        keys
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ───────────────────────────────────────────────────────

enum Parsed {
    /// A key, consuming `usize` bytes.
    Key(KeyEvent, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized, skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&lead) = buf.first() else {
        return Parsed::Incomplete;
    };

    match lead {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Key(KeyEvent::ctrl(' '), 1),
        0x08 | 0x7F => Parsed::Key(KeyEvent::plain(KeyCode::Backspace), 1),
        0x09 => Parsed::Key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(KeyEvent::plain(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => Parsed::Key(KeyEvent::ctrl((b + b'a' - 1) as char), 1),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::plain(KeyCode::Char(b as char)), 1),
        0xC0..=0xF7 => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&next) = buf.get(1) else {
        return Parsed::Incomplete;
    };

    match next {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::new(KeyCode::Char(b as char), Modifiers::ALT), 2),
        // Anything else: the ESC stands alone.
        _ => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Parameter bytes 0x30..=0x3F, intermediates 0x20..=0x2F, then a final
    // byte in 0x40..=0x7E.
    let mut end = 2;
    loop {
        let Some(&b) = buf.get(end) else {
            return Parsed::Incomplete;
        };
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end);
        }
        end += 1;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let first = params.first().copied().unwrap_or(0);
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match final_byte {
        b'~' => match first {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            n @ 11..=24 => match function_key(n) {
                Some(code) => code,
                None => return Parsed::Skip(consumed),
            },
            _ => return Parsed::Skip(consumed),
        },
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'Z' => return Parsed::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT), consumed),
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Key(KeyEvent::new(code, modifiers), consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    let Some(&b) = buf.get(2) else {
        return Parsed::Incomplete;
    };

    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };
    Parsed::Key(KeyEvent::plain(code), 3)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let len = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    };
    if buf.len() < len {
        return Parsed::Incomplete;
    }
    match std::str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
        Some(ch) => Parsed::Key(KeyEvent::plain(KeyCode::Char(ch)), len),
        None => Parsed::Skip(1),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Semicolon-separated decimal parameters. Empty fields read as 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, b| acc.saturating_mul(10).saturating_add(u16::from(b - b'0')))
        })
        .collect()
}

/// Decode an xterm modifier parameter (`1 + bitmask`).
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

/// Tilde codes for F1–F12 (the numbering skips 16 and 22).
#[allow(clippy::cast_possible_truncation)]
const fn function_key(n: u16) -> Option<KeyCode> {
    let f = match n {
        11..=15 => n - 10,
        17..=21 => n - 11,
        23 | 24 => n - 12,
        _ => return None,
    };
    Some(KeyCode::F(f as u8))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
