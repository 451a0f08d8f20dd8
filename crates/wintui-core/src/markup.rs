//! Inline directives in text pane strings.
//!
//! Two escape sequences may appear in a display string:
//!
//! - `ESC 'm' f b` resets to the pane's effective colour, then applies
//!   foreground `f` and background `b`. Each is a digit `'0'..='7'` (the
//!   colour index) or `'-'` to keep the effective channel.
//! - `ESC 'c'` marks where the terminal cursor goes when the pane is the
//!   active window.
//!
//! Any other ESC is dropped and the characters after it are kept as text.
//! The plain text used for wrapping is the display string with every
//! directive removed, so char indices of [`Token::Char`] match indices into
//! the plain text one for one.

use std::fmt::Write as _;

use wintui_term::color::Color;

use crate::color::ColorPair;

pub const ESC: char = '\x1b';

/// Place the cursor here.
pub const CURSOR: &str = "\x1bc";

/// Back to the effective colour.
pub const RESET: &str = "\x1bm--";

/// Directive switching to `pair` for the characters that follow.
///
/// ```
/// use wintui_core::{markup, Color, ColorPair};
///
/// assert_eq!(markup::color(ColorPair::fg(Color::Red)), "\x1bm1-");
/// ```
#[must_use]
pub fn color(pair: ColorPair) -> String {
    let mut s = String::with_capacity(4);
    s.push(ESC);
    s.push('m');
    s.push(channel_char(pair.fg));
    s.push(channel_char(pair.bg));
    s
}

/// `text` wrapped in a colour directive and a reset.
#[must_use]
pub fn colored(text: &str, pair: ColorPair) -> String {
    let mut s = color(pair);
    let _ = write!(s, "{text}{RESET}");
    s
}

fn channel_char(c: Option<Color>) -> char {
    c.map_or('-', |c| char::from(b'0' + c.index()))
}

fn parse_channel(ch: char) -> Option<Option<Color>> {
    match ch {
        '-' => Some(None),
        '0'..='7' => ch
            .to_digit(8)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Color::from_index)
            .map(Some),
        _ => None,
    }
}

/// One element of a parsed display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Char(char),
    Color(ColorPair),
    Cursor,
}

/// Split a display string into characters and directives.
#[must_use]
pub fn parse(display: &str) -> Vec<Token> {
    let chars: Vec<char> = display.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != ESC {
            tokens.push(Token::Char(chars[i]));
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('c') => {
                tokens.push(Token::Cursor);
                i += 2;
            }
            Some('m') => {
                let fg = chars.get(i + 2).copied().and_then(parse_channel);
                let bg = chars.get(i + 3).copied().and_then(parse_channel);
                if let (Some(fg), Some(bg)) = (fg, bg) {
                    tokens.push(Token::Color(ColorPair { fg, bg }));
                    i += 4;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    tokens
}

/// The display string without directives.
#[must_use]
pub fn strip(display: &str) -> String {
    parse(display)
        .into_iter()
        .filter_map(|t| match t {
            Token::Char(c) => Some(c),
            Token::Color(_) | Token::Cursor => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip("hello"), "hello");
        assert_eq!(parse("ab"), vec![Token::Char('a'), Token::Char('b')]);
    }

    #[test]
    fn color_directive_round_trips() {
        let pair = ColorPair::new(Color::Green, Color::Black);
        assert_eq!(color(pair), "\x1bm20");
        assert_eq!(parse(&color(pair)), vec![Token::Color(pair)]);
        assert_eq!(parse(RESET), vec![Token::Color(ColorPair::NONE)]);
    }

    #[test]
    fn cursor_directive() {
        let s = format!("ab{CURSOR}c");
        assert_eq!(
            parse(&s),
            vec![
                Token::Char('a'),
                Token::Char('b'),
                Token::Cursor,
                Token::Char('c')
            ]
        );
        assert_eq!(strip(&s), "abc");
    }

    #[test]
    fn colored_wraps_and_resets() {
        let s = colored("up", ColorPair::fg(Color::Green));
        assert_eq!(s, "\x1bm2-up\x1bm--");
        assert_eq!(strip(&s), "up");
    }

    #[test]
    fn malformed_escape_drops_only_esc() {
        assert_eq!(strip("a\x1bxb"), "axb");
        assert_eq!(strip("a\x1bm9-b"), "am9-b");
        assert_eq!(strip("a\x1bm1"), "am1");
        assert_eq!(strip("end\x1b"), "end");
    }
}
