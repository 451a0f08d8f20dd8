//! Greedy word wrap and the size metrics built on it.
//!
//! All widths are terminal columns. The functions here work on plain text
//! (directives already stripped, see [`markup`](crate::markup)) and never
//! allocate more than the line list.
//!
//! The wrap walks characters keeping the current line width and the last
//! space seen. A newline ends the line. When a character would push the
//! line past `w` columns the line is broken at the last space. The spaces
//! at the break belong to neither line. A line with no space to break at
//! makes the whole text unwrappable at that width. Spaces at the start of
//! a line take no room.

use wintui_term::buffer::char_width;

/// One wrapped line: char indices `start..end` into the text and its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub end: usize,
    pub width: usize,
}

/// Wrap `text` to lines at most `w` columns wide.
///
/// Returns `None` when some word is wider than `w`. Empty text is one
/// empty line.
///
/// ```
/// use wintui_core::text::wrap;
///
/// let lines = wrap("ab cd ef", 4).unwrap();
/// let widths: Vec<usize> = lines.iter().map(|l| l.width).collect();
/// assert_eq!(widths, [2, 2, 2]);
/// assert!(wrap("abcdef", 4).is_none());
/// ```
#[must_use]
pub fn wrap(text: &str, w: usize) -> Option<Vec<Line>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;
    // One past the last non-space char on this line and the width up to it.
    let mut word_end = (0, 0);
    // Last space on this line: char index, width before it, word end before it.
    let mut last_space: Option<(usize, usize, (usize, usize))> = None;
    // The current line only exists because the previous one was broken.
    let mut broken = false;
    let mut len = 0;

    for (i, ch) in text.chars().enumerate() {
        len = i + 1;
        if ch == '\n' {
            lines.push(Line { start, end: i, width });
            start = i + 1;
            width = 0;
            word_end = (start, 0);
            last_space = None;
            broken = false;
            continue;
        }
        if ch == ' ' && width == 0 {
            start = i + 1;
            word_end = (start, 0);
            continue;
        }

        let cw = char_width(ch);
        if ch == ' ' {
            if width + cw > w {
                lines.push(Line {
                    start,
                    end: word_end.0,
                    width: word_end.1,
                });
                start = i + 1;
                width = 0;
                word_end = (start, 0);
                last_space = None;
                broken = true;
                continue;
            }
            last_space = Some((i, width, word_end));
        }

        width += cw;
        broken = false;
        if width > w {
            let (at, before, (end, end_width)) = last_space?;
            lines.push(Line {
                start,
                end,
                width: end_width,
            });
            start = at + 1;
            width -= before + 1;
            last_space = None;
            if width > w {
                return None;
            }
        }
        if ch != ' ' {
            word_end = (i + 1, width);
        }
    }

    if !(broken && width == 0) || lines.is_empty() {
        lines.push(Line {
            start,
            end: len.max(start),
            width,
        });
    }
    Some(lines)
}

/// Lines needed to show `text` at width `w`, `None` if it cannot wrap.
#[must_use]
pub fn height_for_width(text: &str, w: usize) -> Option<usize> {
    wrap(text, w).map(|lines| lines.len())
}

/// Columns of `text` on a single unwrapped line, newlines ignored.
#[must_use]
pub fn total_width(text: &str) -> usize {
    text.chars().filter(|&c| c != '\n').map(char_width).sum()
}

/// Narrowest width at which `text` fits in `h` lines.
///
/// When no width gets it down to `h` lines (too many hard newlines), the
/// full unwrapped width is returned. Empty text has width 0.
#[must_use]
pub fn width_for_height(text: &str, h: usize) -> usize {
    let total = total_width(text);
    if total == 0 {
        return 0;
    }
    let fits = |w: usize| height_for_width(text, w).is_some_and(|n| n <= h);
    if !fits(total) {
        return total;
    }

    let (mut lo, mut hi) = (1, total);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Width of each line when `text` is wrapped to fit `h` lines.
#[must_use]
pub fn line_widths(text: &str, h: usize) -> Vec<usize> {
    let w = width_for_height(text, h);
    wrap(text, w).map_or_else(Vec::new, |lines| lines.iter().map(|l| l.width).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CORPUS: &[&str] = &[
        "",
        "a",
        "ab cd ef",
        "hello world",
        "the quick brown fox jumps over the lazy dog",
        "  leading spaces",
        "trailing spaces   ",
        "two\nlines",
        "a\n\nb",
        "wide 中文 text",
        "x y z x y z x y z",
        "supercalifragilistic is long",
    ];

    fn widths(text: &str, w: usize) -> Option<Vec<usize>> {
        wrap(text, w).map(|lines| lines.iter().map(|l| l.width).collect())
    }

    fn slices(text: &str, w: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        wrap(text, w)
            .unwrap_or_default()
            .iter()
            .map(|l| chars[l.start..l.end].iter().collect())
            .collect()
    }

    // ── wrap ──

    #[test]
    fn fixture_ab_cd_ef_at_four() {
        assert_eq!(widths("ab cd ef", 4), Some(vec![2, 2, 2]));
        assert_eq!(slices("ab cd ef", 4), vec!["ab", "cd", "ef"]);
        assert_eq!(height_for_width("ab cd ef", 4), Some(3));
    }

    #[test]
    fn fits_on_one_line() {
        assert_eq!(slices("ab cd ef", 8), vec!["ab cd ef"]);
        assert_eq!(widths("ab cd ef", 5), Some(vec![5, 2]));
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(widths("", 3), Some(vec![0]));
        assert_eq!(height_for_width("", 1), Some(1));
    }

    #[test]
    fn word_wider_than_width_is_unwrappable() {
        assert_eq!(wrap("abcde", 4), None);
        assert_eq!(height_for_width("ab abcde", 4), None);
        assert_eq!(height_for_width("中", 1), None);
    }

    #[test]
    fn newlines_split_lines() {
        assert_eq!(slices("two\nlines", 10), vec!["two", "lines"]);
        assert_eq!(widths("a\n\nb", 5), Some(vec![1, 0, 1]));
        assert_eq!(widths("a\n", 5), Some(vec![1, 0]));
    }

    #[test]
    fn leading_spaces_collapse() {
        assert_eq!(slices("  ab", 4), vec!["ab"]);
        assert_eq!(slices("ab    cd", 2), vec!["ab", "cd"]);
    }

    #[test]
    fn breaking_space_is_dropped() {
        assert_eq!(slices("ab cd", 2), vec!["ab", "cd"]);
        assert_eq!(widths("ab ", 2), Some(vec![2]));
    }

    #[test]
    fn spaces_before_a_break_are_not_counted() {
        assert_eq!(widths("ab  cd", 3), Some(vec![2, 2]));
        assert_eq!(slices("ab  cd", 3), vec!["ab", "cd"]);
        assert_eq!(widths("ab  cdef", 5), Some(vec![2, 4]));
        assert_eq!(slices("ab   cd", 4), vec!["ab", "cd"]);
    }

    #[test]
    fn wide_characters_count_two_columns() {
        assert_eq!(widths("中文", 4), Some(vec![4]));
        assert_eq!(widths("中 文", 3), Some(vec![2, 2]));
    }

    // ── metrics ──

    #[test]
    fn width_for_height_finds_narrowest() {
        assert_eq!(width_for_height("ab cd ef", 1), 8);
        assert_eq!(width_for_height("ab cd ef", 2), 5);
        assert_eq!(width_for_height("ab cd ef", 3), 2);
        assert_eq!(width_for_height("ab cd ef", 9), 2);
    }

    #[test]
    fn width_for_height_unreachable_returns_total() {
        assert_eq!(width_for_height("a\nb\nc", 1), 3);
        assert_eq!(width_for_height("", 1), 0);
    }

    #[test]
    fn line_widths_match_wrap() {
        assert_eq!(line_widths("ab cd ef", 2), vec![5, 2]);
        assert_eq!(line_widths("hello world", 1), vec![11]);
    }

    // ── properties over the corpus ──

    #[test]
    fn round_trip_width_never_grows() {
        for text in CORPUS {
            for w in 1..=50 {
                if let Some(h) = height_for_width(text, w) {
                    let back = width_for_height(text, h);
                    assert!(back <= w, "{text:?} at {w}: {h} lines, back {back}");
                }
            }
        }
    }

    #[test]
    fn line_widths_sum_within_length() {
        for text in CORPUS {
            let cols = total_width(text) + text.chars().filter(|&c| c == '\n').count();
            for h in 1..=6 {
                let lines = line_widths(text, h);
                let sum: usize = lines.iter().sum::<usize>() + lines.len().saturating_sub(1);
                assert!(sum <= cols.max(lines.len().saturating_sub(1)), "{text:?} h={h}");
                let w = width_for_height(text, h);
                assert_eq!(Some(lines.len()), height_for_width(text, w.max(1)), "{text:?}");
            }
        }
    }
}
