//! ANSI escape handling for fixed-width terminal text.
//!
//! Every width computation in the compositor goes through [`tokens`], which
//! splits a string into printable [`Token::Text`] runs and [`Token::Escape`]
//! sequences. [`visual_width`], [`strip`] and [`truncate`] all share it, so
//! measuring and cutting a line can never disagree about where an escape
//! sequence ends.
//!
//! Styling helpers ([`fg`], [`paint`], [`reverse`], [`bold`]) render
//! `crossterm` style commands to their SGR strings instead of writing them
//! to a terminal.

use crossterm::style::{Attribute, Color as TermColor, SetAttribute, SetForegroundColor};
use crossterm::Command;
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// SGR reset (`ESC [ 0 m`).
pub const RESET: &str = "\x1b[0m";

/// A lexical piece of a terminal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Printable text, occupying columns.
    Text(&'a str),
    /// A complete (or trailing unterminated) escape sequence, zero columns.
    Escape(&'a str),
}

/// Iterator over the [`Token`]s of a string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Splits `s` into text and escape tokens.
pub fn tokens(s: &str) -> Tokens<'_> {
    Tokens { rest: s }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let bytes = self.rest.as_bytes();
        if bytes[0] == ESC {
            let (escape, rest) = self.rest.split_at(escape_len(bytes));
            self.rest = rest;
            Some(Token::Escape(escape))
        } else {
            let end = self.rest.find('\x1b').unwrap_or(self.rest.len());
            let (text, rest) = self.rest.split_at(end);
            self.rest = rest;
            Some(Token::Text(text))
        }
    }
}

/// Length in bytes of the escape sequence starting at `bytes[0] == ESC`.
///
/// Always lands on a char boundary: terminators are ASCII, and a lone ESC
/// followed by a multi-byte char is a one-byte sequence.
fn escape_len(bytes: &[u8]) -> usize {
    match bytes.get(1) {
        None => 1,
        // CSI: parameters and intermediates, then a final byte in 0x40..=0x7E.
        Some(b'[') => bytes
            .iter()
            .enumerate()
            .skip(2)
            .find(|(_, b)| (0x40..=0x7e).contains(*b))
            .map_or(bytes.len(), |(i, _)| i + 1),
        // OSC: terminated by BEL or ST (ESC \).
        Some(b']') => {
            let mut i = 2;
            while i < bytes.len() {
                if bytes[i] == BEL {
                    return i + 1;
                }
                if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    return i + 2;
                }
                i += 1;
            }
            bytes.len()
        }
        Some(b) if b.is_ascii() => 2,
        Some(_) => 1,
    }
}

/// Number of terminal columns `s` occupies, ignoring escape sequences.
pub fn visual_width(s: &str) -> usize {
    tokens(s)
        .map(|t| match t {
            Token::Text(text) => text.width(),
            Token::Escape(_) => 0,
        })
        .sum()
}

/// Removes every escape sequence from `s`.
pub fn strip(s: &str) -> String {
    tokens(s)
        .filter_map(|t| match t {
            Token::Text(text) => Some(text),
            Token::Escape(_) => None,
        })
        .collect()
}

/// Cuts `s` to at most `max_width` columns.
///
/// Escape sequences are kept whole, including those after the cut, so a
/// trailing reset still applies. A wide char that would straddle the limit
/// is dropped.
pub fn truncate(s: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut width = 0;

    for token in tokens(s) {
        match token {
            Token::Escape(escape) => out.push_str(escape),
            Token::Text(text) => {
                for c in text.chars() {
                    let w = c.width().unwrap_or(0);
                    if width + w > max_width {
                        break;
                    }
                    width += w;
                    out.push(c);
                }
            }
        }
    }

    out
}

/// Cuts `s` to `max_width` columns, marking the cut with `…`.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return truncate(s, 0);
    }
    let mut out = truncate(s, max_width - 1);
    out.push('…');
    out
}

/// Renders a crossterm command to its escape string.
fn sequence(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = command.write_ansi(&mut out);
    out
}

/// Maps a theme color onto the terminal palette.
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}

/// Foreground color escape for `color`.
pub fn fg(color: Color) -> String {
    sequence(SetForegroundColor(term_color(color)))
}

/// `text` in `color`, followed by a reset.
pub fn paint(text: &str, color: Color) -> String {
    format!("{}{}{}", fg(color), text, RESET)
}

/// `text` in bold `color`, followed by a reset.
pub fn bold(text: &str, color: Color) -> String {
    format!("{}{}{}{}", sequence(SetAttribute(Attribute::Bold)), fg(color), text, RESET)
}

/// `text` in reverse video, followed by a reset.
pub fn reverse(text: &str) -> String {
    format!("{}{}{}", sequence(SetAttribute(Attribute::Reverse)), text, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_text_and_escapes() {
        let s = "ab\x1b[31mcd\x1b[0m";
        let toks: Vec<_> = tokens(s).collect();
        assert_eq!(
            toks,
            vec![
                Token::Text("ab"),
                Token::Escape("\x1b[31m"),
                Token::Text("cd"),
                Token::Escape("\x1b[0m"),
            ]
        );
    }

    #[test]
    fn test_truecolor_escape_is_one_token() {
        let s = "\x1b[38;2;255;64;64mX";
        let toks: Vec<_> = tokens(s).collect();
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0], Token::Escape("\x1b[38;2;255;64;64m"));
    }

    #[test]
    fn test_osc_sequence() {
        let s = "\x1b]0;title\x07rest";
        assert_eq!(strip(s), "rest");
        let s = "\x1b]8;;http://x\x1b\\link";
        assert_eq!(strip(s), "link");
    }

    #[test]
    fn test_lone_escape_before_multibyte() {
        let s = "\x1b│x";
        assert_eq!(strip(s), "│x");
    }

    #[test]
    fn test_unterminated_csi_is_zero_width() {
        assert_eq!(visual_width("ab\x1b[38;2"), 2);
    }

    #[test]
    fn test_visual_width_ignores_escapes() {
        assert_eq!(visual_width("\x1b[1m\x1b[38;2;1;2;3mhello\x1b[0m"), 5);
        assert_eq!(visual_width("╭─┤ CPU ├─╮"), 11);
        assert_eq!(visual_width(""), 0);
    }

    #[test]
    fn test_visual_width_wide_chars() {
        assert_eq!(visual_width("日本"), 4);
    }

    #[test]
    fn test_truncate_keeps_escapes_whole() {
        let s = paint("abcdef", Color::Rgb(1, 2, 3));
        let t = truncate(&s, 3);
        assert_eq!(strip(&t), "abc");
        assert!(t.ends_with(RESET), "trailing reset survives the cut");
        assert!(t.starts_with("\x1b[38;2;1;2;3m"));
    }

    #[test]
    fn test_truncate_wide_char_boundary() {
        assert_eq!(truncate("a日本", 2), "a");
        assert_eq!(truncate("a日本", 3), "a日");
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate_ellipsis("firefox", 10), "firefox");
        assert_eq!(truncate_ellipsis("firefox-bin", 6), "firef…");
        assert_eq!(truncate_ellipsis("abc", 0), "");
    }

    #[test]
    fn test_paint_emits_truecolor() {
        let s = paint("x", Color::Rgb(10, 20, 30));
        assert_eq!(s, "\x1b[38;2;10;20;30mx\x1b[0m");
    }

    #[test]
    fn test_reverse_and_bold_are_zero_width() {
        assert_eq!(visual_width(&reverse("row")), 3);
        assert_eq!(visual_width(&bold("PID", Color::Cyan)), 3);
    }
}
