//! Box compositor: borders, titles and panel composition.
//!
//! Every function works on lines of text that may carry ANSI escapes, and
//! measures them by visual width (see [`crate::ansi`]). A drawn box has
//! every line exactly `width` columns wide, provided the caller's content
//! fits the inner width; wider content is left as is.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::ansi::{self, paint};
use crate::format::pad_right;

/// Border style using Unicode box-drawing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Single line: ┌─┐│└─┘
    Single,
    /// Double line: ╔═╗║╚═╝
    Double,
    /// Rounded corners: ╭─╮│╰─╯
    #[default]
    Rounded,
    /// Heavy: ┏━┓┃┗━┛
    Heavy,
}

/// Glyph set for one [`BorderStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Top left corner.
    pub top_left: char,
    /// Top right corner.
    pub top_right: char,
    /// Bottom left corner.
    pub bottom_left: char,
    /// Bottom right corner.
    pub bottom_right: char,
    /// Top and bottom edges.
    pub horizontal: char,
    /// Side edges.
    pub vertical: char,
    /// Opens a title inside a horizontal run (`┤`).
    pub title_open: char,
    /// Closes a title inside a horizontal run (`├`).
    pub title_close: char,
    /// Left end of a divider (`├`).
    pub tee_left: char,
    /// Right end of a divider (`┤`).
    pub tee_right: char,
}

impl BorderStyle {
    /// The glyphs for this style.
    #[must_use]
    pub const fn glyphs(self) -> Glyphs {
        match self {
            Self::Single => Glyphs {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
                title_open: '┤',
                title_close: '├',
                tee_left: '├',
                tee_right: '┤',
            },
            Self::Double => Glyphs {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
                title_open: '╡',
                title_close: '╞',
                tee_left: '╠',
                tee_right: '╣',
            },
            Self::Rounded => Glyphs {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
                title_open: '┤',
                title_close: '├',
                tee_left: '├',
                tee_right: '┤',
            },
            Self::Heavy => Glyphs {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
                title_open: '┫',
                title_close: '┣',
                tee_left: '┣',
                tee_right: '┫',
            },
        }
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "rounded" => Ok(Self::Rounded),
            "heavy" => Ok(Self::Heavy),
            other => Err(format!("unknown border style '{other}'")),
        }
    }
}

/// Border glyphs plus optional colors for the border and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxStyle {
    /// Glyph set.
    pub border: BorderStyle,
    /// Border color, terminal default when `None`.
    pub border_color: Option<Color>,
    /// Title color, border color when `None`.
    pub title_color: Option<Color>,
}

impl BoxStyle {
    /// A style with both colors set.
    #[must_use]
    pub fn colored(border: BorderStyle, border_color: Color, title_color: Color) -> Self {
        Self { border, border_color: Some(border_color), title_color: Some(title_color) }
    }

    fn tint(&self, s: &str) -> String {
        tint(s, self.border_color)
    }
}

fn tint(s: &str, color: Option<Color>) -> String {
    match color {
        Some(c) if !s.is_empty() => paint(s, c),
        _ => s.to_string(),
    }
}

/// Columns taken by a title segment besides the title text itself:
/// the leading run glyph, both brackets and two spaces.
const TITLE_DECORATION: usize = 5;

/// A horizontal rule `left ─┤ title ├──── right`, `inner` columns between
/// the caps. A title that does not fit is cut with `…`; if not even one
/// character fits, the rule has no title.
fn titled_rule(left: char, right: char, title: Option<&str>, inner: usize, style: &BoxStyle) -> String {
    let g = style.border.glyphs();
    let h = g.horizontal.to_string();
    let room = inner.saturating_sub(TITLE_DECORATION);

    let title = title.filter(|t| !t.is_empty() && room > 0).map(|t| ansi::truncate_ellipsis(t, room));

    let mut line = String::new();
    match title {
        Some(title) => {
            let used = ansi::visual_width(&title) + TITLE_DECORATION;
            let run = inner.saturating_sub(used);
            line.push_str(&style.tint(&format!("{left}{h}{}", g.title_open)));
            line.push(' ');
            line.push_str(&tint(&title, style.title_color));
            line.push(' ');
            line.push_str(&style.tint(&format!("{}{}{right}", g.title_close, h.repeat(run))));
        }
        None => line.push_str(&style.tint(&format!("{left}{}{right}", h.repeat(inner)))),
    }
    line
}

fn content_line(content: &str, inner: usize, style: &BoxStyle) -> String {
    let v = style.tint(&style.border.glyphs().vertical.to_string());
    format!("{v}{}{v}", pad_right(content, inner))
}

/// Draws a bordered box around `content`.
///
/// Widths below 2 are treated as 2 (an empty inner area).
#[must_use]
pub fn draw_box(content: &[String], width: usize, title: Option<&str>, style: &BoxStyle) -> Vec<String> {
    let inner = width.max(2) - 2;
    let g = style.border.glyphs();

    let mut lines = Vec::with_capacity(content.len() + 2);
    lines.push(titled_rule(g.top_left, g.top_right, title, inner, style));
    lines.extend(content.iter().map(|c| content_line(c, inner, style)));
    lines.push(style.tint(&format!(
        "{}{}{}",
        g.bottom_left,
        g.horizontal.to_string().repeat(inner),
        g.bottom_right
    )));
    lines
}

/// Draws one border around `main`, a titled divider, and `sub`.
#[must_use]
pub fn box_with_subsection(
    main: &[String],
    sub_title: &str,
    sub: &[String],
    width: usize,
    title: Option<&str>,
    style: &BoxStyle,
) -> Vec<String> {
    let inner = width.max(2) - 2;
    let g = style.border.glyphs();

    let mut lines = draw_box(main, width, title, style);
    let bottom = lines.pop().unwrap_or_default();
    lines.push(titled_rule(g.tee_left, g.tee_right, Some(sub_title), inner, style));
    lines.extend(sub.iter().map(|c| content_line(c, inner, style)));
    lines.push(bottom);
    lines
}

/// Zips two panels side by side.
///
/// Each side is padded to its declared width and the shorter panel is
/// extended with blank lines.
#[must_use]
pub fn split_horizontal(
    left: &[String],
    right: &[String],
    left_width: usize,
    right_width: usize,
    gap: usize,
) -> Vec<String> {
    let rows = left.len().max(right.len());
    let spacer = " ".repeat(gap);
    (0..rows)
        .map(|i| {
            let l = left.get(i).map_or("", String::as_str);
            let r = right.get(i).map_or("", String::as_str);
            format!("{}{spacer}{}", pad_right(l, left_width), pad_right(r, right_width))
        })
        .collect()
}

/// Column widths for two panels sharing `total` columns with `gap` between.
#[must_use]
pub fn split_widths(total: usize, gap: usize) -> (usize, usize) {
    let usable = total.saturating_sub(gap);
    let left = usable / 2;
    (left, usable - left)
}

/// Concatenates blocks top to bottom.
#[must_use]
pub fn stack_vertical(blocks: &[Vec<String>]) -> Vec<String> {
    blocks.iter().flatten().cloned().collect()
}

/// Offsets that center a `box_width` x `box_height` block on the terminal.
#[must_use]
pub fn overlay_offsets(term_width: usize, term_height: usize, box_width: usize, box_height: usize) -> (usize, usize) {
    (term_width.saturating_sub(box_width) / 2, term_height.saturating_sub(box_height) / 2)
}

/// Centers a box on a `term_width` x `term_height` screen.
///
/// The result is `top_pad` blank full-width lines, then every box line
/// prefixed with `left_pad` spaces.
#[must_use]
pub fn center_overlay(box_lines: &[String], term_width: usize, term_height: usize) -> Vec<String> {
    let box_width = box_lines.iter().map(|l| ansi::visual_width(l)).max().unwrap_or(0);
    let (left_pad, top_pad) = overlay_offsets(term_width, term_height, box_width, box_lines.len());

    let blank = " ".repeat(term_width);
    let indent = " ".repeat(left_pad);

    let mut lines = Vec::with_capacity(top_pad + box_lines.len());
    lines.extend(std::iter::repeat(blank).take(top_pad));
    lines.extend(box_lines.iter().map(|l| format!("{indent}{l}")));
    lines
}

/// Cuts `lines` to the viewport: at most `height` lines, each at most
/// `width` columns. Escapes past the cut are kept so resets still apply.
#[must_use]
pub fn fit_to_viewport(lines: Vec<String>, width: usize, height: usize) -> Vec<String> {
    lines
        .into_iter()
        .take(height)
        .map(|l| if ansi::visual_width(&l) > width { ansi::truncate(&l, width) } else { l })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::visual_width;

    fn plain(style: BorderStyle) -> BoxStyle {
        BoxStyle { border: style, ..Default::default() }
    }

    #[test]
    fn test_box_lines_have_exact_width() {
        let content = vec!["hello".to_string(), paint("red", Color::Red), String::new()];
        let style = BoxStyle::colored(BorderStyle::Single, Color::Blue, Color::White);
        let lines = draw_box(&content, 20, Some("CPU"), &style);
        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert_eq!(visual_width(line), 20, "line {line:?}");
        }
    }

    #[test]
    fn test_title_glyphs_per_style() {
        let top = |s| draw_box(&[], 16, Some("Mem"), &plain(s)).remove(0);
        assert_eq!(top(BorderStyle::Single), "┌─┤ Mem ├──────┐");
        assert_eq!(top(BorderStyle::Double), "╔═╡ Mem ╞══════╗");
        assert_eq!(top(BorderStyle::Rounded), "╭─┤ Mem ├──────╮");
        assert_eq!(top(BorderStyle::Heavy), "┏━┫ Mem ┣━━━━━━┓");
    }

    #[test]
    fn test_untitled_and_bottom_border() {
        let lines = draw_box(&["ab".to_string()], 6, None, &plain(BorderStyle::Single));
        assert_eq!(lines, vec!["┌────┐", "│ab  │", "└────┘"]);
    }

    #[test]
    fn test_long_title_is_truncated() {
        let lines = draw_box(&[], 12, Some("Very long panel title"), &plain(BorderStyle::Single));
        assert_eq!(visual_width(&lines[0]), 12);
        assert!(lines[0].contains('…'));
    }

    #[test]
    fn test_title_dropped_when_no_room() {
        let lines = draw_box(&[], 6, Some("Title"), &plain(BorderStyle::Single));
        assert_eq!(lines[0], "┌────┐");
    }

    #[test]
    fn test_overwide_content_not_truncated() {
        let lines = draw_box(&["abcdefgh".to_string()], 6, None, &plain(BorderStyle::Single));
        assert_eq!(lines[1], "│abcdefgh│");
    }

    #[test]
    fn test_tiny_width() {
        let lines = draw_box(&["x".to_string()], 0, Some("T"), &plain(BorderStyle::Single));
        assert_eq!(lines[0], "┌┐");
        assert_eq!(lines[2], "└┘");
    }

    #[test]
    fn test_subsection_divider() {
        let lines = box_with_subsection(
            &["main".to_string()],
            "Swap",
            &["sub".to_string()],
            14,
            Some("Memory"),
            &plain(BorderStyle::Single),
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "├─┤ Swap ├───┤");
        assert_eq!(lines[4], "└────────────┘");
        assert!(lines.iter().all(|l| visual_width(l) == 14));
    }

    #[test]
    fn test_split_horizontal_pads_shorter_side() {
        let left = vec!["a".to_string(), "b".to_string()];
        let right = vec![paint("x", Color::Red)];
        let rows = split_horizontal(&left, &right, 3, 2, 1);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| visual_width(r) == 6));
        assert_eq!(rows[1], "b     ");
    }

    #[test]
    fn test_split_widths() {
        assert_eq!(split_widths(81, 1), (40, 40));
        assert_eq!(split_widths(80, 1), (39, 40));
        assert_eq!(split_widths(0, 1), (0, 0));
    }

    #[test]
    fn test_center_overlay() {
        let boxed = vec!["####".to_string(), "####".to_string()];
        let lines = center_overlay(&boxed, 10, 6);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], " ".repeat(10));
        assert_eq!(lines[2], "   ####");
    }

    #[test]
    fn test_overlay_larger_than_screen() {
        assert_eq!(overlay_offsets(10, 5, 40, 20), (0, 0));
    }

    #[test]
    fn test_fit_to_viewport() {
        let lines = vec!["abcdef".to_string(), "gh".to_string(), "ij".to_string()];
        assert_eq!(fit_to_viewport(lines, 4, 2), vec!["abcd", "gh"]);
    }

    #[test]
    fn test_border_style_parse() {
        assert_eq!("HEAVY".parse::<BorderStyle>(), Ok(BorderStyle::Heavy));
        assert!("dotted".parse::<BorderStyle>().is_err());
    }
}
