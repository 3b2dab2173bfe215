//! Inline sparkline for compact trend display.
//!
//! Uses 8-level Unicode block characters (▁▂▃▄▅▆▇█). The output is always
//! exactly `width` columns: the newest samples are right-aligned and missing
//! history is left blank.

use ratatui::style::Color;

use crate::ansi::paint;

/// Block characters from lowest to highest.
pub const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Vertical scaling of a sparkline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Values are relative to a fixed maximum (CPU percentages use 100).
    Fixed(f64),
    /// Values are relative to the largest visible sample.
    Relative,
}

/// A one-line sparkline.
#[derive(Debug, Clone)]
pub struct Sparkline<'a> {
    data: &'a [f64],
    width: usize,
    scale: Scale,
    color: Option<Color>,
}

impl<'a> Sparkline<'a> {
    /// Creates a sparkline over `data` (oldest first).
    #[must_use]
    pub fn new(data: &'a [f64]) -> Self {
        Self { data, width: 20, scale: Scale::Relative, color: None }
    }

    /// Sets the width in columns.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the vertical scale.
    #[must_use]
    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Block for `value` against `max`.
    fn block(value: f64, max: f64) -> char {
        if max <= 0.0 || !value.is_finite() {
            return BLOCKS[0];
        }
        let level = ((value / max).clamp(0.0, 1.0) * 7.0).round() as usize;
        BLOCKS[level.min(7)]
    }

    /// Renders to a string of exactly `width` columns.
    #[must_use]
    pub fn render(&self) -> String {
        let visible = &self.data[self.data.len().saturating_sub(self.width)..];
        let max = match self.scale {
            Scale::Fixed(max) => max,
            Scale::Relative => visible.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max),
        };

        let blocks: String = visible.iter().map(|&v| Self::block(v, max)).collect();
        let padding = " ".repeat(self.width - visible.len());

        match self.color {
            Some(color) if !blocks.is_empty() => format!("{padding}{}", paint(&blocks, color)),
            _ => format!("{padding}{blocks}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip, visual_width};

    #[test]
    fn test_fixed_scale_levels() {
        let data = vec![0.0, 50.0, 100.0];
        let line = Sparkline::new(&data).width(3).scale(Scale::Fixed(100.0)).render();
        assert_eq!(line, "▁▅█");
    }

    #[test]
    fn test_relative_scale() {
        let data = vec![1.0, 2.0, 4.0];
        let line = Sparkline::new(&data).width(3).render();
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn test_short_history_is_left_padded() {
        let data = vec![100.0];
        let line = Sparkline::new(&data).width(5).scale(Scale::Fixed(100.0)).render();
        assert_eq!(line, "    █");
    }

    #[test]
    fn test_long_history_keeps_newest() {
        let data: Vec<f64> = (0..60).map(f64::from).collect();
        let line = Sparkline::new(&data).width(20).color(Color::Cyan).render();
        assert_eq!(visual_width(&line), 20);
        assert!(strip(&line).ends_with('█'));
    }

    #[test]
    fn test_all_zero_and_empty() {
        let zeros = vec![0.0; 4];
        assert_eq!(Sparkline::new(&zeros).width(4).render(), "▁▁▁▁");
        assert_eq!(Sparkline::new(&[]).width(3).color(Color::Red).render(), "   ");
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let data = vec![-10.0, 250.0, f64::NAN];
        let line = Sparkline::new(&data).width(3).scale(Scale::Fixed(100.0)).render();
        assert_eq!(line, "▁█▁");
    }
}
