//! Percentage meter bar with value-based coloring.

use ratatui::style::Color;

use crate::ansi::paint;

/// Filled cell.
pub const FILLED: char = '█';
/// Empty cell.
pub const EMPTY: char = '░';

/// A horizontal percentage bar.
#[derive(Debug, Clone)]
pub struct Meter {
    /// Value between 0 and 100.
    percent: f64,
    /// Width in columns.
    width: usize,
    /// Color for the filled portion.
    color: Option<Color>,
    /// Color for the empty portion.
    track_color: Option<Color>,
}

impl Meter {
    /// Creates a meter for `percent` (clamped to 0-100).
    #[must_use]
    pub fn new(percent: f64) -> Self {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        Self { percent, width: 10, color: None, track_color: None }
    }

    /// Sets the width.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the track color.
    #[must_use]
    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = Some(color);
        self
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        ((self.percent / 100.0 * self.width as f64) as usize).min(self.width)
    }

    /// Renders to a string of exactly `width` columns.
    #[must_use]
    pub fn render(&self) -> String {
        let filled = self.filled();
        let bar = FILLED.to_string().repeat(filled);
        let track = EMPTY.to_string().repeat(self.width - filled);

        let mut out = String::new();
        for (part, color) in [(bar, self.color), (track, self.track_color)] {
            match color {
                Some(c) if !part.is_empty() => out.push_str(&paint(&part, c)),
                _ => out.push_str(&part),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::visual_width;

    #[test]
    fn test_meter_clamps_value() {
        assert_eq!(Meter::new(150.0).width(10).filled(), 10);
        assert_eq!(Meter::new(-5.0).width(10).filled(), 0);
        assert_eq!(Meter::new(f64::NAN).width(10).filled(), 0);
    }

    #[test]
    fn test_meter_render() {
        assert_eq!(Meter::new(50.0).width(4).render(), "██░░");
        assert_eq!(Meter::new(99.0).width(4).render(), "███░");
        assert_eq!(Meter::new(0.0).width(0).render(), "");
    }

    #[test]
    fn test_colored_meter_width() {
        let bar = Meter::new(37.0).width(25).color(Color::Green).track_color(Color::DarkGray).render();
        assert_eq!(visual_width(&bar), 25);
    }
}
