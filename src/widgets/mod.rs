//! Panel renderers.
//!
//! Each panel is a pure function from computed metrics, a size and a
//! [`PanelStyle`] to boxed lines. Panels pad or cut their content to the
//! requested height so side-by-side rows stay aligned; content is cut to
//! the inner width here, never in the compositor.

pub mod cpu;
pub mod disk;
pub mod header;
pub mod info_bar;
pub mod memory;
pub mod meter;
pub mod network;
pub mod overlay;
pub mod process;
pub mod sparkline;

pub use cpu::cpu_panel;
pub use disk::disk_panel;
pub use header::header_line;
pub use info_bar::info_bar;
pub use memory::memory_panel;
pub use meter::Meter;
pub use network::network_panel;
pub use overlay::{detail_overlay, help_overlay};
pub use process::{process_panel, ProcessView};
pub use sparkline::{Scale, Sparkline};

use ratatui::style::Color;

use crate::ansi;
use crate::layout::{draw_box, BorderStyle, BoxStyle};
use crate::theme::Theme;

/// Theme and border style shared by every panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelStyle<'a> {
    /// Color palette.
    pub theme: &'a Theme,
    /// Border glyph set.
    pub border: BorderStyle,
}

impl<'a> PanelStyle<'a> {
    /// Creates a panel style.
    #[must_use]
    pub fn new(theme: &'a Theme, border: BorderStyle) -> Self {
        Self { theme, border }
    }

    /// Box style with the theme border color and `title_color`.
    #[must_use]
    pub fn box_style(&self, title_color: Color) -> BoxStyle {
        BoxStyle::colored(self.border, self.theme.border, title_color)
    }

    /// Boxes `content` into exactly `height` lines of `width` columns.
    #[must_use]
    pub fn boxed(&self, content: Vec<String>, width: usize, height: usize, title: &str, title_color: Color) -> Vec<String> {
        let inner = width.saturating_sub(2);
        let content = fit_content(content, inner, height.saturating_sub(2));
        draw_box(&content, width, Some(title), &self.box_style(title_color))
    }

    /// `text` in the dim color.
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        ansi::paint(text, self.theme.dim)
    }
}

/// Cuts each line to `inner` columns and pads or cuts the block to `rows`.
#[must_use]
pub fn fit_content(mut content: Vec<String>, inner: usize, rows: usize) -> Vec<String> {
    content.truncate(rows);
    for line in &mut content {
        if ansi::visual_width(line) > inner {
            *line = ansi::truncate(line, inner);
        }
    }
    content.resize(rows, String::new());
    content
}
