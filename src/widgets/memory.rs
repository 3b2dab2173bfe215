//! Memory panel with a swap subsection.

use crate::ansi::paint;
use crate::engine::MemoryUsage;
use crate::format::{floor_percent, format_bytes};
use crate::layout::box_with_subsection;

use super::{fit_content, Meter, PanelStyle};

/// Lines used by the main block.
const MAIN_ROWS: usize = 3;
/// Lines used by the swap block.
const SWAP_ROWS: usize = 2;

/// Smallest height that shows every line: borders, divider, both blocks.
pub const MIN_HEIGHT: usize = MAIN_ROWS + SWAP_ROWS + 3;

/// Renders the memory panel; extra height goes to the main block.
#[must_use]
pub fn memory_panel(usage: &MemoryUsage, width: usize, height: usize, style: &PanelStyle<'_>) -> Vec<String> {
    let theme = style.theme;
    let inner = width.saturating_sub(2);
    let bar_width = width.saturating_sub(4);

    let used_pct = usage.used_percent.value;
    let main = vec![
        format!(
            " Used {} / {}  {}",
            paint(&format_bytes(usage.used as f64), theme.memory),
            format_bytes(usage.total as f64),
            paint(&format!("{:>3}%", floor_percent(used_pct)), theme.usage_color(used_pct)),
        ),
        format!(" {}", Meter::new(used_pct).width(bar_width).color(theme.usage_color(used_pct)).track_color(theme.dim).render()),
        format!(
            " {} {}  {} {}",
            style.dim("Cached"),
            format_bytes(usage.cached as f64),
            style.dim("Avail"),
            format_bytes(usage.available as f64),
        ),
    ];

    let swap = if usage.has_swap() {
        let swap_pct = usage.swap_percent.value;
        vec![
            format!(
                " Used {} / {}  {}",
                paint(&format_bytes(usage.swap_used as f64), theme.swap),
                format_bytes(usage.swap_total as f64),
                paint(&format!("{:>3}%", floor_percent(swap_pct)), theme.usage_color(swap_pct)),
            ),
            format!(" {}", Meter::new(swap_pct).width(bar_width).color(theme.swap).track_color(theme.dim).render()),
        ]
    } else {
        vec![style.dim(" No swap")]
    };

    let main_rows = height.saturating_sub(SWAP_ROWS + 3).max(1);
    box_with_subsection(
        &fit_content(main, inner, main_rows),
        "Swap",
        &fit_content(swap, inner, SWAP_ROWS),
        width,
        Some("Memory"),
        &style.box_style(theme.memory),
    )
}
