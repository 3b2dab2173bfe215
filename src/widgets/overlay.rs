//! Help and process-detail overlays, centered over the frame.

use crate::ansi::{self, paint};
use crate::engine::process::ProcessRow;
use crate::format::{format_bytes, pad_right};
use crate::layout::{center_overlay, draw_box};

use super::PanelStyle;

/// Help box width.
pub const HELP_WIDTH: usize = 44;
/// Detail box width.
pub const DETAIL_WIDTH: usize = 60;

const KEYS: [(&str, &str); 11] = [
    ("q, Ctrl-C", "Quit"),
    ("h, ?", "Toggle this help"),
    ("Up/Down, j/k", "Move selection"),
    ("PgUp/PgDn", "Scroll process list"),
    ("c", "Sort by CPU"),
    ("m", "Sort by memory"),
    ("p", "Sort by PID"),
    ("n", "Sort by name"),
    ("r", "Reverse sort order"),
    ("/", "Filter processes"),
    ("Enter", "Process details"),
];

/// The help overlay, centered on a `term_width` x `term_height` screen.
#[must_use]
pub fn help_overlay(term_width: usize, term_height: usize, style: &PanelStyle<'_>) -> Vec<String> {
    let theme = style.theme;
    let width = HELP_WIDTH.min(term_width);
    let inner = width.saturating_sub(2);

    let mut content = vec![String::new()];
    content.extend(
        KEYS.iter()
            .map(|(key, action)| ansi::truncate(&format!(" {} {action}", paint(&pad_right(key, 14), theme.title)), inner)),
    );
    content.push(String::new());
    content.push(ansi::truncate(&style.dim(" Esc closes this window"), inner));

    let boxed = draw_box(&content, width, Some("Help"), &style.box_style(theme.title));
    center_overlay(&boxed, term_width, term_height)
}

/// The detail overlay for `process`, or a notice when nothing is selected.
#[must_use]
pub fn detail_overlay(process: Option<&ProcessRow>, term_width: usize, term_height: usize, style: &PanelStyle<'_>) -> Vec<String> {
    let theme = style.theme;
    let width = DETAIL_WIDTH.min(term_width);
    let inner = width.saturating_sub(2);

    let content: Vec<String> = match process {
        Some(p) => {
            let field = |label: &str, value: String| format!(" {} {value}", style.dim(&pad_right(label, 9)));
            let command = if p.command.is_empty() { p.name.clone() } else { p.command.clone() };
            vec![
                field("PID", p.pid.to_string()),
                field("Parent", p.ppid.to_string()),
                field("Name", paint(&p.name, theme.process)),
                field("User", p.user.clone()),
                field("State", if p.state.is_empty() { "?".to_string() } else { p.state.clone() }),
                field("CPU", paint(&format!("{:.1}%", p.cpu.value), theme.cpu_color(p.cpu.value))),
                field("Memory", format!("{} ({:.1}%)", format_bytes(p.memory_kb as f64 * 1024.0), p.mem.value)),
                field("Threads", p.threads.to_string()),
                field("Command", ansi::truncate_ellipsis(&command, inner.saturating_sub(11))),
            ]
        }
        None => vec![style.dim(" No process selected")],
    };
    let content: Vec<String> = content.iter().map(|l| ansi::truncate(l, inner)).collect();

    let title = process.map_or_else(|| "Details".to_string(), |p| format!("Details {}", p.pid));
    let boxed = draw_box(&content, width, Some(&title), &style.box_style(theme.process));
    center_overlay(&boxed, term_width, term_height)
}
