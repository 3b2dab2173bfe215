//! Process table panel.

use ratatui::style::Color;

use crate::ansi::{self, bold, paint, reverse};
use crate::engine::process::{ProcessRow, SortKey};
use crate::format::{pad_left, pad_right};
use crate::theme::Theme;

use super::PanelStyle;

const PID_WIDTH: usize = 7;
const USER_WIDTH: usize = 8;
const STATE_WIDTH: usize = 1;
const PCT_WIDTH: usize = 5;
const THREADS_WIDTH: usize = 4;
/// Fixed columns plus their separators, before the name column.
const FIXED_WIDTH: usize = PID_WIDTH + USER_WIDTH + STATE_WIDTH + 2 * PCT_WIDTH + THREADS_WIDTH + 7;

/// Rows that fit a process panel of `height` lines: borders, header and
/// rule take four.
#[must_use]
pub fn viewport_rows(height: usize) -> usize {
    height.saturating_sub(4)
}

/// What the process panel shows this tick.
#[derive(Debug, Clone, Copy)]
pub struct ProcessView<'a> {
    /// Sorted, filtered processes.
    pub rows: &'a [ProcessRow],
    /// Processes before filtering.
    pub total: usize,
    /// First visible row.
    pub scroll_offset: usize,
    /// Highlighted row within the visible window.
    pub selection: Option<usize>,
    /// Sort column, shown in the title.
    pub sort: SortKey,
    /// Whether the order is flipped.
    pub reversed: bool,
    /// Active filter, shown in the title.
    pub filter: &'a str,
}

impl ProcessView<'_> {
    fn title(&self) -> String {
        let descending = self.sort.descending_by_default() != self.reversed;
        let arrow = if descending { '▼' } else { '▲' };
        let count = if self.rows.len() == self.total {
            self.total.to_string()
        } else {
            format!("{}/{}", self.rows.len(), self.total)
        };
        let mut title = format!("Processes {count}  {arrow}{}", self.sort.label());
        if !self.filter.is_empty() {
            title.push_str(&format!("  /{}", self.filter));
        }
        title
    }
}

/// Renders the process table at exactly `height` lines.
///
/// Rows come from `rows[scroll_offset..]`, at most [`viewport_rows`] of
/// them; the selected one is drawn in reverse video and short lists are
/// padded with blank rows.
#[must_use]
pub fn process_panel(view: &ProcessView<'_>, width: usize, height: usize, style: &PanelStyle<'_>) -> Vec<String> {
    let theme = style.theme;
    let inner = width.saturating_sub(2);
    let visible = viewport_rows(height);

    let mut content = Vec::with_capacity(visible + 2);
    content.push(bold(&header(inner, view.sort), theme.process));
    content.push(style.dim(&"─".repeat(inner)));

    for (i, row) in view.rows.iter().skip(view.scroll_offset).take(visible).enumerate() {
        if view.selection == Some(i) {
            content.push(reverse(&paint(&pad_right(&plain_row(row, inner), inner), theme.selection)));
        } else {
            content.push(colored_row(row, inner, theme));
        }
    }
    content.resize(visible + 2, String::new());

    style.boxed(content, width, height, &view.title(), theme.process)
}

fn name_width(inner: usize) -> usize {
    inner.saturating_sub(FIXED_WIDTH)
}

fn header(inner: usize, sort: SortKey) -> String {
    let mark = |key: SortKey, label: &str| if key == sort { format!("{label}*") } else { label.to_string() };
    format!(
        " {} {} {} {} {} {} {}",
        pad_left(&mark(SortKey::Pid, "PID"), PID_WIDTH),
        pad_right("USER", USER_WIDTH),
        "S",
        pad_left(&mark(SortKey::Cpu, "CPU%"), PCT_WIDTH),
        pad_left(&mark(SortKey::Mem, "MEM%"), PCT_WIDTH),
        pad_left("THR", THREADS_WIDTH),
        mark(SortKey::Name, "NAME"),
    )
    .chars()
    .take(inner)
    .collect()
}

fn cells(row: &ProcessRow, inner: usize) -> [String; 7] {
    let shown = if row.command.is_empty() { &row.name } else { &row.command };
    [
        pad_left(&row.pid.to_string(), PID_WIDTH),
        pad_right(&ansi::truncate(&row.user, USER_WIDTH), USER_WIDTH),
        row.state.chars().next().unwrap_or('?').to_string(),
        format!("{:>5.1}", row.cpu.value),
        format!("{:>5.1}", row.mem.value),
        pad_left(&row.threads.to_string(), THREADS_WIDTH),
        ansi::truncate_ellipsis(shown, name_width(inner)),
    ]
}

fn plain_row(row: &ProcessRow, inner: usize) -> String {
    format!(" {}", cells(row, inner).join(" "))
}

fn colored_row(row: &ProcessRow, inner: usize, theme: &Theme) -> String {
    let [pid, user, state, cpu, mem, threads, name] = cells(row, inner);
    format!(
        " {} {} {} {} {} {} {}",
        paint(&pid, theme.dim),
        user,
        paint(&state, state_color(&state, theme)),
        paint(&cpu, theme.cpu_color(row.cpu.value)),
        paint(&mem, theme.usage_color(row.mem.value)),
        paint(&threads, theme.dim),
        name,
    )
}

fn state_color(state: &str, theme: &Theme) -> Color {
    match state {
        "R" => theme.ok,
        "D" => theme.critical,
        "Z" | "T" => theme.warn,
        _ => theme.dim,
    }
}
