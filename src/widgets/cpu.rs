//! CPU panel: overall sparkline and per-core bars in two columns.

use crate::ansi::{self, paint};
use crate::engine::{CpuUsage, RateResult};
use crate::format::{floor_percent, format_frequency, pad_right};
use crate::history::HistorySeries;

use super::{Meter, PanelStyle, Scale, Sparkline};

/// Width of the overall-usage sparkline.
pub const SPARKLINE_WIDTH: usize = 20;

/// Core label column width.
const LABEL_WIDTH: usize = 5;
/// Right-aligned `" 100%"` column.
const PERCENT_WIDTH: usize = 5;

/// Rows needed to show every core in two columns.
#[must_use]
pub fn core_rows(cores: usize) -> usize {
    cores.div_ceil(2)
}

/// Panel height (borders included) that fits every core.
#[must_use]
pub fn preferred_height(cores: usize) -> usize {
    core_rows(cores) + 3
}

/// Renders the CPU panel.
///
/// `load` (1, 5 and 15 minute averages) is shown in the title when known.
/// Cores that do not fit the height are left out.
#[must_use]
pub fn cpu_panel(
    usage: &CpuUsage,
    history: &HistorySeries,
    load: Option<[f64; 3]>,
    width: usize,
    height: usize,
    style: &PanelStyle<'_>,
) -> Vec<String> {
    let theme = style.theme;
    let inner = width.saturating_sub(2);

    let mut content = Vec::new();
    content.push(summary_line(usage, history, inner, style));

    let left_width = inner / 2;
    let right_width = inner - left_width;
    let rows = core_rows(usage.cores.len()).min(height.saturating_sub(3));
    let (left, right) = usage.cores.split_at(core_rows(usage.cores.len()).min(usage.cores.len()));

    for i in 0..rows {
        let l = left.get(i).map(|c| core_cell(c, left_width, style)).unwrap_or_default();
        let r = right.get(i).map(|c| core_cell(c, right_width, style)).unwrap_or_default();
        content.push(format!("{}{}", pad_right(&l, left_width), r));
    }

    let title = match load {
        Some([one, five, fifteen]) => format!("CPU  load {one:.2} {five:.2} {fifteen:.2}"),
        None => "CPU".to_string(),
    };
    style.boxed(content, width, height, &title, theme.cpu)
}

fn summary_line(usage: &CpuUsage, history: &HistorySeries, inner: usize, style: &PanelStyle<'_>) -> String {
    let theme = style.theme;
    let samples: Vec<f64> = history.iter().collect();
    let spark_width = SPARKLINE_WIDTH.min(inner.saturating_sub(7));
    let spark = Sparkline::new(&samples)
        .width(spark_width)
        .scale(Scale::Fixed(100.0))
        .color(theme.cpu)
        .render();

    let percent = floor_percent(usage.total.value);
    let mut line = format!(" {spark} {}", paint(&format!("{percent:>3}%"), theme.cpu_color(usage.total.value)));
    if let Some(mhz) = usage.frequency_mhz.filter(|f| *f > 0.0) {
        line.push_str("  ");
        line.push_str(&style.dim(&format_frequency(mhz)));
    }
    line
}

fn core_cell(core: &RateResult, width: usize, style: &PanelStyle<'_>) -> String {
    let theme = style.theme;
    let label = ansi::truncate(&short_name(&core.name), LABEL_WIDTH - 1);
    let bar_width = width.saturating_sub(1 + LABEL_WIDTH + PERCENT_WIDTH + 1);
    let bar = Meter::new(core.value)
        .width(bar_width)
        .color(theme.cpu_color(core.value))
        .track_color(theme.dim)
        .render();
    let percent = floor_percent(core.value);
    format!(" {}{bar} {:>3}%", pad_right(&style.dim(&label), LABEL_WIDTH), percent)
}

/// `cpu12` shows as `12`; other names are kept.
fn short_name(name: &str) -> String {
    match name.strip_prefix("cpu") {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) => rest.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip, visual_width};
    use crate::layout::BorderStyle;
    use crate::theme::Theme;

    fn usage(cores: &[f64]) -> CpuUsage {
        let cores: Vec<RateResult> =
            cores.iter().enumerate().map(|(i, v)| RateResult::percent(format!("cpu{i}"), *v)).collect();
        let mean = cores.iter().map(|c| c.value).sum::<f64>() / cores.len().max(1) as f64;
        CpuUsage { total: RateResult::percent("cpu", mean), cores, frequency_mhz: Some(2400.0) }
    }

    #[test]
    fn test_panel_dimensions() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Rounded);
        let usage = usage(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let lines = cpu_panel(&usage, &HistorySeries::new().pushed(30.0), None, 60, preferred_height(5), &style);
        assert_eq!(lines.len(), 6);
        for line in &lines {
            assert_eq!(visual_width(line), 60, "line {:?}", strip(line));
        }
    }

    #[test]
    fn test_summary_shows_floored_percent_and_frequency() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let mut u = usage(&[]);
        u.total = RateResult::percent("cpu", 42.9);
        let lines = cpu_panel(&u, &HistorySeries::new(), None, 50, 4, &style);
        let summary = strip(&lines[1]);
        assert!(summary.contains(" 42%"), "{summary}");
        assert!(summary.contains("2.40 GHz"), "{summary}");
    }

    #[test]
    fn test_cores_in_two_columns() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let lines = cpu_panel(&usage(&[5.0, 100.0, 50.0, 0.0]), &HistorySeries::new(), None, 60, 10, &style);
        let first = strip(&lines[2]);
        assert!(first.contains(" 0 ") && first.contains("  5%"), "{first}");
        assert!(first.contains(" 2 ") && first.contains(" 50%"), "{first}");
        let second = strip(&lines[3]);
        assert!(second.contains("100%"), "{second}");
    }

    #[test]
    fn test_load_average_in_title() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let lines = cpu_panel(&usage(&[1.0]), &HistorySeries::new(), Some([0.5, 0.25, 1.0]), 60, 5, &style);
        assert!(strip(&lines[0]).contains("load 0.50 0.25 1.00"));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("cpu12"), "12");
        assert_eq!(short_name("cpu"), "cpu");
        assert_eq!(short_name("P-core"), "P-core");
    }

    #[test]
    fn test_preferred_height() {
        assert_eq!(preferred_height(0), 3);
        assert_eq!(preferred_height(8), 7);
        assert_eq!(preferred_height(7), 7);
    }
}
