//! Network panel: primary interface, up to two secondary interfaces, totals
//! and rx/tx sparklines.

use crate::ansi::paint;
use crate::engine::{NetRates, NetworkUsage};
use crate::format::{format_bytes, pad_left, pad_right};
use crate::history::HistorySeries;

use super::{PanelStyle, Scale, Sparkline};

/// Secondary interfaces shown below the primary.
pub const MAX_SECONDARY: usize = 2;
/// Interface name column.
const NAME_WIDTH: usize = 9;
/// Rate column (`"1023.9 KB/s"`).
const RATE_WIDTH: usize = 11;
/// Totals need at least this much inner width.
const TOTALS_MIN_INNER: usize = 40;

/// Width of each of the two sparklines: `(inner - 3) / 2`.
#[must_use]
pub fn sparkline_width(inner: usize) -> usize {
    inner.saturating_sub(3) / 2
}

/// Renders the network panel with rx/tx history of the primary interface.
#[must_use]
pub fn network_panel(
    usage: &NetworkUsage,
    rx_history: &HistorySeries,
    tx_history: &HistorySeries,
    width: usize,
    height: usize,
    style: &PanelStyle<'_>,
) -> Vec<String> {
    let theme = style.theme;
    let inner = width.saturating_sub(2);
    let rows = height.saturating_sub(2);
    let mut content = Vec::new();

    let Some(primary) = usage.primary() else {
        content.push(style.dim(" No interfaces"));
        return style.boxed(content, width, height, "Network", theme.network_rx);
    };

    content.push(rate_line(primary, style, true));
    for secondary in usage.secondary(MAX_SECONDARY) {
        content.push(rate_line(secondary, style, false));
    }
    if inner > TOTALS_MIN_INNER {
        content.push(format!(
            " {}↓ {} ↑ {}",
            pad_right(&style.dim("Total"), NAME_WIDTH),
            paint(&pad_left(&usage.total_rx.display, RATE_WIDTH), theme.network_rx),
            paint(&pad_left(&usage.total_tx.display, RATE_WIDTH), theme.network_tx),
        ));
    }

    // Sparklines sit on the last row; keep them when space is short.
    let spark = sparkline_row(rx_history, tx_history, inner, style);
    if content.len() + 1 > rows {
        content.truncate(rows.saturating_sub(1));
    } else {
        content.resize(rows - 1, String::new());
    }
    content.push(spark);

    let title = format!("Network {}", primary.name);
    style.boxed(content, width, height, &title, theme.network_rx)
}

fn rate_line(rates: &NetRates, style: &PanelStyle<'_>, primary: bool) -> String {
    let theme = style.theme;
    let name = if primary { rates.name.clone() } else { style.dim(&rates.name) };
    let mut line = format!(
        " {}↓ {} ↑ {}",
        pad_right(&name, NAME_WIDTH),
        paint(&pad_left(&rates.rx.display, RATE_WIDTH), theme.network_rx),
        paint(&pad_left(&rates.tx.display, RATE_WIDTH), theme.network_tx),
    );
    if primary {
        line.push_str(&style.dim(&format!(
            "  Σ {} / {}",
            format_bytes(rates.rx_total as f64),
            format_bytes(rates.tx_total as f64)
        )));
    }
    line
}

fn sparkline_row(rx: &HistorySeries, tx: &HistorySeries, inner: usize, style: &PanelStyle<'_>) -> String {
    let theme = style.theme;
    let w = sparkline_width(inner);
    let rx: Vec<f64> = rx.iter().collect();
    let tx: Vec<f64> = tx.iter().collect();
    format!(
        "{} {} {}",
        Sparkline::new(&rx).width(w).scale(Scale::Relative).color(theme.network_rx).render(),
        style.dim("│"),
        Sparkline::new(&tx).width(w).scale(Scale::Relative).color(theme.network_tx).render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip, visual_width};
    use crate::engine::{compute_network, RateContext};
    use crate::layout::BorderStyle;
    use crate::snapshot::{InterfaceSample, NetworkSnapshot};
    use crate::theme::Theme;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn usage(names: &[&str]) -> NetworkUsage {
        let snapshot = NetworkSnapshot {
            interfaces: names
                .iter()
                .map(|n| InterfaceSample { name: (*n).to_string(), rx_bytes: 1500, ..Default::default() })
                .collect(),
        };
        let prev: BTreeMap<_, _> = names
            .iter()
            .map(|n| ((*n).to_string(), crate::engine::InterfaceCounters { rx_bytes: 1000, ..Default::default() }))
            .collect();
        compute_network(&snapshot, &prev, &RateContext::new(Duration::from_secs(2)), "auto").0
    }

    #[test]
    fn test_primary_line_and_sparklines() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let rx = HistorySeries::new().pushed(250.0);
        let lines = network_panel(&usage(&["eth0"]), &rx, &HistorySeries::new(), 50, 7, &style);
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| visual_width(l) == 50));
        assert!(strip(&lines[0]).contains("Network eth0"));
        let primary = strip(&lines[1]);
        assert!(primary.contains("↓   250.0 B/s"), "{primary}");
        assert!(strip(&lines[5]).contains('│'));
    }

    #[test]
    fn test_sparkline_widths_sum_to_inner() {
        for inner in [41, 48, 60, 77] {
            let row = sparkline_row(&HistorySeries::new(), &HistorySeries::new(), inner, &PanelStyle::new(&Theme::default(), BorderStyle::Single));
            let w = sparkline_width(inner);
            assert_eq!(visual_width(&row), 2 * w + 3);
            assert!(visual_width(&row) <= inner);
        }
    }

    #[test]
    fn test_secondary_capped_and_totals_need_width() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let u = usage(&["eth0", "eth1", "eth2", "eth3"]);
        let wide = network_panel(&u, &HistorySeries::new(), &HistorySeries::new(), 60, 8, &style);
        let text: Vec<String> = wide.iter().map(|l| strip(l)).collect();
        assert!(text.iter().any(|l| l.contains("Total")));
        assert!(!text.iter().any(|l| l.contains("eth3")));

        let narrow = network_panel(&u, &HistorySeries::new(), &HistorySeries::new(), 40, 8, &style);
        assert!(!narrow.iter().any(|l| strip(l).contains("Total")));
    }

    #[test]
    fn test_no_interfaces() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let lines = network_panel(&usage(&[]), &HistorySeries::new(), &HistorySeries::new(), 30, 5, &style);
        assert!(strip(&lines[1]).contains("No interfaces"));
        assert_eq!(lines.len(), 5);
    }
}
