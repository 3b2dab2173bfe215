//! One-line header above the panels.

use crate::ansi::{self, bold};
use crate::format::{format_duration, pad_right};
use crate::snapshot::SystemInfo;

use super::PanelStyle;

/// Host name, uptime, load average and process count, padded to `width`.
#[must_use]
pub fn header_line(system: &SystemInfo, process_count: usize, width: usize, style: &PanelStyle<'_>) -> String {
    let theme = style.theme;
    let host = if system.hostname.is_empty() { "localhost" } else { system.hostname.as_str() };

    let mut parts = vec![bold(host, theme.title)];
    if system.uptime_secs > 0 {
        parts.push(format!("{} {}", style.dim("up"), format_duration(system.uptime_secs)));
    }
    if let Some([one, five, fifteen]) = system.load_average {
        parts.push(format!("{} {one:.2} {five:.2} {fifteen:.2}", style.dim("load")));
    }
    parts.push(format!("{process_count} {}", style.dim("procs")));

    let line = format!(" {}", parts.join("   "));
    pad_right(&ansi::truncate(&line, width), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip, visual_width};
    use crate::layout::BorderStyle;
    use crate::theme::Theme;

    #[test]
    fn test_header_fields() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let system = SystemInfo {
            hostname: "box".to_string(),
            uptime_secs: 90_000,
            load_average: Some([1.0, 0.5, 0.25]),
            ..Default::default()
        };
        let line = header_line(&system, 312, 80, &style);
        assert_eq!(strip(&line).trim_end(), " box   up 1d 1h   load 1.00 0.50 0.25   312 procs");
        assert_eq!(visual_width(&line), 80);
    }

    #[test]
    fn test_header_defaults_and_truncation() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let line = header_line(&SystemInfo::default(), 0, 12, &style);
        assert_eq!(visual_width(&line), 12);
        assert!(strip(&line).starts_with(" localhost"));
    }
}
