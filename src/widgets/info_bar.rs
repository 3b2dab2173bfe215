//! Bottom info bar: temperatures and battery, joined by `│`.

use crate::ansi::{self, paint};
use crate::format::{floor_percent, format_duration, format_temp, pad_right};
use crate::snapshot::{BatterySnapshot, TempSensor};

use super::PanelStyle;

/// Sensors listed at most, hottest first.
const MAX_SENSORS: usize = 3;

/// Colored temperature segment, empty without sensors.
#[must_use]
pub fn temperature_segment(sensors: &[TempSensor], style: &PanelStyle<'_>) -> String {
    let mut hottest: Vec<&TempSensor> = sensors.iter().filter(|s| s.celsius.is_finite()).collect();
    hottest.sort_by(|a, b| b.celsius.total_cmp(&a.celsius));

    hottest
        .iter()
        .take(MAX_SENSORS)
        .map(|s| {
            let label = if s.label.is_empty() { "temp" } else { s.label.as_str() };
            format!("{} {}", style.dim(label), paint(&format_temp(s.celsius), style.theme.temp_color(s.celsius)))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Battery summary, empty when no battery is present.
#[must_use]
pub fn battery_segment(battery: &BatterySnapshot, style: &PanelStyle<'_>) -> String {
    if !battery.present {
        return String::new();
    }
    let theme = style.theme;
    let capacity = floor_percent(battery.capacity);
    let color = if capacity <= 15 && !battery.charging {
        theme.critical
    } else if capacity <= 30 {
        theme.warn
    } else {
        theme.battery
    };

    let state = if battery.charging {
        "charging".to_string()
    } else if battery.discharging {
        "discharging".to_string()
    } else if battery.status.is_empty() {
        "full".to_string()
    } else {
        battery.status.to_lowercase()
    };

    let mut segment = format!("{} {} {}", style.dim("BAT"), paint(&format!("{capacity}%"), color), state);
    if let Some(secs) = battery.time_remaining_secs.filter(|s| *s > 0) {
        segment.push_str(&format!(" ({})", format_duration(secs)));
    }
    segment
}

/// Joins the non-empty segments and pads to `width`.
#[must_use]
pub fn info_bar(sensors: &[TempSensor], battery: &BatterySnapshot, width: usize, style: &PanelStyle<'_>) -> String {
    let separator = format!(" {} ", style.dim("│"));
    let line = [temperature_segment(sensors, style), battery_segment(battery, style)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(&separator);
    let line = format!(" {line}");
    pad_right(&ansi::truncate(&line, width), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip, visual_width};
    use crate::layout::BorderStyle;
    use crate::theme::Theme;

    fn sensor(label: &str, celsius: f64) -> TempSensor {
        TempSensor { label: label.to_string(), celsius }
    }

    #[test]
    fn test_empty_segments_dropped() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let bar = info_bar(&[], &BatterySnapshot::default(), 30, &style);
        assert_eq!(strip(&bar), " ".repeat(30));

        let bar = info_bar(&[sensor("Package", 55.0)], &BatterySnapshot::default(), 40, &style);
        assert!(!strip(&bar).contains('│'));
        assert!(strip(&bar).contains("Package 55.0°C"));
    }

    #[test]
    fn test_segments_joined() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let battery = BatterySnapshot {
            present: true,
            capacity: 84.6,
            discharging: true,
            time_remaining_secs: Some(7500),
            ..Default::default()
        };
        let bar = info_bar(&[sensor("CPU", 48.0)], &battery, 80, &style);
        let text = strip(&bar);
        assert!(text.contains("CPU 48.0°C │ BAT 84% discharging (2h 5m)"), "{text}");
        assert_eq!(visual_width(&bar), 80);
    }

    #[test]
    fn test_hottest_sensors_first() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let sensors = vec![sensor("a", 40.0), sensor("b", 90.0), sensor("c", 60.0), sensor("d", 50.0), sensor("e", f64::NAN)];
        let text = strip(&temperature_segment(&sensors, &style));
        assert!(text.starts_with("b 90.0°C"), "{text}");
        assert!(!text.contains("a 40"));
        assert!(!text.contains('e'));
    }

    #[test]
    fn test_temperature_colors_follow_gradient() {
        let theme = Theme::default();
        let style = PanelStyle::new(&theme, BorderStyle::Single);
        let cool = temperature_segment(&[sensor("x", 30.0)], &style);
        let hot = temperature_segment(&[sensor("x", 100.0)], &style);
        assert_ne!(cool, hot);
    }
}
