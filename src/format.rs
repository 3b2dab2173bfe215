//! Formatting utilities shared by the widgets.
//!
//! Byte scales are binary (threshold 1024) with one decimal place. Padding
//! helpers measure with [`visual_width`](crate::ansi::visual_width), so
//! strings carrying color escapes pad to the right number of columns.

use crate::ansi::visual_width;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count as `"1.5 GB"`.
///
/// Exactly zero prints as `"0 B"`; anything else keeps one decimal place,
/// including plain bytes (`"250.0 B"`). Negative and non-finite input is
/// treated as zero.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Formats a throughput as `"1.5 MB/s"`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// Floored integer percentage, right-aligned to three columns: `" 42%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:>3}%", floor_percent(percent))
}

/// Percentage clamped to `0..=100` and floored, NaN as zero.
pub fn floor_percent(percent: f64) -> u32 {
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0).floor() as u32
}

/// Formats seconds as `"3d 4h"`, `"2h 5m"` or `"7m"`.
pub fn format_duration(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Formats a temperature as `"52.0°C"`.
pub fn format_temp(celsius: f64) -> String {
    if celsius.is_finite() {
        format!("{:.1}°C", celsius)
    } else {
        "N/A".to_string()
    }
}

/// Formats a CPU frequency in MHz as `"3.40 GHz"` or `"800 MHz"`.
pub fn format_frequency(mhz: f64) -> String {
    if mhz >= 1000.0 {
        format!("{:.2} GHz", mhz / 1000.0)
    } else {
        format!("{:.0} MHz", mhz.max(0.0))
    }
}

/// Appends spaces until `s` is `width` columns wide. Never truncates.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visual_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Prepends spaces until `s` is `width` columns wide. Never truncates.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visual_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.extend(std::iter::repeat(' ').take(pad));
    out.push_str(s);
    out
}

/// Centers `s` within `width` columns (extra column goes right).
pub fn center(s: &str, width: usize) -> String {
    let total = width.saturating_sub(visual_width(s));
    let left = total / 2;
    let mut out = " ".repeat(left);
    out.push_str(s);
    out.push_str(&" ".repeat(total - left));
    out
}

/// Case-insensitive substring test. `needle_lower` must already be
/// lowercased with [`str::to_lowercase`]; the haystack is folded the same
/// way so non-ASCII text matches too.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle_lower.is_ascii() {
        let needle = needle_lower.as_bytes();
        return haystack.as_bytes().windows(needle.len()).any(|window| window.eq_ignore_ascii_case(needle));
    }
    haystack.to_lowercase().contains(needle_lower)
}
