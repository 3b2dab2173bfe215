//! Disk panel: up to four mounts with aligned columns and an I/O summary.

use crate::ansi::{self, paint};
use crate::engine::DiskUsage;
use crate::format::{format_bytes, pad_left, pad_right};

use super::{Meter, PanelStyle};

/// Mounts shown at most.
pub const MAX_MOUNTS: usize = 4;
/// Minimum size-column width.
const MIN_SIZE_WIDTH: usize = 15;
/// Minimum bar width.
const MIN_BAR_WIDTH: usize = 10;
/// Mount label column is capped at this share of the inner width.
const MAX_LABEL_SHARE: usize = 3;

/// Column widths shared by every mount row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskColumns {
    /// Mount label width.
    pub label: usize,
    /// Meter width.
    pub bar: usize,
    /// Used/total column width.
    pub size: usize,
}

impl DiskColumns {
    /// Computes widths once across all visible rows.
    ///
    /// `size` is the widest `"used / total"` string or 15; `bar` is what
    /// remains after the label and size columns and separators, at least 10.
    #[must_use]
    pub fn compute(labels: &[String], sizes: &[String], inner: usize) -> Self {
        let label = labels
            .iter()
            .map(|l| ansi::visual_width(l))
            .max()
            .unwrap_or(0)
            .min(inner / MAX_LABEL_SHARE);
        let size = sizes.iter().map(|s| ansi::visual_width(s)).max().unwrap_or(0).max(MIN_SIZE_WIDTH);
        let bar = inner.saturating_sub(label + size + 3).max(MIN_BAR_WIDTH);
        Self { label, bar, size }
    }
}

/// Renders the disk panel.
#[must_use]
pub fn disk_panel(usage: &DiskUsage, width: usize, height: usize, style: &PanelStyle<'_>) -> Vec<String> {
    let theme = style.theme;
    let inner = width.saturating_sub(2);
    let rows = height.saturating_sub(2);

    let mounts = &usage.mounts[..usage.mounts.len().min(MAX_MOUNTS).min(rows.saturating_sub(1))];
    let labels: Vec<String> = mounts.iter().map(|m| m.mount_point.clone()).collect();
    let sizes: Vec<String> = mounts
        .iter()
        .map(|m| format!("{} / {}", format_bytes(m.used as f64), format_bytes(m.total as f64)))
        .collect();
    let cols = DiskColumns::compute(&labels, &sizes, inner);

    let mut content = Vec::with_capacity(mounts.len() + 1);
    for ((mount, label), size) in mounts.iter().zip(&labels).zip(&sizes) {
        let pct = mount.used_percent.value;
        let bar = Meter::new(pct).width(cols.bar).color(theme.usage_color(pct)).track_color(theme.dim).render();
        content.push(format!(
            " {} {bar} {}",
            pad_right(&ansi::truncate_ellipsis(label, cols.label), cols.label),
            pad_left(size, cols.size),
        ));
    }

    content.push(format!(
        " {} {} {}  {} {}",
        style.dim("I/O"),
        style.dim("R"),
        paint(&usage.total_read.display, theme.disk),
        style.dim("W"),
        paint(&usage.total_write.display, theme.disk),
    ));

    style.boxed(content, width, height, "Disk", theme.disk)
}
