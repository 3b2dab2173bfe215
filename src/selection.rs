//! Process list scroll and selection.
//!
//! Scroll and selection are requested by the host and clamped every tick
//! against the current list. The selected PID is always looked up in the
//! current sorted and filtered list; it is never carried over from the
//! previous tick, so a re-sort cannot leave a stale PID selected.

use crate::engine::process::ProcessRow;

/// Clamps `value` into `0..=max`.
#[must_use]
pub fn clamp_scroll(value: i64, max: usize) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).map_or(max, |v| v.min(max))
    }
}

/// Resolved scroll position and selection for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSelection {
    /// First visible row, in `0..=max_scroll`.
    pub scroll_offset: usize,
    /// Selected row within the visible window, `0` with no rows.
    pub selection_index: usize,
    /// PID at `scroll_offset + selection_index` in the current list.
    pub selected_pid: Option<u32>,
    /// `max(0, count - viewport_rows)`.
    pub max_scroll: usize,
    /// Rows actually visible.
    pub visible_count: usize,
    /// Rows the panel can show.
    pub viewport_rows: usize,
}

impl ProcessSelection {
    /// Clamps the requested scroll and selection against `rows`.
    #[must_use]
    pub fn resolve(rows: &[ProcessRow], viewport_rows: usize, requested_scroll: i64, requested_index: i64) -> Self {
        let max_scroll = rows.len().saturating_sub(viewport_rows);
        let scroll_offset = clamp_scroll(requested_scroll, max_scroll);
        let visible_count = rows.len().saturating_sub(scroll_offset).min(viewport_rows);
        let selection_index = clamp_scroll(requested_index, visible_count.saturating_sub(1));

        let selected_pid = if visible_count > 0 {
            rows.get(scroll_offset + selection_index).map(|r| r.pid)
        } else {
            None
        };

        Self { scroll_offset, selection_index, selected_pid, max_scroll, visible_count, viewport_rows }
    }

    /// The selected row, if any.
    #[must_use]
    pub fn selected<'a>(&self, rows: &'a [ProcessRow]) -> Option<&'a ProcessRow> {
        self.selected_pid.and_then(|pid| rows.get(self.scroll_offset + self.selection_index).filter(|r| r.pid == pid))
    }

    /// Highlighted index within the window, `None` with no visible rows.
    #[must_use]
    pub fn highlight(&self) -> Option<usize> {
        (self.visible_count > 0).then_some(self.selection_index)
    }
}
