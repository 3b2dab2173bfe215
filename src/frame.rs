//! Frame/state orchestrator.
//!
//! [`render`] is the single entry point the host calls once per tick. It
//! folds the new snapshot into the previous state, lays out every panel and
//! returns the finished frame text together with the state blob for the
//! next tick. It performs no I/O and never fails.
//!
//! # Layout
//!
//! ```text
//! header line
//! ┌ CPU ─────────────┐ ┌ Memory ──────────┐
//! └──────────────────┘ └──────────────────┘
//! ┌ Network ─────────┐ ┌ Disk ────────────┐
//! └──────────────────┘ └──────────────────┘
//! ┌ Processes ──────────────────────────────┐
//! └─────────────────────────────────────────┘
//! info bar
//! ```
//!
//! With `showHelp` or `showProcessDetails` set, the frame is the centered
//! overlay instead; help wins when both are set.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::network::AUTO_INTERFACE;
use crate::engine::process::arrange;
use crate::engine::{
    compute_cpu, compute_disk, compute_memory, compute_network, compute_processes, resolve_interval, RateContext,
    SortKey,
};
use crate::history::HistorySeries;
use crate::layout::{fit_to_viewport, split_horizontal, split_widths, stack_vertical, BorderStyle};
use crate::selection::ProcessSelection;
use crate::snapshot::PlatformSnapshot;
use crate::state::PersistedState;
use crate::theme::Theme;
use crate::widgets::{self, PanelStyle, ProcessView};

/// Gap between side-by-side panels.
const PANEL_GAP: usize = 1;
/// Height of the network and disk row.
const MIDDLE_HEIGHT: usize = 7;

/// Everything the host supplies for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameInput {
    /// Terminal columns.
    pub viewport_width: usize,
    /// Terminal rows.
    pub viewport_height: usize,
    /// Theme name; unknown names use the default theme.
    pub theme: String,
    /// Blob returned by the previous tick; empty for a cold start.
    pub previous_state: String,
    /// Case-insensitive process filter.
    pub process_filter: String,
    /// Process sort column.
    pub sort_key: SortKey,
    /// Flip the sort column's natural order.
    pub sort_reversed: bool,
    /// Show the help overlay.
    pub show_help: bool,
    /// Show the selected process's details.
    pub show_process_details: bool,
    /// PID the host believes is selected. Informational only: the selection
    /// is resolved from scroll offset and index against the current list.
    pub selected_pid: Option<u32>,
    /// Requested first visible process row.
    pub process_scroll_offset: i64,
    /// Requested selection within the visible window.
    pub process_selection_index: i64,
    /// Primary interface name, or `auto`.
    pub preferred_net_interface: String,
    /// Mount/device filter for the disk panel.
    pub disk_filter: String,
    /// This tick's platform data.
    pub snapshot: PlatformSnapshot,
    /// Interval to assume when the snapshots carry no usable timestamps.
    pub interval_ms: u64,
    /// Border glyph style.
    pub border_style: BorderStyle,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            viewport_width: 80,
            viewport_height: 24,
            theme: "default".to_string(),
            previous_state: String::new(),
            process_filter: String::new(),
            sort_key: SortKey::default(),
            sort_reversed: false,
            show_help: false,
            show_process_details: false,
            selected_pid: None,
            process_scroll_offset: 0,
            process_selection_index: 0,
            preferred_net_interface: AUTO_INTERFACE.to_string(),
            disk_filter: String::new(),
            snapshot: PlatformSnapshot::default(),
            interval_ms: 1000,
            border_style: BorderStyle::default(),
        }
    }
}

/// One tick's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    /// Lines joined with `\n`, at most `viewportHeight` lines.
    pub frame_text: String,
    /// State to hand back on the next tick.
    pub state_blob: String,
}

/// Panel heights for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// CPU and memory row.
    pub top: usize,
    /// Network and disk row.
    pub middle: usize,
    /// Process panel.
    pub process: usize,
}

impl FrameLayout {
    /// Splits `height` rows between header, panels and info bar.
    ///
    /// The top row grows with the core count up to a third of the body;
    /// the process panel takes what is left.
    #[must_use]
    pub fn compute(height: usize, cores: usize) -> Self {
        let body = height.saturating_sub(2);
        let min_top = widgets::memory::MIN_HEIGHT;
        let top = widgets::cpu::preferred_height(cores).clamp(min_top, (body / 3).max(min_top));
        let process = body.saturating_sub(top + MIDDLE_HEIGHT);
        Self { top, middle: MIDDLE_HEIGHT, process }
    }

    /// Rows available to the process list.
    #[must_use]
    pub fn process_rows(&self) -> usize {
        widgets::process::viewport_rows(self.process)
    }
}

/// Renders one tick.
#[must_use]
pub fn render(input: &FrameInput) -> FrameOutput {
    let width = input.viewport_width;
    let height = input.viewport_height;

    if !Theme::is_known(&input.theme) {
        debug!(theme = %input.theme, "unknown theme, using default");
    }
    let theme = Theme::by_name(&input.theme);
    let style = PanelStyle::new(&theme, input.border_style);

    let prev = PersistedState::decode(&input.previous_state);
    let snapshot = input.snapshot.clone().sanitize();

    let fallback = Duration::from_millis(input.interval_ms);
    let interval = resolve_interval(snapshot.timestamp_ms, prev.timestamp_ms, fallback);
    if snapshot.timestamp_ms.is_some() && prev.timestamp_ms.is_some() && interval == fallback {
        debug!(interval_ms = input.interval_ms, "snapshot timestamps not increasing, using host interval");
    }

    let ctx = RateContext::new(interval)
        .ticks_per_second(snapshot.system.ticks_per_second)
        .core_count(snapshot.core_count())
        .total_memory(snapshot.memory.total);

    // Engine
    let (cpu, cpu_counters) = compute_cpu(&snapshot.cpu, &prev.cpu_counters, &ctx);
    let memory = compute_memory(&snapshot.memory);
    let (network, net_counters) =
        compute_network(&snapshot.network, &prev.net_counters, &ctx, &input.preferred_net_interface);
    let (disk, disk_counters) = compute_disk(&snapshot.disk, &prev.disk_counters, &ctx, &input.disk_filter);
    let (process_rows, process_ticks) = compute_processes(&snapshot.processes, &prev.process_ticks, &ctx);
    let process_total = process_rows.len();
    let processes = arrange(process_rows, input.sort_key, input.sort_reversed, &input.process_filter);

    // History
    let cpu_history = prev.cpu_history.pushed(cpu.total.value);
    let mem_history = prev.mem_history.pushed(memory.used_percent.value);
    let net_interface = network.primary().map(|n| n.name.clone());
    let (net_rx_history, net_tx_history) = match network.primary() {
        Some(primary) if prev.net_interface.as_deref() == Some(primary.name.as_str()) => {
            (prev.net_rx_history.pushed(primary.rx.value), prev.net_tx_history.pushed(primary.tx.value))
        }
        Some(primary) => {
            (HistorySeries::new().pushed(primary.rx.value), HistorySeries::new().pushed(primary.tx.value))
        }
        None => (HistorySeries::new(), HistorySeries::new()),
    };

    // Selection
    let layout = FrameLayout::compute(height, cpu.cores.len());
    let selection = ProcessSelection::resolve(
        &processes,
        layout.process_rows(),
        input.process_scroll_offset,
        input.process_selection_index,
    );
    if input.selected_pid.is_some() && input.selected_pid != selection.selected_pid {
        debug!(requested = ?input.selected_pid, resolved = ?selection.selected_pid, "selection moved with the list");
    }

    // Widgets
    let lines = if input.show_help {
        widgets::help_overlay(width, height, &style)
    } else if input.show_process_details {
        widgets::detail_overlay(selection.selected(&processes), width, height, &style)
    } else {
        let (left, right) = split_widths(width, PANEL_GAP);

        let top = split_horizontal(
            &widgets::cpu_panel(&cpu, &cpu_history, snapshot.system.load_average, left, layout.top, &style),
            &widgets::memory_panel(&memory, right, layout.top, &style),
            left,
            right,
            PANEL_GAP,
        );
        let middle = split_horizontal(
            &widgets::network_panel(&network, &net_rx_history, &net_tx_history, left, layout.middle, &style),
            &widgets::disk_panel(&disk, right, layout.middle, &style),
            left,
            right,
            PANEL_GAP,
        );
        let view = ProcessView {
            rows: &processes,
            total: process_total,
            scroll_offset: selection.scroll_offset,
            selection: selection.highlight(),
            sort: input.sort_key,
            reversed: input.sort_reversed,
            filter: &input.process_filter,
        };
        let process = if layout.process >= 2 {
            widgets::process_panel(&view, width, layout.process, &style)
        } else {
            Vec::new()
        };

        stack_vertical(&[
            vec![widgets::header_line(&snapshot.system, process_total, width, &style)],
            top,
            middle,
            process,
            vec![widgets::info_bar(&snapshot.temperatures, &snapshot.battery, width, &style)],
        ])
    };

    let frame_text = fit_to_viewport(lines, width, height).join("\n");

    let state = PersistedState {
        timestamp_ms: snapshot.timestamp_ms,
        cpu_counters,
        net_counters,
        disk_counters,
        process_ticks,
        cpu_history,
        mem_history,
        net_rx_history,
        net_tx_history,
        net_interface,
        process_max_rows: selection.viewport_rows,
        process_list_start: selection.scroll_offset,
        process_max_scroll: selection.max_scroll,
        process_scroll_offset: selection.scroll_offset,
        process_selected_index: selection.selection_index,
        process_selected_pid: selection.selected_pid,
    };
    let state_blob = state.encode().unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode state, next tick starts cold");
        String::new()
    });

    FrameOutput { frame_text, state_blob }
}
