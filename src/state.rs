//! State carried between ticks.
//!
//! The host stores the blob returned by one tick and hands it back on the
//! next. It is a flat JSON record: raw counters per subsystem, trailing
//! histories, and the process list position. A missing or unreadable blob
//! is a cold start, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{CpuCounters, DiskIoCounters, InterfaceCounters};
use crate::error::Result;
use crate::history::HistorySeries;

/// Everything the next tick needs from this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    /// Snapshot time of this tick.
    pub timestamp_ms: Option<u64>,

    /// CPU tick counters by core name.
    pub cpu_counters: BTreeMap<String, CpuCounters>,
    /// Interface counters by name.
    pub net_counters: BTreeMap<String, InterfaceCounters>,
    /// Sector counters by block device.
    pub disk_counters: BTreeMap<String, DiskIoCounters>,
    /// CPU time ticks by PID.
    pub process_ticks: BTreeMap<u32, u64>,

    /// Overall CPU usage.
    pub cpu_history: HistorySeries,
    /// Memory usage.
    pub mem_history: HistorySeries,
    /// Receive rate of the primary interface.
    pub net_rx_history: HistorySeries,
    /// Transmit rate of the primary interface.
    pub net_tx_history: HistorySeries,
    /// Interface the network histories belong to.
    pub net_interface: Option<String>,

    /// Rows the process panel could show.
    pub process_max_rows: usize,
    /// First row shown.
    pub process_list_start: usize,
    /// Largest valid scroll offset.
    pub process_max_scroll: usize,
    /// Clamped scroll offset.
    pub process_scroll_offset: usize,
    /// Clamped selection within the window.
    pub process_selected_index: usize,
    /// PID under the selection.
    pub process_selected_pid: Option<u32>,
}

impl PersistedState {
    /// Decodes a state blob, falling back to a cold start.
    #[must_use]
    pub fn decode(blob: &str) -> Self {
        if blob.trim().is_empty() {
            debug!("no previous state, cold start");
            return Self::default();
        }
        match serde_json::from_str(blob) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "previous state unreadable, cold start");
                Self::default()
            }
        }
    }

    /// Encodes the state as JSON.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// True if no counters were carried over.
    #[must_use]
    pub fn is_cold(&self) -> bool {
        self.cpu_counters.is_empty()
            && self.net_counters.is_empty()
            && self.disk_counters.is_empty()
            && self.process_ticks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_LEN;

    #[test]
    fn test_empty_and_corrupt_blobs_are_cold() {
        assert!(PersistedState::decode("").is_cold());
        assert!(PersistedState::decode("   ").is_cold());
        assert!(PersistedState::decode("{not json").is_cold());
        assert!(PersistedState::decode("[1,2,3]").is_cold());
        assert_eq!(PersistedState::decode("{}"), PersistedState::default());
    }

    #[test]
    fn test_round_trip() {
        let mut state = PersistedState { timestamp_ms: Some(1234), process_selected_pid: Some(42), ..Default::default() };
        state.cpu_counters.insert("cpu0".to_string(), CpuCounters { active: 150, total: 1100 });
        state.process_ticks.insert(42, 9000);
        state.cpu_history.push(50.0);
        state.net_interface = Some("eth0".to_string());

        let blob = state.encode().unwrap();
        assert_eq!(PersistedState::decode(&blob), state);
        assert!(!state.is_cold());
    }

    #[test]
    fn test_flat_field_names() {
        let state = PersistedState { process_max_rows: 10, process_list_start: 3, ..Default::default() };
        let value: serde_json::Value = serde_json::from_str(&state.encode().unwrap()).unwrap();
        for key in [
            "processMaxRows",
            "processListStart",
            "processMaxScroll",
            "processScrollOffset",
            "processSelectedIndex",
            "processSelectedPid",
            "cpuHistory",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["processListStart"], 3);
    }

    #[test]
    fn test_oversized_history_is_bounded() {
        let values: Vec<f64> = (0..200).map(f64::from).collect();
        let blob = serde_json::json!({ "cpuHistory": values }).to_string();
        let state = PersistedState::decode(&blob);
        assert_eq!(state.cpu_history.len(), HISTORY_LEN);
        assert_eq!(state.cpu_history.latest(), Some(199.0));
    }

    #[test]
    fn test_partial_state_keeps_known_fields() {
        let state = PersistedState::decode(r#"{"processScrollOffset": 7, "unknownField": true}"#);
        assert_eq!(state.process_scroll_offset, 7);
        assert!(state.is_cold());
    }
}
