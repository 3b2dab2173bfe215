//! End-to-end ticks through [`tmon::render`].
//!
//! Inputs are built from JSON the way a host would send them.
#![allow(clippy::unwrap_used)]

use serde_json::json;

use tmon::ansi::{strip, visual_width};
use tmon::{render, FrameInput, PersistedState};

fn frame(value: serde_json::Value) -> FrameInput {
    serde_json::from_value(value).unwrap()
}

fn tick(snapshot: serde_json::Value, previous_state: &str) -> (String, PersistedState) {
    let input = frame(json!({
        "viewportWidth": 120,
        "viewportHeight": 40,
        "previousState": previous_state,
        "snapshot": snapshot,
    }));
    let out = render(&input);
    let state = PersistedState::decode(&out.state_blob);
    (out.frame_text, state)
}

fn tick_blob(snapshot: serde_json::Value, previous_state: &str) -> String {
    let input = frame(json!({ "previousState": previous_state, "snapshot": snapshot }));
    render(&input).state_blob
}

#[test]
fn cpu_fifty_percent_from_tick_deltas() {
    let first = tick_blob(json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 100, "total": 1000 }] } }), "");
    let (text, state) =
        tick(json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 150, "total": 1100 }] } }), &first);

    assert!(strip(&text).contains(" 50%"));
    assert_eq!(state.cpu_history.latest(), Some(50.0));
    assert_eq!(state.cpu_counters["cpu0"].total, 1100);
}

#[test]
fn network_rate_uses_snapshot_timestamps() {
    let first = tick_blob(
        json!({ "timestampMs": 10_000, "network": { "interfaces": [{ "name": "eth0", "rxBytes": 1000 }] } }),
        "",
    );
    let (text, state) = tick(
        json!({ "timestampMs": 12_000, "network": { "interfaces": [{ "name": "eth0", "rxBytes": 1500 }] } }),
        &first,
    );

    assert!(strip(&text).contains("250.0 B/s"));
    assert_eq!(state.net_interface.as_deref(), Some("eth0"));
    assert_eq!(state.net_rx_history.latest(), Some(250.0));
}

#[test]
fn counter_reset_reports_zero() {
    let first = tick_blob(json!({ "network": { "interfaces": [{ "name": "eth0", "rxBytes": 900_000 }] } }), "");
    let (_, state) = tick(json!({ "network": { "interfaces": [{ "name": "eth0", "rxBytes": 10 }] } }), &first);
    assert_eq!(state.net_rx_history.latest(), Some(0.0));
    assert_eq!(state.net_counters["eth0"].rx_bytes, 10);
}

#[test]
fn empty_disk_shows_zero_throughput() {
    let (text, state) = tick(json!({}), "");
    assert!(strip(&text).contains("0 B/s"));
    assert!(state.disk_counters.is_empty());
}

#[test]
fn scroll_past_end_is_clamped() {
    let processes: Vec<_> = (1..=5).map(|pid| json!({ "pid": pid, "name": format!("p{pid}") })).collect();
    let input = frame(json!({
        "viewportHeight": 40,
        "processScrollOffset": 100,
        "processSelectionIndex": -4,
        "snapshot": { "processes": processes },
    }));
    let state = PersistedState::decode(&render(&input).state_blob);

    assert_eq!(state.process_max_scroll, 0);
    assert_eq!(state.process_scroll_offset, 0);
    assert_eq!(state.process_selected_index, 0);
    assert_eq!(state.process_selected_pid, Some(1));
}

#[test]
fn selection_follows_sort_not_stale_pid() {
    let processes = json!([
        { "pid": 10, "name": "zeta", "cpuPercent": 5.0 },
        { "pid": 20, "name": "alpha", "cpuPercent": 50.0 },
    ]);
    let by_cpu = frame(json!({ "selectedPid": 10, "snapshot": { "processes": processes } }));
    let state = PersistedState::decode(&render(&by_cpu).state_blob);
    assert_eq!(state.process_selected_pid, Some(20));

    let by_name = frame(json!({ "sortKey": "name", "selectedPid": 20, "snapshot": { "processes": processes } }));
    let state = PersistedState::decode(&render(&by_name).state_blob);
    assert_eq!(state.process_selected_pid, Some(20));

    let reversed = frame(json!({ "sortKey": "name", "sortReversed": true, "snapshot": { "processes": processes } }));
    let state = PersistedState::decode(&render(&reversed).state_blob);
    assert_eq!(state.process_selected_pid, Some(10));
}

#[test]
fn unknown_theme_renders_like_default() {
    let snapshot = json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 40, "total": 100 }] } });
    let default = render(&frame(json!({ "theme": "default", "snapshot": snapshot })));
    let unknown = render(&frame(json!({ "theme": "no-such-theme", "snapshot": snapshot })));
    assert_eq!(default.frame_text, unknown.frame_text);
}

#[test]
fn garbage_state_is_a_cold_start() {
    let (text, state) = tick(json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 150, "total": 1100 }] } }), "%%%");
    assert!(strip(&text).contains("  0%"));
    assert_eq!(state.cpu_history.len(), 1);
}

#[test]
fn frame_never_exceeds_viewport() {
    for (w, h) in [(40, 12), (80, 24), (200, 60)] {
        let input = frame(json!({ "viewportWidth": w, "viewportHeight": h, "showHelp": w == 80 }));
        let text = render(&input).frame_text;
        let lines: Vec<&str> = text.split('\n').collect();
        assert!(lines.len() <= h);
        assert!(lines.iter().all(|l| visual_width(l) <= w));
    }
}

#[test]
fn history_is_bounded_across_many_ticks() {
    let mut blob = String::new();
    for i in 0..80u64 {
        let snapshot = json!({ "cpu": { "cores": [{ "name": "cpu0", "active": i * 10, "total": i * 100 + 1 }] } });
        blob = tick_blob(snapshot, &blob);
    }
    let state = PersistedState::decode(&blob);
    assert_eq!(state.cpu_history.len(), tmon::history::HISTORY_LEN);
}

#[test]
fn control_characters_in_snapshot_text_keep_the_frame_rectangular() {
    let input = frame(json!({
        "viewportWidth": 100,
        "viewportHeight": 30,
        "snapshot": {
            "system": { "hostname": "host\u{1b}[2J" },
            "network": { "interfaces": [{ "name": "eth\n0", "rxBytes": 10 }] },
            "disk": { "mounts": [{ "mountPoint": "/data\t1", "device": "/dev/sda1", "total": 100, "used": 50 }] },
            "temperatures": [{ "label": "pkg\r", "celsius": 50.0 }],
            "processes": [
                { "pid": 1, "name": "evil", "command": "evil\nINJECTED\u{1b}[2J" },
                { "pid": 2, "name": "tabs", "command": "a\tb\tc" },
            ],
        },
    }));
    let text = render(&input).frame_text;
    assert!(!text.contains("\x1b[2J"));
    assert!(!text.contains('\t'));

    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 30);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(visual_width(line), 100, "line {i}: {line:?}");
    }
    assert!(strip(&text).contains("evil INJECTED [2J"));
}

#[test]
fn cpu_entry_without_total_is_dropped_not_saturated() {
    let first = tick_blob(json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 1000 }] } }), "");
    let (_, state) = tick(json!({ "cpu": { "cores": [{ "name": "cpu0", "active": 1001 }] } }), &first);
    assert_eq!(state.cpu_history.latest(), Some(0.0));
    assert!(state.cpu_counters.is_empty());
}
