//! Delta/rate engine.
//!
//! Turns two consecutive snapshots of monotonic kernel counters into
//! percentages and byte rates. Each subsystem implements [`RateSource`]:
//! it names its identity key, the counters it carries into the next tick,
//! and how to compute its output from the current sample plus the previous
//! counters. [`compute_all`] folds a whole list of samples against the
//! previous tick's counter map.
//!
//! Arithmetic never fails: counter decreases (reset or wrap) become a zero
//! delta, divisors are floored to 1, percentages are clamped to `0..=100`
//! and throughput to `0..=MAX_THROUGHPUT`.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod process;

pub use cpu::{compute_cpu, CpuCounters, CpuUsage};
pub use disk::{compute_disk, DiskIoCounters, DiskIoRates, DiskUsage, MountUsage};
pub use memory::{compute_memory, MemoryUsage};
pub use network::{compute_network, InterfaceCounters, NetRates, NetworkUsage};
pub use process::{compute_processes, ProcessRow, SortKey};

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::format::{format_percent, format_rate};

/// Throughput ceiling in bytes/sec (1 Tbit/s).
pub const MAX_THROUGHPUT: f64 = 125_000_000_000.0;

/// Interval assumed when the host forwards none.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// What a [`RateResult`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateKind {
    /// A percentage in `0..=100`.
    Percent,
    /// Bytes per second in `0..=MAX_THROUGHPUT`.
    BytesPerSec,
}

/// A clamped per-entity value with its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    /// Entity name (core, interface, device, mount, PID).
    pub name: String,
    /// What `value` measures.
    pub kind: RateKind,
    /// Clamped value.
    pub value: f64,
    /// Formatted value (`" 42%"`, `"1.5 MB/s"`).
    pub display: String,
}

impl RateResult {
    /// A percentage, clamped to `0..=100` (NaN as 0).
    #[must_use]
    pub fn percent(name: impl Into<String>, value: f64) -> Self {
        let value = clamp_percent(value);
        Self { name: name.into(), kind: RateKind::Percent, value, display: format_percent(value) }
    }

    /// A throughput, clamped to `0..=MAX_THROUGHPUT` (NaN as 0).
    #[must_use]
    pub fn throughput(name: impl Into<String>, bytes_per_sec: f64) -> Self {
        let value = if bytes_per_sec.is_nan() { 0.0 } else { bytes_per_sec.clamp(0.0, MAX_THROUGHPUT) };
        Self { name: name.into(), kind: RateKind::BytesPerSec, value, display: format_rate(value) }
    }
}

/// Clamps to `0..=100`, mapping NaN to 0.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Increase of a monotonic counter; a decrease (reset or wrap) counts as 0.
#[must_use]
pub fn counter_delta(previous: u64, current: u64) -> u64 {
    current.saturating_sub(previous)
}

/// Rate of a monotonic counter over `interval`, in units per second.
#[must_use]
pub fn counter_rate(previous: u64, current: u64, interval: Duration) -> f64 {
    counter_delta(previous, current) as f64 / interval_secs(interval)
}

/// Interval in seconds, floored at one millisecond.
#[must_use]
pub fn interval_secs(interval: Duration) -> f64 {
    interval.as_secs_f64().max(0.001)
}

/// Picks the tick interval: snapshot timestamps when both exist and move
/// forward, otherwise the host-forwarded interval.
#[must_use]
pub fn resolve_interval(current_ms: Option<u64>, previous_ms: Option<u64>, fallback: Duration) -> Duration {
    match (current_ms, previous_ms) {
        (Some(cur), Some(prev)) if cur > prev => Duration::from_millis(cur - prev),
        _ if fallback.is_zero() => DEFAULT_INTERVAL,
        _ => fallback,
    }
}

/// Per-tick scale factors shared by every [`RateSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateContext {
    /// Time between the previous and current snapshot.
    pub interval: Duration,
    /// Clock ticks per second for process CPU times.
    pub ticks_per_second: u64,
    /// Logical cores, for normalizing process CPU time.
    pub core_count: usize,
    /// Physical memory, for process memory percentages.
    pub total_memory_bytes: u64,
}

impl RateContext {
    /// A context for `interval` with neutral scale factors.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, ticks_per_second: 100, core_count: 1, total_memory_bytes: 0 }
    }

    /// Sets the clock tick rate (floored at 1).
    #[must_use]
    pub fn ticks_per_second(mut self, ticks: u64) -> Self {
        self.ticks_per_second = ticks.max(1);
        self
    }

    /// Sets the core count (floored at 1).
    #[must_use]
    pub fn core_count(mut self, cores: usize) -> Self {
        self.core_count = cores.max(1);
        self
    }

    /// Sets total physical memory.
    #[must_use]
    pub fn total_memory(mut self, bytes: u64) -> Self {
        self.total_memory_bytes = bytes;
        self
    }

    /// The interval in seconds, floored at one millisecond.
    #[must_use]
    pub fn secs(&self) -> f64 {
        interval_secs(self.interval)
    }
}

/// A snapshot entry whose output depends on the previous tick's counters.
pub trait RateSource {
    /// Stable identity across ticks.
    type Key: Ord + Clone;
    /// What is carried into the next tick.
    type Counters: Clone;
    /// Computed result.
    type Output;

    /// Identity key used to match against the previous tick.
    fn key(&self) -> Self::Key;

    /// Counters to persist, or `None` if this entry carries none.
    fn counters(&self) -> Option<Self::Counters>;

    /// Computes the output; `previous` is `None` on the first sighting.
    fn compute_rate(&self, previous: Option<&Self::Counters>, ctx: &RateContext) -> Self::Output;
}

/// Computes every entry against `previous` and collects the next counters.
///
/// Entries missing from `current` are forgotten; new entries get their
/// first-sighting output.
pub fn compute_all<S: RateSource>(
    current: &[S],
    previous: &BTreeMap<S::Key, S::Counters>,
    ctx: &RateContext,
) -> (Vec<S::Output>, BTreeMap<S::Key, S::Counters>) {
    let mut outputs = Vec::with_capacity(current.len());
    let mut next = BTreeMap::new();

    for entry in current {
        let key = entry.key();
        outputs.push(entry.compute_rate(previous.get(&key), ctx));
        if let Some(counters) = entry.counters() {
            next.insert(key, counters);
        }
    }

    (outputs, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_clamped() {
        assert_eq!(RateResult::percent("x", 150.0).value, 100.0);
        assert_eq!(RateResult::percent("x", -5.0).value, 0.0);
        assert_eq!(RateResult::percent("x", f64::NAN).value, 0.0);
        assert_eq!(RateResult::percent("x", 42.7).display, " 42%");
    }

    #[test]
    fn test_throughput_clamped_and_formatted() {
        let r = RateResult::throughput("eth0", 250.0);
        assert_eq!(r.kind, RateKind::BytesPerSec);
        assert_eq!(r.display, "250.0 B/s");
        assert_eq!(RateResult::throughput("x", -1.0).value, 0.0);
        assert_eq!(RateResult::throughput("x", f64::INFINITY).value, MAX_THROUGHPUT);
    }

    #[test]
    fn test_counter_delta_reset_is_zero() {
        assert_eq!(counter_delta(100, 250), 150);
        assert_eq!(counter_delta(u64::MAX - 10, 5), 0);
        assert_eq!(counter_delta(500, 500), 0);
    }

    #[test]
    fn test_counter_rate() {
        let rate = counter_rate(1000, 1_000_500, Duration::from_secs(2));
        assert_relative_eq!(rate, 499_750.0);
        assert_eq!(counter_rate(10, 5, Duration::from_secs(1)), 0.0);
        // Zero interval does not divide by zero
        assert!(counter_rate(0, 1, Duration::ZERO).is_finite());
    }

    #[test]
    fn test_resolve_interval() {
        let fallback = Duration::from_millis(1500);
        assert_eq!(resolve_interval(Some(3000), Some(1000), fallback), Duration::from_secs(2));
        assert_eq!(resolve_interval(Some(1000), Some(3000), fallback), fallback);
        assert_eq!(resolve_interval(None, Some(3000), fallback), fallback);
        assert_eq!(resolve_interval(None, None, Duration::ZERO), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_context_floors() {
        let ctx = RateContext::new(Duration::ZERO).ticks_per_second(0).core_count(0);
        assert_eq!(ctx.ticks_per_second, 1);
        assert_eq!(ctx.core_count, 1);
        assert!(ctx.secs() > 0.0);
    }
}
