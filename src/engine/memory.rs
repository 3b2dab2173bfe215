//! Memory pressure. Stateless: memory counters are gauges, not monotonic.

use super::RateResult;
use crate::snapshot::MemorySnapshot;

/// Memory and swap usage for one tick, in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryUsage {
    /// Physical memory in bytes.
    pub total: u64,
    /// Bytes in use.
    pub used: u64,
    /// Bytes available to new allocations.
    pub available: u64,
    /// Unused bytes.
    pub free: u64,
    /// Page cache bytes.
    pub cached: u64,
    /// Swap size in bytes.
    pub swap_total: u64,
    /// Swap in use.
    pub swap_used: u64,
    /// `used / total`.
    pub used_percent: RateResult,
    /// `swap_used / swap_total`, 0 without swap.
    pub swap_percent: RateResult,
}

impl MemoryUsage {
    /// True if the platform reports any swap.
    #[must_use]
    pub fn has_swap(&self) -> bool {
        self.swap_total > 0
    }
}

/// Derives usage from a memory snapshot.
///
/// A zero `used` falls back to `total - available`.
#[must_use]
pub fn compute_memory(snapshot: &MemorySnapshot) -> MemoryUsage {
    let used = if snapshot.used > 0 {
        snapshot.used
    } else {
        snapshot.total.saturating_sub(snapshot.available)
    };

    MemoryUsage {
        total: snapshot.total,
        used,
        available: snapshot.available,
        free: snapshot.free,
        cached: snapshot.cached,
        swap_total: snapshot.swap_total,
        swap_used: snapshot.swap_used,
        used_percent: RateResult::percent("memory", ratio_percent(used, snapshot.total)),
        swap_percent: RateResult::percent("swap", ratio_percent(snapshot.swap_used, snapshot.swap_total)),
    }
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
