//! CPU usage from per-core snapshots.
//!
//! Two platform shapes are supported (see
//! [`CpuReading`](crate::snapshot::CpuReading)): pre-computed percentages pass
//! through clamped, cumulative tick counters are differenced against the
//! previous tick. A core seen for the first time reports 0%.
//!
//! Per-core values are only ever what the platform reports. When a platform
//! supplies just the aggregate line, the aggregate is the only row; nothing
//! is synthesized per core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{compute_all, counter_delta, RateContext, RateResult, RateSource};
use crate::snapshot::{CpuCoreSample, CpuReading, CpuSnapshot};

/// Key under which an unnamed aggregate line is stored.
pub const AGGREGATE_KEY: &str = "cpu";

/// Tick counters carried to the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuCounters {
    /// Busy ticks.
    pub active: u64,
    /// All ticks.
    pub total: u64,
}

/// CPU usage for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuUsage {
    /// Overall usage.
    pub total: RateResult,
    /// Per-core usage, in snapshot order.
    pub cores: Vec<RateResult>,
    /// Current frequency in MHz.
    pub frequency_mhz: Option<f64>,
}

impl RateSource for CpuCoreSample {
    type Key = String;
    type Counters = CpuCounters;
    type Output = RateResult;

    fn key(&self) -> String {
        if self.name.is_empty() {
            AGGREGATE_KEY.to_string()
        } else {
            self.name.clone()
        }
    }

    fn counters(&self) -> Option<CpuCounters> {
        match self.reading()? {
            CpuReading::Ticks { active, total } => Some(CpuCounters { active, total }),
            CpuReading::Percent(_) => None,
        }
    }

    fn compute_rate(&self, previous: Option<&CpuCounters>, _ctx: &RateContext) -> RateResult {
        let percent = match (self.reading(), previous) {
            (Some(CpuReading::Percent(p)), _) => p,
            (Some(CpuReading::Ticks { active, total }), Some(prev)) => {
                let active_delta = counter_delta(prev.active, active);
                let total_delta = counter_delta(prev.total, total).max(1);
                active_delta as f64 * 100.0 / total_delta as f64
            }
            _ => 0.0,
        };
        RateResult::percent(self.key(), percent)
    }
}

/// Computes CPU usage and the counters for the next tick.
///
/// The overall figure comes from the aggregate line when present, otherwise
/// from the mean of the cores. With no cores at all, the aggregate (if any)
/// becomes the single core row.
pub fn compute_cpu(
    snapshot: &CpuSnapshot,
    previous: &BTreeMap<String, CpuCounters>,
    ctx: &RateContext,
) -> (CpuUsage, BTreeMap<String, CpuCounters>) {
    let (mut cores, mut next) = compute_all(&snapshot.cores, previous, ctx);

    let total = match &snapshot.total {
        Some(aggregate) => {
            let key = aggregate.key();
            let result = aggregate.compute_rate(previous.get(&key), ctx);
            if let Some(counters) = aggregate.counters() {
                next.insert(key, counters);
            }
            result
        }
        None if cores.is_empty() => RateResult::percent(AGGREGATE_KEY, 0.0),
        None => {
            let mean = cores.iter().map(|c| c.value).sum::<f64>() / cores.len() as f64;
            RateResult::percent(AGGREGATE_KEY, mean)
        }
    };

    if cores.is_empty() && snapshot.total.is_some() {
        cores.push(total.clone());
    }

    (CpuUsage { total, cores, frequency_mhz: snapshot.frequency_mhz }, next)
}
