//! Per-process CPU and memory percentages, plus sorting and filtering of
//! the process table.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{compute_all, counter_delta, RateContext, RateResult, RateSource};
use crate::format::contains_ignore_case;
use crate::snapshot::ProcessSample;

/// Process table sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// CPU usage, busiest first.
    #[default]
    Cpu,
    /// Memory share, largest first.
    Mem,
    /// Process ID, ascending.
    Pid,
    /// Name, A to Z ignoring case.
    Name,
}

impl SortKey {
    /// Column header label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU%",
            Self::Mem => "MEM%",
            Self::Pid => "PID",
            Self::Name => "NAME",
        }
    }

    /// Usage columns sort busiest first; identity columns ascending.
    #[must_use]
    pub fn descending_by_default(self) -> bool {
        matches!(self, Self::Cpu | Self::Mem)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cpu => "cpu",
            Self::Mem => "mem",
            Self::Pid => "pid",
            Self::Name => "name",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "mem" | "memory" => Ok(Self::Mem),
            "pid" => Ok(Self::Pid),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort key '{other}' (expected cpu, mem, pid or name)")),
        }
    }
}

/// One row of the process table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    /// Process ID.
    pub pid: u32,
    /// Parent process ID.
    pub ppid: u32,
    /// Short name.
    pub name: String,
    /// Owner.
    pub user: String,
    /// Scheduler state letter.
    pub state: String,
    /// CPU usage, 0-100.
    pub cpu: RateResult,
    /// Share of physical memory.
    pub mem: RateResult,
    /// Resident set in KiB.
    pub memory_kb: u64,
    /// Thread count.
    pub threads: u32,
    /// Full command line.
    pub command: String,
}

impl ProcessRow {
    fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || contains_ignore_case(&self.name, needle_lower)
            || contains_ignore_case(&self.command, needle_lower)
            || contains_ignore_case(&self.user, needle_lower)
            || self.pid.to_string().contains(needle_lower)
    }
}

impl RateSource for ProcessSample {
    type Key = u32;
    type Counters = u64;
    type Output = ProcessRow;

    fn key(&self) -> u32 {
        self.pid
    }

    fn counters(&self) -> Option<u64> {
        Some(self.cpu_time_ticks)
    }

    fn compute_rate(&self, previous: Option<&u64>, ctx: &RateContext) -> ProcessRow {
        let cpu = if self.cpu_percent.is_finite() && self.cpu_percent > 0.0 {
            self.cpu_percent
        } else if let Some(&prev_ticks) = previous {
            let delta = counter_delta(prev_ticks, self.cpu_time_ticks) as f64;
            let capacity = ctx.secs() * ctx.ticks_per_second.max(1) as f64 * ctx.core_count.max(1) as f64;
            delta / capacity * 100.0
        } else {
            0.0
        };

        let total_kb = (ctx.total_memory_bytes / 1024).max(1);
        let mem = self.memory_kb as f64 * 100.0 / total_kb as f64;

        let label = self.pid.to_string();
        ProcessRow {
            pid: self.pid,
            ppid: self.ppid,
            name: self.name.clone(),
            user: self.user.clone(),
            state: self.state.clone(),
            cpu: RateResult::percent(label.clone(), cpu),
            mem: RateResult::percent(label, mem),
            memory_kb: self.memory_kb,
            threads: self.threads,
            command: self.command.clone(),
        }
    }
}

/// Computes a row per process and the tick counters for the next tick.
pub fn compute_processes(
    samples: &[ProcessSample],
    previous: &BTreeMap<u32, u64>,
    ctx: &RateContext,
) -> (Vec<ProcessRow>, BTreeMap<u32, u64>) {
    compute_all(samples, previous, ctx)
}

/// Filters then sorts rows for display.
///
/// The filter is a case-insensitive substring over name, command, user and
/// PID. `reversed` flips the key's natural direction; ties fall back to
/// ascending PID so the order is stable across ticks.
#[must_use]
pub fn arrange(rows: Vec<ProcessRow>, key: SortKey, reversed: bool, filter: &str) -> Vec<ProcessRow> {
    let needle = filter.trim().to_lowercase();
    let mut rows: Vec<ProcessRow> = rows.into_iter().filter(|r| r.matches(&needle)).collect();

    let descending = key.descending_by_default() != reversed;
    rows.sort_by(|a, b| {
        let cmp = match key {
            SortKey::Cpu => a.cpu.value.total_cmp(&b.cpu.value),
            SortKey::Mem => a.mem.value.total_cmp(&b.mem.value),
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Name => compare_names(&a.name, &b.name),
        };
        let cmp = if descending { cmp.reverse() } else { cmp };
        cmp.then_with(|| a.pid.cmp(&b.pid))
    });
    rows
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars().map(|c| c.to_ascii_lowercase()).cmp(b.chars().map(|c| c.to_ascii_lowercase()))
}
