//! Platform snapshot records.
//!
//! A [`PlatformSnapshot`] is one tick's raw counters for every subsystem,
//! produced by the external snapshot provider. Every field carries a serde
//! default, so an absent subsystem decodes as an empty but valid value.
//! [`PlatformSnapshot::sanitize`] is the single validation step: entries
//! that fail structural checks are dropped there, and nothing downstream
//! checks for presence again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MonitorError, Result};

/// All subsystems for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformSnapshot {
    /// Capture time in milliseconds, used to derive the tick interval.
    pub timestamp_ms: Option<u64>,
    /// Host-level information.
    pub system: SystemInfo,
    /// CPU counters.
    pub cpu: CpuSnapshot,
    /// Memory totals.
    pub memory: MemorySnapshot,
    /// Mounts and block device counters.
    pub disk: DiskSnapshot,
    /// Network interface counters.
    pub network: NetworkSnapshot,
    /// Process list.
    pub processes: Vec<ProcessSample>,
    /// Temperature sensors.
    pub temperatures: Vec<TempSensor>,
    /// Battery state.
    pub battery: BatterySnapshot,
}

/// Host-level information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemInfo {
    /// Host name.
    pub hostname: String,
    /// Seconds since boot.
    pub uptime_secs: u64,
    /// 1, 5 and 15 minute load averages.
    pub load_average: Option<[f64; 3]>,
    /// Clock ticks per second for process CPU times.
    pub ticks_per_second: u64,
    /// Logical core count; 0 means "count the CPU snapshot's cores".
    pub core_count: usize,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            uptime_secs: 0,
            load_average: None,
            ticks_per_second: 100,
            core_count: 0,
        }
    }
}

/// CPU counters: an optional aggregate line plus one entry per core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CpuSnapshot {
    /// Aggregate over all cores, if the platform reports one.
    pub total: Option<CpuCoreSample>,
    /// Per-core samples.
    pub cores: Vec<CpuCoreSample>,
    /// Current frequency in MHz.
    pub frequency_mhz: Option<f64>,
}

/// One CPU line as delivered by the platform.
///
/// Two shapes share this record. A `total` of exactly 100 marks an
/// instantaneous percentage in `active`. Anything else is a pair of
/// cumulative tick counters. When `active`/`total` are absent they are
/// derived from the per-state breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CpuCoreSample {
    /// Core name (`cpu0`, `cpu1`, ...); the identity key across ticks.
    pub name: String,
    /// Busy ticks, or busy percent when `total == 100`.
    pub active: Option<f64>,
    /// Total ticks, or the sentinel 100.
    pub total: Option<f64>,
    /// User ticks.
    pub user: f64,
    /// Niced user ticks.
    pub nice: f64,
    /// System ticks.
    pub system: f64,
    /// Idle ticks.
    pub idle: f64,
    /// I/O wait ticks.
    pub iowait: f64,
    /// Hard IRQ ticks.
    pub irq: f64,
    /// Soft IRQ ticks.
    pub softirq: f64,
    /// Stolen ticks.
    pub steal: f64,
}

/// A validated CPU reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpuReading {
    /// Pre-computed instantaneous usage, already a percentage.
    Percent(f64),
    /// Cumulative counters requiring a delta against the previous tick.
    Ticks {
        /// Busy ticks.
        active: u64,
        /// All ticks.
        total: u64,
    },
}

/// Sentinel `total` marking the percentage shape.
pub const PERCENT_SENTINEL: f64 = 100.0;

impl CpuCoreSample {
    /// Classifies this sample, or `None` if it is malformed.
    #[must_use]
    pub fn reading(&self) -> Option<CpuReading> {
        let breakdown_active =
            self.user + self.nice + self.system + self.irq + self.softirq + self.steal;
        let active = self.active.unwrap_or(breakdown_active);
        let total = self.total.unwrap_or(breakdown_active + self.idle + self.iowait);

        if !active.is_finite() || !total.is_finite() || active < 0.0 || total < 0.0 {
            return None;
        }

        if (total - PERCENT_SENTINEL).abs() < f64::EPSILON {
            Some(CpuReading::Percent(active.clamp(0.0, 100.0)))
        } else if active > total {
            // busy time can never exceed elapsed time
            None
        } else {
            Some(CpuReading::Ticks { active: active as u64, total: total as u64 })
        }
    }
}

/// Memory totals in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemorySnapshot {
    /// Physical memory.
    pub total: u64,
    /// Used memory; 0 means "derive from total - available".
    pub used: u64,
    /// Available memory.
    pub available: u64,
    /// Free memory.
    pub free: u64,
    /// Page cache.
    pub cached: u64,
    /// Swap size.
    pub swap_total: u64,
    /// Swap in use.
    pub swap_used: u64,
}

/// Mounts and per-device I/O counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiskSnapshot {
    /// Mounted filesystems.
    pub mounts: Vec<MountSample>,
    /// Block device counters.
    pub io: Vec<DiskIoSample>,
}

/// One mounted filesystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MountSample {
    /// Backing device.
    pub device: String,
    /// Mount point.
    pub mount_point: String,
    /// Filesystem type.
    pub fs_type: String,
    /// Capacity in bytes.
    pub total: u64,
    /// Used bytes.
    pub used: u64,
    /// Available bytes.
    pub available: u64,
}

/// Cumulative sector counters for one block device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiskIoSample {
    /// Device name (`sda`, `nvme0n1`).
    pub device: String,
    /// Sectors read.
    pub read_sectors: u64,
    /// Sectors written.
    pub write_sectors: u64,
}

/// Interface list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkSnapshot {
    /// Interfaces.
    pub interfaces: Vec<InterfaceSample>,
}

/// Cumulative counters for one interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceSample {
    /// Interface name; the identity key across ticks.
    pub name: String,
    /// Bytes received.
    pub rx_bytes: u64,
    /// Packets received.
    pub rx_packets: u64,
    /// Bytes transmitted.
    pub tx_bytes: u64,
    /// Packets transmitted.
    pub tx_packets: u64,
}

/// One process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessSample {
    /// Process ID.
    pub pid: u32,
    /// Parent process ID.
    pub ppid: u32,
    /// Short name.
    pub name: String,
    /// Owning user.
    pub user: String,
    /// State letter (`R`, `S`, `D`, `Z`, `T`, ...).
    pub state: String,
    /// Platform pre-computed CPU percent; 0 means "derive from ticks".
    pub cpu_percent: f64,
    /// Cumulative CPU time in clock ticks.
    pub cpu_time_ticks: u64,
    /// Resident memory in KiB.
    pub memory_kb: u64,
    /// Thread count.
    pub threads: u32,
    /// Full command line.
    pub command: String,
}

/// A named temperature reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TempSensor {
    /// Sensor label.
    pub label: String,
    /// Temperature in °C.
    pub celsius: f64,
}

/// Battery state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatterySnapshot {
    /// Whether a battery exists.
    pub present: bool,
    /// Charge percentage.
    pub capacity: f64,
    /// Charging now.
    pub charging: bool,
    /// Discharging now.
    pub discharging: bool,
    /// Platform status text.
    pub status: String,
    /// Estimated seconds to empty/full.
    pub time_remaining_secs: Option<u64>,
}

impl PlatformSnapshot {
    /// Decodes a snapshot document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MonitorError::SnapshotDecode(e.to_string()))
    }

    /// Drops malformed entries and returns the cleaned snapshot.
    ///
    /// A CPU line with non-finite or negative counters, an interface or
    /// block device without a name, a mount without a mount point, a
    /// process without a name, and a sensor with a non-finite reading are
    /// all removed. Duplicate identity keys keep the first entry. Control
    /// characters in any text field become spaces so a single entry can
    /// neither break a line nor emit an escape sequence.
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        let before = self.entry_count();
        self.clean_text();

        self.cpu.cores.retain(|c| !c.name.is_empty() && c.reading().is_some());
        dedup_by_key(&mut self.cpu.cores, |c| c.name.clone());
        if self.cpu.total.as_ref().is_some_and(|t| t.reading().is_none()) {
            self.cpu.total = None;
        }
        if self.cpu.frequency_mhz.is_some_and(|f| !f.is_finite() || f <= 0.0) {
            self.cpu.frequency_mhz = None;
        }

        self.network.interfaces.retain(|i| !i.name.is_empty());
        dedup_by_key(&mut self.network.interfaces, |i| i.name.clone());

        self.disk.mounts.retain(|m| !m.mount_point.is_empty());
        self.disk.io.retain(|d| !d.device.is_empty());
        dedup_by_key(&mut self.disk.io, |d| d.device.clone());

        self.processes.retain(|p| !p.name.is_empty() && p.cpu_percent.is_finite());
        dedup_by_key(&mut self.processes, |p| p.pid);

        self.temperatures.retain(|t| t.celsius.is_finite());

        if !self.battery.capacity.is_finite() {
            self.battery.capacity = 0.0;
        }
        if self.system.ticks_per_second == 0 {
            self.system.ticks_per_second = 100;
        }
        if let Some(load) = self.system.load_average {
            if load.iter().any(|l| !l.is_finite()) {
                self.system.load_average = None;
            }
        }

        let dropped = before - self.entry_count();
        if dropped > 0 {
            debug!(dropped, "dropped malformed snapshot entries");
        }
        self
    }

    fn clean_text(&mut self) {
        clean(&mut self.system.hostname);
        if let Some(total) = &mut self.cpu.total {
            clean(&mut total.name);
        }
        for core in &mut self.cpu.cores {
            clean(&mut core.name);
        }
        for iface in &mut self.network.interfaces {
            clean(&mut iface.name);
        }
        for mount in &mut self.disk.mounts {
            clean(&mut mount.device);
            clean(&mut mount.mount_point);
            clean(&mut mount.fs_type);
        }
        for io in &mut self.disk.io {
            clean(&mut io.device);
        }
        for p in &mut self.processes {
            clean(&mut p.name);
            clean(&mut p.user);
            clean(&mut p.state);
            clean(&mut p.command);
        }
        for sensor in &mut self.temperatures {
            clean(&mut sensor.label);
        }
        clean(&mut self.battery.status);
    }

    /// Logical core count: the system value, else the number of cores.
    #[must_use]
    pub fn core_count(&self) -> usize {
        if self.system.core_count > 0 {
            self.system.core_count
        } else {
            self.cpu.cores.len().max(1)
        }
    }

    fn entry_count(&self) -> usize {
        self.cpu.cores.len()
            + self.network.interfaces.len()
            + self.disk.mounts.len()
            + self.disk.io.len()
            + self.processes.len()
            + self.temperatures.len()
    }
}

/// Replaces control characters (newline, tab, ESC, DEL, C1) with spaces.
fn clean(text: &mut String) {
    if text.chars().any(char::is_control) {
        *text = text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
    }
}

fn dedup_by_key<T, K: PartialEq + Ord + Clone>(items: &mut Vec<T>, key: impl Fn(&T) -> K) {
    let mut seen = std::collections::BTreeSet::new();
    items.retain(|item| seen.insert(key(item)));
}
