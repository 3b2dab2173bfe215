//! Disk space per mount and I/O throughput per block device.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{compute_all, counter_rate, RateContext, RateResult, RateSource};
use crate::format::contains_ignore_case;
use crate::snapshot::{DiskIoSample, DiskSnapshot, MountSample};

/// Bytes per kernel sector.
pub const SECTOR_SIZE: u64 = 512;

/// Sector counters carried to the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskIoCounters {
    /// Sectors read.
    pub read_sectors: u64,
    /// Sectors written.
    pub write_sectors: u64,
}

/// Read/write throughput for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskIoRates {
    /// Block device.
    pub device: String,
    /// Read throughput.
    pub read: RateResult,
    /// Write throughput.
    pub write: RateResult,
}

/// Space usage for one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct MountUsage {
    /// Block device.
    pub device: String,
    /// Where it is mounted.
    pub mount_point: String,
    /// Filesystem type.
    pub fs_type: String,
    /// Capacity in bytes.
    pub total: u64,
    /// Bytes used.
    pub used: u64,
    /// Bytes available.
    pub available: u64,
    /// `used / total`.
    pub used_percent: RateResult,
}

impl From<&MountSample> for MountUsage {
    fn from(mount: &MountSample) -> Self {
        let used = if mount.used > 0 { mount.used } else { mount.total.saturating_sub(mount.available) };
        let percent = used as f64 * 100.0 / mount.total.max(1) as f64;
        Self {
            device: mount.device.clone(),
            mount_point: mount.mount_point.clone(),
            fs_type: mount.fs_type.clone(),
            total: mount.total,
            used,
            available: mount.available,
            used_percent: RateResult::percent(mount.mount_point.clone(), percent),
        }
    }
}

/// Disk usage for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskUsage {
    /// Mounts with a nonzero size that pass the filter.
    pub mounts: Vec<MountUsage>,
    /// Devices that pass the filter.
    pub io: Vec<DiskIoRates>,
    /// Read rate summed over `io`.
    pub total_read: RateResult,
    /// Write rate summed over `io`.
    pub total_write: RateResult,
}

impl RateSource for DiskIoSample {
    type Key = String;
    type Counters = DiskIoCounters;
    type Output = DiskIoRates;

    fn key(&self) -> String {
        self.device.clone()
    }

    fn counters(&self) -> Option<DiskIoCounters> {
        Some(DiskIoCounters { read_sectors: self.read_sectors, write_sectors: self.write_sectors })
    }

    fn compute_rate(&self, previous: Option<&DiskIoCounters>, ctx: &RateContext) -> DiskIoRates {
        let (read, write) = match previous {
            Some(prev) => (
                counter_rate(prev.read_sectors, self.read_sectors, ctx.interval) * SECTOR_SIZE as f64,
                counter_rate(prev.write_sectors, self.write_sectors, ctx.interval) * SECTOR_SIZE as f64,
            ),
            None => (0.0, 0.0),
        };
        DiskIoRates {
            device: self.device.clone(),
            read: RateResult::throughput(self.device.clone(), read),
            write: RateResult::throughput(self.device.clone(), write),
        }
    }
}

/// Computes mount usage and device throughput.
///
/// `filter` narrows both lists by case-insensitive substring on the mount
/// point or device name. Counters are kept for every device regardless of
/// the filter, so changing it does not reset rates.
pub fn compute_disk(
    snapshot: &DiskSnapshot,
    previous: &BTreeMap<String, DiskIoCounters>,
    ctx: &RateContext,
    filter: &str,
) -> (DiskUsage, BTreeMap<String, DiskIoCounters>) {
    let needle = filter.trim().to_lowercase();
    let matches = |text: &str| needle.is_empty() || contains_ignore_case(text, &needle);

    let mounts: Vec<MountUsage> = snapshot
        .mounts
        .iter()
        .filter(|m| m.total > 0)
        .filter(|m| matches(&m.mount_point) || matches(&m.device))
        .map(MountUsage::from)
        .collect();

    let (io, next) = compute_all(&snapshot.io, previous, ctx);
    let io: Vec<DiskIoRates> = io.into_iter().filter(|d| matches(&d.device)).collect();

    let read_sum: f64 = io.iter().map(|d| d.read.value).sum();
    let write_sum: f64 = io.iter().map(|d| d.write.value).sum();

    let usage = DiskUsage {
        mounts,
        io,
        total_read: RateResult::throughput("read", read_sum),
        total_write: RateResult::throughput("write", write_sum),
    };
    (usage, next)
}
