//! Aggregate CPU time counters from `/proc/stat`.

use std::fs;
use std::thread;
use std::time::Duration;

use crate::error::{HostwatchError, Result};

pub const PROC_STAT: &str = "/proc/stat";

/// Jiffy counters from the aggregate `cpu` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// Parse the first `cpu ` line of a `/proc/stat` dump.
    pub fn parse(content: &str) -> Option<Self> {
        let line = content.lines().find(|l| l.starts_with("cpu "))?;
        let values: Vec<u64> = line
            .split_whitespace()
            .skip(1)
            .map(|v| v.parse().ok())
            .collect::<Option<_>>()?;

        if values.len() < 4 {
            return None;
        }
        let field = |idx: usize| values.get(idx).copied().unwrap_or(0);

        Some(Self {
            user: field(0),
            nice: field(1),
            system: field(2),
            idle: field(3),
            iowait: field(4),
            irq: field(5),
            softirq: field(6),
            steal: field(7),
        })
    }

    /// guest/guest_nice are already folded into user/nice by the kernel
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }
}

/// Share of elapsed CPU time spent waiting on I/O between two readings.
pub fn iowait_percent(before: &CpuTimes, after: &CpuTimes) -> Option<f64> {
    let total = after.total().checked_sub(before.total())?;
    if total == 0 {
        return None;
    }
    let iowait = after.iowait.saturating_sub(before.iowait);
    Some(iowait as f64 / total as f64 * 100.0)
}

fn read_cpu_times() -> Result<CpuTimes> {
    let content = fs::read_to_string(PROC_STAT)?;
    CpuTimes::parse(&content)
        .ok_or_else(|| HostwatchError::other("no aggregate cpu line in /proc/stat"))
}

/// Sample I/O wait over `window`. Blocks for the duration of the window.
pub fn sample_iowait(window: Duration) -> Result<Option<f64>> {
    let before = read_cpu_times()?;
    thread::sleep(window);
    let after = read_cpu_times()?;
    Ok(iowait_percent(&before, &after))
}
