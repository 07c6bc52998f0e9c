//! Normalization of raw source readings into metric samples.
//!
//! Sources hand over whatever they managed to read; every missing reading turns into an
//! absent sample here instead of failing the cycle.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::metrics::{MetricKind, MetricSample};

/// One storage device as reported by the device source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDevice {
    pub path: String,
    pub used_percent: Option<f64>,
    pub temperature_celsius: Option<f64>,
}

/// A mounted filesystem's capacity in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMount {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMemory {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSwap {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawService {
    pub name: String,
    /// `None` when the state could not be queried at all.
    pub active: Option<bool>,
    pub uptime: Option<Duration>,
}

/// Everything the sources produced for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSamples {
    pub devices: Vec<RawDevice>,
    /// Largest tmpfs/ramfs mount, if any is mounted.
    pub ramdisk: Option<RawMount>,
    pub memory: Option<RawMemory>,
    pub swap: Option<RawSwap>,
    pub io_wait_percent: Option<f64>,
    pub cpu_temperature: Option<f64>,
    pub service: RawService,
}

/// Per-category grouping of one cycle's metrics.
///
/// Holds samples after normalization and verdicts after evaluation, so both stages
/// share one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health<M> {
    /// `None` when no storage device was discovered, which is not the same as
    /// every device being unreadable.
    pub devices: Option<Vec<Device<M>>>,
    pub ramdisk: Option<Capacity<M>>,
    pub memory: Capacity<M>,
    pub swap: Swap<M>,
    pub io_wait: M,
    pub cpu_temperature: M,
    pub service: Service<M>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device<M> {
    pub label: String,
    pub path: String,
    pub usage: M,
    pub temperature: M,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteUsage {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity<M> {
    pub mount_point: Option<String>,
    pub bytes: Option<ByteUsage>,
    pub free: M,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swap<M> {
    pub total_bytes: Option<u64>,
    pub usage: M,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service<M> {
    pub name: String,
    pub liveness: M,
    pub uptime: Option<Duration>,
}

/// Normalized view of one cycle's readings.
pub type HealthSnapshot = Health<MetricSample>;

impl<M> Health<M> {
    /// Every metric in report order.
    pub fn metrics(&self) -> Vec<&M> {
        let mut metrics = Vec::new();
        for device in self.devices.iter().flatten() {
            metrics.push(&device.usage);
            metrics.push(&device.temperature);
        }
        if let Some(ramdisk) = &self.ramdisk {
            metrics.push(&ramdisk.free);
        }
        metrics.push(&self.memory.free);
        metrics.push(&self.swap.usage);
        metrics.push(&self.io_wait);
        metrics.push(&self.cpu_temperature);
        metrics.push(&self.service.liveness);
        metrics
    }

    /// Same layout with every metric transformed by `f`.
    pub fn map<N, F: Fn(&M) -> N>(&self, f: F) -> Health<N> {
        let capacity = |c: &Capacity<M>| Capacity {
            mount_point: c.mount_point.clone(),
            bytes: c.bytes,
            free: f(&c.free),
        };

        Health {
            devices: self.devices.as_ref().map(|devices| {
                devices
                    .iter()
                    .map(|dev| Device {
                        label: dev.label.clone(),
                        path: dev.path.clone(),
                        usage: f(&dev.usage),
                        temperature: f(&dev.temperature),
                    })
                    .collect()
            }),
            ramdisk: self.ramdisk.as_ref().map(capacity),
            memory: capacity(&self.memory),
            swap: Swap {
                total_bytes: self.swap.total_bytes,
                usage: f(&self.swap.usage),
            },
            io_wait: f(&self.io_wait),
            cpu_temperature: f(&self.cpu_temperature),
            service: Service {
                name: self.service.name.clone(),
                liveness: f(&self.service.liveness),
                uptime: self.service.uptime,
            },
        }
    }
}

pub fn normalize(raw: &RawSamples) -> HealthSnapshot {
    Health {
        devices: normalize_devices(&raw.devices),
        ramdisk: raw.ramdisk.as_ref().map(normalize_ramdisk),
        memory: normalize_memory(raw.memory.as_ref()),
        swap: normalize_swap(raw.swap.as_ref()),
        io_wait: MetricSample::number(MetricKind::IoWait, raw.io_wait_percent),
        cpu_temperature: MetricSample::number(MetricKind::CpuTemperature, raw.cpu_temperature),
        service: Service {
            name: raw.service.name.clone(),
            liveness: MetricSample::state(MetricKind::Liveness, raw.service.active)
                .with_context(raw.service.name.clone()),
            uptime: raw.service.uptime,
        },
    }
}

fn normalize_devices(devices: &[RawDevice]) -> Option<Vec<Device<MetricSample>>> {
    if devices.is_empty() {
        return None;
    }

    let mut sorted: Vec<&RawDevice> = devices.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    Some(
        sorted
            .into_iter()
            .map(|dev| {
                let label = device_label(&dev.path);
                Device {
                    usage: MetricSample::number(MetricKind::DeviceUsage, dev.used_percent)
                        .with_context(label.clone()),
                    temperature: MetricSample::number(
                        MetricKind::DeviceTemperature,
                        dev.temperature_celsius,
                    )
                    .with_context(label.clone()),
                    path: dev.path.clone(),
                    label,
                }
            })
            .collect(),
    )
}

/// `/dev/nvme0n1` -> `nvme0n1`
fn device_label(path: &str) -> String {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

fn normalize_ramdisk(mount: &RawMount) -> Capacity<MetricSample> {
    Capacity {
        mount_point: Some(mount.mount_point.clone()),
        bytes: Some(ByteUsage {
            used: mount.used_bytes,
            total: mount.total_bytes,
        }),
        free: MetricSample::number(
            MetricKind::RamdiskFree,
            free_percent(mount.total_bytes, mount.used_bytes),
        )
        .with_context(mount.mount_point.clone()),
    }
}

fn normalize_memory(memory: Option<&RawMemory>) -> Capacity<MetricSample> {
    Capacity {
        mount_point: None,
        bytes: memory.map(|mem| ByteUsage {
            used: mem.used_bytes,
            total: mem.total_bytes,
        }),
        free: MetricSample::number(
            MetricKind::RamFree,
            memory.and_then(|mem| percent_of(mem.available_bytes, mem.total_bytes)),
        ),
    }
}

fn normalize_swap(swap: Option<&RawSwap>) -> Swap<MetricSample> {
    Swap {
        total_bytes: swap.map(|s| s.total_bytes),
        // No swap configured reads as 0% used
        usage: MetricSample::number(
            MetricKind::SwapUsage,
            swap.map(|s| percent_of(s.used_bytes, s.total_bytes).unwrap_or(0.0)),
        ),
    }
}

/// Free space as a percentage of capacity, derived from total and used.
pub fn free_percent(total: u64, used: u64) -> Option<f64> {
    percent_of(total.saturating_sub(used), total)
}

fn percent_of(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}
