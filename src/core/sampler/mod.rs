//! Sample sources.
//!
//! Reads the host's telemetry into [`RawSamples`]. Every source fails soft: a
//! missing sensor, command or file leaves its reading empty and the cycle goes on.

pub mod host;
pub mod nvme;
pub mod service;
pub mod thermal;

use std::path::PathBuf;
use std::time::Duration;

use sysinfo::{Components, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::core::health::{
    HostIdentity, RawDevice, RawMemory, RawMount, RawSamples, RawService, RawSwap,
};
use crate::platform::{self, MountEntry, PROC_MOUNTS};

/// Anything that can produce one cycle's worth of raw readings.
pub trait SampleSource {
    fn host_identity(&mut self) -> HostIdentity;

    fn collect(&mut self) -> RawSamples;
}

/// Where and how long to look for readings
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub service_name: String,
    pub telegraf_conf: PathBuf,
    pub dev_dir: PathBuf,
    pub mounts_path: PathBuf,
    pub command_timeout: Duration,
    pub iowait_window: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            service_name: "solana.service".to_string(),
            telegraf_conf: PathBuf::from(host::DEFAULT_TELEGRAF_CONF),
            dev_dir: PathBuf::from("/dev"),
            mounts_path: PathBuf::from(PROC_MOUNTS),
            command_timeout: Duration::from_secs(10),
            iowait_window: Duration::from_secs(1),
        }
    }
}

/// Production source backed by sysinfo, procfs and system commands.
pub struct SystemSampler {
    config: SamplerConfig,
    system: System,
    components: Components,
    networks: Networks,
}

impl SystemSampler {
    pub fn new(config: SamplerConfig) -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());

        Self {
            config,
            system: System::new_with_specifics(refresh_kind),
            components: Components::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }

    fn collect_devices(&self) -> Vec<RawDevice> {
        let paths = nvme::discover_devices(&self.config.dev_dir);
        if paths.is_empty() {
            return Vec::new();
        }

        let cli_available = platform::is_available(nvme::NVME_CLI);
        if !cli_available {
            log::warn!("{} not found on PATH, device readings unavailable", nvme::NVME_CLI);
        }

        paths
            .iter()
            .map(|path| nvme::read_device(path, cli_available, self.config.command_timeout))
            .collect()
    }

    fn collect_ramdisk(&self) -> Option<RawMount> {
        let mounts = match platform::read_mounts(&self.config.mounts_path) {
            Ok(mounts) => mounts,
            Err(e) => {
                log::warn!("Cannot read {:?}: {}", self.config.mounts_path, e);
                return None;
            }
        };

        largest_ramdisk(&mounts, |mount_point| {
            platform::fs_usage(mount_point)
                .map_err(|e| log::debug!("statvfs {}: {}", mount_point, e))
                .ok()
        })
    }

    fn collect_memory(&mut self) -> (Option<RawMemory>, Option<RawSwap>) {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let memory = (total > 0).then(|| RawMemory {
            total_bytes: total,
            available_bytes: self.system.available_memory(),
            used_bytes: self.system.used_memory(),
        });
        let swap = RawSwap {
            total_bytes: self.system.total_swap(),
            used_bytes: self.system.used_swap(),
        };

        (memory, Some(swap))
    }

    fn collect_iowait(&self) -> Option<f64> {
        platform::sample_iowait(self.config.iowait_window)
            .map_err(|e| log::warn!("I/O wait sampling failed: {}", e))
            .ok()
            .flatten()
    }

    fn collect_cpu_temperature(&mut self) -> Option<f64> {
        self.components.refresh(true);
        let temp = thermal::cpu_temperature(&self.components);
        if temp.is_none() {
            log::debug!("No temperature sensors reported a reading");
        }
        temp
    }

    fn collect_service(&self) -> RawService {
        let name = &self.config.service_name;
        let timeout = self.config.command_timeout;

        let active = service::is_active(name, timeout);
        let uptime = match active {
            Some(true) => service::uptime(name, timeout, chrono::Utc::now()),
            _ => None,
        };

        RawService {
            name: name.clone(),
            active,
            uptime,
        }
    }
}

impl SampleSource for SystemSampler {
    fn host_identity(&mut self) -> HostIdentity {
        self.networks.refresh(true);
        host::host_identity(&self.config.telegraf_conf, &self.networks)
    }

    fn collect(&mut self) -> RawSamples {
        let devices = self.collect_devices();
        let ramdisk = self.collect_ramdisk();
        let (memory, swap) = self.collect_memory();
        let io_wait_percent = self.collect_iowait();
        let cpu_temperature = self.collect_cpu_temperature();
        let service = self.collect_service();

        log::debug!(
            "Sampled {} device(s), ramdisk={}, iowait={:?}, cpu_temp={:?}, service_active={:?}",
            devices.len(),
            ramdisk.is_some(),
            io_wait_percent,
            cpu_temperature,
            service.active
        );

        RawSamples {
            devices,
            ramdisk,
            memory,
            swap,
            io_wait_percent,
            cpu_temperature,
            service,
        }
    }
}

/// The tmpfs/ramfs mount with the largest capacity. Mounts whose usage cannot be read are skipped.
pub fn largest_ramdisk<F>(mounts: &[MountEntry], usage: F) -> Option<RawMount>
where
    F: Fn(&str) -> Option<platform::FsUsage>,
{
    mounts
        .iter()
        .filter(|m| m.fs_type == "tmpfs" || m.fs_type == "ramfs")
        .filter_map(|m| {
            usage(&m.mount_point).map(|u| RawMount {
                mount_point: m.mount_point.clone(),
                total_bytes: u.total_bytes,
                used_bytes: u.used_bytes,
            })
        })
        // Ties keep the first mount listed
        .fold(None, |best: Option<RawMount>, candidate| match best {
            Some(b) if b.total_bytes >= candidate.total_bytes => Some(b),
            _ => Some(candidate),
        })
}
