//! NVMe discovery and SMART log parsing.

use std::fs;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::health::RawDevice;
use crate::platform::run_with_timeout;

pub const NVME_CLI: &str = "nvme";

static NAMESPACE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^nvme\d+n1$").ok());
static PERCENTAGE_USED: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"percentage_used\s*:\s*(\d+)%").ok());
static TEMPERATURE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"temperature\s*:\s*(\d+)").ok());

/// First namespace of every NVMe controller under `dev_dir`, sorted by path.
pub fn discover_devices(dev_dir: &Path) -> Vec<String> {
    let Some(pattern) = NAMESPACE.as_ref() else {
        return Vec::new();
    };

    let entries = match fs::read_dir(dev_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot list {:?}: {}", dev_dir, e);
            return Vec::new();
        }
    };

    let mut devices: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path().to_string_lossy().to_string())
        .collect();
    devices.sort();
    devices
}

/// Extract `(percentage_used, temperature)` from `nvme smart-log` output.
pub fn parse_smart_log(output: &str) -> (Option<f64>, Option<f64>) {
    (capture_number(&PERCENTAGE_USED, output), capture_number(&TEMPERATURE, output))
}

fn capture_number(pattern: &Lazy<Option<Regex>>, text: &str) -> Option<f64> {
    pattern
        .as_ref()?
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Query one device. Any failure leaves both readings absent.
pub fn read_device(path: &str, cli_available: bool, timeout: Duration) -> RawDevice {
    let mut device = RawDevice {
        path: path.to_string(),
        ..Default::default()
    };
    if !cli_available {
        return device;
    }

    match run_with_timeout(NVME_CLI, &["smart-log", path], timeout) {
        Ok(output) if output.success => {
            let (used, temperature) = parse_smart_log(&output.stdout);
            device.used_percent = used;
            device.temperature_celsius = temperature;
        }
        Ok(_) => log::debug!("nvme smart-log {} exited with failure", path),
        Err(e) => log::warn!("nvme smart-log {}: {}", path, e),
    }
    device
}
