//! Threshold evaluation.
//!
//! Turns samples into verdicts against the configured limits. Stateless: every cycle is
//! judged on its own readings, with no smoothing or hysteresis.

use serde::{Deserialize, Serialize};

use super::metrics::{
    Direction, MetricKind, MetricSample, MetricVerdict, Reading, Status, Threshold,
};
use super::normalizer::{Health, HealthSnapshot};

/// Configured limits, one per metric kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub disk_usage_percent: f64,   // Alert at/above (%)
    pub ram_free_percent: f64,     // Alert at/below (%)
    pub ramdisk_free_percent: f64, // Alert at/below (%)
    pub io_wait_percent: f64,      // Alert at/above (%)
    pub swap_usage_percent: f64,   // Alert at/above (%)
    pub cpu_temp_critical: f64,    // Alert at/above (°C)
    pub device_temp_critical: f64, // Alert at/above (°C)
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            disk_usage_percent: 50.0,
            ram_free_percent: 8.0,
            ramdisk_free_percent: 8.0,
            io_wait_percent: 4.0,
            swap_usage_percent: 10.0,
            cpu_temp_critical: 90.0,
            device_temp_critical: 60.0,
        }
    }
}

impl Thresholds {
    /// The single policy for a metric kind.
    pub fn policy(&self, kind: MetricKind) -> Threshold {
        let limit = match kind {
            MetricKind::DeviceUsage => self.disk_usage_percent,
            MetricKind::DeviceTemperature => self.device_temp_critical,
            MetricKind::RamdiskFree => self.ramdisk_free_percent,
            MetricKind::RamFree => self.ram_free_percent,
            MetricKind::SwapUsage => self.swap_usage_percent,
            MetricKind::IoWait => self.io_wait_percent,
            MetricKind::CpuTemperature => self.cpu_temp_critical,
            MetricKind::Liveness => 1.0,
        };
        Threshold::for_kind(kind, limit)
    }
}

/// Evaluate one sample against its threshold.
pub fn evaluate(sample: &MetricSample, threshold: &Threshold) -> MetricVerdict {
    let status = match (threshold.direction, sample.value) {
        (Direction::RequireUp, Some(Reading::State(true))) => Status::Ok,
        // A liveness check that could not answer counts as down
        (Direction::RequireUp, _) => Status::Critical,
        (_, None) => Status::Unknown,
        (_, Some(Reading::Number(v))) => {
            if threshold.is_breached(v) {
                Status::Critical
            } else {
                Status::Ok
            }
        }
        (_, Some(Reading::State(_))) => Status::Unknown,
    };

    MetricVerdict {
        kind: sample.kind,
        status,
        value: sample.value,
        context: sample.context.clone(),
        display_text: display_text(sample, threshold, status),
    }
}

fn display_text(sample: &MetricSample, threshold: &Threshold, status: Status) -> String {
    if threshold.direction == Direction::RequireUp {
        return match status {
            Status::Ok => format!("{} UP", status.glyph()),
            _ => format!("{} DOWN", Status::Critical.glyph()),
        };
    }

    match sample.value.as_ref().and_then(Reading::as_number) {
        Some(v) => format!("{:.0}{} {}", v, threshold.unit.suffix(), status.glyph()),
        None => Status::Unknown.glyph().to_string(),
    }
}

/// Every verdict of one cycle, grouped the way the report lays them out.
pub type Assessment = Health<MetricVerdict>;

impl Assessment {
    /// All verdicts in report order.
    pub fn verdicts(&self) -> Vec<&MetricVerdict> {
        self.metrics()
    }

    pub fn is_alert(&self) -> bool {
        self.metrics().iter().any(|v| v.status.is_critical())
    }
}

/// Evaluate a whole snapshot.
pub fn assess(snapshot: &HealthSnapshot, thresholds: &Thresholds) -> Assessment {
    snapshot.map(|sample| evaluate(sample, &thresholds.policy(sample.kind)))
}
