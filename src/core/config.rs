//! Runtime configuration.
//!
//! Built once at startup from command-line flags and environment variables,
//! then handed to the sampler, evaluator and driver by reference.

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;

use crate::core::health::Thresholds;
use crate::core::notifier::TelegramSettings;
use crate::core::sampler::SamplerConfig;
use crate::error::{HostwatchError, Result};

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub thresholds: Thresholds,
    /// Deliver every report, not only alerting ones.
    pub verbose: bool,
    pub interval: Duration,
    pub sampler: SamplerConfig,
    pub telegram: Option<TelegramSettings>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            verbose: false,
            interval: Duration::from_secs(600),
            sampler: SamplerConfig::default(),
            telegram: None,
        }
    }
}

impl MonitorConfig {
    /// Build from matches produced by [`crate::commands::cli::build_cli`].
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let defaults = Thresholds::default();
        let threshold = |id: &str, default: f64| -> f64 {
            matches.get_one::<f64>(id).copied().unwrap_or(default)
        };

        let thresholds = Thresholds {
            disk_usage_percent: threshold("disk-threshold", defaults.disk_usage_percent),
            ram_free_percent: threshold("ram-free-threshold", defaults.ram_free_percent),
            ramdisk_free_percent: threshold(
                "ramdisk-free-threshold",
                defaults.ramdisk_free_percent,
            ),
            io_wait_percent: threshold("iowait-threshold", defaults.io_wait_percent),
            swap_usage_percent: threshold("swap-threshold", defaults.swap_usage_percent),
            cpu_temp_critical: threshold("cpu-temp-crit", defaults.cpu_temp_critical),
            device_temp_critical: threshold("nvme-temp-crit", defaults.device_temp_critical),
        };

        let verbose = match matches.get_one::<String>("debug") {
            Some(value) => parse_debug_flag(value)?,
            None => false,
        };

        let interval_secs = matches.get_one::<u64>("interval").copied().unwrap_or(600);
        let interval = Duration::from_secs(interval_secs);

        let mut sampler = SamplerConfig::default();
        if let Some(service) = matches.get_one::<String>("service") {
            sampler.service_name = service.clone();
        }
        if let Some(path) = matches.get_one::<String>("telegraf-conf") {
            sampler.telegraf_conf = PathBuf::from(path);
        }
        if let Some(secs) = matches.get_one::<u64>("command-timeout") {
            sampler.command_timeout = Duration::from_secs(*secs);
        }

        let telegram = match (
            matches.get_one::<String>("bot-token"),
            matches.get_one::<String>("chat-id"),
        ) {
            (Some(token), Some(chat)) if !token.is_empty() && !chat.is_empty() => {
                Some(TelegramSettings {
                    bot_token: token.clone(),
                    chat_id: chat.clone(),
                    message_thread_id: parse_thread_id(
                        matches.get_one::<String>("thread-id").map(String::as_str),
                    ),
                })
            }
            _ => None,
        };

        let config = Self {
            thresholds,
            verbose,
            interval,
            sampler,
            telegram,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(HostwatchError::config("interval must be at least 1 second"));
        }
        if self.sampler.command_timeout.is_zero() {
            return Err(HostwatchError::config("command timeout must be at least 1 second"));
        }
        if self.sampler.service_name.trim().is_empty() {
            return Err(HostwatchError::config("service name must not be empty"));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("disk usage", t.disk_usage_percent),
            ("RAM free", t.ram_free_percent),
            ("ramdisk free", t.ramdisk_free_percent),
            ("I/O wait", t.io_wait_percent),
            ("swap usage", t.swap_usage_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(HostwatchError::config(format!(
                    "{} threshold must be between 0 and 100 (got {})",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("CPU temperature", t.cpu_temp_critical),
            ("NVMe temperature", t.device_temp_critical),
        ] {
            if !value.is_finite() {
                return Err(HostwatchError::config(format!(
                    "{} limit must be a finite number",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Accepts the `DEBUG` spellings in use: `0`/`1`, `true`/`false`, `yes`/`no`.
pub fn parse_debug_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => other
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| HostwatchError::config(format!("invalid DEBUG value: {}", value))),
    }
}

/// `MESSAGE_THREAD_ID`: zero or unparsable means no topic.
pub fn parse_thread_id(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id != 0)
}
