//! Report composition.
//!
//! Renders an [`Assessment`] into the fixed-order text report and folds the verdicts
//! into the alert flag. No I/O happens here.

use serde::{Deserialize, Serialize};

use super::evaluator::Assessment;
use super::metrics::{MetricVerdict, Status};
use super::normalizer::Capacity;
use crate::ui::formatters::{format_gib, format_gib_whole, format_uptime};

const EMOJI_HOST: &str = "\u{1F50D}";
const EMOJI_NVME: &str = "\u{1F4BD}";
const EMOJI_RAMDISK: &str = "\u{1F5C4}";
const EMOJI_RAM: &str = "\u{1F4BE}";
const EMOJI_SWAP: &str = "\u{1F4BF}";
const EMOJI_IOWAIT: &str = "\u{26A0}\u{FE0F}";
const EMOJI_CPU: &str = "\u{1F321}";
const EMOJI_SERVICE_ALERT: &str = "\u{1F6A8}";
const EMOJI_SERVICE_UP: &str = "\u{2705}";

const NOT_AVAILABLE: &str = "N/A";

/// Who the report is about. Defaults stand in for anything undeterminable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIdentity {
    pub hostname: String,
    pub ip: String,
}

impl Default for HostIdentity {
    fn default() -> Self {
        Self {
            hostname: "unknown".to_string(),
            ip: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub text: String,
    pub alert: bool,
}

pub fn compose(host: &HostIdentity, assessment: &Assessment) -> Report {
    let mut lines = vec![format!(
        "[{}] *{}* | `{}`",
        EMOJI_HOST,
        bold_text(&host.hostname),
        host.ip
    )];

    match assessment.devices.as_deref() {
        Some(devices) if !devices.is_empty() => {
            lines.push(format!("{} NVMe:", EMOJI_NVME));
            for dev in devices {
                lines.push(format!(
                    "  {}: {} | {}",
                    escape_markdown(&dev.label),
                    dev.usage.display_text, dev.temperature.display_text
                ));
            }
        }
        _ => lines.push(format!("{} NVMe: {}", EMOJI_NVME, NOT_AVAILABLE)),
    }

    lines.push(match &assessment.ramdisk {
        Some(ramdisk) => {
            let mount = ramdisk
                .mount_point
                .as_deref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), escape_markdown);
            capacity_line(&format!("{} Ramdisk ({})", EMOJI_RAMDISK, mount), ramdisk)
        }
        None => format!("{} Ramdisk: {}", EMOJI_RAMDISK, NOT_AVAILABLE),
    });

    lines.push(capacity_line(&format!("{} RAM", EMOJI_RAM), &assessment.memory));

    let swap = &assessment.swap;
    lines.push(match swap.total_bytes {
        Some(total) => format!(
            "{} Swap: {} GB used {}",
            EMOJI_SWAP,
            format_gib_whole(total),
            swap.usage.display_text
        ),
        None => format!("{} Swap: {}", EMOJI_SWAP, NOT_AVAILABLE),
    });

    lines.push(format!(
        "{} IOWait: {}",
        EMOJI_IOWAIT, assessment.io_wait.display_text
    ));
    lines.push(format!(
        "{} CPU Temp: {}",
        EMOJI_CPU, assessment.cpu_temperature.display_text
    ));

    let service = &assessment.service;
    let service_name = escape_markdown(&service.name);
    lines.push(match service.liveness.status {
        Status::Ok => format!(
            "{} {}: {} ({})",
            EMOJI_SERVICE_UP,
            service_name,
            service.liveness.display_text,
            format_uptime(service.uptime)
        ),
        _ => format!(
            "{} {}: {}",
            EMOJI_SERVICE_ALERT, service_name, service.liveness.display_text
        ),
    });

    Report {
        text: lines.join("\n"),
        alert: assessment.is_alert(),
    }
}

fn capacity_line(label: &str, capacity: &Capacity<MetricVerdict>) -> String {
    match capacity.bytes {
        Some(bytes) => format!(
            "{}: {}/{} GB, free {}",
            label,
            format_gib(bytes.used),
            format_gib(bytes.total),
            capacity.free.display_text
        ),
        None => format!("{}: {}", label, NOT_AVAILABLE),
    }
}

/// Backslash-escape the characters Telegram's Markdown mode treats as entity markers.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// Inside a bold entity only `*` is special and escapes are not honoured
fn bold_text(text: &str) -> String {
    text.replace('*', "")
}
