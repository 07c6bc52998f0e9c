//! systemd service liveness and uptime.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::platform::run_with_timeout;

pub const SYSTEMCTL: &str = "systemctl";

/// `Some(true)` when active, `Some(false)` for any other reported state,
/// `None` when systemctl could not be asked at all.
pub fn is_active(service: &str, timeout: Duration) -> Option<bool> {
    match run_with_timeout(SYSTEMCTL, &["is-active", service], timeout) {
        // is-active exits non-zero for inactive units; stdout still carries the state
        Ok(output) => parse_is_active(&output.stdout),
        Err(e) => {
            log::warn!("systemctl is-active {}: {}", service, e);
            None
        }
    }
}

pub fn parse_is_active(stdout: &str) -> Option<bool> {
    let state = stdout.trim();
    if state.is_empty() {
        None
    } else {
        Some(state == "active")
    }
}

/// Time since the service last entered the active state.
pub fn uptime(service: &str, timeout: Duration, now: DateTime<Utc>) -> Option<Duration> {
    let output = run_with_timeout(
        SYSTEMCTL,
        &["show", "-p", "ActiveEnterTimestamp", service],
        timeout,
    )
    .map_err(|e| log::debug!("systemctl show {}: {}", service, e))
    .ok()?;

    let started = parse_active_enter_timestamp(&output.stdout)?;
    (now - started).to_std().ok()
}

/// Parse `ActiveEnterTimestamp=Mon 2024-01-15 10:30:00 UTC` (or `=@1705314600`).
pub fn parse_active_enter_timestamp(output: &str) -> Option<DateTime<Utc>> {
    let value = output
        .lines()
        .find_map(|line| line.trim().strip_prefix("ActiveEnterTimestamp="))?
        .trim();

    if let Some(epoch) = value.strip_prefix('@') {
        return DateTime::from_timestamp(epoch.parse().ok()?, 0);
    }

    // Weekday, date, time, zone
    let mut parts = value.split_whitespace();
    let _weekday = parts.next()?;
    let date = parts.next()?;
    let time = parts.next()?;
    let zone = parts.next();

    let naive =
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").ok()?;

    match zone {
        Some("UTC") | Some("GMT") | None => Some(Utc.from_utc_datetime(&naive)),
        // systemctl prints other zones in the host's local time
        Some(_) => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
