use std::time::Duration;

const GIB: f64 = (1u64 << 30) as f64;

/// Bytes as GiB with one decimal (e.g. "15.6")
pub fn format_gib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / GIB)
}

/// Bytes as whole GiB (e.g. "8")
pub fn format_gib_whole(bytes: u64) -> String {
    format!("{:.0}", bytes as f64 / GIB)
}

/// Format uptime as hours and minutes ("3h 7m"), or "N/A" when unknown
pub fn format_uptime(uptime: Option<Duration>) -> String {
    match uptime {
        Some(d) => {
            let secs = d.as_secs();
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        }
        None => "N/A".to_string(),
    }
}
