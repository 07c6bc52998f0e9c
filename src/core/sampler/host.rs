//! Host identity: display name and primary IPv4 address.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use sysinfo::{Networks, System};

use crate::core::health::HostIdentity;

pub const DEFAULT_TELEGRAF_CONF: &str = "/etc/telegraf/telegraf.conf";

static TELEGRAF_HOSTNAME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*hostname\s*=\s*"(.+?)""#).ok());

/// The `hostname = "..."` value of a Telegraf agent config.
pub fn parse_telegraf_hostname(content: &str) -> Option<String> {
    let name = TELEGRAF_HOSTNAME
        .as_ref()?
        .captures(content)?
        .get(1)?
        .as_str()
        .to_string();
    Some(name)
}

pub fn read_telegraf_hostname(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_telegraf_hostname(&content),
        Err(e) => {
            log::debug!("Cannot read {:?}: {}", path, e);
            None
        }
    }
}

/// First non-loopback IPv4 address, interfaces visited in name order.
pub fn pick_ipv4<'a, I>(interfaces: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, Vec<IpAddr>)>,
{
    let mut interfaces: Vec<_> = interfaces.into_iter().collect();
    interfaces.sort_by(|a, b| a.0.cmp(b.0));

    interfaces
        .into_iter()
        .flat_map(|(_, addrs)| addrs)
        .find_map(|addr| match addr {
            IpAddr::V4(v4) if !v4.is_loopback() => Some(v4.to_string()),
            _ => None,
        })
}

/// Best-effort identity. Falls back to the defaults of [`HostIdentity`].
pub fn host_identity(telegraf_conf: &Path, networks: &Networks) -> HostIdentity {
    let defaults = HostIdentity::default();

    let hostname = read_telegraf_hostname(telegraf_conf)
        .or_else(System::host_name)
        .unwrap_or(defaults.hostname);

    let ip = pick_ipv4(networks.iter().map(|(name, data)| {
        (
            name.as_str(),
            data.ip_networks().iter().map(|net| net.addr).collect::<Vec<_>>(),
        )
    }))
    .unwrap_or(defaults.ip);

    HostIdentity { hostname, ip }
}
