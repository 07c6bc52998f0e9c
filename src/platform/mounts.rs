//! Mounted filesystem discovery and capacity.

use std::fs;
use std::path::Path;

use crate::error::Result;

pub const PROC_MOUNTS: &str = "/proc/mounts";

/// One entry of a mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

/// Capacity in bytes, `used` counted the way `df` does (blocks minus free blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Parse a `/proc/mounts`-style table.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountEntry {
                device: device.to_string(),
                mount_point: unescape_octal(mount_point),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

pub fn read_mounts(path: &Path) -> Result<Vec<MountEntry>> {
    Ok(parse_mounts(&fs::read_to_string(path)?))
}

/// The kernel escapes spaces, tabs and backslashes in mount points as `\NNN`.
fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let octal = bytes.get(i + 1..i + 4).filter(|digits| {
            bytes[i] == b'\\' && digits.iter().all(|b| (b'0'..=b'7').contains(b))
        });
        if let Some(digits) = octal {
            let code = digits
                .iter()
                .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
            out.push(code as u8);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(unix)]
pub fn fs_usage(mount_point: &str) -> Result<FsUsage> {
    use std::ffi::CString;

    let c_path = CString::new(mount_point)
        .map_err(|e| crate::error::HostwatchError::other(format!("invalid mount point: {}", e)))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };

    // SAFETY: c_path is a valid NUL-terminated string and stat is a properly sized out-param.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    let frsize = stat.f_frsize as u64;
    let blocks = stat.f_blocks as u64;
    let free = stat.f_bfree as u64;
    Ok(FsUsage {
        total_bytes: blocks * frsize,
        used_bytes: blocks.saturating_sub(free) * frsize,
    })
}

#[cfg(not(unix))]
pub fn fs_usage(_mount_point: &str) -> Result<FsUsage> {
    Err(crate::error::HostwatchError::other(
        "filesystem usage is only supported on Unix",
    ))
}
