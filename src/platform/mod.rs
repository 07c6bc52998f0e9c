// Platform-specific code module

pub mod command;
pub mod mounts;
pub mod procstat;

// Re-exports para imports limpios
pub use command::{is_available, run_with_timeout, CommandOutput};
pub use mounts::{fs_usage, parse_mounts, read_mounts, FsUsage, MountEntry, PROC_MOUNTS};
pub use procstat::{iowait_percent, sample_iowait, CpuTimes};
