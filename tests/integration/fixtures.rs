use std::time::Duration;

use hostwatch::core::health::{
    HostIdentity, RawDevice, RawMemory, RawMount, RawSamples, RawService, RawSwap,
};

pub const GIB: u64 = 1 << 30;

pub fn host() -> HostIdentity {
    HostIdentity {
        hostname: "validator-01".to_string(),
        ip: "10.0.0.5".to_string(),
    }
}

pub fn device(path: &str, used: Option<f64>, temp: Option<f64>) -> RawDevice {
    RawDevice {
        path: path.to_string(),
        used_percent: used,
        temperature_celsius: temp,
    }
}

/// A healthy host where every reading is present and under its limit.
pub fn healthy_samples() -> RawSamples {
    RawSamples {
        devices: vec![
            device("/dev/nvme1n1", Some(10.0), Some(40.0)),
            device("/dev/nvme0n1", Some(12.0), Some(45.0)),
        ],
        ramdisk: Some(RawMount {
            mount_point: "/mnt/ramdisk".to_string(),
            total_bytes: 64 * GIB,
            used_bytes: 32 * GIB,
        }),
        memory: Some(RawMemory {
            total_bytes: 16 * GIB,
            available_bytes: 8 * GIB,
            used_bytes: 7 * GIB,
        }),
        swap: Some(RawSwap {
            total_bytes: 8 * GIB,
            used_bytes: 0,
        }),
        io_wait_percent: Some(1.2),
        cpu_temperature: Some(55.4),
        service: RawService {
            name: "solana.service".to_string(),
            active: Some(true),
            uptime: Some(Duration::from_secs(3 * 3600 + 7 * 60)),
        },
    }
}
