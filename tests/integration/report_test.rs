use hostwatch::core::health::{
    evaluate_cycle, HostIdentity, MetricKind, RawMemory, Status, Thresholds,
};

use super::fixtures::{device, healthy_samples, host, GIB};

#[test]
fn test_healthy_host_golden_report() {
    let (_, report) = evaluate_cycle(&host(), &healthy_samples(), &Thresholds::default());

    let expected = [
        "[\u{1F50D}] *validator-01* | `10.0.0.5`",
        "\u{1F4BD} NVMe:",
        "  nvme0n1: 12% \u{1F7E2} | 45\u{00B0}C \u{1F7E2}",
        "  nvme1n1: 10% \u{1F7E2} | 40\u{00B0}C \u{1F7E2}",
        "\u{1F5C4} Ramdisk (/mnt/ramdisk): 32.0/64.0 GB, free 50% \u{1F7E2}",
        "\u{1F4BE} RAM: 7.0/16.0 GB, free 50% \u{1F7E2}",
        "\u{1F4BF} Swap: 8 GB used 0% \u{1F7E2}",
        "\u{26A0}\u{FE0F} IOWait: 1% \u{1F7E2}",
        "\u{1F321} CPU Temp: 55\u{00B0}C \u{1F7E2}",
        "\u{2705} solana.service: \u{1F7E2} UP (3h 7m)",
    ]
    .join("\n");

    assert_eq!(report.text, expected);
    assert!(!report.alert);
}

#[test]
fn test_composition_is_deterministic() {
    let samples = healthy_samples();
    let thresholds = Thresholds::default();

    let (_, first) = evaluate_cycle(&host(), &samples, &thresholds);
    let (_, second) = evaluate_cycle(&host(), &samples, &thresholds);
    assert_eq!(first.text, second.text);

    // Discovery order must not leak into the report
    let mut reversed = samples.clone();
    reversed.devices.reverse();
    let (_, third) = evaluate_cycle(&host(), &reversed, &thresholds);
    assert_eq!(first.text, third.text);
}

#[test]
fn test_scenario_low_free_ram_alerts() {
    let mut samples = healthy_samples();
    samples.memory = Some(RawMemory {
        total_bytes: 16 * GIB,
        available_bytes: GIB,
        used_bytes: 15 * GIB,
    });

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    assert_eq!(assessment.memory.free.status, Status::Critical);
    assert!(report
        .text
        .contains("\u{1F4BE} RAM: 15.0/16.0 GB, free 6% \u{1F534}"));
    assert!(report.alert);
}

#[test]
fn test_scenario_missing_cpu_sensor_is_not_an_alert() {
    let mut samples = healthy_samples();
    samples.cpu_temperature = None;

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    assert_eq!(assessment.cpu_temperature.status, Status::Unknown);
    assert!(report.text.contains("\u{1F321} CPU Temp: N/A"));
    assert!(!report.alert);
}

#[test]
fn test_scenario_failed_service_query_is_down() {
    let mut samples = healthy_samples();
    samples.service.active = None;
    samples.service.uptime = None;

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    assert_eq!(assessment.service.liveness.status, Status::Critical);
    assert_eq!(
        report.text.lines().last(),
        Some("\u{1F6A8} solana.service: \u{1F534} DOWN")
    );
    assert!(report.alert);
}

#[test]
fn test_scenario_devices_evaluated_independently() {
    let mut samples = healthy_samples();
    samples.devices = vec![
        device("/dev/nvme0n1", Some(55.0), Some(40.0)),
        device("/dev/nvme1n1", Some(10.0), Some(40.0)),
    ];

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    let devices = assessment.devices.as_ref().unwrap();
    assert_eq!(devices[0].usage.status, Status::Critical);
    assert_eq!(devices[1].usage.status, Status::Ok);
    assert!(report
        .text
        .contains("  nvme0n1: 55% \u{1F534} | 40\u{00B0}C \u{1F7E2}"));
    assert!(report
        .text
        .contains("  nvme1n1: 10% \u{1F7E2} | 40\u{00B0}C \u{1F7E2}"));
    assert!(report.alert);
}

#[test]
fn test_device_temperature_alone_alerts() {
    let mut samples = healthy_samples();
    samples.devices = vec![device("/dev/nvme0n1", Some(5.0), Some(60.0))];

    let (_, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());
    assert!(report.text.contains("60\u{00B0}C \u{1F534}"));
    assert!(report.alert);
}

#[test]
fn test_unreadable_device_renders_placeholders() {
    let mut samples = healthy_samples();
    samples.devices = vec![device("/dev/nvme0n1", None, None)];

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    assert!(report.text.contains("  nvme0n1: N/A | N/A"));
    assert!(assessment
        .verdicts()
        .iter()
        .filter(|v| v.kind == MetricKind::DeviceUsage)
        .all(|v| v.status == Status::Unknown));
    assert!(!report.alert);
}

#[test]
fn test_no_devices_is_not_applicable() {
    let mut samples = healthy_samples();
    samples.devices.clear();

    let (assessment, report) = evaluate_cycle(&host(), &samples, &Thresholds::default());

    assert!(assessment.devices.is_none());
    assert!(report.text.contains("\u{1F4BD} NVMe: N/A"));
    assert!(!report.text.contains("NVMe:\n"));
    assert!(!report.alert);
}

#[test]
fn test_full_ramdisk_alerts_at_boundary() {
    let mut samples = healthy_samples();
    if let Some(ramdisk) = samples.ramdisk.as_mut() {
        // Exactly 25% free
        ramdisk.total_bytes = 4 * GIB;
        ramdisk.used_bytes = 3 * GIB;
    }
    let thresholds = Thresholds {
        ramdisk_free_percent: 25.0,
        ..Default::default()
    };

    let (assessment, report) = evaluate_cycle(&host(), &samples, &thresholds);

    assert_eq!(assessment.ramdisk.unwrap().free.status, Status::Critical);
    assert!(report.alert);
}

#[test]
fn test_custom_thresholds_change_verdicts() {
    let thresholds = Thresholds {
        io_wait_percent: 1.0,
        ..Default::default()
    };

    let (assessment, report) = evaluate_cycle(&host(), &healthy_samples(), &thresholds);

    assert_eq!(assessment.io_wait.status, Status::Critical);
    assert!(report.text.contains("IOWait: 1% \u{1F534}"));
    assert!(report.alert);
}

#[test]
fn test_default_identity_rendered_without_special_casing() {
    let (_, report) = evaluate_cycle(
        &HostIdentity::default(),
        &healthy_samples(),
        &Thresholds::default(),
    );
    assert!(report.text.starts_with("[\u{1F50D}] *unknown* | `0.0.0.0`\n"));
}

#[test]
fn test_alert_matches_any_critical_verdict() {
    let thresholds = Thresholds::default();
    let mut samples = healthy_samples();

    let (assessment, report) = evaluate_cycle(&host(), &samples, &thresholds);
    assert_eq!(
        report.alert,
        assessment.verdicts().iter().any(|v| v.status.is_critical())
    );

    samples.swap = None;
    samples.io_wait_percent = Some(50.0);
    let (assessment, report) = evaluate_cycle(&host(), &samples, &thresholds);
    assert!(report.text.contains("\u{1F4BF} Swap: N/A"));
    assert_eq!(
        report.alert,
        assessment.verdicts().iter().any(|v| v.status.is_critical())
    );
    assert!(report.alert);
}
