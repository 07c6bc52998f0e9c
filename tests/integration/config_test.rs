use std::path::PathBuf;
use std::time::Duration;

use hostwatch::commands::build_cli;
use hostwatch::core::config::MonitorConfig;
use hostwatch::core::health::Thresholds;
use hostwatch::HostwatchError;

fn config_from(args: &[&str]) -> hostwatch::Result<MonitorConfig> {
    let matches = build_cli()
        .try_get_matches_from(args)
        .expect("arguments should parse");
    let (_, sub) = matches.subcommand().expect("subcommand expected");
    MonitorConfig::from_matches(sub)
}

#[test]
fn test_flags_override_defaults() {
    let config = config_from(&[
        "hostwatch",
        "check",
        "--disk-threshold",
        "70",
        "--ram-free-threshold",
        "12.5",
        "--cpu-temp-crit",
        "85",
        "--interval",
        "30",
        "--service",
        "agave-validator.service",
        "--telegraf-conf",
        "/tmp/telegraf.conf",
        "--command-timeout",
        "3",
    ])
    .unwrap();

    assert_eq!(config.thresholds.disk_usage_percent, 70.0);
    assert_eq!(config.thresholds.ram_free_percent, 12.5);
    assert_eq!(config.thresholds.cpu_temp_critical, 85.0);
    assert_eq!(config.interval, Duration::from_secs(30));
    assert_eq!(config.sampler.service_name, "agave-validator.service");
    assert_eq!(config.sampler.telegraf_conf, PathBuf::from("/tmp/telegraf.conf"));
    assert_eq!(config.sampler.command_timeout, Duration::from_secs(3));
}

#[test]
fn test_debug_flag_forms() {
    let bare = config_from(&["hostwatch", "watch", "--debug"]).unwrap();
    assert!(bare.verbose);

    let explicit = config_from(&["hostwatch", "watch", "--debug", "0"]).unwrap();
    assert!(!explicit.verbose);

    let invalid = config_from(&["hostwatch", "watch", "--debug", "sometimes"]);
    assert!(matches!(invalid, Err(HostwatchError::Config(_))));
}

#[test]
fn test_telegram_settings_need_token_and_chat() {
    let config = config_from(&[
        "hostwatch",
        "check",
        "--bot-token",
        "123:abc",
        "--chat-id",
        "-100200",
        "--thread-id",
        "0",
    ])
    .unwrap();

    let telegram = config.telegram.unwrap();
    assert_eq!(telegram.bot_token, "123:abc");
    assert_eq!(telegram.chat_id, "-100200");
    assert_eq!(telegram.message_thread_id, None);

    let with_topic = config_from(&[
        "hostwatch",
        "check",
        "--bot-token",
        "123:abc",
        "--chat-id",
        "-100200",
        "--thread-id",
        "17",
    ])
    .unwrap();
    assert_eq!(with_topic.telegram.unwrap().message_thread_id, Some(17));
}

#[test]
fn test_out_of_range_threshold_is_rejected() {
    let result = config_from(&["hostwatch", "check", "--swap-threshold", "150"]);
    assert!(matches!(result, Err(HostwatchError::Config(_))));
}

#[test]
fn test_zero_interval_is_rejected() {
    let result = config_from(&["hostwatch", "watch", "--interval", "0"]);
    assert!(matches!(result, Err(HostwatchError::Config(_))));
}

#[test]
fn test_non_numeric_threshold_fails_to_parse() {
    let result = build_cli().try_get_matches_from(["hostwatch", "check", "--iowait-threshold", "high"]);
    assert!(result.is_err());
}

#[test]
fn test_defaults_match_threshold_defaults() {
    let config = MonitorConfig::default();
    assert_eq!(config.thresholds, Thresholds::default());
    assert_eq!(config.interval, Duration::from_secs(600));
    assert!(!config.verbose);
    assert!(config.telegram.is_none());
}
