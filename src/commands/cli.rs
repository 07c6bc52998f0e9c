//! Command-line definition.
//!
//! Every monitoring option can also come from the environment (or a `.env` file)
//! under the variable names the deployment scripts already use.

use clap::{value_parser, Arg, ArgAction, Command};

/// Options shared by `check` and `watch`.
fn monitor_args() -> Vec<Arg> {
    vec![
        Arg::new("disk-threshold")
            .long("disk-threshold")
            .env("DISK_THRESHOLD")
            .value_name("PERCENT")
            .help("NVMe percentage_used at or above which to alert")
            .value_parser(value_parser!(f64))
            .default_value("50"),
        Arg::new("ram-free-threshold")
            .long("ram-free-threshold")
            .env("RAM_FREE_THRESHOLD")
            .value_name("PERCENT")
            .help("Free RAM at or below which to alert")
            .value_parser(value_parser!(f64))
            .default_value("8"),
        Arg::new("ramdisk-free-threshold")
            .long("ramdisk-free-threshold")
            .env("RAMDISK_FREE_THRESHOLD")
            .value_name("PERCENT")
            .help("Free ramdisk space at or below which to alert")
            .value_parser(value_parser!(f64))
            .default_value("8"),
        Arg::new("iowait-threshold")
            .long("iowait-threshold")
            .env("IO_WAIT_THRESHOLD")
            .value_name("PERCENT")
            .help("I/O wait at or above which to alert")
            .value_parser(value_parser!(f64))
            .default_value("4"),
        Arg::new("swap-threshold")
            .long("swap-threshold")
            .env("SWAP_THRESHOLD")
            .value_name("PERCENT")
            .help("Swap usage at or above which to alert")
            .value_parser(value_parser!(f64))
            .default_value("10"),
        Arg::new("cpu-temp-crit")
            .long("cpu-temp-crit")
            .env("CPU_TEMP_CRIT")
            .value_name("CELSIUS")
            .help("CPU temperature at or above which to alert")
            .value_parser(value_parser!(f64))
            .default_value("90"),
        Arg::new("nvme-temp-crit")
            .long("nvme-temp-crit")
            .env("NVME_TEMP_CRIT")
            .value_name("CELSIUS")
            .help("NVMe temperature at or above which to alert")
            .value_parser(value_parser!(f64))
            .default_value("60"),
        Arg::new("debug")
            .long("debug")
            .env("DEBUG")
            .value_name("0|1")
            .help("Deliver every report, even when nothing is critical")
            .num_args(0..=1)
            .default_value("0")
            .default_missing_value("1"),
        Arg::new("interval")
            .short('i')
            .long("interval")
            .env("INTERVAL")
            .value_name("SECONDS")
            .help("Seconds to sleep between cycles")
            .value_parser(value_parser!(u64))
            .default_value("600"),
        Arg::new("service")
            .long("service")
            .env("SERVICE_NAME")
            .value_name("UNIT")
            .help("systemd unit whose liveness is checked")
            .default_value("solana.service"),
        Arg::new("telegraf-conf")
            .long("telegraf-conf")
            .env("TELEGRAF_CONF")
            .value_name("PATH")
            .help("Telegraf config holding the host's display name")
            .default_value("/etc/telegraf/telegraf.conf"),
        Arg::new("command-timeout")
            .long("command-timeout")
            .env("COMMAND_TIMEOUT")
            .value_name("SECONDS")
            .help("Deadline for each external command")
            .value_parser(value_parser!(u64))
            .default_value("10"),
        Arg::new("bot-token")
            .long("bot-token")
            .env("BOT_API_TOKEN")
            .value_name("TOKEN")
            .help("Telegram bot API token")
            .hide_env_values(true),
        Arg::new("chat-id")
            .long("chat-id")
            .env("CHAT_ID")
            .value_name("ID")
            .allow_negative_numbers(true)
            .help("Telegram chat to post reports to"),
        Arg::new("thread-id")
            .long("thread-id")
            .env("MESSAGE_THREAD_ID")
            .value_name("ID")
            .allow_negative_numbers(true)
            .help("Telegram forum topic (0 for none)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("hostwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host health sampler with threshold alerts")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("check")
                .about("Run a single cycle and print the report")
                .args(monitor_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the assessment and report as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("send")
                        .long("send")
                        .help("Deliver the report if it alerts (or always with --debug)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run cycles forever, delivering alerting reports")
                .args(monitor_args()),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}
