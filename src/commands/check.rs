//! One-shot health check.

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::json;

use crate::core::config::MonitorConfig;
use crate::core::cycle::CycleDriver;
use crate::core::notifier::TelegramNotifier;
use crate::core::sampler::SystemSampler;
use crate::ui::print_outcome;

/// Execute the check command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = MonitorConfig::from_matches(matches).context("Invalid configuration")?;
    let json_output = matches.get_flag("json");
    let send = matches.get_flag("send");

    let mut driver = CycleDriver::new(SystemSampler::new(config.sampler.clone()), &config);

    if send {
        let settings = config
            .telegram
            .clone()
            .context("--send requires BOT_API_TOKEN and CHAT_ID")?;
        let notifier =
            TelegramNotifier::new(settings).context("Failed to set up Telegram notifier")?;
        driver = driver.with_notifier(Box::new(notifier));
    }

    let outcome = driver.run_once();

    if json_output {
        let document = json!({
            "host": outcome.host,
            "alert": outcome.report.alert,
            "assessment": outcome.assessment,
            "report": outcome.report.text,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}
