//! Continuous monitoring loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::MonitorConfig;
use crate::core::cycle::CycleDriver;
use crate::core::notifier::TelegramNotifier;
use crate::core::sampler::SystemSampler;

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = MonitorConfig::from_matches(matches).context("Invalid configuration")?;
    let settings = config
        .telegram
        .clone()
        .context("watch requires BOT_API_TOKEN and CHAT_ID")?;
    let notifier = TelegramNotifier::new(settings).context("Failed to set up Telegram notifier")?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl-C handler")?;
    }

    log::info!(
        "Watching {} every {:?} (verbose={})",
        config.sampler.service_name,
        config.interval,
        config.verbose
    );

    let mut driver = CycleDriver::new(SystemSampler::new(config.sampler.clone()), &config)
        .with_notifier(Box::new(notifier));
    let cycles = driver.run(&stop);

    log::info!("Stopped after {} cycle(s)", cycles);
    Ok(())
}
