use colored::*;

use crate::core::cycle::{CycleOutcome, Delivery};

/// Print a cycle's report to the terminal with a status banner.
pub fn print_outcome(outcome: &CycleOutcome) {
    let banner = if outcome.report.alert {
        "ALERT".red().bold()
    } else {
        "OK".green().bold()
    };

    println!("{} {}", banner, outcome.host.hostname.cyan().bold());
    println!("{}", "-".repeat(40));
    println!("{}", outcome.report.text);
    println!();

    match &outcome.delivery {
        Delivery::Sent => println!("{}", "Report delivered.".green()),
        Delivery::Skipped => println!("{}", "Report not delivered.".dimmed()),
        Delivery::Failed(reason) => println!("{} {}", "Delivery failed:".red().bold(), reason),
    }
}
