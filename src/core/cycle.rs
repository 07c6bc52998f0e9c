//! Cycle driver: sample, evaluate, compose, deliver, sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::config::MonitorConfig;
use crate::core::health::{evaluate_cycle, Assessment, HostIdentity, Report, Thresholds};
use crate::core::notifier::Notifier;
use crate::core::sampler::SampleSource;

const SLEEP_SLICE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No alert and not verbose, or no notifier configured.
    Skipped,
    Sent,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub host: HostIdentity,
    pub assessment: Assessment,
    pub report: Report,
    pub delivery: Delivery,
}

/// A report goes out when something is critical, or always in verbose mode.
pub fn should_deliver(alert: bool, verbose: bool) -> bool {
    alert || verbose
}

pub struct CycleDriver<S: SampleSource> {
    source: S,
    notifier: Option<Box<dyn Notifier>>,
    thresholds: Thresholds,
    verbose: bool,
    interval: Duration,
}

impl<S: SampleSource> CycleDriver<S> {
    pub fn new(source: S, config: &MonitorConfig) -> Self {
        Self {
            source,
            notifier: None,
            thresholds: config.thresholds.clone(),
            verbose: config.verbose,
            interval: config.interval,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run one full cycle. The report is composed before any delivery attempt.
    pub fn run_once(&mut self) -> CycleOutcome {
        let host = self.source.host_identity();
        let raw = self.source.collect();
        let (assessment, report) = evaluate_cycle(&host, &raw, &self.thresholds);

        let delivery = match &self.notifier {
            Some(notifier) if should_deliver(report.alert, self.verbose) => {
                match notifier.send(&report.text) {
                    Ok(()) => Delivery::Sent,
                    Err(e) => Delivery::Failed(e.to_string()),
                }
            }
            _ => Delivery::Skipped,
        };

        CycleOutcome {
            host,
            assessment,
            report,
            delivery,
        }
    }

    /// Run cycles back to back until `stop` is set.
    ///
    /// Returns the number of completed cycles.
    pub fn run(&mut self, stop: &AtomicBool) -> u64 {
        let mut cycles = 0;

        while !stop.load(Ordering::SeqCst) {
            let started = Instant::now();
            let outcome = self.run_once();
            cycles += 1;

            log::info!(
                "Cycle {} finished in {:?}: alert={}, delivery={:?}",
                cycles,
                started.elapsed(),
                outcome.report.alert,
                outcome.delivery
            );
            if let Delivery::Failed(reason) = &outcome.delivery {
                log::error!("Failed to deliver report: {}", reason);
            }

            self.sleep_interval(stop);
        }

        cycles
    }

    fn sleep_interval(&self, stop: &AtomicBool) {
        let deadline = Instant::now() + self.interval;
        while !stop.load(Ordering::SeqCst) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}
