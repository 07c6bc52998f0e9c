use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hostwatch::core::config::MonitorConfig;
use hostwatch::core::cycle::{CycleDriver, Delivery};
use hostwatch::core::health::{HostIdentity, RawSamples};
use hostwatch::core::notifier::Notifier;
use hostwatch::core::sampler::SampleSource;
use hostwatch::{HostwatchError, Result};

use super::fixtures::{healthy_samples, host};

struct FakeSource {
    samples: RawSamples,
    stop_after_collect: Option<Arc<AtomicBool>>,
}

impl FakeSource {
    fn new(samples: RawSamples) -> Self {
        Self {
            samples,
            stop_after_collect: None,
        }
    }
}

impl SampleSource for FakeSource {
    fn host_identity(&mut self) -> HostIdentity {
        host()
    }

    fn collect(&mut self) -> RawSamples {
        if let Some(stop) = &self.stop_after_collect {
            stop.store(true, Ordering::SeqCst);
        }
        self.samples.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, text: &str) -> Result<()> {
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _text: &str) -> Result<()> {
        Err(HostwatchError::delivery("chat not found"))
    }
}

fn config(verbose: bool) -> MonitorConfig {
    MonitorConfig {
        verbose,
        interval: Duration::from_secs(3600),
        ..Default::default()
    }
}

#[test]
fn test_healthy_cycle_is_not_delivered() {
    let notifier = RecordingNotifier::default();
    let mut driver = CycleDriver::new(FakeSource::new(healthy_samples()), &config(false))
        .with_notifier(Box::new(notifier.clone()));

    let outcome = driver.run_once();

    assert!(!outcome.report.alert);
    assert_eq!(outcome.delivery, Delivery::Skipped);
    assert!(notifier.sent.borrow().is_empty());
}

#[test]
fn test_verbose_mode_delivers_healthy_report() {
    let notifier = RecordingNotifier::default();
    let mut driver = CycleDriver::new(FakeSource::new(healthy_samples()), &config(true))
        .with_notifier(Box::new(notifier.clone()));

    let outcome = driver.run_once();

    assert!(!outcome.report.alert);
    assert_eq!(outcome.delivery, Delivery::Sent);
    assert_eq!(*notifier.sent.borrow(), vec![outcome.report.text.clone()]);
}

#[test]
fn test_alerting_cycle_is_delivered() {
    let mut samples = healthy_samples();
    samples.service.active = Some(false);

    let notifier = RecordingNotifier::default();
    let mut driver = CycleDriver::new(FakeSource::new(samples), &config(false))
        .with_notifier(Box::new(notifier.clone()));

    let outcome = driver.run_once();

    assert!(outcome.report.alert);
    assert_eq!(outcome.delivery, Delivery::Sent);
    assert!(notifier.sent.borrow()[0].contains("DOWN"));
}

#[test]
fn test_delivery_failure_keeps_report() {
    let mut samples = healthy_samples();
    samples.io_wait_percent = Some(30.0);

    let mut driver = CycleDriver::new(FakeSource::new(samples.clone()), &config(false))
        .with_notifier(Box::new(FailingNotifier));
    let outcome = driver.run_once();

    let mut reference = CycleDriver::new(FakeSource::new(samples), &config(false));
    let expected = reference.run_once();

    assert!(matches!(outcome.delivery, Delivery::Failed(ref reason) if reason.contains("chat not found")));
    assert_eq!(outcome.report, expected.report);
}

#[test]
fn test_without_notifier_nothing_is_delivered() {
    let mut samples = healthy_samples();
    samples.service.active = None;

    let mut driver = CycleDriver::new(FakeSource::new(samples), &config(true));
    let outcome = driver.run_once();

    assert!(outcome.report.alert);
    assert_eq!(outcome.delivery, Delivery::Skipped);
}

#[test]
fn test_run_stops_when_flagged() {
    let stop = Arc::new(AtomicBool::new(true));
    let mut driver = CycleDriver::new(FakeSource::new(healthy_samples()), &config(false));
    assert_eq!(driver.run(&stop), 0);
}

#[test]
fn test_run_finishes_cycle_in_flight() {
    let stop = Arc::new(AtomicBool::new(false));
    let source = FakeSource {
        samples: healthy_samples(),
        stop_after_collect: Some(Arc::clone(&stop)),
    };

    let notifier = RecordingNotifier::default();
    let mut driver =
        CycleDriver::new(source, &config(true)).with_notifier(Box::new(notifier.clone()));

    // Interrupted during sampling: the cycle still completes and delivers, then the loop exits
    assert_eq!(driver.run(&stop), 1);
    assert_eq!(notifier.sent.borrow().len(), 1);
}
