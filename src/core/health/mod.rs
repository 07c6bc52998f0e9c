//! Host health evaluation core.
//!
//! Pure pipeline from raw readings to a report:
//! [`normalize`] -> [`assess`] -> [`compose`].

pub mod evaluator;
pub mod metrics;
pub mod normalizer;
pub mod report;

pub use evaluator::{assess, evaluate, Assessment, Thresholds};
pub use metrics::{
    Direction, MetricKind, MetricSample, MetricVerdict, Reading, Status, Threshold, Unit,
};
pub use normalizer::{
    normalize, ByteUsage, Capacity, Device, Health, HealthSnapshot, RawDevice, RawMemory,
    RawMount, RawSamples, RawService, RawSwap, Service, Swap,
};
pub use report::{compose, HostIdentity, Report};

/// Run the whole pipeline for one cycle.
pub fn evaluate_cycle(
    host: &HostIdentity,
    raw: &RawSamples,
    thresholds: &Thresholds,
) -> (Assessment, Report) {
    let assessment = assess(&normalize(raw), thresholds);
    let report = compose(host, &assessment);
    (assessment, report)
}
