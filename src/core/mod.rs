// Core business logic module

pub mod config;
pub mod cycle;
pub mod health;
pub mod notifier;
pub mod sampler;

// Re-export commonly used items
pub use config::MonitorConfig;
pub use cycle::{should_deliver, CycleDriver, CycleOutcome, Delivery};
pub use notifier::{Notifier, TelegramNotifier, TelegramSettings};
pub use sampler::{SampleSource, SamplerConfig, SystemSampler};
