// UI and formatting module

pub mod formatters;
pub mod report_view;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_gib, format_gib_whole, format_uptime};
pub use report_view::print_outcome;
