// Command handlers module
pub mod check;
pub mod cli;
pub mod version;
pub mod watch;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use cli::build_cli;
pub use version::execute as version;
pub use watch::execute as watch;
