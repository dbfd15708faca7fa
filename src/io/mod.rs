/// Command-line parsing and result reporting
pub mod cli;
/// Search constants and runtime defaults
pub mod configuration;
/// Error taxonomy
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// Spinner shown while a search runs
pub mod progress;
