//! Search constants and runtime configuration defaults

// Grid defaults
/// Grid side searched when none is given
pub const DEFAULT_GRID_SIZE: u8 = 7;

// Logging defaults
/// Filter applied when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable consulted for a log filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

// Progress display settings
/// Interval between spinner redraws
pub const SPINNER_TICK_MS: u64 = 100;

/// Characters cycled by the search spinner
pub const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

// Work splitting
/// Pool size used when available parallelism cannot be queried
pub const FALLBACK_WORKER_COUNT: usize = 4;
