//! Tracing subscriber setup for the command-line tool

use crate::io::configuration::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};
use crate::io::error::{Result, SearchError, file_system_error};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the event filter
///
/// An explicit directive wins over the environment, which wins over the default.
///
/// # Errors
///
/// Returns [`SearchError::InvalidLogFilter`] if the explicit directive does not parse
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    directive.map_or_else(
        || {
            Ok(EnvFilter::try_from_env(LOG_FILTER_ENV)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        },
        |explicit| {
            EnvFilter::try_new(explicit).map_err(|error| SearchError::InvalidLogFilter {
                filter: explicit.to_owned(),
                reason: error.to_string(),
            })
        },
    )
}

/// Install the global subscriber, writing to stderr or to `trace_file`
///
/// Returns false when a subscriber was already installed, which leaves it in place.
///
/// # Errors
///
/// Returns an error if the directive does not parse or the trace file cannot be
/// created
pub fn init(directive: Option<&str>, trace_file: Option<&Path>) -> Result<bool> {
    let filter = build_filter(directive)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true);

    let installed = match trace_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|error| file_system_error(path, "create trace file", error))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
        None => builder.with_writer(std::io::stderr).try_init().is_ok(),
    };
    Ok(installed)
}
