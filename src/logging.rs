//! Tracing setup.
//!
//! Builds a subscriber from [`Settings`]: an env-filter driven by
//! `LOG_LEVEL`, a stderr layer, and optionally a non-blocking file
//! layer when `LOG_FILE` is set.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::Settings;

/// Initialize logging from the environment. Keep the returned guard
/// alive for the lifetime of the program, or buffered file output is
/// lost on exit.
pub fn init() -> Option<WorkerGuard> {
    init_from_settings(&Settings::from_env())
}

/// Initialize logging from explicit settings.
///
/// Calling this twice is harmless: the second call leaves the existing
/// subscriber in place.
pub fn init_from_settings(settings: &Settings) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match settings.log_file.as_deref().map(file_appender) {
        Some(Some(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = Registry::default()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init();
            Some(guard)
        }
        _ => {
            let _ = Registry::default()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
            None
        }
    }
}

/// Split a log file path into directory and file name for the rolling
/// appender. Paths without a usable file name are rejected.
fn file_appender(path: &str) -> Option<tracing_appender::rolling::RollingFileAppender> {
    let path = Path::new(path);
    let file_name = path.file_name()?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(tracing_appender::rolling::never(directory, file_name))
}
