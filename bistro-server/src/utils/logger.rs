//! Logging Infrastructure
//!
//! Console output (text or JSON) filtered by `RUST_LOG`, plus an optional
//! daily rolling file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::core::LogFormat;

pub const DEFAULT_FILTER: &str = "bistro_server=info,tower_http=info";

/// Initialize the global subscriber
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logger(format: LogFormat, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let console = match format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Text => fmt::layer().with_target(false).boxed(),
    };

    let mut guard = None;
    let file = log_dir
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "bistro-server.log");
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            fmt::layer().with_ansi(false).with_writer(writer)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    if let Some(dir) = log_dir
        && guard.is_none()
    {
        tracing::warn!(log_dir = dir, "LOG_DIR is not a directory, file logging disabled");
    }

    guard
}
