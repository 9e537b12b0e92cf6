//! Logging Infrastructure
//!
//! Structured logging on stdout (plain or JSON) plus an optional daily
//! rolling file. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger with defaults
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON output and file output.
///
/// Repeated calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = existing_dir(log_dir).map(|dir| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(tracing_appender::rolling::daily(dir, "shop-server"))
    });
    let plain_layer = (!json).then(|| fmt::layer().with_target(false));
    let json_layer = json.then(|| fmt::layer().json());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();
}

fn existing_dir(log_dir: Option<&str>) -> Option<&Path> {
    let path = Path::new(log_dir?);
    if path.is_dir() {
        Some(path)
    } else {
        eprintln!("LOG_DIR {} does not exist, file logging disabled", path.display());
        None
    }
}
