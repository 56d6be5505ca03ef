//! Tracing setup
//!
//! The core never logs on its own behalf beyond `debug!` resync notes; the
//! subscriber installed here decides where that ends up. Headless runs log
//! to stderr. The TUI owns the terminal, so it logs to a file instead.

use crate::error::{GrapherError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log file name for TUI mode
pub const LOG_FILE_NAME: &str = "sensor-grapher.log";

fn filter(verbose: bool, base_level: &str) -> EnvFilter {
    let level = if verbose { "debug" } else { base_level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize tracing for console output
///
/// Call early in main() before any logging occurs.
/// `base_level` applies normally, `verbose` raises it to debug, and
/// `RUST_LOG` overrides both. Output goes to stderr so stdout stays clean for
/// `--json` frame output.
pub fn init_tracing(verbose: bool, base_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(filter(verbose, base_level))
        .try_init();
}

/// Initialize tracing into an append-only log file
pub fn init_file_tracing(path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| GrapherError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .with(filter(verbose, "info"))
        .try_init();
    Ok(())
}

/// Default log file path (next to the executable)
pub fn default_log_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| GrapherError::Io {
        path: PathBuf::from("executable"),
        source: e,
    })?;
    let exe_dir = exe.parent().ok_or_else(|| GrapherError::ConfigValidation {
        field: "exe_path",
        reason: "no parent directory".into(),
    })?;
    Ok(exe_dir.join(LOG_FILE_NAME))
}
