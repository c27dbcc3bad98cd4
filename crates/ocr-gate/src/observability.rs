//! Logging setup: human-readable stderr plus optional JSON-lines files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "OCR_GATE_LOG_PATH";
/// Log directory; files rotate daily.
const LOG_DIR_ENV: &str = "OCR_GATE_LOG_DIR";
/// File name prefix for rotated logs.
const LOG_FILE_PREFIX: &str = "ocr-gate.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    log_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `OCR_GATE_LOG_PATH` and `OCR_GATE_LOG_DIR`, falling back to the
    /// configured directory when neither is set.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    fn file_target(&self) -> Option<(PathBuf, String, bool)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, name, false));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_PREFIX.to_string(), true))
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises verbosity one step, and the configured level is the base.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Flushes file logs when dropped; hold it for the life of `main`.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match cfg.file_target() {
        Some((dir, name, rotate)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = if rotate {
                tracing_appender::rolling::daily(&dir, name)
            } else {
                tracing_appender::rolling::never(&dir, name)
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}
