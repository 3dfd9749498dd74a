// src/logging.rs
//
// Logging bootstrap
//
// Installs the flexi_logger backend behind the `log` facade exactly once per
// process. Without a directory, records go to stderr; with one, to rotated
// files in that directory.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::error::{AppError, AppResult};

const LOG_FILE_BASENAME: &str = "podcatalogue";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Initializes logging with a level and an optional log directory
///
/// Repeated calls with the same settings are no-ops. A second call asking
/// for a different level or directory is rejected.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> AppResult<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(Path::to_path_buf);

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir.clone()))?;

    if state.level != level || state.log_dir != log_dir {
        return Err(AppError::Config(format!(
            "logging already initialized with level `{}` at {:?}; refusing to switch to `{}` at {:?}",
            state.level, state.log_dir, level, log_dir
        )));
    }

    Ok(())
}

/// Active `(level, directory)` if logging has been initialized
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

fn start_logger(level: &'static str, log_dir: Option<PathBuf>) -> AppResult<LoggingState> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| AppError::Config(format!("invalid log level `{level}`: {err}")))?;

    let logger = match &log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr(),
    };

    let handle = logger
        .start()
        .map_err(|err| AppError::Config(format!("failed to start logger: {err}")))?;

    info!(
        "event=logging_init level={} target={} version={}",
        level,
        log_dir
            .as_deref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "stderr".to_string()),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        log_dir,
        _logger: handle,
    })
}

fn normalize_level(level: &str) -> AppResult<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(AppError::Config(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        ))),
    }
}
