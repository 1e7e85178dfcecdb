#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, WriteLogger};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::paths::AppPaths;

fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Cut the log down to its newest `max_log_size / 2` bytes, starting on a
/// line boundary, once it exceeds `max_log_size`.
fn trim_log_file(path: &Path, max_log_size: u64) -> io::Result<()> {
    if std::fs::metadata(path)?.len() <= max_log_size {
        return Ok(());
    }

    let contents = std::fs::read(path)?;
    let keep = usize::try_from(max_log_size / 2).unwrap_or(usize::MAX);
    let tail_start = contents.len().saturating_sub(keep);
    let line_start = contents[tail_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(contents.len(), |pos| tail_start + pos + 1);
    std::fs::write(path, &contents[line_start..])
}

/// Install the process logger for a single run.
///
/// Warnings and errors always reach the log file (by default under the
/// platform data directory); debug output needs `debug_enabled`. Debug builds
/// mirror the same records to stderr.
pub fn init_logging(log_path: Option<PathBuf>, debug_enabled: bool, max_log_size: u64) {
    let level = level_for(debug_enabled);
    let log_path = log_path.or_else(|| AppPaths::new().ok().map(|paths| paths.log_file()));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("stirling_update")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    #[cfg(debug_assertions)]
    loggers.push(TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if let Some(path) = &log_path {
        let _ = trim_log_file(path, max_log_size);
        match open_log_file(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(error) => eprintln!("warning: cannot open log file {}: {error}", path.display()),
        }
    }

    if loggers.is_empty() || CombinedLogger::init(loggers).is_err() {
        return;
    }

    if debug_enabled && let Some(path) = log_path {
        log::info!("Debug logging enabled, log file: {}", path.display());
    }
}
