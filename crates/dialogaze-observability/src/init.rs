// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for dialogaze
//!
//! Console output is always installed. With the `file-logging` feature and a
//! configured `log_dir`, a JSON log is also written into a timestamped run
//! folder and older run folders are pruned.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingOptions {
    /// Base level for every target not raised by a debug flag
    pub level: String,
    /// Base directory for run folders; `None` logs to the console only
    pub log_dir: Option<PathBuf>,
    /// Keep N most recent runs
    pub retention_runs: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            retention_runs: 10,
        }
    }
}

/// Logging initialization result
///
/// Hold it for the life of the process; dropping it flushes file output.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    run_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// The run folder receiving file logs, if file logging is active
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }
}

/// Initialize logging with console output and, when enabled, file output
///
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       └── dialogaze.log.2025-01-01   (JSON lines)
/// ```
///
/// # Errors
///
/// Fails if the filter directives are invalid, the run folder cannot be
/// created, or a global subscriber is already installed.
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    options: &LoggingOptions,
) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter '{}'", filter))?;

    let mut layers = Vec::new();

    // Console layer (human-readable)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter)
        .boxed();
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guard, run_dir) = match &options.log_dir {
        Some(base_log_dir) => {
            let run_folder = create_run_folder(base_log_dir)?;
            prune_old_runs(base_log_dir, options.retention_runs)?;

            let file_appender = tracing_appender::rolling::daily(&run_folder, "dialogaze.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::try_new(&filter)?)
                .boxed();
            layers.push(file_layer);
            (Some(guard), Some(run_folder))
        }
        None => (None, None),
    };

    #[cfg(not(feature = "file-logging"))]
    let run_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    #[cfg(not(feature = "file-logging"))]
    if let Some(dir) = &options.log_dir {
        tracing::warn!(
            "[LOGGING] log_dir {} ignored: built without the file-logging feature",
            dir.display()
        );
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: file_guard,
        run_dir,
    })
}

/// Creates `<base>/run_<UTC timestamp>` and returns its path.
pub fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Removes all but the `retention_runs` newest run folders under `base_log_dir`.
///
/// Directories whose names do not parse as run folders are left alone.
/// Returns the removed paths.
pub fn prune_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<Vec<PathBuf>> {
    if !base_log_dir.exists() {
        return Ok(Vec::new());
    }

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(started) = started {
            runs.push((path, started));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, started)| *started);

    let excess = runs.len().saturating_sub(retention_runs);
    let mut removed = Vec::with_capacity(excess);
    for (path, _) in runs.into_iter().take(excess) {
        match std::fs::remove_dir_all(&path) {
            Ok(()) => removed.push(path),
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prune_keeps_newest_runs() {
        let dir = tempdir().unwrap();
        for name in ["run_20250101_000000", "run_20250102_000000", "run_20250103_000000"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("keep_me")).unwrap();

        let removed = prune_old_runs(dir.path(), 2).unwrap();
        assert_eq!(removed, vec![dir.path().join("run_20250101_000000")]);
        assert!(dir.path().join("run_20250102_000000").exists());
        assert!(dir.path().join("run_20250103_000000").exists());
        assert!(dir.path().join("keep_me").exists());
    }

    #[test]
    fn test_prune_missing_dir_is_noop() {
        let dir = tempdir().unwrap();
        assert!(prune_old_runs(&dir.path().join("absent"), 1).unwrap().is_empty());
    }

    #[test]
    fn test_create_run_folder_is_parseable() {
        let dir = tempdir().unwrap();
        let run = create_run_folder(dir.path()).unwrap();
        assert!(run.is_dir());
        // A freshly created run survives pruning with retention 1
        assert!(prune_old_runs(dir.path(), 1).unwrap().is_empty());
    }
}
