//! Tracing subscriber setup
//!
//! The terminal UI owns stdout, so interactive runs log to a file. Headless
//! runs log to stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use dwell_survey_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "dwell-survey.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn for_mode(config: &LoggingConfig, headless: bool) -> Self {
        if headless {
            return LogTarget::Stderr;
        }
        LogTarget::File(
            config
                .file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE)),
        )
    }
}

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the config level
pub fn filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

pub fn init(config: &LoggingConfig, target: &LogTarget, verbose: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(config, verbose));

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => {
            let file = open_log(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    }

    Ok(())
}

fn open_log(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_logs_to_stderr() {
        let config = LoggingConfig {
            file: Some(PathBuf::from("/var/log/kiosk.log")),
            ..LoggingConfig::default()
        };
        assert_eq!(LogTarget::for_mode(&config, true), LogTarget::Stderr);
        assert_eq!(
            LogTarget::for_mode(&config, false),
            LogTarget::File(PathBuf::from("/var/log/kiosk.log"))
        );
    }

    #[test]
    fn test_default_log_file() {
        let target = LogTarget::for_mode(&LoggingConfig::default(), false);
        assert_eq!(target, LogTarget::File(std::env::temp_dir().join(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn test_open_log_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("kiosk.log");
        open_log(&path).unwrap();
        assert!(path.exists());
    }
}
