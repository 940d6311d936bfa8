//! Tracing subscriber setup.
//!
//! The dashboard owns the terminal, so logs go to a file. Line mode logs to
//! stderr. The filter comes from `AGENTDECK_LOG`, then `RUST_LOG`, then
//! defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub const LOG_ENV: &str = "AGENTDECK_LOG";
const DEFAULT_FILTER: &str = "info";

/// Filter directives from the environment, if any.
pub fn filter_directives<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(|key| std::env::var(key).ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log file in use, if any.
///
/// A second call is a no-op.
pub fn init(config: &AppConfig) -> io::Result<Option<PathBuf>> {
    if config.headless {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init();
        return Ok(None);
    }

    let Some(path) = config.log_path() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::sink)
            .try_init();
        return Ok(None);
    };

    let file = open_log_file(&path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(Some(path))
}

fn open_log_file(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_prefers_app_variable() {
        let directives = filter_directives(|key| match key {
            LOG_ENV => Some("debug".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(directives, "debug");
    }

    #[test]
    fn test_filter_falls_back_to_rust_log_then_info() {
        let directives = filter_directives(|key| match key {
            LOG_ENV => Some(String::new()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(directives, "warn");
        assert_eq!(filter_directives(|_| None), "info");
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
