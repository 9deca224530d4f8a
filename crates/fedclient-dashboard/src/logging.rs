//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
//! configured filter applies. While the TUI owns the terminal, logs are
//! written to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn filter_directive(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else if configured.trim().is_empty() {
        "info".to_string()
    } else {
        configured.trim().to_string()
    }
}

pub fn init(verbose: bool, configured: &str, target: LogTarget) -> anyhow::Result<()> {
    let directive = filter_directive(verbose, configured);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&directive)
            .with_context(|| format!("Invalid log filter '{directive}'"))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match target {
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_configured_filter() {
        assert_eq!(filter_directive(true, "warn"), "debug");
    }

    #[test]
    fn configured_filter_is_used() {
        assert_eq!(filter_directive(false, " fedclient_api=trace "), "fedclient_api=trace");
    }

    #[test]
    fn blank_filter_falls_back_to_info() {
        assert_eq!(filter_directive(false, ""), "info");
    }
}
