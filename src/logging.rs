// src/logging.rs

//! Logging setup for `watchfile` using `tracing` + `tracing-subscriber`.
//!
//! Filter precedence:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `WATCHFILE_LOG`, in `EnvFilter` syntax (`debug`,
//!    `watchfile::dsl=trace,info`, ...)
//! 3. `info`
//!
//! Logs go to STDERR; the compiled summary is printed on STDOUT.

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "WATCHFILE_LOG";

/// Initialise global logging subscriber.
///
/// Fails on malformed `WATCHFILE_LOG` directives or if a subscriber is
/// already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(lvl) = cli_level {
        return Ok(EnvFilter::new(level_directive(lvl)));
    }
    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value `{directives}`")),
        None => Ok(EnvFilter::new("info")),
    }
}

fn level_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn cli_level_overrides_env() {
        let filter = build_filter(Some(LogLevel::Debug), Some("error")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn env_directives_and_default() {
        let filter = build_filter(None, Some("watchfile::dsl=trace,warn")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = build_filter(None, Some("  ")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn malformed_env_is_an_error() {
        let err = build_filter(None, Some("watchfile=loud")).unwrap_err();
        assert!(err.to_string().contains(LOG_ENV));
    }
}
