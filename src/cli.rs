// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchfile`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchfile",
    version,
    about = "Compile a Watchfile into plugin, watcher and hook specifications.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the Watchfile (TOML).
    ///
    /// Default: `Watchfile.toml` in the current working directory; falls back
    /// to `~/.Watchfile.toml` when that does not exist.
    #[arg(long, value_name = "PATH", default_value = "Watchfile.toml")]
    pub config: String,

    /// Do not append `~/.watchfile.toml`.
    #[arg(long)]
    pub no_user_config: bool,

    /// Only run plugins of this group. Takes precedence over `scope` in the
    /// Watchfile. May be repeated.
    #[arg(long = "group", short = 'g', value_name = "NAME")]
    pub groups: Vec<String>,

    /// Only run this plugin. Takes precedence over `scope` in the Watchfile.
    /// May be repeated.
    #[arg(long = "plugin", short = 'P', value_name = "NAME")]
    pub plugins: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHFILE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Exit with an error if compilation reported any error diagnostics.
    #[arg(long)]
    pub strict: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
