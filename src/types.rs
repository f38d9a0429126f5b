use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Name of a group or plugin as written in the Watchfile.
pub type Symbol = String;

/// Name of the implicit group every plugin falls back to.
pub const DEFAULT_GROUP: &str = "default";

/// Free-form options table handed through to collaborators (plugins,
/// groups, notifiers). The compiler never looks inside.
pub type Options = toml::Table;

/// A value that may be written either as a single item or as a list.
///
/// ```toml
/// only = "jasmine"
/// only = ["jasmine", "rspec"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Lifecycle events a callback can be attached to.
///
/// The well-known plugin methods have their own variants; anything else
/// (e.g. `start_begin`, `run_all_end` or a plugin-defined hook) is kept as
/// `Custom` so the set stays open.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EventName {
    Start,
    Stop,
    Reload,
    RunAll,
    RunOnChanges,
    RunOnAdditions,
    RunOnModifications,
    RunOnRemovals,
    Custom(String),
}

impl EventName {
    pub fn as_str(&self) -> &str {
        match self {
            EventName::Start => "start",
            EventName::Stop => "stop",
            EventName::Reload => "reload",
            EventName::RunAll => "run_all",
            EventName::RunOnChanges => "run_on_changes",
            EventName::RunOnAdditions => "run_on_additions",
            EventName::RunOnModifications => "run_on_modifications",
            EventName::RunOnRemovals => "run_on_removals",
            EventName::Custom(name) => name,
        }
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "start" => EventName::Start,
            "stop" => EventName::Stop,
            "reload" => EventName::Reload,
            "run_all" => EventName::RunAll,
            "run_on_changes" => EventName::RunOnChanges,
            "run_on_additions" => EventName::RunOnAdditions,
            "run_on_modifications" => EventName::RunOnModifications,
            "run_on_removals" => EventName::RunOnRemovals,
            _ => EventName::Custom(name),
        }
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        EventName::from(s.to_string())
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level accepted by the `logger` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LoggerLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LoggerLevel::Debug),
            "info" => Ok(LoggerLevel::Info),
            "warn" => Ok(LoggerLevel::Warn),
            "error" => Ok(LoggerLevel::Error),
            _ => Err(format!(
                "Invalid log level `{s}` ignored. Please use either debug, info, warn or error."
            )),
        }
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoggerLevel::Debug => "debug",
            LoggerLevel::Info => "info",
            LoggerLevel::Warn => "warn",
            LoggerLevel::Error => "error",
        };
        f.write_str(s)
    }
}
