// src/config/model.rs

use serde::Deserialize;

use crate::dsl::callbacks::CallbackEntry;
use crate::dsl::options::{InteractorSetting, LoggerDecl, ScopeDecl};
use crate::types::{OneOrMany, Options, Symbol};
use crate::watch::{PathRuleOp, Pattern, Transform};
use regex::Regex;

/// Top-level Watchfile as read from TOML.
///
/// Statements are one ordered array; nesting goes through `body`:
///
/// ```toml
/// [[statement]]
/// kind = "group"
/// name = "backend"
///
///   [[statement.body]]
///   kind = "guard"
///   name = "rspec"
///   options = { cmd = "bundle exec rspec" }
///
///     [[statement.body.body]]
///     kind = "watch"
///     pattern = { regex = '^lib/(.+)\.rb$' }
///     action = "spec/{1}_spec.rb"
///
/// [[statement]]
/// kind = "guard"
/// name = "jasmine"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWatchfile {
    #[serde(default)]
    pub statement: Vec<RawStatement>,
}

/// One statement, tagged by `kind`. Unknown kinds and unknown keys are
/// rejected while parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawStatement {
    Group(RawGroup),
    Guard(RawGuard),
    Watch(RawWatch),
    Callback(RawCallback),
    Notification(RawNotification),
    Interactor(RawInteractor),
    Logger(LoggerDecl),
    Scope(ScopeDecl),
    Ignore(RawPathRule),
    #[serde(rename = "ignore!")]
    IgnoreReplace(RawPathRule),
    Filter(RawPathRule),
    #[serde(rename = "filter!")]
    FilterReplace(RawPathRule),
    IgnorePaths(RawIgnorePaths),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGroup {
    pub name: Symbol,
    #[serde(default)]
    pub options: Options,
    /// `None` and an empty list are both an empty group.
    #[serde(default)]
    pub body: Option<Vec<RawStatement>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGuard {
    pub name: Symbol,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub body: Vec<RawStatement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWatch {
    pub pattern: RawPattern,
    /// One template, a list of templates, or `[]` for "no output".
    #[serde(default)]
    pub action: Option<OneOrMany<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPattern {
    Literal(String),
    Structured(RawStructuredPattern),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStructuredPattern {
    Regex(String),
    Glob(String),
    Literal(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCallback {
    #[serde(default)]
    pub listener: Option<String>,
    #[serde(default)]
    pub events: Option<OneOrMany<String>>,
    /// Positional form: `args = ["listener", ["start", "stop"]]`.
    #[serde(default)]
    pub args: Option<Vec<OneOrMany<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNotification {
    pub library: Symbol,
    #[serde(default)]
    pub options: Options,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInteractor {
    pub options: toml::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPathRule {
    pub patterns: OneOrMany<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawIgnorePaths {
    #[serde(default)]
    pub paths: Vec<String>,
}

/// A validated Watchfile: patterns compiled, callbacks normalized.
///
/// Only constructible through `TryFrom<RawWatchfile>` (or by appending
/// other validated files).
#[derive(Debug, Clone, Default)]
pub struct Watchfile {
    statements: Vec<Statement>,
}

impl Watchfile {
    pub(crate) fn new_unchecked(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Append another file's statements after this one's (user config after
    /// project config).
    pub fn append(&mut self, other: Watchfile) {
        self.statements.extend(other.statements);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum Statement {
    Group {
        name: Symbol,
        options: Options,
        body: Vec<Statement>,
    },
    Guard {
        name: Symbol,
        options: Options,
        body: Vec<Statement>,
    },
    Watch {
        pattern: Pattern,
        action: Option<Transform>,
    },
    Callback(CallbackEntry),
    Notification {
        library: Symbol,
        options: Options,
    },
    Interactor(InteractorSetting),
    Logger(LoggerDecl),
    Scope(ScopeDecl),
    PathRule {
        op: PathRuleOp,
        patterns: Vec<Regex>,
    },
    IgnorePaths(Vec<String>),
}
