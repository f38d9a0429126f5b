#![allow(dead_code)]

use watchfile::config::model::{
    RawCallback, RawGroup, RawGuard, RawNotification, RawPathRule, RawPattern, RawStatement,
    RawStructuredPattern, RawWatch, RawWatchfile,
};
use watchfile::config::Watchfile;
use watchfile::dsl::{LoggerDecl, ScopeDecl};
use watchfile::types::{OneOrMany, Options};

/// Builder for `Watchfile` to simplify test setup.
pub struct WatchfileBuilder {
    raw: RawWatchfile,
}

impl WatchfileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawWatchfile::default(),
        }
    }

    pub fn statement(mut self, stmt: RawStatement) -> Self {
        self.raw.statement.push(stmt);
        self
    }

    pub fn group(self, group: GroupBuilder) -> Self {
        self.statement(group.build())
    }

    pub fn guard(self, guard: GuardBuilder) -> Self {
        self.statement(guard.build())
    }

    pub fn notification(self, library: &str) -> Self {
        self.statement(RawStatement::Notification(RawNotification {
            library: library.to_string(),
            options: Options::new(),
        }))
    }

    pub fn logger(self, decl: LoggerDecl) -> Self {
        self.statement(RawStatement::Logger(decl))
    }

    pub fn scope(self, decl: ScopeDecl) -> Self {
        self.statement(RawStatement::Scope(decl))
    }

    pub fn ignore(self, patterns: &[&str]) -> Self {
        self.statement(RawStatement::Ignore(path_rule(patterns)))
    }

    pub fn ignore_replace(self, patterns: &[&str]) -> Self {
        self.statement(RawStatement::IgnoreReplace(path_rule(patterns)))
    }

    pub fn filter(self, patterns: &[&str]) -> Self {
        self.statement(RawStatement::Filter(path_rule(patterns)))
    }

    pub fn filter_replace(self, patterns: &[&str]) -> Self {
        self.statement(RawStatement::FilterReplace(path_rule(patterns)))
    }

    pub fn build_raw(self) -> RawWatchfile {
        self.raw
    }

    pub fn build(self) -> Watchfile {
        Watchfile::try_from(self.raw).expect("Failed to build valid Watchfile from builder")
    }
}

impl Default for WatchfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a `group` statement.
pub struct GroupBuilder {
    group: RawGroup,
}

impl GroupBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            group: RawGroup {
                name: name.to_string(),
                options: Options::new(),
                body: None,
            },
        }
    }

    pub fn statement(mut self, stmt: RawStatement) -> Self {
        self.group.body.get_or_insert_with(Vec::new).push(stmt);
        self
    }

    pub fn guard(self, guard: GuardBuilder) -> Self {
        self.statement(guard.build())
    }

    pub fn option(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.group.options.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> RawStatement {
        RawStatement::Group(self.group)
    }
}

/// Builder for a `guard` statement and the watchers/callbacks inside it.
pub struct GuardBuilder {
    guard: RawGuard,
}

impl GuardBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            guard: RawGuard {
                name: name.to_string(),
                options: Options::new(),
                body: Vec::new(),
            },
        }
    }

    pub fn statement(mut self, stmt: RawStatement) -> Self {
        self.guard.body.push(stmt);
        self
    }

    pub fn option(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.guard.options.insert(key.to_string(), value.into());
        self
    }

    pub fn watch_literal(self, path: &str) -> Self {
        self.watch(RawPattern::Literal(path.to_string()), None)
    }

    pub fn watch_regex(self, source: &str) -> Self {
        self.watch(
            RawPattern::Structured(RawStructuredPattern::Regex(source.to_string())),
            None,
        )
    }

    pub fn watch_regex_with_action(self, source: &str, templates: &[&str]) -> Self {
        self.watch(
            RawPattern::Structured(RawStructuredPattern::Regex(source.to_string())),
            Some(OneOrMany::Many(templates.iter().map(|s| s.to_string()).collect())),
        )
    }

    pub fn watch_glob(self, source: &str) -> Self {
        self.watch(
            RawPattern::Structured(RawStructuredPattern::Glob(source.to_string())),
            None,
        )
    }

    fn watch(self, pattern: RawPattern, action: Option<OneOrMany<String>>) -> Self {
        self.statement(RawStatement::Watch(RawWatch { pattern, action }))
    }

    pub fn callback(self, listener: &str, events: &[&str]) -> Self {
        self.statement(RawStatement::Callback(RawCallback {
            listener: Some(listener.to_string()),
            events: Some(OneOrMany::Many(events.iter().map(|s| s.to_string()).collect())),
            args: None,
        }))
    }

    pub fn build(self) -> RawStatement {
        RawStatement::Guard(self.guard)
    }
}

fn path_rule(patterns: &[&str]) -> RawPathRule {
    RawPathRule {
        patterns: OneOrMany::Many(patterns.iter().map(|s| s.to_string()).collect()),
    }
}
