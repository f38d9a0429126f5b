// src/dsl/options.rs

//! Cross-cutting settings: notifications, logger, scope and interactor.
//!
//! Bad values are dropped with a diagnostic; nothing here fails the
//! compilation.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::dsl::diagnostics::Diagnostics;
use crate::types::{LoggerLevel, OneOrMany, Options, Symbol};

/// One `notification` statement. Duplicates by library are kept; the
/// notifier decides which one wins.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEntry {
    pub library: Symbol,
    pub options: Options,
    pub silent: bool,
}

impl NotificationEntry {
    pub fn new(library: impl Into<Symbol>, options: Options) -> Self {
        Self {
            library: library.into(),
            options,
            silent: false,
        }
    }
}

/// Keys accepted by the `logger` statement.
///
/// ```toml
/// [[statement]]
/// kind = "logger"
/// level = "warn"
/// template = "[watch - :severity - :progname - :time] :message"
/// only = ["rspec", "jasmine"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerDecl {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub only: Option<OneOrMany<String>>,
    #[serde(default)]
    pub except: Option<OneOrMany<String>>,
}

/// Global logger options after all `logger` statements were merged.
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    pub level: Option<LoggerLevel>,
    pub template: Option<String>,
    pub time_format: Option<String>,
    /// Only show messages from matching plugins.
    pub only: Option<Regex>,
    /// Hide messages from matching plugins.
    pub except: Option<Regex>,
}

impl LoggerOptions {
    /// Merge one `logger` statement. Keys it does not set keep their
    /// previous values.
    pub fn merge(&mut self, decl: LoggerDecl, diags: &mut Diagnostics) {
        let level = decl.level.and_then(|raw| match raw.parse::<LoggerLevel>() {
            Ok(level) => Some(level),
            Err(msg) => {
                diags.warning(msg);
                None
            }
        });

        let (only, except) = match (decl.only, decl.except) {
            (Some(_), Some(_)) => {
                diags.warning("You cannot specify the logger options `only` and `except` at the same time.");
                (None, None)
            }
            pair => pair,
        };

        if let Some(level) = level {
            self.level = Some(level);
        }
        if let Some(template) = decl.template {
            self.template = Some(template);
        }
        if let Some(time_format) = decl.time_format {
            self.time_format = Some(time_format);
        }
        if let Some(re) = only.and_then(|names| plugin_alternation(names, diags)) {
            self.only = Some(re);
        }
        if let Some(re) = except.and_then(|names| plugin_alternation(names, diags)) {
            self.except = Some(re);
        }

        debug!(
            level = ?self.level,
            only = ?self.only.as_ref().map(Regex::as_str),
            except = ?self.except.as_ref().map(Regex::as_str),
            "logger options merged"
        );
    }
}

/// Escape plugin names and join them into one case-insensitive alternation.
fn plugin_alternation(names: OneOrMany<String>, diags: &mut Diagnostics) -> Option<Regex> {
    let source = names
        .into_vec()
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            diags.warning(format!("logger plugin filter `{source}` ignored: {e}"));
            None
        }
    }
}

/// Keys accepted by the `scope` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeDecl {
    #[serde(default)]
    pub plugin: Option<Symbol>,
    #[serde(default)]
    pub plugins: Option<Vec<Symbol>>,
    #[serde(default)]
    pub group: Option<Symbol>,
    #[serde(default)]
    pub groups: Option<Vec<Symbol>>,
}

/// Default plugins/groups active at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSpec {
    pub plugins: Vec<Symbol>,
    pub groups: Vec<Symbol>,
}

impl ScopeSpec {
    pub fn new(plugins: Vec<Symbol>, groups: Vec<Symbol>) -> Self {
        Self { plugins, groups }
    }

    /// Each axis is written only while it is empty, so a scope set on the
    /// command line (or by an earlier `scope`) wins.
    pub fn apply(&mut self, decl: ScopeDecl) {
        if self.plugins.is_empty() {
            if let Some(plugins) = pick(decl.plugin, decl.plugins) {
                self.plugins = plugins;
            }
        }
        if self.groups.is_empty() {
            if let Some(groups) = pick(decl.group, decl.groups) {
                self.groups = groups;
            }
        }
    }
}

/// The plural form wins when both are present.
fn pick(single: Option<Symbol>, plural: Option<Vec<Symbol>>) -> Option<Vec<Symbol>> {
    plural.or_else(|| single.map(|s| vec![s]))
}

/// Shape of an `interactor` statement's `options` value.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractorSetting {
    Off,
    Options(Options),
    /// Anything else: the deprecated form.
    Legacy(toml::Value),
}

impl From<toml::Value> for InteractorSetting {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) if s == "off" => InteractorSetting::Off,
            toml::Value::Table(options) => InteractorSetting::Options(options),
            other => InteractorSetting::Legacy(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractorSpec {
    pub enabled: bool,
    pub options: Options,
}

impl Default for InteractorSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            options: Options::new(),
        }
    }
}

impl InteractorSpec {
    /// Apply a setting. Returns false for the legacy form, which has no
    /// effect.
    pub fn apply(&mut self, setting: InteractorSetting) -> bool {
        match setting {
            InteractorSetting::Off => {
                self.enabled = false;
                true
            }
            InteractorSetting::Options(options) => {
                self.options = options;
                true
            }
            InteractorSetting::Legacy(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> OneOrMany<String> {
        OneOrMany::Many(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn invalid_level_is_dropped_but_other_keys_merge() {
        let mut diags = Diagnostics::default();
        let mut opts = LoggerOptions::default();
        opts.merge(
            LoggerDecl {
                level: Some("WARN".into()),
                ..Default::default()
            },
            &mut diags,
        );
        opts.merge(
            LoggerDecl {
                level: Some("verbose".into()),
                template: Some(":message".into()),
                ..Default::default()
            },
            &mut diags,
        );

        assert_eq!(opts.level, Some(LoggerLevel::Warn));
        assert_eq!(opts.template.as_deref(), Some(":message"));
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn only_and_except_together_are_both_dropped() {
        let mut diags = Diagnostics::default();
        let mut opts = LoggerOptions::default();
        opts.merge(
            LoggerDecl {
                only: Some(OneOrMany::One("jasmine".into())),
                except: Some(OneOrMany::One("rspec".into())),
                ..Default::default()
            },
            &mut diags,
        );

        assert!(opts.only.is_none());
        assert!(opts.except.is_none());
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn only_list_becomes_escaped_case_insensitive_alternation() {
        let mut diags = Diagnostics::default();
        let mut opts = LoggerOptions::default();
        opts.merge(
            LoggerDecl {
                only: Some(names(&["rspec", "c++"])),
                ..Default::default()
            },
            &mut diags,
        );

        let only = opts.only.unwrap();
        assert_eq!(only.as_str(), r"rspec|c\+\+");
        assert!(only.is_match("RSpec"));
        assert!(only.is_match("C++"));
        assert!(!only.is_match("jasmine"));
        assert!(diags.is_empty());
    }

    #[test]
    fn scope_first_writer_wins_per_axis() {
        let mut scope = ScopeSpec::default();
        scope.apply(ScopeDecl {
            group: Some("frontend".into()),
            ..Default::default()
        });
        scope.apply(ScopeDecl {
            group: Some("backend".into()),
            plugins: Some(vec!["jasmine".into(), "rspec".into()]),
            ..Default::default()
        });

        assert_eq!(scope.groups, vec!["frontend".to_string()]);
        assert_eq!(scope.plugins, vec!["jasmine".to_string(), "rspec".to_string()]);
    }

    #[test]
    fn plural_key_wins_within_one_statement() {
        let mut scope = ScopeSpec::default();
        scope.apply(ScopeDecl {
            group: Some("a".into()),
            groups: Some(vec!["b".into(), "c".into()]),
            plugin: Some("rspec".into()),
            plugins: Some(vec!["jasmine".into()]),
        });

        assert_eq!(scope.groups, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(scope.plugins, vec!["jasmine".to_string()]);
    }

    #[test]
    fn preset_scope_is_not_overwritten() {
        let mut scope = ScopeSpec::new(vec![], vec!["cli".into()]);
        scope.apply(ScopeDecl {
            groups: Some(vec!["specs".into(), "docs".into()]),
            ..Default::default()
        });
        assert_eq!(scope.groups, vec!["cli".to_string()]);
    }

    #[test]
    fn interactor_shapes() {
        assert_eq!(
            InteractorSetting::from(toml::Value::String("off".into())),
            InteractorSetting::Off
        );
        assert!(matches!(
            InteractorSetting::from(toml::Value::Boolean(false)),
            InteractorSetting::Legacy(_)
        ));

        let mut spec = InteractorSpec::default();
        assert!(!spec.apply(InteractorSetting::Legacy(toml::Value::Boolean(false))));
        assert!(spec.enabled);
        assert!(spec.apply(InteractorSetting::Off));
        assert!(!spec.enabled);
    }
}
