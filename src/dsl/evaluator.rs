// src/dsl/evaluator.rs

//! Sequential statement evaluator.
//!
//! Statements run strictly in source order. The current group travels as an
//! explicit [`EvalContext`] value, and the plugin block being built (if any)
//! is passed down as a `&mut PluginSpecBuilder`, so no evaluation state
//! lives outside the call path.
//!
//! The evaluator never fails: problems are recorded as diagnostics and the
//! offending statement is skipped.

use tracing::debug;

use crate::config::model::{Statement, Watchfile};
use crate::dsl::diagnostics::Deprecation;
use crate::dsl::options::{NotificationEntry, ScopeSpec};
use crate::dsl::plugin::PluginSpecBuilder;
use crate::dsl::spec::CompiledSpec;
use crate::types::{DEFAULT_GROUP, Symbol};
use crate::watch::Watcher;

/// Evaluation context for one block.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    current_group: Option<Symbol>,
}

impl EvalContext {
    pub fn top_level() -> Self {
        Self::default()
    }

    fn within_group(&self, name: &str) -> Self {
        Self {
            current_group: Some(name.to_string()),
        }
    }

    /// Group new plugins are assigned to.
    pub fn group(&self) -> &str {
        self.current_group.as_deref().unwrap_or(DEFAULT_GROUP)
    }
}

/// Builds a [`CompiledSpec`] from one or more Watchfiles.
///
/// Evaluating twice into the same evaluator accumulates.
#[derive(Debug, Default)]
pub struct Evaluator {
    spec: CompiledSpec,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a scope set outside the Watchfile (command line).
    pub fn with_scope(scope: ScopeSpec) -> Self {
        let mut evaluator = Self::default();
        evaluator.spec.scope = scope;
        evaluator
    }

    pub fn evaluate(&mut self, watchfile: Watchfile) {
        let ctx = EvalContext::top_level();
        self.eval_block(watchfile.into_statements(), &ctx, None);
    }

    pub fn spec(&self) -> &CompiledSpec {
        &self.spec
    }

    pub fn finish(self) -> CompiledSpec {
        debug!(
            groups = self.spec.groups.len(),
            plugins = self.spec.plugins.len(),
            diagnostics = self.spec.diagnostics.len(),
            "compilation finished"
        );
        self.spec
    }

    fn eval_block(
        &mut self,
        statements: Vec<Statement>,
        ctx: &EvalContext,
        mut plugin: Option<&mut PluginSpecBuilder>,
    ) {
        for stmt in statements {
            self.eval_statement(stmt, ctx, plugin.as_deref_mut());
        }
    }

    fn eval_statement(
        &mut self,
        stmt: Statement,
        ctx: &EvalContext,
        plugin: Option<&mut PluginSpecBuilder>,
    ) {
        match stmt {
            Statement::Group { name, options, body } => {
                if body.is_empty() {
                    self.spec.diagnostics.error(format!(
                        "No plugins found in the group '{name}', please add at least one."
                    ));
                    return;
                }
                self.spec.groups.declare(&name, options);
                let inner = ctx.within_group(&name);
                self.eval_block(body, &inner, plugin);
            }
            Statement::Guard { name, options, body } => {
                if let Some(outer) = plugin {
                    self.spec.diagnostics.error(format!(
                        "plugin '{name}' is declared inside plugin '{}'; nested plugin declarations are not supported and it was skipped",
                        outer.name()
                    ));
                    return;
                }
                let mut builder = PluginSpecBuilder::new(name, options, ctx.group());
                self.eval_block(body, ctx, Some(&mut builder));
                self.spec.plugins.push(builder.finish());
            }
            Statement::Watch { pattern, action } => match plugin {
                Some(builder) => builder.watch(Watcher::new(pattern, action)),
                None => self.spec.diagnostics.error(format!(
                    "`watch` for '{}' is outside any plugin block and was skipped",
                    pattern.as_str()
                )),
            },
            Statement::Callback(entry) => match plugin {
                Some(builder) => builder.callback(entry),
                None => self.spec.diagnostics.error(format!(
                    "`callback` for '{}' is outside any plugin block and was skipped",
                    entry.listener()
                )),
            },
            Statement::Notification { library, options } => {
                debug!(%library, "notification");
                self.spec
                    .notifications
                    .push(NotificationEntry::new(library, options));
            }
            Statement::Interactor(setting) => {
                if !self.spec.interactor.apply(setting) {
                    self.spec
                        .diagnostics
                        .deprecation(Deprecation::InteractorOptions);
                }
            }
            Statement::Logger(decl) => {
                self.spec.logger.merge(decl, &mut self.spec.diagnostics);
            }
            Statement::Scope(decl) => {
                self.spec.scope.apply(decl);
                debug!(scope = ?self.spec.scope, "scope");
            }
            Statement::PathRule { op, patterns } => {
                self.spec.path_filter.apply(op, patterns);
            }
            Statement::IgnorePaths(_) => {
                self.spec.diagnostics.deprecation(Deprecation::IgnorePaths);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::RawWatchfile;
    use crate::dsl::diagnostics::Severity;

    fn compile(src: &str) -> CompiledSpec {
        let raw: RawWatchfile = toml::from_str(src).unwrap();
        let mut ev = Evaluator::new();
        ev.evaluate(Watchfile::try_from(raw).unwrap());
        ev.finish()
    }

    #[test]
    fn group_context_is_restored_after_nested_group() {
        let spec = compile(
            r#"
[[statement]]
kind = "group"
name = "outer"

  [[statement.body]]
  kind = "group"
  name = "inner"

    [[statement.body.body]]
    kind = "guard"
    name = "a"

  [[statement.body]]
  kind = "guard"
  name = "b"
"#,
        );
        assert_eq!(spec.plugin("a").unwrap().group, "inner");
        assert_eq!(spec.plugin("b").unwrap().group, "outer");
    }

    #[test]
    fn nested_plugin_is_skipped_and_outer_keeps_its_watchers() {
        let spec = compile(
            r#"
[[statement]]
kind = "guard"
name = "outer"

  [[statement.body]]
  kind = "watch"
  pattern = "a.rb"

  [[statement.body]]
  kind = "guard"
  name = "inner"

  [[statement.body]]
  kind = "watch"
  pattern = "b.rb"
"#,
        );
        assert_eq!(spec.plugins.len(), 1);
        let outer = spec.plugin("outer").unwrap();
        let patterns: Vec<&str> = outer.watchers.iter().map(|w| w.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["a.rb", "b.rb"]);
        assert!(spec.has_errors());
    }

    #[test]
    fn watch_outside_plugin_is_reported() {
        let spec = compile("[[statement]]\nkind = \"watch\"\npattern = \"x\"\n");
        assert!(spec.plugins.is_empty());
        assert_eq!(spec.diagnostics.errors().count(), 1);
    }

    #[test]
    fn empty_group_is_not_created() {
        let spec = compile("[[statement]]\nkind = \"group\"\nname = \"lonely\"\n");
        assert!(!spec.groups.contains("lonely"));
        assert_eq!(spec.diagnostics.errors().count(), 1);
    }

    #[test]
    fn statements_inside_plugin_body_still_apply_globally() {
        let spec = compile(
            r#"
[[statement]]
kind = "guard"
name = "rspec"

  [[statement.body]]
  kind = "notification"
  library = "tmux"
"#,
        );
        assert_eq!(spec.notifications.len(), 1);
        assert_eq!(spec.notifications[0].library, "tmux");
    }

    #[test]
    fn deprecated_forms_go_to_the_deprecation_channel() {
        let spec = compile(
            r#"
[[statement]]
kind = "ignore_paths"
paths = [".git", ".svn"]

[[statement]]
kind = "interactor"
options = false
"#,
        );
        let deps: Vec<Deprecation> = spec.diagnostics.deprecations().collect();
        assert_eq!(deps, vec![Deprecation::IgnorePaths, Deprecation::InteractorOptions]);
        assert!(spec.interactor.enabled);
        assert!(spec.path_filter.ignore_patterns().next().is_none());
        assert!(spec.diagnostics.iter().all(|d| d.severity != Severity::Error));
    }

    #[test]
    fn interactor_table_sets_options_and_stays_enabled() {
        let spec = compile(
            r#"
[[statement]]
kind = "interactor"
options = { foo = 1 }
"#,
        );
        assert!(spec.interactor.enabled);
        assert_eq!(spec.interactor.options.get("foo"), Some(&toml::Value::Integer(1)));
        assert!(spec.diagnostics.is_empty());
    }
}
