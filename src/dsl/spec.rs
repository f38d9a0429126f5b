// src/dsl/spec.rs

use crate::dsl::diagnostics::Diagnostics;
use crate::dsl::groups::GroupTable;
use crate::dsl::options::{InteractorSpec, LoggerOptions, NotificationEntry, ScopeSpec};
use crate::dsl::plugin::PluginSpec;
use crate::watch::PathFilter;

/// Everything a Watchfile declares, ready for the orchestration engine.
#[derive(Debug, Clone, Default)]
pub struct CompiledSpec {
    pub groups: GroupTable,
    /// In declaration order; the same plugin may appear more than once.
    pub plugins: Vec<PluginSpec>,
    pub notifications: Vec<NotificationEntry>,
    pub logger: LoggerOptions,
    pub scope: ScopeSpec,
    pub interactor: InteractorSpec,
    pub path_filter: PathFilter,
    pub diagnostics: Diagnostics,
}

impl CompiledSpec {
    /// First plugin with this name.
    pub fn plugin(&self, name: &str) -> Option<&PluginSpec> {
        self.plugins.iter().find(|p| p.name == name)
    }

    pub fn plugins_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a PluginSpec> + 'a {
        self.plugins.iter().filter(move |p| p.group == group)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
