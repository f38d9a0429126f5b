// src/dsl/plugin.rs

//! Builds one plugin specification from a `guard` block.

use tracing::debug;

use crate::dsl::callbacks::{CallbackEntry, CallbackRegistry};
use crate::types::{EventName, Options, Symbol};
use crate::watch::Watcher;

/// Everything the plugin registry needs to instantiate one plugin.
#[derive(Debug, Clone)]
pub struct PluginSpec {
    pub name: Symbol,
    /// Caller options, passed through unchanged.
    pub options: Options,
    pub group: Symbol,
    pub watchers: Vec<Watcher>,
    pub callbacks: CallbackRegistry,
}

impl PluginSpec {
    pub fn callbacks_for<'a>(&'a self, event: &'a EventName) -> impl Iterator<Item = &'a str> + 'a {
        self.callbacks.for_event(event).map(|l| l.as_str())
    }
}

/// Accumulates watchers and callbacks for the plugin block being evaluated.
///
/// Each builder owns its accumulators, so one block can never see another
/// block's watchers.
#[derive(Debug)]
pub struct PluginSpecBuilder {
    name: Symbol,
    options: Options,
    group: Symbol,
    watchers: Vec<Watcher>,
    callbacks: CallbackRegistry,
}

impl PluginSpecBuilder {
    pub fn new(name: impl Into<Symbol>, options: Options, group: impl Into<Symbol>) -> Self {
        Self {
            name: name.into(),
            options,
            group: group.into(),
            watchers: Vec::new(),
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn watch(&mut self, watcher: Watcher) {
        debug!(plugin = %self.name, pattern = watcher.pattern().as_str(), "watch");
        self.watchers.push(watcher);
    }

    pub fn callback(&mut self, entry: CallbackEntry) {
        debug!(plugin = %self.name, listener = %entry.listener(), "callback");
        self.callbacks.register(entry);
    }

    pub fn finish(self) -> PluginSpec {
        debug!(
            plugin = %self.name,
            group = %self.group,
            watchers = self.watchers.len(),
            callbacks = self.callbacks.len(),
            "plugin declared"
        );
        PluginSpec {
            name: self.name,
            options: self.options,
            group: self.group,
            watchers: self.watchers,
            callbacks: self.callbacks,
        }
    }
}
