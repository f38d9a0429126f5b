// src/dsl/groups.rs

use tracing::debug;

use crate::types::{DEFAULT_GROUP, Options, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub name: Symbol,
    pub options: Options,
}

/// Declared groups in declaration order. `default` is always first.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTable {
    groups: Vec<GroupSpec>,
}

impl Default for GroupTable {
    fn default() -> Self {
        Self {
            groups: vec![GroupSpec {
                name: DEFAULT_GROUP.to_string(),
                options: Options::new(),
            }],
        }
    }
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group. Re-declaring keeps the existing entry (and its
    /// options) untouched; returns true if the group is new.
    pub fn declare(&mut self, name: &str, options: Options) -> bool {
        if self.contains(name) {
            debug!(group = %name, "group re-declared; keeping existing entry");
            return false;
        }
        debug!(group = %name, "group declared");
        self.groups.push(GroupSpec {
            name: name.to_string(),
            options,
        });
        true
    }

    pub fn get(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupSpec> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
