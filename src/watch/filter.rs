// src/watch/filter.rs

//! Global path-exclusion predicate built by `ignore`, `ignore!`, `filter`
//! and `filter!` statements.

use regex::Regex;
use tracing::debug;

use crate::watch::path_utils::normalize_separators;

/// The four path-rule statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRuleOp {
    /// `ignore`: add ignore patterns.
    Ignore,
    /// `ignore!`: replace all ignore patterns.
    IgnoreReplace,
    /// `filter`: add filter patterns.
    Filter,
    /// `filter!`: replace all filter patterns.
    FilterReplace,
}

impl PathRuleOp {
    pub fn keyword(self) -> &'static str {
        match self {
            PathRuleOp::Ignore => "ignore",
            PathRuleOp::IgnoreReplace => "ignore!",
            PathRuleOp::Filter => "filter",
            PathRuleOp::FilterReplace => "filter!",
        }
    }
}

/// Ignore and filter regexes, consumed by the change-detection engine.
///
/// The two axes are independent: replacing one never touches the other.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    ignore: Vec<Regex>,
    filter: Vec<Regex>,
}

impl PathFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, op: PathRuleOp, patterns: Vec<Regex>) {
        debug!(op = op.keyword(), count = patterns.len(), "applying path rule");
        match op {
            PathRuleOp::Ignore => self.ignore.extend(patterns),
            PathRuleOp::IgnoreReplace => self.ignore = patterns,
            PathRuleOp::Filter => self.filter.extend(patterns),
            PathRuleOp::FilterReplace => self.filter = patterns,
        }
    }

    pub fn ignore_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignore.iter().map(Regex::as_str)
    }

    pub fn filter_patterns(&self) -> impl Iterator<Item = &str> {
        self.filter.iter().map(Regex::as_str)
    }

    pub fn is_ignored(&self, rel_path: &str) -> bool {
        let path = normalize_separators(rel_path);
        self.ignore.iter().any(|re| re.is_match(&path))
    }

    /// True if the path survives both axes: it matches no ignore pattern and,
    /// when filter patterns exist, at least one of them.
    pub fn accepts(&self, rel_path: &str) -> bool {
        if self.is_ignored(rel_path) {
            return false;
        }
        if self.filter.is_empty() {
            return true;
        }
        let path = normalize_separators(rel_path);
        self.filter.iter().any(|re| re.is_match(&path))
    }
}
