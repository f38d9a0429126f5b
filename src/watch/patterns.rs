// src/watch/patterns.rs

use std::fmt;

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::errors::{Result, WatchfileError};
use crate::watch::path_utils::normalize_separators;

/// What a `watch` statement matches against.
///
/// ```toml
/// pattern = "Gemfile"                       # literal path
/// pattern = { regex = '^lib/(.+)\.rb$' }    # regex with captures
/// pattern = { glob = "spec/**/*_spec.rb" }  # glob, no captures
/// ```
#[derive(Clone)]
pub enum Pattern {
    /// Matches exactly one relative path.
    Literal(String),
    /// Unanchored regex; capture groups feed the transform.
    Regex(Regex),
    /// Glob matched against the whole relative path.
    Glob { source: String, matcher: GlobMatcher },
}

impl Pattern {
    pub fn literal(path: impl Into<String>) -> Self {
        Pattern::Literal(path.into())
    }

    pub fn regex(source: &str) -> Result<Self> {
        let re = Regex::new(source).map_err(|e| WatchfileError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Pattern::Regex(re))
    }

    pub fn glob(source: &str) -> Result<Self> {
        let glob = Glob::new(source).map_err(|e| WatchfileError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Pattern::Glob {
            source: source.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Source text of the pattern, as written.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(path) => path,
            Pattern::Regex(re) => re.as_str(),
            Pattern::Glob { source, .. } => source,
        }
    }

    /// Match a relative path, returning the match result on success.
    ///
    /// Group 0 is always the matched text; literal and glob patterns have no
    /// further groups.
    pub fn captures(&self, rel_path: &str) -> Option<PatternMatch> {
        let path = normalize_separators(rel_path);
        match self {
            Pattern::Literal(literal) => (literal.as_str() == &*path).then(|| PatternMatch {
                path: path.to_string(),
                groups: vec![Some(path.to_string())],
            }),
            Pattern::Regex(re) => re.captures(&path).map(|caps| PatternMatch {
                path: path.to_string(),
                groups: caps
                    .iter()
                    .map(|group| group.map(|m| m.as_str().to_string()))
                    .collect(),
            }),
            Pattern::Glob { matcher, .. } => matcher.is_match(&*path).then(|| PatternMatch {
                path: path.to_string(),
                groups: vec![Some(path.to_string())],
            }),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            Pattern::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Pattern::Glob { source, .. } => f.debug_tuple("Glob").field(source).finish(),
        }
    }
}

/// Structured result of matching a path against a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    path: String,
    groups: Vec<Option<String>>,
}

impl PatternMatch {
    /// The path that was matched (separators normalized to `/`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Capture group `index`; `None` if it did not participate or does not exist.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Action bound to a watch pattern.
///
/// Templates may reference captures as `{0}`, `{1}`, ...; a reference to a
/// missing group expands to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// The match produces no output.
    Nothing,
    /// One path or command.
    Single(String),
    /// An ordered list of paths or commands.
    Multi(Vec<String>),
}

impl Transform {
    /// Build a transform from the list written in the Watchfile: an empty
    /// list is `Nothing`, one element is `Single`, more is `Multi`.
    pub fn from_templates(mut templates: Vec<String>) -> Self {
        match templates.len() {
            0 => Transform::Nothing,
            1 => Transform::Single(templates.remove(0)),
            _ => Transform::Multi(templates),
        }
    }

    pub fn apply(&self, m: &PatternMatch) -> ActionOutput {
        match self {
            Transform::Nothing => ActionOutput::Nothing,
            Transform::Single(tpl) => ActionOutput::Single(expand_template(tpl, m)),
            Transform::Multi(tpls) => {
                ActionOutput::Multi(tpls.iter().map(|tpl| expand_template(tpl, m)).collect())
            }
        }
    }
}

/// Result of running a watcher against a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    Nothing,
    Single(String),
    Multi(Vec<String>),
}

impl ActionOutput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ActionOutput::Nothing => Vec::new(),
            ActionOutput::Single(s) => vec![s],
            ActionOutput::Multi(v) => v,
        }
    }
}

/// A pattern paired with an optional transform, in declaration order inside
/// its plugin.
#[derive(Debug, Clone)]
pub struct Watcher {
    pattern: Pattern,
    action: Option<Transform>,
}

impl Watcher {
    pub fn new(pattern: Pattern, action: Option<Transform>) -> Self {
        Self { pattern, action }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn action(&self) -> Option<&Transform> {
        self.action.as_ref()
    }

    pub fn match_path(&self, rel_path: &str) -> Option<PatternMatch> {
        self.pattern.captures(rel_path)
    }

    /// Match `rel_path` and run the action.
    ///
    /// Without an action the matched path itself is the output.
    pub fn apply(&self, rel_path: &str) -> Option<ActionOutput> {
        let m = self.match_path(rel_path)?;
        Some(match &self.action {
            Some(transform) => transform.apply(&m),
            None => ActionOutput::Single(m.path().to_string()),
        })
    }
}

fn expand_template(template: &str, m: &PatternMatch) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 && after[..close].bytes().all(|b| b.is_ascii_digit()) => {
                if let Ok(index) = after[..close].parse::<usize>() {
                    out.push_str(m.get(index).unwrap_or(""));
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
