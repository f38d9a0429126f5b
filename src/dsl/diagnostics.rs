// src/dsl/diagnostics.rs

//! Warning, error and deprecation channel for compilation.
//!
//! Every diagnostic is both recorded (so callers and tests can inspect it)
//! and emitted as a `tracing` event. None of them stop compilation.

use std::fmt;

use tracing::{error, info, warn};

/// Legacy statement shapes that are redirected here instead of doing what
/// they used to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deprecation {
    /// `ignore_paths`, superseded by `ignore` / `ignore!`.
    IgnorePaths,
    /// `interactor` with a value that is neither `"off"` nor a table.
    InteractorOptions,
}

impl Deprecation {
    /// Stable identifier for collaborators that log or escalate.
    pub fn id(self) -> &'static str {
        match self {
            Deprecation::IgnorePaths => "dsl_method_ignore_paths",
            Deprecation::InteractorOptions => "dsl_method_interactor",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Deprecation::IgnorePaths => {
                "`ignore_paths` is deprecated and has no effect; use `ignore` or `ignore!` instead."
            }
            Deprecation::InteractorOptions => {
                "`interactor` only accepts \"off\" or an options table; this form is deprecated and has no effect."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Deprecation(Deprecation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Deprecation(d) => write!(f, "deprecation [{}]: {}", d.id(), self.message),
        }
    }
}

/// Ordered collector of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.items.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.items.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    pub fn deprecation(&mut self, deprecation: Deprecation) {
        info!(id = deprecation.id(), "{}", deprecation.message());
        self.items.push(Diagnostic {
            severity: Severity::Deprecation(deprecation),
            message: deprecation.message().to_string(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn deprecations(&self) -> impl Iterator<Item = Deprecation> + '_ {
        self.items.iter().filter_map(|d| match d.severity {
            Severity::Deprecation(dep) => Some(dep),
            _ => None,
        })
    }
}
