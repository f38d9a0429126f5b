// src/dsl/mod.rs

//! Watchfile compiler.
//!
//! This module ties together:
//! - the group table and plugin builders
//! - callback normalization
//! - logger / scope / notification / interactor merging
//! - the diagnostics channel
//!
//! [`evaluator::Evaluator`] walks validated statements and produces a
//! [`spec::CompiledSpec`].

pub mod callbacks;
pub mod diagnostics;
pub mod evaluator;
pub mod groups;
pub mod options;
pub mod plugin;
pub mod spec;

pub use callbacks::{CallbackEntry, CallbackRegistry, Listener};
pub use diagnostics::{Deprecation, Diagnostic, Diagnostics, Severity};
pub use evaluator::{EvalContext, Evaluator};
pub use groups::{GroupSpec, GroupTable};
pub use options::{
    InteractorSetting, InteractorSpec, LoggerDecl, LoggerOptions, NotificationEntry, ScopeDecl,
    ScopeSpec,
};
pub use plugin::{PluginSpec, PluginSpecBuilder};
pub use spec::CompiledSpec;

use crate::config::model::Watchfile;

/// Compile one validated Watchfile, starting from `scope`.
pub fn compile(watchfile: Watchfile, scope: ScopeSpec) -> CompiledSpec {
    let mut evaluator = Evaluator::with_scope(scope);
    evaluator.evaluate(watchfile);
    evaluator.finish()
}
