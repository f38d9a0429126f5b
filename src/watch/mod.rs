// src/watch/mod.rs

//! Watch patterns and path filters.
//!
//! This module is responsible for:
//! - Pairing a match pattern (literal, regex or glob) with an optional
//!   transform into a `Watcher`.
//! - Expanding transform templates from structured match results.
//! - The global ignore/filter predicate.
//!
//! It does **not** detect file changes; the orchestration engine feeds
//! relative paths into these types.

pub mod filter;
pub mod path_utils;
pub mod patterns;

pub use filter::{PathFilter, PathRuleOp};
pub use patterns::{ActionOutput, Pattern, PatternMatch, Transform, Watcher};
