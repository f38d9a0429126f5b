// src/config/mod.rs

//! Watchfile loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed statement schema (`model.rs`).
//! - Locate and load Watchfiles (`loader.rs`).
//! - Compile patterns and normalize callbacks before evaluation (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    ConfigSources, discover, load_and_validate, load_and_validate_with,
    load_from_path, load_sources, parse_str,
};
pub use model::{RawStatement, RawWatchfile, Statement, Watchfile};
