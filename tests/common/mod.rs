#![allow(dead_code)]

use std::path::PathBuf;

pub use watchfile_test_utils::init_tracing;

/// Path of a Watchfile under `demos/`.
pub fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}
