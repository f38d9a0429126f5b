// src/watch/path_utils.rs

//! Utility functions for path handling in the matchers.

use std::borrow::Cow;

/// Normalize a relative path to forward slashes so that patterns written on
/// one platform match paths reported on another.
///
/// Borrows when there is nothing to rewrite.
pub fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}
