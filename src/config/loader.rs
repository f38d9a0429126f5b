// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{RawWatchfile, Watchfile};
use crate::errors::{Result, WatchfileError};
use crate::fs::{FileSystem, RealFileSystem};

/// Project Watchfile name, looked up in the working directory.
pub const PROJECT_FILE_NAME: &str = "Watchfile.toml";
/// Fallback Watchfile in the home directory, used when the project has none.
pub const HOME_FILE_NAME: &str = ".Watchfile.toml";
/// Per-user additions, appended after whichever Watchfile was loaded.
pub const USER_FILE_NAME: &str = ".watchfile.toml";

/// Parse Watchfile source text without validating it.
pub fn parse_str(contents: &str) -> Result<RawWatchfile> {
    let raw: RawWatchfile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a Watchfile from a given path and return the raw `RawWatchfile`.
///
/// This only performs TOML deserialization; pattern compilation and callback
/// normalization happen in [`load_and_validate`].
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawWatchfile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    parse_str(&contents)
}

/// Load a Watchfile from disk and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Watchfile> {
    load_and_validate_with(&RealFileSystem, path)
}

pub fn load_and_validate_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Watchfile> {
    let raw = load_from_path(fs, &path)?;
    Watchfile::try_from(raw)
}

/// Which files make up one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    /// Project Watchfile (or the home fallback).
    pub project: PathBuf,
    /// Optional user additions, evaluated after the project file.
    pub user: Option<PathBuf>,
}

/// Locate the Watchfile(s) to evaluate.
///
/// - `explicit` is used if it exists; otherwise `~/.Watchfile.toml`.
/// - `~/.watchfile.toml` is appended when `include_user` is set and it exists.
pub fn discover(
    fs: &dyn FileSystem,
    explicit: &Path,
    home: Option<&Path>,
    include_user: bool,
) -> Result<ConfigSources> {
    let project = if fs.is_file(explicit) {
        explicit.to_path_buf()
    } else {
        match home.map(|h| h.join(HOME_FILE_NAME)) {
            Some(fallback) if fs.is_file(&fallback) => {
                info!(path = ?fallback, "no project Watchfile; using home Watchfile");
                fallback
            }
            _ => {
                return Err(WatchfileError::ConfigError(format!(
                    "no Watchfile found at {} or ~/{}",
                    explicit.display(),
                    HOME_FILE_NAME
                )));
            }
        }
    };

    let user = if include_user {
        home.map(|h| h.join(USER_FILE_NAME))
            .filter(|p| fs.is_file(p))
    } else {
        None
    };

    debug!(?project, ?user, "config sources");
    Ok(ConfigSources { project, user })
}

/// Load and validate every source, user statements last.
pub fn load_sources(fs: &dyn FileSystem, sources: &ConfigSources) -> Result<Watchfile> {
    let mut watchfile = load_and_validate_with(fs, &sources.project)?;
    if let Some(user) = &sources.user {
        let extra = load_and_validate_with(fs, user)?;
        debug!(path = ?user, statements = extra.len(), "appending user Watchfile");
        watchfile.append(extra);
    }
    Ok(watchfile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    const GUARD: &str = "[[statement]]\nkind = \"guard\"\nname = \"rspec\"\n";
    const NOTIFY: &str = "[[statement]]\nkind = \"notification\"\nlibrary = \"tmux\"\n";

    #[test]
    fn project_file_wins_over_home_fallback() {
        let fs = MockFileSystem::new();
        fs.add_file("/work/Watchfile.toml", GUARD);
        fs.add_file("/home/me/.Watchfile.toml", NOTIFY);

        let sources = discover(&fs, Path::new("/work/Watchfile.toml"), Some(Path::new("/home/me")), true)
            .unwrap();
        assert_eq!(sources.project, PathBuf::from("/work/Watchfile.toml"));
        assert_eq!(sources.user, None);
    }

    #[test]
    fn home_fallback_and_user_file_are_combined() {
        let fs = MockFileSystem::new();
        fs.add_file("/home/me/.Watchfile.toml", GUARD);
        fs.add_file("/home/me/.watchfile.toml", NOTIFY);

        let sources = discover(&fs, Path::new("Watchfile.toml"), Some(Path::new("/home/me")), true)
            .unwrap();
        assert_eq!(sources.project, PathBuf::from("/home/me/.Watchfile.toml"));

        let wf = load_sources(&fs, &sources).unwrap();
        assert_eq!(wf.len(), 2);
    }

    #[test]
    fn user_file_skipped_when_disabled() {
        let fs = MockFileSystem::new();
        fs.add_file("Watchfile.toml", GUARD);
        fs.add_file("/home/me/.watchfile.toml", NOTIFY);

        let sources = discover(&fs, Path::new("Watchfile.toml"), Some(Path::new("/home/me")), false)
            .unwrap();
        assert_eq!(sources.user, None);
    }

    #[test]
    fn missing_everything_is_a_config_error() {
        let fs = MockFileSystem::new();
        let err = discover(&fs, Path::new("Watchfile.toml"), None, true).unwrap_err();
        assert!(matches!(err, WatchfileError::ConfigError(_)));
    }
}
