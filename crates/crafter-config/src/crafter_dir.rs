//! Discovery of the `.crafter/` directory.
//!
//! `.crafter/` holds a project's `config.yaml`. It is found by walking up
//! from the working directory, unless `CRAFTER_DIR` points somewhere else.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the crafter metadata directory.
pub const CRAFTER_DIR_NAME: &str = ".crafter";

/// Environment variable that overrides directory discovery.
pub const CRAFTER_DIR_ENV: &str = "CRAFTER_DIR";

/// Walk up from `start` looking for a `.crafter/` directory.
///
/// `CRAFTER_DIR` wins when it names an existing directory. Returns `None`
/// when the filesystem root is reached without a match.
///
/// # Examples
///
/// ```no_run
/// use crafter_config::crafter_dir::find_crafter_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_crafter_dir(Path::new(".")) {
///     println!("config lives in {}", dir.display());
/// }
/// ```
pub fn find_crafter_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(CRAFTER_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(CRAFTER_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_crafter_dir`], but reports a missing directory as
/// [`ConfigError::CrafterDirNotFound`].
pub fn find_crafter_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_crafter_dir(start).ok_or(ConfigError::CrafterDirNotFound)
}

/// Ensure a `.crafter/` directory exists at (or under) `path` and return it.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_crafter_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(CRAFTER_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(CRAFTER_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
