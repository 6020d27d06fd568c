//! `.env` file lookup.
//!
//! Used to find the GitHub token when it is not exported in the shell.
//! Parsing follows `dotenvy`: `export` prefixes, quoting and comments are
//! understood; variables are never loaded into the process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{GraftError, Result};

/// Read every variable from an env file, returning an empty map if the file
/// doesn't exist.
///
/// Lines that fail to parse are skipped with a warning.
///
/// # Example
///
/// ```
/// use graft::config::read_env_file;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join(".env");
/// std::fs::write(&path, "# GitHub access\nexport GITHUB_API_TOKEN=\"ghp_example\"\n").unwrap();
///
/// let vars = read_env_file(&path).unwrap();
/// assert_eq!(vars.get("GITHUB_API_TOKEN"), Some(&"ghp_example".to_string()));
/// ```
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let iter = dotenvy::from_path_iter(path).map_err(|e| GraftError::ConfigError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => tracing::warn!("Skipping line in {}: {}", path.display(), e),
        }
    }

    Ok(vars)
}
