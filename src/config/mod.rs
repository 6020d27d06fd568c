//! Settings loading.
//!
//! This module handles:
//! - Settings schema ([`Settings`])
//! - Layered file discovery and merging ([`load_settings`])
//! - `.env` lookup for the GitHub token ([`read_env_file`])
//! - Deciding where the catalog lives ([`CatalogLocation`])

pub mod env_file;
pub mod loader;
pub mod schema;

pub use env_file::read_env_file;
pub use loader::{load_settings, load_settings_file, merge_settings, ConfigPaths, PROJECT_CONFIG_FILE};
pub use schema::{CatalogSettings, RemoteSettings, Settings};

use std::path::{Path, PathBuf};

/// Catalog directory used when nothing is configured.
pub const DEFAULT_CATALOG_DIR: &str = "features";

/// Resolved catalog location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// A directory on disk.
    Local(PathBuf),
    /// A directory in a GitHub repository.
    Remote(RemoteSettings),
}

impl Settings {
    /// Where the catalog lives according to these settings.
    ///
    /// Relative local paths are resolved against `work_dir`.
    pub fn catalog_location(&self, work_dir: &Path) -> CatalogLocation {
        if let Some(remote) = &self.catalog.remote {
            return CatalogLocation::Remote(remote.clone());
        }

        let path = self
            .catalog
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR));
        CatalogLocation::Local(work_dir.join(path))
    }
}

/// Find the API token for a remote catalog.
///
/// The environment variable named by `token_env` wins; otherwise the same key
/// is looked up in `.env` inside `work_dir`.
pub fn resolve_token(remote: &RemoteSettings, work_dir: &Path) -> Option<String> {
    if let Ok(token) = std::env::var(&remote.token_env) {
        if !token.is_empty() {
            return Some(token);
        }
    }

    match read_env_file(&work_dir.join(".env")) {
        Ok(mut vars) => vars.remove(&remote.token_env).filter(|t| !t.is_empty()),
        Err(e) => {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}
