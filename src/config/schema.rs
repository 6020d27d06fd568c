//! Settings file schema.
//!
//! ```yaml
//! catalog:
//!   path: ./features
//! on_collision: overwrite
//! ```
//!
//! or, for a catalog kept in a GitHub repository:
//!
//! ```yaml
//! catalog:
//!   remote:
//!     repo: acme/project-features
//!     branch: main
//!     dir: features
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::apply::CollisionPolicy;

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Where features come from.
    pub catalog: CatalogSettings,

    /// What to do when two sources provide the same file.
    pub on_collision: Option<CollisionPolicy>,
}

/// Catalog location. `path` and `remote` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSettings {
    /// Local catalog directory, relative to the working directory.
    pub path: Option<PathBuf>,

    /// GitHub-hosted catalog.
    pub remote: Option<RemoteSettings>,
}

impl CatalogSettings {
    /// Whether this layer names a catalog location at all.
    pub fn is_set(&self) -> bool {
        self.path.is_some() || self.remote.is_some()
    }
}

/// A catalog kept in a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSettings {
    /// Repository as `owner/name`.
    pub repo: String,

    /// Branch, tag or commit to read from.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Directory inside the repository holding the features.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// GitHub API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl RemoteSettings {
    /// Settings for `repo` with every other field at its default.
    pub fn for_repo(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ..Self::default()
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            repo: String::new(),
            branch: default_branch(),
            dir: default_dir(),
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_dir() -> String {
    "features".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_API_TOKEN".to_string()
}
