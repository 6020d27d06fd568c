//! Catalog manifest (`catalog.yml`) parsing and catalog assembly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{checked_relative, name_problem, Catalog, Feature, BASE_NAME};
use crate::error::{GraftError, Result};

/// Manifest file name at the catalog root.
pub const MANIFEST_FILE: &str = "catalog.yml";

/// Directory used as the Base template when the manifest does not name one.
pub const DEFAULT_BASE_DIR: &str = "base";

/// Description given to the Base template.
const BASE_DESCRIPTION: &str = "Files included in every project";

/// Contents of a `catalog.yml` manifest.
///
/// ```yaml
/// base: common
/// features:
///   - name: docker
///     description: "Dockerfile and compose setup"
///   - name: ci
///     path: github-actions
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    /// Directory holding the Base template.
    #[serde(default)]
    pub base: Option<String>,

    /// Features in menu order.
    #[serde(default)]
    pub features: Vec<ManifestEntry>,
}

/// One feature listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Feature name.
    pub name: String,

    /// Directory relative to the catalog root (defaults to the name).
    #[serde(default)]
    pub path: Option<String>,

    /// Description shown in the menu.
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogManifest {
    /// Parse manifest YAML. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| GraftError::CatalogParseError {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Turn the manifest into a catalog.
    ///
    /// `has_dir` reports whether a directory exists relative to the catalog
    /// root; every referenced directory must exist.
    pub fn resolve(&self, has_dir: impl Fn(&Path) -> bool) -> Result<Catalog> {
        let mut features = Vec::with_capacity(self.features.len());

        for entry in &self.features {
            let raw = entry.path.as_deref().unwrap_or(&entry.name);
            let path = checked_relative(raw)?;
            if !has_dir(&path) {
                return Err(GraftError::catalog(format!(
                    "feature '{}' points at missing directory '{}'",
                    entry.name, raw
                )));
            }

            features.push(Feature {
                name: entry.name.clone(),
                source_path: path,
                description: entry.description.clone().unwrap_or_default(),
            });
        }

        let base = match &self.base {
            Some(dir) => {
                let path = checked_relative(dir)?;
                if !has_dir(&path) {
                    return Err(GraftError::catalog(format!(
                        "base template directory '{}' does not exist",
                        dir
                    )));
                }
                Some(base_feature(path))
            }
            None => {
                let path = Path::new(DEFAULT_BASE_DIR);
                has_dir(path).then(|| base_feature(path))
            }
        };

        Catalog::new(features, base)
    }
}

/// Build a catalog from a plain directory listing.
///
/// Hidden directories are ignored, `base` becomes the Base template and the
/// rest are features sorted by name. Directories whose names the selector
/// could not accept are skipped with a warning.
pub fn discover(mut dirs: Vec<String>) -> Result<Catalog> {
    dirs.sort();

    let mut base = None;
    let mut features = Vec::new();

    for dir in dirs {
        if dir.starts_with('.') {
            continue;
        }
        if dir == DEFAULT_BASE_DIR {
            base = Some(base_feature(DEFAULT_BASE_DIR));
            continue;
        }
        if let Some(problem) = name_problem(&dir) {
            tracing::warn!("Skipping directory '{}': {}", dir, problem);
            continue;
        }
        features.push(Feature::new(dir.clone(), dir, ""));
    }

    Catalog::new(features, base)
}

fn base_feature(path: impl AsRef<Path>) -> Feature {
    Feature::new(BASE_NAME, path.as_ref(), BASE_DESCRIPTION)
}
