//! Feature catalog.
//!
//! A catalog is an ordered listing of optional features plus an optional
//! Base template that is always applied. Catalogs come from a
//! [`FeatureSource`]:
//! - [`LocalSource`] reads a features directory on disk
//! - [`GithubSource`] lists a directory of a GitHub repository
//!
//! # Layout
//!
//! A catalog root holds one subdirectory per feature. A `catalog.yml`
//! manifest, when present, fixes names, order and descriptions; otherwise
//! every non-hidden subdirectory is a feature and `base/` is the Base
//! template.
//!
//! # Example
//!
//! ```
//! use graft::catalog::{Catalog, Feature};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         Feature::new("docker", "docker", "Dockerfile and compose setup"),
//!         Feature::new("ci", "ci", "GitHub Actions workflow"),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(catalog.features().len(), 2);
//! assert_eq!(catalog.position("ci"), Some(1));
//! ```

pub mod fetch;
pub mod local;
pub mod manifest;
pub mod remote;

pub use fetch::HttpFetcher;
pub use local::LocalSource;
pub use manifest::{CatalogManifest, ManifestEntry, DEFAULT_BASE_DIR, MANIFEST_FILE};
pub use remote::GithubSource;

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{GraftError, Result};

/// Name under which the Base template is reported.
pub const BASE_NAME: &str = "base";

/// Words the selector reserves; features may not use them as names.
const RESERVED_NAMES: &[&str] = &["all", "none"];

/// A named directory of template files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Unique identifier shown in menus and accepted by the selector.
    pub name: String,
    /// Directory of the feature, relative to the catalog root.
    pub source_path: PathBuf,
    /// One-line description for display.
    pub description: String,
}

impl Feature {
    /// Create a feature entry.
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            description: description.into(),
        }
    }
}

/// Ordered, read-only listing of features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    base: Option<Feature>,
    features: Vec<Feature>,
}

impl Catalog {
    /// Build a catalog, checking that every feature name is usable and unique.
    pub fn new(features: Vec<Feature>, base: Option<Feature>) -> Result<Self> {
        let mut seen = HashSet::new();

        for feature in &features {
            validate_name(&feature.name)?;

            if feature.name == BASE_NAME && base.is_some() {
                return Err(GraftError::catalog(format!(
                    "feature name '{}' is reserved for the base template",
                    BASE_NAME
                )));
            }

            if !seen.insert(feature.name.as_str()) {
                return Err(GraftError::catalog(format!(
                    "feature '{}' is listed more than once",
                    feature.name
                )));
            }
        }

        Ok(Self { base, features })
    }

    /// Features in listing order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The Base template, if the catalog has one.
    pub fn base(&self) -> Option<&Feature> {
        self.base.as_ref()
    }

    /// Look up a feature by name.
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Listing position of a feature.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }

    /// Number of selectable features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether there are no selectable features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Where a feature file can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A URL to download.
    Remote(String),
}

/// A file contributed by a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the feature directory, and so to the target.
    pub relative_path: PathBuf,
    /// Where the content lives.
    pub location: FileLocation,
}

/// A provider of features and their files.
pub trait FeatureSource {
    /// Human-readable description of the source (path or repository).
    fn describe(&self) -> String;

    /// Load the catalog.
    fn list_features(&self) -> Result<Catalog>;

    /// List every file of a feature, sorted by relative path.
    fn files(&self, feature: &Feature) -> Result<Vec<SourceFile>>;

    /// Read a file's content.
    fn read(&self, file: &SourceFile) -> Result<Vec<u8>>;
}

fn validate_name(name: &str) -> Result<()> {
    match name_problem(name) {
        Some(problem) => Err(GraftError::catalog(problem)),
        None => Ok(()),
    }
}

/// Why `name` cannot be offered in the selection menu, if it can't.
///
/// Names must be non-empty, free of whitespace and commas, not purely
/// digits, and not one of the selector's keywords.
pub(crate) fn name_problem(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("feature names must not be empty".to_string());
    }

    if name.chars().any(|c| c.is_whitespace() || c == ',') {
        return Some(format!(
            "feature name '{}' must not contain spaces or commas",
            name
        ));
    }

    if name.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!(
            "feature name '{}' would be read as a menu number",
            name
        ));
    }

    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        return Some(format!("feature name '{}' is reserved", name));
    }

    None
}

/// Convert a `/`-separated path from a catalog into a relative path.
///
/// Rejects absolute paths and `..` segments so a catalog can never write
/// outside the target directory.
pub(crate) fn checked_relative(raw: &str) -> Result<PathBuf> {
    let escapes = || GraftError::catalog(format!("path '{}' escapes its directory", raw));

    if raw.starts_with('/') || raw.starts_with('\\') {
        return Err(escapes());
    }

    let mut path = PathBuf::new();
    for part in raw.split(['/', '\\']) {
        match part {
            "" | "." => continue,
            ".." => return Err(escapes()),
            p if p.contains(':') => return Err(escapes()),
            p => path.push(p),
        }
    }

    if path.as_os_str().is_empty() {
        return Err(GraftError::catalog(format!("path '{}' is empty", raw)));
    }

    Ok(path)
}

/// Render a relative path with `/` separators, as catalogs and APIs expect.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
