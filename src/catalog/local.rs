//! Feature catalog backed by a local directory.

use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use super::manifest::{self, CatalogManifest, MANIFEST_FILE};
use super::{Catalog, Feature, FeatureSource, FileLocation, SourceFile};
use crate::error::{GraftError, Result};

/// Loads features from subdirectories of a catalog root.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn subdirectories(&self) -> Result<Vec<String>> {
        let mut dirs = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => dirs.push(name),
                Err(name) => {
                    tracing::warn!("Skipping feature directory with non UTF-8 name: {:?}", name)
                }
            }
        }

        Ok(dirs)
    }
}

impl FeatureSource for LocalSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn list_features(&self) -> Result<Catalog> {
        if !self.root.is_dir() {
            return Err(GraftError::CatalogNotFound {
                path: self.root.clone(),
            });
        }

        let manifest_path = self.root.join(MANIFEST_FILE);
        let catalog = if manifest_path.is_file() {
            tracing::debug!("Reading catalog manifest {}", manifest_path.display());
            let content = fs::read_to_string(&manifest_path)?;
            CatalogManifest::parse(&content, &manifest_path)?
                .resolve(|path| self.root.join(path).is_dir())?
        } else {
            manifest::discover(self.subdirectories()?)?
        };

        tracing::debug!(
            "Loaded {} features from {}",
            catalog.len(),
            self.root.display()
        );
        Ok(catalog)
    }

    fn files(&self, feature: &Feature) -> Result<Vec<SourceFile>> {
        let dir = self.root.join(&feature.source_path);
        if !dir.is_dir() {
            return Err(GraftError::catalog(format!(
                "directory for feature '{}' is missing: {}",
                feature.name,
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                GraftError::catalog(format!("cannot read feature '{}': {}", feature.name, e))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|e| GraftError::Other(e.into()))?;

            files.push(SourceFile {
                relative_path: relative.to_path_buf(),
                location: FileLocation::Local(entry.path().to_path_buf()),
            });
        }

        Ok(files)
    }

    fn read(&self, file: &SourceFile) -> Result<Vec<u8>> {
        match &file.location {
            FileLocation::Local(path) => Ok(fs::read(path)?),
            FileLocation::Remote(url) => Err(GraftError::catalog(format!(
                "local catalog cannot download {}",
                url
            ))),
        }
    }
}
