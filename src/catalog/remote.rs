//! Feature catalog hosted in a GitHub repository.
//!
//! Listings come from the contents API
//! (`GET /repos/{repo}/contents/{path}?ref={branch}`); files are downloaded
//! from the `download_url` each listing entry carries.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::fetch::HttpFetcher;
use super::manifest::{self, CatalogManifest, MANIFEST_FILE};
use super::{checked_relative, slash_path, Catalog, Feature, FeatureSource, FileLocation, SourceFile};
use crate::config::RemoteSettings;
use crate::error::{GraftError, Result};

/// One entry of a contents API directory listing.
#[derive(Debug, Clone, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// Loads features from a directory of a GitHub repository.
pub struct GithubSource {
    settings: RemoteSettings,
    fetcher: HttpFetcher,
}

impl GithubSource {
    /// Create a source for the given repository settings.
    pub fn new(settings: RemoteSettings, token: Option<String>) -> Result<Self> {
        if settings.repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
            return Err(GraftError::catalog(format!(
                "repository '{}' must look like owner/name",
                settings.repo
            )));
        }

        Ok(Self {
            settings,
            fetcher: HttpFetcher::new(token)?,
        })
    }

    /// Repository settings in use.
    pub fn settings(&self) -> &RemoteSettings {
        &self.settings
    }

    fn contents_url(&self, path: &str) -> String {
        let api = self.settings.api_url.trim_end_matches('/');
        let path = path.trim_matches('/');
        let segment = if path.is_empty() {
            String::new()
        } else {
            format!("/{}", path)
        };
        format!(
            "{}/repos/{}/contents{}?ref={}",
            api, self.settings.repo, segment, self.settings.branch
        )
    }

    fn raw_url(&self, path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}",
            self.settings.repo, self.settings.branch, path
        )
    }

    fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(path);
        self.fetcher
            .get_json(&url)
            .map_err(|e| GraftError::catalog(format!("cannot list {}: {:#}", url, e)))
    }

    /// Repository path of a directory relative to the catalog directory.
    fn repo_path(&self, relative: &Path) -> String {
        let dir = self.settings.dir.trim_matches('/');
        let relative = slash_path(relative);
        if dir.is_empty() {
            relative
        } else {
            format!("{}/{}", dir, relative)
        }
    }

    fn collect_files(
        &self,
        api_path: &str,
        prefix: &Path,
        files: &mut Vec<SourceFile>,
    ) -> Result<()> {
        for entry in self.list_dir(api_path)? {
            match entry.kind.as_str() {
                "file" => {
                    let relative = prefix.join(checked_relative(&entry.name)?);
                    let url = entry
                        .download_url
                        .clone()
                        .unwrap_or_else(|| self.raw_url(&entry.path));
                    files.push(SourceFile {
                        relative_path: relative,
                        location: FileLocation::Remote(url),
                    });
                }
                "dir" => {
                    let nested = prefix.join(checked_relative(&entry.name)?);
                    self.collect_files(&entry.path, &nested, files)?;
                }
                other => {
                    tracing::warn!("Skipping {} entry '{}'", other, entry.path);
                }
            }
        }

        Ok(())
    }
}

impl FeatureSource for GithubSource {
    fn describe(&self) -> String {
        let dir = self.settings.dir.trim_matches('/');
        if dir.is_empty() {
            format!("{}@{}", self.settings.repo, self.settings.branch)
        } else {
            format!("{}@{}:{}", self.settings.repo, self.settings.branch, dir)
        }
    }

    fn list_features(&self) -> Result<Catalog> {
        let entries = self.list_dir(&self.settings.dir)?;

        let dirs: Vec<String> = entries
            .iter()
            .filter(|e| e.kind == "dir")
            .map(|e| e.name.clone())
            .collect();

        let manifest_entry = entries
            .iter()
            .find(|e| e.kind == "file" && e.name == MANIFEST_FILE);

        let catalog = match manifest_entry {
            Some(entry) => {
                let url = entry
                    .download_url
                    .clone()
                    .unwrap_or_else(|| self.raw_url(&entry.path));
                let content = self
                    .fetcher
                    .get_text(&url)
                    .map_err(|e| GraftError::catalog(format!("{:#}", e)))?;
                let origin = PathBuf::from(format!("{}/{}", self.settings.repo, entry.path));
                // Nested feature paths are verified when their files are listed.
                CatalogManifest::parse(&content, &origin)?.resolve(|path| {
                    path.components().count() > 1 || dirs.iter().any(|d| Path::new(d) == path)
                })?
            }
            None => manifest::discover(dirs)?,
        };

        tracing::debug!("Loaded {} features from {}", catalog.len(), self.describe());
        Ok(catalog)
    }

    fn files(&self, feature: &Feature) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        self.collect_files(
            &self.repo_path(&feature.source_path),
            Path::new(""),
            &mut files,
        )?;
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    fn read(&self, file: &SourceFile) -> Result<Vec<u8>> {
        match &file.location {
            FileLocation::Remote(url) => self
                .fetcher
                .get_bytes(url)
                .map_err(|e| GraftError::catalog(format!("{:#}", e))),
            FileLocation::Local(path) => Ok(std::fs::read(path)?),
        }
    }
}
