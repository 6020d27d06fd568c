//! Settings file discovery and loading.
//!
//! Layers are merged in priority order (later overrides earlier):
//! 1. User settings (`<config dir>/graft/config.yml`)
//! 2. Project settings (`.graft.yml` in the working directory)
//!
//! An explicit `--config FILE` replaces both layers.

use std::fs;
use std::path::{Path, PathBuf};

use super::schema::Settings;
use crate::error::{GraftError, Result};

/// Project settings file name.
pub const PROJECT_CONFIG_FILE: &str = ".graft.yml";

/// Paths to settings files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User settings: `<config dir>/graft/config.yml`
    pub user: Option<PathBuf>,

    /// Project settings: `.graft.yml`
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for the given working directory.
    pub fn discover(work_dir: &Path) -> Self {
        Self {
            user: Self::find_user(),
            project: Some(work_dir.join(PROJECT_CONFIG_FILE)).filter(|p| p.is_file()),
        }
    }

    fn find_user() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("graft").join("config.yml");
        path.is_file().then_some(path)
    }

    /// Returns all existing settings paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user.iter().chain(self.project.iter()).collect()
    }
}

/// Load and validate a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| GraftError::ConfigError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // An empty file is valid and means "no settings".
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(&content).map_err(|e| GraftError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if settings.catalog.path.is_some() && settings.catalog.remote.is_some() {
        return Err(GraftError::ConfigError {
            path: path.to_path_buf(),
            message: "catalog.path and catalog.remote cannot both be set".to_string(),
        });
    }

    Ok(settings)
}

/// Merge two settings layers; `overlay` wins.
///
/// A layer naming a catalog location replaces the whole catalog section, so
/// a project pointing at a local directory is not shadowed by a user-level
/// remote repository.
pub fn merge_settings(base: Settings, overlay: Settings) -> Settings {
    Settings {
        catalog: if overlay.catalog.is_set() {
            overlay.catalog
        } else {
            base.catalog
        },
        on_collision: overlay.on_collision.or(base.on_collision),
    }
}

/// Load effective settings for a working directory.
pub fn load_settings(work_dir: &Path, explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        tracing::debug!("Loading settings from {}", path.display());
        return load_settings_file(path);
    }

    let paths = ConfigPaths::discover(work_dir);
    let mut settings = Settings::default();
    for path in paths.all_existing() {
        tracing::debug!("Loading settings from {}", path.display());
        settings = merge_settings(settings, load_settings_file(path)?);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::CollisionPolicy;
    use crate::config::schema::RemoteSettings;
    use tempfile::TempDir;

    #[test]
    fn missing_project_file_not_discovered() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
    }

    #[test]
    fn project_file_discovered() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "{}").unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert_eq!(paths.project, Some(temp.path().join(PROJECT_CONFIG_FILE)));
    }

    #[test]
    fn empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_settings_file(&path).unwrap(), Settings::default());
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "on_collision: sometimes\n").unwrap();
        let err = load_settings_file(&path).unwrap_err();
        assert!(matches!(err, GraftError::ConfigError { .. }));
    }

    #[test]
    fn path_and_remote_conflict() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("both.yml");
        fs::write(
            &path,
            "catalog:\n  path: features\n  remote:\n    repo: a/b\n",
        )
        .unwrap();
        let err = load_settings_file(&path).unwrap_err();
        assert!(err.to_string().contains("cannot both be set"));
    }

    #[test]
    fn missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let result = load_settings(temp.path(), Some(&temp.path().join("nope.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_file_is_used() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "on_collision: fail\n").unwrap();
        let settings = load_settings(temp.path(), Some(&path)).unwrap();
        assert_eq!(settings.on_collision, Some(CollisionPolicy::Fail));
    }

    #[test]
    fn overlay_catalog_replaces_base_catalog() {
        let base = Settings {
            catalog: crate::config::CatalogSettings {
                path: None,
                remote: Some(RemoteSettings::for_repo("a/b")),
            },
            on_collision: Some(CollisionPolicy::Fail),
        };
        let overlay = Settings {
            catalog: crate::config::CatalogSettings {
                path: Some(PathBuf::from("local")),
                remote: None,
            },
            on_collision: None,
        };

        let merged = merge_settings(base, overlay);
        assert_eq!(merged.catalog.path, Some(PathBuf::from("local")));
        assert!(merged.catalog.remote.is_none());
        assert_eq!(merged.on_collision, Some(CollisionPolicy::Fail));
    }

    #[test]
    fn overlay_without_catalog_keeps_base() {
        let base = Settings {
            catalog: crate::config::CatalogSettings {
                path: Some(PathBuf::from("shared")),
                remote: None,
            },
            on_collision: None,
        };
        let merged = merge_settings(base, Settings::default());
        assert_eq!(merged.catalog.path, Some(PathBuf::from("shared")));
    }
}
