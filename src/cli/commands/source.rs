//! Settings and catalog source resolution shared by commands.

use std::path::Path;

use tracing::debug;

use crate::catalog::{FeatureSource, GithubSource, LocalSource};
use crate::cli::args::CatalogArgs;
use crate::config::{load_settings, resolve_token, CatalogLocation, RemoteSettings, Settings};
use crate::error::Result;

/// Load settings files and apply catalog flags on top.
pub fn load_effective_settings(work_dir: &Path, args: &CatalogArgs) -> Result<Settings> {
    let mut settings = load_settings(work_dir, args.config.as_deref())?;

    if let Some(path) = &args.catalog {
        settings.catalog.path = Some(path.clone());
        settings.catalog.remote = None;
    } else if let Some(repo) = &args.repo {
        let mut remote = RemoteSettings::for_repo(repo.clone());
        if let Some(previous) = &settings.catalog.remote {
            remote.api_url = previous.api_url.clone();
            remote.token_env = previous.token_env.clone();
        }
        if let Some(branch) = &args.branch {
            remote.branch = branch.clone();
        }
        if let Some(dir) = &args.repo_dir {
            remote.dir = dir.clone();
        }
        settings.catalog.path = None;
        settings.catalog.remote = Some(remote);
    }

    Ok(settings)
}

/// Open the feature source the settings point at.
pub fn open_source(work_dir: &Path, settings: &Settings) -> Result<Box<dyn FeatureSource>> {
    match settings.catalog_location(work_dir) {
        CatalogLocation::Local(path) => {
            debug!("Using local catalog {}", path.display());
            Ok(Box::new(LocalSource::new(path)))
        }
        CatalogLocation::Remote(remote) => {
            let token = resolve_token(&remote, work_dir);
            debug!(
                "Using remote catalog {}@{} (token: {})",
                remote.repo,
                remote.branch,
                if token.is_some() { "yes" } else { "no" }
            );
            Ok(Box::new(GithubSource::new(remote, token)?))
        }
    }
}
