//! Copying the Base template and selected features into a target project.
//!
//! Applying happens in two phases:
//! 1. [`Applier::plan`] lists every source's files and composes them into an
//!    [`ApplyPlan`], resolving collisions by [`CollisionPolicy`]. A file in
//!    one source where another has a directory is a collision too. Nothing
//!    is written, so a `fail` collision leaves the target untouched.
//! 2. [`Applier::execute`] writes the plan into the target directory and
//!    returns an [`ApplyReport`].
//!
//! Sources are applied Base first, then the selected features in catalog
//! order. Files already in the target that no source provides are left alone.

pub mod plan;
pub mod report;

pub use plan::{ApplyPlan, Override, PlannedFile};
pub use report::{AppliedFile, ApplyReport, FileOutcome};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::catalog::{Catalog, Feature, FeatureSource};
use crate::error::{GraftError, Result};
use crate::selection::Selection;

/// What to do when two sources provide the same file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later source wins; each override is reported.
    #[default]
    Overwrite,
    /// Abort before writing anything.
    Fail,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::Overwrite => write!(f, "overwrite"),
            CollisionPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Copies features from a source into a target directory.
pub struct Applier<'a> {
    source: &'a dyn FeatureSource,
    policy: CollisionPolicy,
}

impl<'a> Applier<'a> {
    /// Create an applier reading from `source`.
    pub fn new(source: &'a dyn FeatureSource, policy: CollisionPolicy) -> Self {
        Self { source, policy }
    }

    /// Sources in application order: Base, then the selection in catalog order.
    pub fn sources<'c>(catalog: &'c Catalog, selection: &Selection) -> Vec<&'c Feature> {
        catalog
            .base()
            .into_iter()
            .chain(selection.features(catalog))
            .collect()
    }

    /// Compose the files of Base and the selected features.
    pub fn plan(&self, catalog: &Catalog, selection: &Selection) -> Result<ApplyPlan> {
        let mut plan = ApplyPlan::new();

        for feature in Self::sources(catalog, selection) {
            let files = self.source.files(feature)?;
            debug!(feature = %feature.name, files = files.len(), "Listed feature files");
            plan.add_source(&feature.name, files, self.policy)?;
        }

        Ok(plan)
    }

    /// Write a plan into `target`, creating directories as needed.
    ///
    /// A failed write stops the run; files written before it stay in place.
    pub fn execute(&self, target: &Path, plan: &ApplyPlan) -> Result<ApplyReport> {
        fs::create_dir_all(target).map_err(|source| GraftError::CopyFailed {
            path: target.to_path_buf(),
            source,
        })?;

        let mut report = ApplyReport {
            target: target.to_path_buf(),
            files: Vec::with_capacity(plan.len()),
            overrides: plan.overrides().to_vec(),
        };

        for planned in plan.files() {
            let content = self.source.read(&planned.file)?;
            let destination = target.join(&planned.relative_path);
            let outcome = write_file(&destination, &content)?;

            debug!(
                path = %planned.relative_path.display(),
                origin = %planned.origin,
                %outcome,
                "Applied file"
            );
            report.files.push(AppliedFile {
                path: planned.relative_path.clone(),
                origin: planned.origin.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    /// Plan and execute in one step.
    pub fn apply(
        &self,
        target: &Path,
        catalog: &Catalog,
        selection: &Selection,
    ) -> Result<ApplyReport> {
        let plan = self.plan(catalog, selection)?;
        self.execute(target, &plan)
    }
}

fn write_file(destination: &Path, content: &[u8]) -> Result<FileOutcome> {
    let copy_failed = |source: io::Error| GraftError::CopyFailed {
        path: destination.to_path_buf(),
        source,
    };

    let outcome = match fs::read(destination) {
        Ok(existing) if existing == content => return Ok(FileOutcome::Unchanged),
        Ok(_) => FileOutcome::Updated,
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileOutcome::Created,
        Err(e) => return Err(copy_failed(e)),
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(copy_failed)?;
    }
    fs::write(destination, content).map_err(copy_failed)?;

    Ok(outcome)
}
