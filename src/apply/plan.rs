//! Composition of source files into a single target layout.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::SourceFile;
use crate::error::{GraftError, Result};

use super::CollisionPolicy;

/// A file that will be written to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the target directory.
    pub relative_path: PathBuf,
    /// Name of the source that provides the final content.
    pub origin: String,
    /// Where to read the content from.
    pub file: SourceFile,
}

/// A path provided by more than one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// Path relative to the target directory.
    pub path: PathBuf,
    /// Source whose version was discarded.
    pub replaced: String,
    /// Source whose version is written.
    pub by: String,
}

/// The set of files an apply run will write, keyed by target path.
#[derive(Debug, Clone, Default)]
pub struct ApplyPlan {
    files: BTreeMap<PathBuf, PlannedFile>,
    overrides: Vec<Override>,
    sources: Vec<String>,
}

impl ApplyPlan {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every file of one source.
    ///
    /// Sources must be added in application order. A later source's file
    /// replaces earlier entries it cannot coexist with: the same path, a file
    /// standing where it needs a directory, or files under a path it claims
    /// as a file. Under [`CollisionPolicy::Fail`] any such replacement is an
    /// error instead.
    pub fn add_source(
        &mut self,
        name: &str,
        files: Vec<SourceFile>,
        policy: CollisionPolicy,
    ) -> Result<()> {
        self.sources.push(name.to_string());

        for file in files {
            let path = file.relative_path.clone();

            for existing in self.conflicts_with(&path) {
                let Some(previous) = self.files.remove(&existing) else {
                    continue;
                };

                if policy == CollisionPolicy::Fail {
                    // Name the path that is a file on one side and a
                    // directory (or the same file) on the other.
                    let shared = if existing.starts_with(&path) {
                        path
                    } else {
                        existing
                    };
                    return Err(GraftError::Collision {
                        path: shared,
                        first: previous.origin,
                        second: name.to_string(),
                    });
                }

                debug!(
                    path = %existing.display(),
                    replaced = %previous.origin,
                    by = %name,
                    "File overridden"
                );
                self.overrides.push(Override {
                    path: existing,
                    replaced: previous.origin,
                    by: name.to_string(),
                });
            }

            let planned = PlannedFile {
                relative_path: path.clone(),
                origin: name.to_string(),
                file,
            };
            self.files.insert(path, planned);
        }

        Ok(())
    }

    /// Planned paths that cannot coexist with a file at `path`.
    fn conflicts_with(&self, path: &Path) -> Vec<PathBuf> {
        let mut conflicts: Vec<PathBuf> = path
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty() && self.files.contains_key(*dir))
            .map(Path::to_path_buf)
            .collect();

        // Descendants sort directly after their parent, component-wise.
        conflicts.extend(
            self.files
                .range::<Path, _>((Bound::Included(path), Bound::Unbounded))
                .map(|(planned, _)| planned)
                .take_while(|planned| planned.starts_with(path))
                .cloned(),
        );

        conflicts
    }

    /// Build a plan from sources in application order.
    pub fn build<'a>(
        sources: impl IntoIterator<Item = (&'a str, Vec<SourceFile>)>,
        policy: CollisionPolicy,
    ) -> Result<Self> {
        let mut plan = Self::new();
        for (name, files) in sources {
            plan.add_source(name, files, policy)?;
        }
        Ok(plan)
    }

    /// Files to write, sorted by path.
    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.values()
    }

    /// Paths provided by more than one source, in the order they were found.
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Names of the sources, in application order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Number of files to write.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
