//! Outcome of an apply run.

use std::fmt;
use std::path::PathBuf;

use super::Override;

/// What happened to one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file did not exist before.
    Created,
    /// The file existed with different content.
    Updated,
    /// The file already had this content.
    Unchanged,
}

impl FileOutcome {
    /// Get a display character for this outcome.
    pub fn display_char(&self) -> char {
        match self {
            FileOutcome::Created => '+',
            FileOutcome::Updated => '~',
            FileOutcome::Unchanged => '=',
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileOutcome::Created => "created",
            FileOutcome::Updated => "updated",
            FileOutcome::Unchanged => "unchanged",
        };
        write!(f, "{}", s)
    }
}

/// One file written (or found up to date) in the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFile {
    /// Path relative to the target directory.
    pub path: PathBuf,
    /// Source that provided the content.
    pub origin: String,
    /// What happened.
    pub outcome: FileOutcome,
}

/// Summary of an apply run.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Target directory.
    pub target: PathBuf,
    /// Every file of the plan, sorted by path.
    pub files: Vec<AppliedFile>,
    /// Paths where a later source replaced an earlier one.
    pub overrides: Vec<Override>,
}

impl ApplyReport {
    /// Number of files with the given outcome.
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// Number of files whose content changed on disk.
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome != FileOutcome::Unchanged)
            .count()
    }

    /// One-line summary for the user.
    pub fn summary(&self) -> String {
        format!(
            "{} file(s) written to {} ({} created, {} updated, {} unchanged)",
            self.written(),
            self.target.display(),
            self.count(FileOutcome::Created),
            self.count(FileOutcome::Updated),
            self.count(FileOutcome::Unchanged),
        )
    }
}
