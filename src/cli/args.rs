//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::apply::CollisionPolicy;

/// Graft - Compose a project from a base template and optional features.
#[derive(Debug, Parser)]
#[command(name = "graft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Show every file written
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the feature catalog comes from. Overrides settings files.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CatalogArgs {
    /// Local catalog directory
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "repo")]
    pub catalog: Option<PathBuf>,

    /// GitHub repository holding the catalog (owner/name)
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Branch of the catalog repository
    #[arg(long, global = true, requires = "repo")]
    pub branch: Option<String>,

    /// Directory of the catalog inside the repository
    #[arg(long = "dir", global = true, value_name = "DIR", requires = "repo")]
    pub repo_dir: Option<String>,

    /// Settings file (replaces user and project settings)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply the base template and selected features (default if no command specified)
    Apply(ApplyArgs),

    /// List available features
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ApplyArgs {
    /// Target project directory (prompted for when omitted)
    pub target: Option<PathBuf>,

    /// Features to apply (comma-separated names or menu numbers)
    #[arg(short, long, value_delimiter = ',', conflicts_with_all = ["all", "none"])]
    pub features: Vec<String>,

    /// Apply every feature
    #[arg(long, conflicts_with = "none")]
    pub all: bool,

    /// Apply only the base template
    #[arg(long)]
    pub none: bool,

    /// What to do when two features provide the same file
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_collision: Option<CollisionPolicy>,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Never prompt; fail if an answer is missing
    #[arg(long)]
    pub non_interactive: bool,
}

impl ApplyArgs {
    /// Whether the selection was given on the command line.
    pub fn has_preselection(&self) -> bool {
        self.all || self.none || !self.features.is_empty()
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the files of each feature
    #[arg(long)]
    pub files: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["graft"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn apply_with_features() {
        let cli = Cli::try_parse_from(["graft", "apply", "out", "--features", "docker,ci"]).unwrap();
        match cli.command {
            Some(Commands::Apply(args)) => {
                assert_eq!(args.target, Some(PathBuf::from("out")));
                assert_eq!(args.features, vec!["docker", "ci"]);
                assert!(args.has_preselection());
            }
            other => panic!("expected apply, got {:?}", other),
        }
    }

    #[test]
    fn features_conflict_with_all() {
        assert!(Cli::try_parse_from(["graft", "apply", "--all", "--features", "a"]).is_err());
        assert!(Cli::try_parse_from(["graft", "apply", "--all", "--none"]).is_err());
    }

    #[test]
    fn on_collision_values() {
        let cli = Cli::try_parse_from(["graft", "apply", "--on-collision", "fail"]).unwrap();
        match cli.command {
            Some(Commands::Apply(args)) => {
                assert_eq!(args.on_collision, Some(CollisionPolicy::Fail))
            }
            other => panic!("expected apply, got {:?}", other),
        }
        assert!(Cli::try_parse_from(["graft", "apply", "--on-collision", "merge"]).is_err());
    }

    #[test]
    fn global_catalog_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["graft", "list", "--repo", "acme/features", "--branch", "dev"])
            .unwrap();
        assert_eq!(cli.catalog.repo.as_deref(), Some("acme/features"));
        assert_eq!(cli.catalog.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn catalog_conflicts_with_repo() {
        assert!(Cli::try_parse_from(["graft", "--catalog", "x", "--repo", "a/b"]).is_err());
    }

    #[test]
    fn branch_requires_repo() {
        assert!(Cli::try_parse_from(["graft", "--branch", "dev"]).is_err());
    }
}
