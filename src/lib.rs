//! Graft - compose a new project from a base template and optional features.
//!
//! A feature catalog is a directory (local or in a GitHub repository) with
//! one subdirectory per feature. Graft lets the user pick features from a
//! numbered menu and copies the base template plus every selected feature
//! into a target directory.
//!
//! # Modules
//!
//! - [`apply`] - Planning and writing files into the target project
//! - [`catalog`] - Feature catalogs and their sources
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and layering
//! - [`error`] - Error types and result aliases
//! - [`platform`] - CI detection
//! - [`selection`] - Parsing and prompting for a feature selection
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use graft::catalog::{Catalog, Feature};
//! use graft::selection::parse_selection;
//!
//! let catalog = Catalog::new(
//!     vec![Feature::new("docker", "docker", ""), Feature::new("ci", "ci", "")],
//!     None,
//! )
//! .unwrap();
//!
//! let selection = parse_selection("all", &catalog).unwrap();
//! assert_eq!(selection.len(), 2);
//! ```

pub mod apply;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod selection;
pub mod ui;

pub use error::{GraftError, Result};
