//! Error types for graft operations.
//!
//! This module defines [`GraftError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GraftError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `GraftError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users
//! - [`GraftError::exit_code`] maps each kind to the process exit code

use std::path::PathBuf;
use thiserror::Error;

use crate::selection::SelectionError;

/// Core error type for graft operations.
#[derive(Debug, Error)]
pub enum GraftError {
    /// Catalog root directory does not exist.
    #[error("Feature catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Failed to parse a catalog manifest.
    #[error("Failed to parse catalog manifest at {path}: {message}")]
    CatalogParseError { path: PathBuf, message: String },

    /// Catalog content is missing or malformed.
    #[error("Invalid feature catalog: {message}")]
    CatalogError { message: String },

    /// Settings file could not be read or is inconsistent.
    #[error("Invalid settings in {path}: {message}")]
    ConfigError { path: PathBuf, message: String },

    /// A prompt needs an answer but nobody is there to give one.
    #[error("Cannot ask for '{key}' in non-interactive mode; pass it on the command line")]
    PromptUnavailable { key: String },

    /// The user's selection could not be understood.
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// Two sources contribute the same file and the policy forbids overrides.
    #[error("File '{path}' is provided by both '{first}' and '{second}'")]
    Collision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// Writing a file into the target project failed.
    #[error("Failed to write {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraftError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CatalogNotFound { .. }
            | Self::CatalogParseError { .. }
            | Self::CatalogError { .. } => 2,
            Self::Collision { .. } => 3,
            Self::CopyFailed { .. } | Self::Io(_) => 4,
            Self::InvalidSelection(_) | Self::PromptUnavailable { .. } => 5,
            Self::ConfigError { .. } | Self::Other(_) => 1,
        }
    }

    /// Shorthand for a [`GraftError::CatalogError`].
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogError {
            message: message.into(),
        }
    }
}

/// Result type alias for graft operations.
pub type Result<T> = std::result::Result<T, GraftError>;
