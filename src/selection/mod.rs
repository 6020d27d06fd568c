//! Feature selection.
//!
//! [`parse_selection`] turns a line of user input into a [`Selection`]; the
//! [`Selector`] wraps it in a prompt loop that re-asks on invalid input.
//!
//! Accepted input:
//! - 1-based menu numbers and/or feature names, separated by commas or spaces
//! - `all` for every feature
//! - `none` or an empty line for no features
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
//! // Order of entry does not matter; selections follow catalog order.
//! let selection = parse_selection("ci, 1", &catalog).unwrap();
//! assert_eq!(selection.names(&catalog), vec!["docker", "ci"]);
//! ```

pub mod selector;

pub use selector::{Selector, FEATURES_PROMPT_KEY};

use thiserror::Error;

use crate::catalog::{Catalog, Feature};

/// Why a line of input is not a valid selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A menu number outside the listing.
    #[error("{value} is not a menu number (valid range: 1-{max})")]
    OutOfRange { value: usize, max: usize },

    /// A name that is not in the catalog.
    #[error("unknown feature '{name}'")]
    UnknownFeature { name: String },

    /// The same feature given twice.
    #[error("'{name}' was selected more than once")]
    Duplicate { name: String },

    /// `all` or `none` mixed with other entries.
    #[error("'{keyword}' cannot be combined with other entries")]
    MixedKeyword { keyword: String },
}

/// A subset of catalog features, kept in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    /// Select nothing; only the Base template will be applied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Select every feature in the catalog.
    pub fn all(catalog: &Catalog) -> Self {
        Self {
            indices: (0..catalog.len()).collect(),
        }
    }

    /// Catalog positions of the selected features, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected features.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected features in catalog order.
    pub fn features<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Feature> {
        self.indices
            .iter()
            .filter_map(|&i| catalog.features().get(i))
            .collect()
    }

    /// Selected feature names in catalog order.
    pub fn names<'c>(&self, catalog: &'c Catalog) -> Vec<&'c str> {
        self.features(catalog)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Parse one line of selection input against a catalog.
pub fn parse_selection(input: &str, catalog: &Catalog) -> Result<Selection, SelectionError> {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    if let Some(keyword) = tokens
        .iter()
        .find(|t| t.eq_ignore_ascii_case("all") || t.eq_ignore_ascii_case("none"))
    {
        if tokens.len() > 1 {
            return Err(SelectionError::MixedKeyword {
                keyword: keyword.to_lowercase(),
            });
        }
        return Ok(if keyword.eq_ignore_ascii_case("all") {
            Selection::all(catalog)
        } else {
            Selection::none()
        });
    }

    let mut indices = Vec::with_capacity(tokens.len());
    for token in tokens {
        let index = resolve_token(token, catalog)?;
        if indices.contains(&index) {
            return Err(SelectionError::Duplicate {
                name: catalog.features()[index].name.clone(),
            });
        }
        indices.push(index);
    }

    indices.sort_unstable();
    Ok(Selection { indices })
}

fn resolve_token(token: &str, catalog: &Catalog) -> Result<usize, SelectionError> {
    if let Ok(number) = token.parse::<usize>() {
        if number == 0 || number > catalog.len() {
            return Err(SelectionError::OutOfRange {
                value: number,
                max: catalog.len(),
            });
        }
        return Ok(number - 1);
    }

    catalog
        .position(token)
        .ok_or_else(|| SelectionError::UnknownFeature {
            name: token.to_string(),
        })
}
