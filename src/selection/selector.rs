//! Interactive feature menu.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{GraftError, Result};
use crate::ui::{GraftTheme, Prompt, PromptType, UserInterface};

use super::{parse_selection, Selection};

/// Prompt key for the feature selection; `GRAFT_PROMPT_FEATURES` answers it
/// in non-interactive runs.
pub const FEATURES_PROMPT_KEY: &str = "features";

const FEATURES_QUESTION: &str =
    "Features to apply (numbers or names, comma-separated; 'all', or blank for none)";

/// Shows the catalog as a numbered menu and reads a selection.
pub struct Selector<'a> {
    catalog: &'a Catalog,
    theme: GraftTheme,
}

impl<'a> Selector<'a> {
    /// Create a selector over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            theme: GraftTheme::detect(),
        }
    }

    /// Use a specific theme for the menu.
    pub fn with_theme(mut self, theme: GraftTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Menu lines, one per feature, numbered from 1.
    pub fn menu_lines(&self) -> Vec<String> {
        self.catalog
            .features()
            .iter()
            .enumerate()
            .map(|(i, f)| self.theme.format_menu_item(i + 1, &f.name, &f.description))
            .collect()
    }

    /// Show the menu and read a selection.
    ///
    /// Invalid answers are reported and asked again while someone is there to
    /// answer; otherwise they fail the run.
    pub fn prompt(&self, ui: &mut dyn UserInterface) -> Result<Selection> {
        if self.catalog.is_empty() {
            ui.message("No optional features available.");
            return Ok(Selection::none());
        }

        ui.show_menu("Available features", &self.menu_lines());

        let prompt = Prompt {
            key: FEATURES_PROMPT_KEY.to_string(),
            question: FEATURES_QUESTION.to_string(),
            prompt_type: PromptType::Input,
            default: None,
        };

        loop {
            let answer = ui.prompt(&prompt)?.as_string();
            debug!(answer = %answer, "Feature selection answer");

            match parse_selection(&answer, self.catalog) {
                Ok(selection) => return Ok(selection),
                Err(e) if ui.is_interactive() => {
                    ui.warning(&format!("{}. Please try again.", e));
                }
                Err(e) => return Err(GraftError::InvalidSelection(e)),
            }
        }
    }
}
