//! List command implementation.
//!
//! The `graft list` command shows the feature catalog.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{slash_path, Catalog, Feature, FeatureSource};
use crate::cli::args::{CatalogArgs, ListArgs};
use crate::error::{GraftError, Result};
use crate::ui::{GraftTheme, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::source::{load_effective_settings, open_source};

/// The list command implementation.
pub struct ListCommand {
    work_dir: PathBuf,
    catalog_args: CatalogArgs,
    args: ListArgs,
}

/// JSON shape of one feature.
#[derive(Debug, Serialize)]
struct FeatureListing {
    name: String,
    description: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<String>>,
}

/// JSON shape of the whole catalog.
#[derive(Debug, Serialize)]
struct CatalogListing {
    source: String,
    base: Option<FeatureListing>,
    features: Vec<FeatureListing>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(work_dir: &Path, catalog_args: CatalogArgs, args: ListArgs) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            catalog_args,
            args,
        }
    }

    fn listing(&self, source: &dyn FeatureSource, feature: &Feature) -> Result<FeatureListing> {
        let files = if self.args.files {
            Some(
                source
                    .files(feature)?
                    .iter()
                    .map(|f| slash_path(&f.relative_path))
                    .collect(),
            )
        } else {
            None
        };

        Ok(FeatureListing {
            name: feature.name.clone(),
            description: feature.description.clone(),
            path: slash_path(&feature.source_path),
            files,
        })
    }

    fn print_json(
        &self,
        source: &dyn FeatureSource,
        catalog: &Catalog,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let listing = CatalogListing {
            source: source.describe(),
            base: catalog
                .base()
                .map(|base| self.listing(source, base))
                .transpose()?,
            features: catalog
                .features()
                .iter()
                .map(|f| self.listing(source, f))
                .collect::<Result<_>>()?,
        };

        let json = serde_json::to_string_pretty(&listing).map_err(|e| GraftError::Other(e.into()))?;
        ui.message(&json);
        Ok(())
    }

    fn print_table(
        &self,
        source: &dyn FeatureSource,
        catalog: &Catalog,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let theme = GraftTheme::detect();
        ui.show_header(&format!("Features in {}", source.describe()));

        if catalog.is_empty() {
            ui.message("No optional features available.");
        } else {
            let mut table = Table::new(&["#", "Feature", "Description"]);
            for (i, feature) in catalog.features().iter().enumerate() {
                let number = (i + 1).to_string();
                table.add_row(&[
                    number.as_str(),
                    feature.name.as_str(),
                    feature.description.as_str(),
                ]);
            }
            ui.message(&table.render());
        }

        if let Some(base) = catalog.base() {
            ui.message(&format!(
                "{} is always applied.",
                theme.highlight.apply_to(&base.name)
            ));
        }

        if self.args.files {
            for feature in catalog.base().into_iter().chain(catalog.features()) {
                ui.message("");
                ui.message(&format!("{}:", theme.highlight.apply_to(&feature.name)));
                for file in source.files(feature)? {
                    ui.message(&format!("  {}", slash_path(&file.relative_path)));
                }
            }
        }

        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_effective_settings(&self.work_dir, &self.catalog_args)?;
        let source = open_source(&self.work_dir, &settings)?;
        let catalog = source.list_features()?;

        if self.args.json {
            self.print_json(source.as_ref(), &catalog, ui)?;
        } else {
            self.print_table(source.as_ref(), &catalog, ui)?;
        }

        Ok(CommandResult::success())
    }
}
