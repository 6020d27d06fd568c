//! Apply command implementation.
//!
//! The `graft apply` command copies the base template and the selected
//! features into a target directory. It is also what `graft` runs with no
//! subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::apply::{Applier, ApplyPlan, CollisionPolicy};
use crate::catalog::{Catalog, FeatureSource};
use crate::cli::args::{ApplyArgs, CatalogArgs};
use crate::error::{GraftError, Result};
use crate::selection::{parse_selection, Selection, Selector};
use crate::ui::{Prompt, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::source::{load_effective_settings, open_source};

/// Prompt key for the target directory.
pub const TARGET_PROMPT_KEY: &str = "target";

/// Prompt key for confirming writes into a non-empty directory.
pub const PROCEED_PROMPT_KEY: &str = "proceed";

/// The apply command implementation.
pub struct ApplyCommand {
    work_dir: PathBuf,
    catalog_args: CatalogArgs,
    args: ApplyArgs,
}

impl ApplyCommand {
    /// Create a new apply command.
    pub fn new(work_dir: &Path, catalog_args: CatalogArgs, args: ApplyArgs) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            catalog_args,
            args,
        }
    }

    fn load_catalog(
        &self,
        source: &dyn FeatureSource,
        ui: &mut dyn UserInterface,
    ) -> Result<Catalog> {
        let mut spinner = ui.start_spinner(&format!("Loading features from {}", source.describe()));
        match source.list_features() {
            Ok(catalog) => {
                spinner.finish_success(&format!("Found {} feature(s)", catalog.len()));
                Ok(catalog)
            }
            Err(e) => {
                spinner.finish_error("Could not load features");
                Err(e)
            }
        }
    }

    fn select(&self, catalog: &Catalog, ui: &mut dyn UserInterface) -> Result<Selection> {
        if !self.args.has_preselection() {
            return Selector::new(catalog).prompt(ui);
        }
        if self.args.all {
            return Ok(Selection::all(catalog));
        }
        if self.args.none {
            return Ok(Selection::none());
        }

        let input = self.args.features.join(",");
        parse_selection(&input, catalog).map_err(GraftError::InvalidSelection)
    }

    fn target(&self, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        let target = match &self.args.target {
            Some(target) => target.clone(),
            None => {
                let answer = ui
                    .prompt(&Prompt {
                        key: TARGET_PROMPT_KEY.to_string(),
                        question: "Target directory".to_string(),
                        prompt_type: PromptType::Input,
                        default: Some(".".to_string()),
                    })?
                    .as_string();
                let answer = answer.trim();
                PathBuf::from(if answer.is_empty() { "." } else { answer })
            }
        };

        Ok(self.work_dir.join(target))
    }

    fn confirm_non_empty(&self, target: &Path, ui: &mut dyn UserInterface) -> Result<bool> {
        if !ui.is_interactive() || !has_entries(target) {
            return Ok(true);
        }

        let answer = ui.prompt(&Prompt {
            key: PROCEED_PROMPT_KEY.to_string(),
            question: format!(
                "{} is not empty. Existing files may be replaced. Continue?",
                target.display()
            ),
            prompt_type: PromptType::Confirm,
            default: Some("true".to_string()),
        })?;

        Ok(answer.as_bool().unwrap_or(false))
    }

    fn report_plan(&self, plan: &ApplyPlan, ui: &mut dyn UserInterface) {
        for o in plan.overrides() {
            ui.warning(&format!(
                "{}: '{}' replaces the version from '{}'",
                o.path.display(),
                o.by,
                o.replaced
            ));
        }
    }
}

impl Command for ApplyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_effective_settings(&self.work_dir, &self.catalog_args)?;
        let source = open_source(&self.work_dir, &settings)?;
        let catalog = self.load_catalog(source.as_ref(), ui)?;

        let selection = self.select(&catalog, ui)?;
        let target = self.target(ui)?;
        let policy = effective_policy(self.args.on_collision, settings.on_collision);
        debug!(
            features = ?selection.names(&catalog),
            target = %target.display(),
            %policy,
            "Applying"
        );

        let applier = Applier::new(source.as_ref(), policy);
        let plan = applier.plan(&catalog, &selection)?;
        self.report_plan(&plan, ui);

        if self.args.dry_run {
            ui.show_header("Dry run");
            for file in plan.files() {
                ui.message(&format!(
                    "  {} ({})",
                    file.relative_path.display(),
                    file.origin
                ));
            }
            ui.success(&format!(
                "{} file(s) would be written to {}",
                plan.len(),
                target.display()
            ));
            return Ok(CommandResult::success());
        }

        if !self.confirm_non_empty(&target, ui)? {
            ui.warning("Aborted; nothing was written.");
            return Ok(CommandResult::success());
        }

        let mut spinner = ui.start_spinner(&format!("Writing {} file(s)", plan.len()));
        let report = match applier.execute(&target, &plan) {
            Ok(report) => {
                spinner.finish_success("Done");
                report
            }
            Err(e) => {
                spinner.finish_error("Writing failed");
                return Err(e);
            }
        };

        if ui.output_mode().shows_details() {
            for file in &report.files {
                ui.message(&format!(
                    "  {} {} ({})",
                    file.outcome.display_char(),
                    file.path.display(),
                    file.origin
                ));
            }
        }

        ui.success(&report.summary());
        Ok(CommandResult::success())
    }
}

fn has_entries(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Collision policy from flags and settings.
pub fn effective_policy(
    flag: Option<CollisionPolicy>,
    configured: Option<CollisionPolicy>,
) -> CollisionPolicy {
    flag.or(configured).unwrap_or_default()
}
