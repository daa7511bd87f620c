//! Template check command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use create_map_app::{HttpRemote, TemplateChecker, TemplateReport};

use crate::report;

/// Check every tracked template and report pending changes.
pub struct CheckCommand {
    templates_root: PathBuf,
}

impl CheckCommand {
    /// Create a new command instance
    pub const fn new(templates_root: PathBuf) -> Self {
        Self { templates_root }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let reports = run_checks(&self.templates_root)?;
        for template_report in &reports {
            report::print_template_report(template_report);
        }
        report::print_summary(&reports);
        Ok(())
    }
}

/// Run the full check batch against the live remotes, with a spinner.
///
/// Shared between `check` and `update`; returns one report per tracked
/// template.
pub(crate) fn run_checks(templates_root: &Path) -> Result<Vec<TemplateReport>> {
    println!(
        "{} {}",
        style("Checking templates in").bold(),
        style(templates_root.display()).cyan().bold()
    );
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let remote = HttpRemote::new();
    let checker = TemplateChecker::new(&remote, templates_root);

    spinner.set_message("Fetching latest mapbox-gl release...");
    let latest_gl = checker
        .latest_mapbox_gl()
        .context("Failed to fetch the latest mapbox-gl release")?;

    spinner.set_message("Checking templates against their sources...");
    let reports = checker.check_all(&latest_gl);

    spinner.finish_and_clear();

    println!(
        "{} {}",
        style("Latest mapbox-gl:").bold(),
        style(&latest_gl).cyan()
    );
    println!();

    Ok(reports)
}
