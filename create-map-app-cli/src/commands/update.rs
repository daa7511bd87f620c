//! Interactive template update command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, MultiSelect, Select};
use similar::{ChangeTag, TextDiff};

use create_map_app::{patch, store, TemplateReport};

use crate::commands::check::run_checks;
use crate::report;

/// Check every tracked template and interactively apply updates.
pub struct UpdateCommand {
    templates_root: PathBuf,
}

impl UpdateCommand {
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

        let stale: Vec<&TemplateReport> =
            reports.iter().filter(|r| r.has_changes()).collect();
        if stale.is_empty() {
            report::print_summary(&reports);
            return Ok(());
        }

        let strategy = Select::new()
            .with_prompt("How would you like to proceed?")
            .items(&["Update all templates", "Pick specific templates", "Do nothing"])
            .default(0)
            .interact()
            .context("Failed to read update strategy")?;

        let selected: Vec<&TemplateReport> = match strategy {
            0 => stale,
            1 => {
                let names: Vec<&str> =
                    stale.iter().map(|r| r.template.name()).collect();
                let picks = MultiSelect::new()
                    .with_prompt("Select templates to update")
                    .items(&names)
                    .interact()
                    .context("Failed to read template selection")?;
                picks.into_iter().map(|i| stale[i]).collect()
            }
            _ => Vec::new(),
        };

        if selected.is_empty() {
            println!("{}", style("No templates updated.").dim());
            return Ok(());
        }

        for template_report in &selected {
            preview_changes(template_report)?;
        }

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Apply updates to {} template(s)?",
                selected.len()
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", style("No templates updated.").dim());
            return Ok(());
        }

        let mut failures = 0usize;
        for template_report in &selected {
            match template_report.apply() {
                Ok(()) => println!(
                    "{} {}",
                    style("✓").green().bold(),
                    template_report.template.name()
                ),
                Err(err) => {
                    failures += 1;
                    println!(
                        "{} {}: {err}",
                        style("✗").red().bold(),
                        template_report.template.name()
                    );
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} template(s) failed to update");
        }
        println!();
        println!("{}", style("✓ Templates updated successfully!").green().bold());
        Ok(())
    }
}

/// Show a unified diff of what applying this report would change in its
/// configuration file. CDN substitutions are already itemized in the check
/// output, so only the structured patch is previewed here.
fn preview_changes(template_report: &TemplateReport) -> Result<()> {
    if template_report.package_changes.is_empty() {
        return Ok(());
    }

    let before = store::read_text(&template_report.local_path).with_context(|| {
        format!(
            "Failed to read {}",
            template_report.local_path.display()
        )
    })?;

    let mut tree = store::read_json(&template_report.local_path).with_context(|| {
        format!(
            "Failed to parse {}",
            template_report.local_path.display()
        )
    })?;
    patch::apply_changes(&mut tree, &template_report.package_changes);
    let mut after = serde_json::to_string_pretty(&tree)
        .context("Failed to render patched configuration")?;
    after.push('\n');

    println!(
        "{} {}",
        style("Preview:").bold(),
        style(template_report.local_path.display()).cyan()
    );
    let diff = TextDiff::from_lines(&before, &after);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
            ChangeTag::Equal => {}
        }
    }
    println!();
    Ok(())
}
