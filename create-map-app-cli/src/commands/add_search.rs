//! Search feature injection command

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use create_map_app::{add_search_feature, Framework};

/// Splice the interactive search feature into a generated project.
pub struct AddSearchCommand {
    framework: Framework,
    project_root: PathBuf,
}

impl AddSearchCommand {
    /// Create a new command instance
    pub const fn new(framework: Framework, project_root: PathBuf) -> Self {
        Self {
            framework,
            project_root,
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        if !self.project_root.is_dir() {
            anyhow::bail!(
                "Project directory '{}' does not exist",
                self.project_root.display()
            );
        }

        println!(
            "{} {} {}",
            style("Adding search to").green().bold(),
            style(self.framework.to_string()).cyan().bold(),
            style("project").bold()
        );
        println!();

        let warnings = add_search_feature(self.framework, &self.project_root)?;
        for warning in &warnings {
            println!("{} {warning}", style("⚠").yellow().bold());
        }

        println!("{}", style("✓ Search feature added!").green().bold());

        if let Some(package) = self.framework.search_package() {
            println!();
            println!("{}", style("Next steps:").bold());
            println!("  {} Install the search widget:", style("1.").cyan());
            println!(
                "     {} {}",
                style("$").dim(),
                style(format!("npm install {package}")).cyan()
            );
        }

        Ok(())
    }
}
