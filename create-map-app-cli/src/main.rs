//! create-map-app CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use create_map_app::Framework;

use commands::{AddSearchCommand, CheckCommand, UpdateCommand};

#[derive(Parser)]
#[command(name = "create-map-app")]
#[command(version)]
#[command(about = "Keep map starter templates in sync and wire in optional features", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check templates against their upstream sources (report only)
    Check {
        /// Path to the local templates directory
        #[arg(long, default_value = "templates")]
        templates: PathBuf,
    },
    /// Check templates and interactively apply updates
    Update {
        /// Path to the local templates directory
        #[arg(long, default_value = "templates")]
        templates: PathBuf,
    },
    /// Splice the interactive search feature into a generated project
    AddSearch {
        /// Framework the project was generated with
        #[arg(long)]
        framework: Framework,
        /// Project directory
        project: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { templates } => {
            let cmd = CheckCommand::new(templates);
            cmd.execute()?;
        }
        Commands::Update { templates } => {
            let cmd = UpdateCommand::new(templates);
            cmd.execute()?;
        }
        Commands::AddSearch { framework, project } => {
            let cmd = AddSearchCommand::new(framework, project);
            cmd.execute()?;
        }
    }

    Ok(())
}
