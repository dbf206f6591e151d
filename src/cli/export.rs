//! CLI commands for data export

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use super::create_output;
use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data and portfolio metrics to JSON
    Json {
        /// Output file path
        output: PathBuf,
    },

    /// Export all data and portfolio metrics to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },

    /// Export expenses to CSV
    #[command(name = "expenses-csv")]
    ExpensesCsv {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    let policy = settings.fetch_policy;

    match cmd {
        ExportCommands::Json { output } => {
            let mut writer = create_output(&output)?;
            export_full_json(storage, policy, &mut writer)?;
            writer.flush()?;
            println!("Full database exported to: {}", output.display());
        }
        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export_full_yaml(storage, policy, &mut writer)?;
            writer.flush()?;
            println!("Full database exported to: {}", output.display());
        }
        ExportCommands::ExpensesCsv { output } => {
            let mut writer = create_output(&output)?;
            export_expenses_csv(storage, &mut writer)?;
            writer.flush()?;
            println!("Expenses exported to: {}", output.display());
        }
    }

    Ok(())
}
