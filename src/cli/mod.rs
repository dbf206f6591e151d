//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod expense;
pub mod export;
pub mod project;
pub mod report;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use project::{handle_project_command, ProjectCommands};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(date_str: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            date_str
        ))
    })
}

/// Parse an amount argument such as "1500" or "1,500.50"
pub(crate) fn parse_amount(amount_str: &str) -> LedgerResult<Money> {
    Money::parse(amount_str)
        .map_err(|e| LedgerError::Validation(format!("Invalid amount '{}': {}", amount_str, e)))
}

/// Create a buffered writer for an export file
pub(crate) fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
