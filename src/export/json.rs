//! JSON export
//!
//! Exports every record plus the current portfolio metrics, tagged with a
//! schema version.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense, Project};
use crate::reports::{FetchPolicy, PortfolioReport};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of flip-ledger that wrote the export
    pub app_version: String,
    pub projects: Vec<Project>,
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    /// Portfolio metrics at the time of export
    pub portfolio: PortfolioReport,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub project_count: usize,
    pub closed_project_count: usize,
    pub expense_count: usize,
    pub category_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Build an export from storage
    pub fn from_storage(storage: &Storage, policy: FetchPolicy) -> LedgerResult<Self> {
        let projects = storage.projects.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let categories = storage.categories.get_all()?;
        let portfolio = PortfolioReport::compute(&projects, storage, policy)?;

        let metadata = ExportMetadata {
            project_count: projects.len(),
            closed_project_count: projects.iter().filter(|p| p.is_closed).count(),
            expense_count: expenses.len(),
            category_count: categories.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            projects,
            expenses,
            categories,
            portfolio,
            metadata,
        })
    }
}

/// Export the full database as pretty-printed JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    policy: FetchPolicy,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage, policy)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
