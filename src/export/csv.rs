//! CSV export of expenses

use std::collections::HashMap;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Export every expense, with its project name, as CSV
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<()> {
    let project_names: HashMap<_, _> = storage
        .projects
        .get_all()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Project", "Category", "Description", "Amount"])
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for expense in storage.expenses.get_all()? {
        let project_name = project_names
            .get(&expense.project_id)
            .map(String::as_str)
            .unwrap_or("Unknown");

        csv_writer
            .write_record([
                expense.id.as_uuid().to_string().as_str(),
                expense.date.to_string().as_str(),
                project_name,
                expense.category.as_str(),
                expense.description.as_str(),
                format!("{:.2}", expense.amount.as_f64()).as_str(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
