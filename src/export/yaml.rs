//! YAML export
//!
//! Same structure as the JSON export, in a human-readable form.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::reports::FetchPolicy;
use crate::storage::Storage;

/// Export the full database to YAML
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    policy: FetchPolicy,
    writer: &mut W,
) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage, policy)?;

    writeln!(writer, "# flip-ledger export")
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Category, Project, PropertyType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .projects
            .upsert(Project::new(
                "Lote Sur",
                PropertyType::Land,
                "Cusco",
                300.0,
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            ))
            .unwrap();
        storage.categories.upsert(Category::new("Services")).unwrap();

        let mut buffer = Vec::new();
        export_full_yaml(&storage, FetchPolicy::Strict, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# flip-ledger export"));
        assert!(yaml.contains("Lote Sur"));
        assert!(yaml.contains("type: land"));
        assert!(yaml.contains("Services"));

        let parsed: FullExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.portfolio.project_distribution_by_type[&PropertyType::Land], 1);
    }
}
