//! Storage initialization
//!
//! First-run setup: directories plus the default expense categories.

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;
use crate::models::Category;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Seeds `settings.default_categories` if categories.json doesn't exist yet.
/// Existing data is never overwritten.
pub fn initialize_storage(paths: &LedgerPaths, settings: &Settings) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        create_default_categories(paths, &settings.default_categories)?;
    }

    Ok(())
}

fn create_default_categories(paths: &LedgerPaths, names: &[String]) -> Result<(), LedgerError> {
    let mut categories: Vec<Category> = Vec::new();

    for name in names {
        let name = name.trim();
        if name.is_empty() || categories.iter().any(|c| c.has_name(name)) {
            continue;
        }
        categories.push(Category::new(name));
    }

    write_json_atomic(paths.categories_file(), &CategoryData { categories })
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_categories(paths: &LedgerPaths) -> CategoryData {
        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths, &Settings::default()).unwrap();
        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());

        let names: Vec<_> = read_categories(&paths)
            .categories
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Labor", "Materials", "Services"]);
    }

    #[test]
    fn test_blank_and_duplicate_defaults_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            default_categories: vec!["Permits".into(), " ".into(), "permits".into()],
            ..Settings::default()
        };

        initialize_storage(&paths, &settings).unwrap();
        assert_eq!(read_categories(&paths).categories.len(), 1);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, &Settings::default()).unwrap();

        let custom = CategoryData {
            categories: vec![Category::new("Custom")],
        };
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        initialize_storage(&paths, &Settings::default()).unwrap();

        let data = read_categories(&paths);
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Custom");
    }
}
