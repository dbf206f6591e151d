//! Category repository for JSON storage
//!
//! Manages loading and saving expense categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable category document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All categories sorted by name
    pub fn get_all(&self) -> Result<Vec<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|c| c.name.to_lowercase());
        Ok(list)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|c| c.has_name(name)).cloned())
    }

    /// Find a category whose ID matches a full or short ID string
    pub fn get_by_id_str(&self, identifier: &str) -> Result<Option<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|c| c.id.matches(identifier)).cloned())
    }

    pub fn upsert(&self, category: Category) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
