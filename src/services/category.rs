//! Category service
//!
//! Expense categories are a flat list of names. Expenses copy the name when
//! they are recorded, so renaming a category leaves historical expenses
//! grouped under the old name, and a category cannot be deleted while any
//! expense still carries its name.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str) -> LedgerResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name);
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Create any of `names` that don't exist yet; returns the ones created
    pub fn ensure_defaults(&self, names: &[String]) -> LedgerResult<Vec<Category>> {
        if self.storage.categories.count()? > 0 {
            return Ok(Vec::new());
        }

        let mut created = Vec::new();
        for name in names {
            if name.trim().is_empty() || self.storage.categories.get_by_name(name)?.is_some() {
                continue;
            }
            created.push(self.create(name)?);
        }

        Ok(created)
    }

    pub fn get(&self, id: CategoryId) -> LedgerResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        self.storage.categories.get_by_id_str(identifier.trim())
    }

    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Number of expenses recorded under the category's current name
    pub fn usage_count(&self, category: &Category) -> LedgerResult<usize> {
        Ok(self.storage.expenses.get_by_category(&category.name)?.len())
    }

    /// Rename a category
    ///
    /// Existing expenses keep the name they were recorded with.
    pub fn rename(&self, id: CategoryId, new_name: &str) -> LedgerResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        let new_name = new_name.trim();
        if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
            if existing.id != id {
                return Err(LedgerError::Duplicate {
                    entity_type: "Category",
                    identifier: new_name.to_string(),
                });
            }
        }

        let before = category.clone();
        category.name = new_name.to_string();
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category no expense refers to by name
    pub fn delete(&self, id: CategoryId) -> LedgerResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        let count = self.usage_count(&category)?;
        if count > 0 {
            return Err(LedgerError::InUse {
                entity_type: "Category",
                identifier: category.name,
                count,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }
}
