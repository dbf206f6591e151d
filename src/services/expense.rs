//! Expense service
//!
//! Adds and removes expenses on open projects. An expense stores the name of
//! its category, not a reference to it.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, Money, Project, ProjectId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense against an open project
    ///
    /// The category must exist; the expense takes its stored spelling.
    pub fn add(
        &self,
        project_id: ProjectId,
        amount: Money,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> LedgerResult<Expense> {
        let project = self.open_project(project_id)?;

        let category = self
            .storage
            .categories
            .get_by_name(category)?
            .ok_or_else(|| LedgerError::category_not_found(category.trim()))?;

        let expense = Expense::new(
            project.id,
            amount,
            category.name,
            description.trim(),
            date,
        );

        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(format!("{} / {}", project.name, expense.category)),
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense; its project must be open
    pub fn delete(&self, id: ExpenseId) -> LedgerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        self.open_project(expense.project_id)?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.category.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full or short ID
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get_by_id_str(identifier.trim())
    }

    pub fn list_for_project(&self, project_id: ProjectId) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_by_project(project_id)
    }

    pub fn list(&self) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    fn open_project(&self, project_id: ProjectId) -> LedgerResult<Project> {
        let project = self
            .storage
            .projects
            .get(project_id)?
            .ok_or_else(|| LedgerError::project_not_found(project_id.to_string()))?;

        if project.is_closed {
            return Err(LedgerError::Locked(project.name));
        }

        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Category, PropertyType};
    use crate::services::ProjectService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage.categories.upsert(Category::new("Materials")).unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn project(storage: &Storage) -> Project {
        ProjectService::new(storage)
            .create("Casa Norte", PropertyType::House, "Lima", 75.0, date(1))
            .unwrap()
    }

    #[test]
    fn test_add_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let project = project(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project.id, Money::from_units(2500), "materials", " Cement ", date(3))
            .unwrap();

        // Stored with the category's own spelling
        assert_eq!(expense.category, "Materials");
        assert_eq!(expense.description, "Cement");
        assert_eq!(service.list_for_project(project.id).unwrap().len(), 1);
    }

    #[test]
    fn test_add_requires_known_project_and_category() {
        let (_temp_dir, storage) = create_test_storage();
        let project = project(&storage);
        let service = ExpenseService::new(&storage);

        let no_project = service.add(ProjectId::new(), Money::from_units(1), "Materials", "", date(3));
        assert!(no_project.unwrap_err().is_not_found());

        let no_category = service.add(project.id, Money::from_units(1), "Permits", "", date(3));
        assert!(matches!(
            no_category,
            Err(LedgerError::NotFound { entity_type: "Category", .. })
        ));
    }

    #[test]
    fn test_closed_project_is_frozen() {
        let (_temp_dir, storage) = create_test_storage();
        let project = project(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project.id, Money::from_units(100), "Materials", "", date(3))
            .unwrap();
        ProjectService::new(&storage).close(project.id).unwrap();

        let add = service.add(project.id, Money::from_units(100), "Materials", "", date(4));
        assert!(matches!(add, Err(LedgerError::Locked(_))));

        let delete = service.delete(expense.id);
        assert!(matches!(delete, Err(LedgerError::Locked(_))));
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let project = project(&storage);
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(project.id, Money::from_units(100), "Materials", "", date(3))
            .unwrap();

        let found = service.find(&expense.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, expense.id);

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_negative_amounts_are_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let project = project(&storage);
        let service = ExpenseService::new(&storage);

        let refund = service
            .add(project.id, Money::from_units(-40), "Materials", "Returned tiles", date(5))
            .unwrap();
        assert!(refund.amount.is_negative());
    }
}
