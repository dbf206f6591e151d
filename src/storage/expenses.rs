//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an index from
//! project ID to expense IDs for the per-project lookup the reports use.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Expense, ExpenseId, ProjectId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a project index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: project_id -> expense_ids
    by_project: RwLock<HashMap<ProjectId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_project: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the project index
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_project = self.by_project.write().map_err(lock_error)?;

        data.clear();
        by_project.clear();

        for expense in file_data.expenses {
            by_project
                .entry(expense.project_id)
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Find an expense whose ID matches a full or short ID string
    pub fn get_by_id_str(&self, identifier: &str) -> Result<Option<Expense>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|e| e.id.matches(identifier)).cloned())
    }

    /// All expenses ordered by date, then creation time
    pub fn get_all(&self) -> Result<Vec<Expense>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_expenses(&mut expenses);
        Ok(expenses)
    }

    /// Expenses recorded against a project
    pub fn get_by_project(&self, project_id: ProjectId) -> Result<Vec<Expense>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_project = self.by_project.read().map_err(lock_error)?;

        let ids = by_project
            .get(&project_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_expenses(&mut expenses);
        Ok(expenses)
    }

    /// Expenses whose category field equals `category` exactly
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Expense>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses: Vec<_> = data
            .values()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        sort_expenses(&mut expenses);
        Ok(expenses)
    }

    /// Insert or update an expense, keeping the project index in sync
    pub fn upsert(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_project = self.by_project.write().map_err(lock_error)?;

        if let Some(previous) = data.get(&expense.id) {
            if let Some(ids) = by_project.get_mut(&previous.project_id) {
                ids.retain(|id| *id != expense.id);
            }
        }

        by_project
            .entry(expense.project_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: ExpenseId) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_project = self.by_project.write().map_err(lock_error)?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_project.get_mut(&expense.project_id) {
                    ids.retain(|eid| *eid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

fn sort_expenses(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn expense(project_id: ProjectId, units: i64, category: &str, day: u32) -> Expense {
        Expense::new(
            project_id,
            Money::from_units(units),
            category,
            "",
            NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        )
    }

    #[test]
    fn test_get_by_project() {
        let (_temp_dir, repo) = create_test_repo();
        let p1 = ProjectId::new();
        let p2 = ProjectId::new();

        repo.upsert(expense(p1, 100, "Labor", 2)).unwrap();
        repo.upsert(expense(p1, 200, "Materials", 1)).unwrap();
        repo.upsert(expense(p2, 300, "Labor", 3)).unwrap();

        let for_p1 = repo.get_by_project(p1).unwrap();
        assert_eq!(for_p1.len(), 2);
        // Ordered by date
        assert_eq!(for_p1[0].amount.units(), 200);

        assert_eq!(repo.get_by_project(p2).unwrap().len(), 1);
        assert!(repo.get_by_project(ProjectId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_get_by_category_is_exact() {
        let (_temp_dir, repo) = create_test_repo();
        let p = ProjectId::new();

        repo.upsert(expense(p, 100, "Labor", 1)).unwrap();
        repo.upsert(expense(p, 100, "labor", 1)).unwrap();

        assert_eq!(repo.get_by_category("Labor").unwrap().len(), 1);
        assert!(repo.get_by_category("Services").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_moves_index_entry() {
        let (_temp_dir, repo) = create_test_repo();
        let p1 = ProjectId::new();
        let p2 = ProjectId::new();

        let mut e = expense(p1, 100, "Labor", 1);
        repo.upsert(e.clone()).unwrap();

        e.project_id = p2;
        repo.upsert(e).unwrap();

        assert!(repo.get_by_project(p1).unwrap().is_empty());
        assert_eq!(repo.get_by_project(p2).unwrap().len(), 1);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        let p = ProjectId::new();
        let e = expense(p, 100, "Labor", 1);
        let id = e.id;

        repo.upsert(e).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(repo.get_by_project(p).unwrap().is_empty());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_save_and_reload_rebuilds_index() {
        let (temp_dir, repo) = create_test_repo();
        let p = ProjectId::new();
        repo.upsert(expense(p, 100, "Labor", 1)).unwrap();
        repo.upsert(expense(p, 250, "Materials", 2)).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        let total: Money = repo2
            .get_by_project(p)
            .unwrap()
            .iter()
            .map(|e| e.amount)
            .sum();
        assert_eq!(total.units(), 350);
    }
}
