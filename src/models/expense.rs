//! Expense model
//!
//! An expense is a cost attributed to a project. Its category is stored as
//! the category's *name*, not its ID, so renaming a category does not
//! regroup expenses that were recorded under the old name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, ProjectId};
use super::money::Money;

/// A cost recorded against a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// The project this expense belongs to (non-owning reference)
    pub project_id: ProjectId,

    pub amount: Money,

    /// Category name at the time the expense was recorded
    pub category: String,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        project_id: ProjectId,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            project_id,
            amount,
            category: category.into(),
            description: description.into(),
            date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if self.description.len() > 200 {
            return Err(ExpenseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{} {} ({})", self.date, self.amount, self.category)
        } else {
            write!(
                f,
                "{} {} {} ({})",
                self.date, self.amount, self.description, self.category
            )
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyCategory,
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Expense description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let project_id = ProjectId::new();
        let expense = Expense::new(project_id, Money::from_units(1000), "Materials", "Cement", date());

        assert_eq!(expense.project_id, project_id);
        assert_eq!(expense.amount.units(), 1000);
        assert_eq!(expense.category, "Materials");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(ProjectId::new(), Money::from_units(5), " ", "", date());
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::EmptyCategory)
        );

        expense.category = "Labor".into();
        expense.description = "x".repeat(201);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::DescriptionTooLong(201))
        ));
    }

    #[test]
    fn test_display() {
        let expense = Expense::new(ProjectId::new(), Money::from_units(500), "Labor", "", date());
        assert_eq!(expense.to_string(), "2025-04-02 $500.00 (Labor)");
    }
}
