//! Core data models for flip-ledger
//!
//! Projects, the expenses recorded against them, expense categories, and the
//! value types (money, month keys, IDs) the metrics are computed with.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod project;
pub mod sale_month;

pub use category::Category;
pub use expense::Expense;
pub use ids::{CategoryId, ExpenseId, ProjectId};
pub use money::Money;
pub use project::{Project, PropertyType};
pub use sale_month::SaleMonth;
