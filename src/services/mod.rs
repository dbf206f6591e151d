//! Service layer for flip-ledger
//!
//! Business rules on top of the storage layer: validation, lifecycle
//! transitions, and an audit entry for every change.

pub mod category;
pub mod expense;
pub mod project;

pub use category::CategoryService;
pub use expense::ExpenseService;
pub use project::ProjectService;
