//! Storage layer for flip-ledger
//!
//! Projects, expenses and categories each live in their own JSON document
//! under `<base>/data/`. Repositories hold the documents in memory behind
//! `RwLock`s; `Storage` ties them together with the audit log.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod projects;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use projects::ProjectRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Map a poisoned lock into a storage error
pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub projects: ProjectRepository,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating the data directories if needed
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            projects: ProjectRepository::new(paths.projects_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.projects.load()?;
        self.expenses.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Log an update, attaching a diff of the changed top-level fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> LedgerResult<()> {
        let diff = generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?);
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
