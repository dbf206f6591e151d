//! Project service
//!
//! Business logic for the project lifecycle: creation, closing and
//! reopening, and recording a sale. A closed project is frozen: it takes no
//! new expenses and no sale until it is reopened.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Project, ProjectId, PropertyType};
use crate::storage::Storage;

/// Service for project management
pub struct ProjectService<'a> {
    storage: &'a Storage,
}

impl<'a> ProjectService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new, open project
    pub fn create(
        &self,
        name: &str,
        project_type: PropertyType,
        location: &str,
        square_meters: f64,
        auction_date: NaiveDate,
    ) -> LedgerResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Project name cannot be empty".into(),
            ));
        }

        if self.storage.projects.get_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Project",
                identifier: name.to_string(),
            });
        }

        let project = Project::new(
            name,
            project_type,
            location.trim(),
            square_meters,
            auction_date,
        );

        project
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.projects.upsert(project.clone())?;
        self.storage.projects.save()?;

        self.storage.log_create(
            EntityType::Project,
            project.id.to_string(),
            Some(project.name.clone()),
            &project,
        )?;

        Ok(project)
    }

    pub fn get(&self, id: ProjectId) -> LedgerResult<Option<Project>> {
        self.storage.projects.get(id)
    }

    /// Find a project by name or ID string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Project>> {
        if let Some(project) = self.storage.projects.get_by_name(identifier)? {
            return Ok(Some(project));
        }

        self.storage.projects.get_by_id_str(identifier.trim())
    }

    /// Like `find`, but a missing project is an error
    pub fn resolve(&self, identifier: &str) -> LedgerResult<Project> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::project_not_found(identifier))
    }

    pub fn list(&self) -> LedgerResult<Vec<Project>> {
        self.storage.projects.get_all()
    }

    /// Open projects (the dashboard)
    pub fn list_active(&self) -> LedgerResult<Vec<Project>> {
        self.storage.projects.get_by_closed(false)
    }

    /// Closed projects (the history view)
    pub fn list_closed(&self) -> LedgerResult<Vec<Project>> {
        self.storage.projects.get_by_closed(true)
    }

    /// Close a project
    pub fn close(&self, id: ProjectId) -> LedgerResult<Project> {
        let mut project = self.load(id)?;

        if project.is_closed {
            return Err(LedgerError::Validation(format!(
                "Project '{}' is already closed",
                project.name
            )));
        }

        let before = project.clone();
        project.close();
        self.save_update(&before, &project)?;

        Ok(project)
    }

    /// Reopen a closed project; a recorded sale is kept
    pub fn reopen(&self, id: ProjectId) -> LedgerResult<Project> {
        let mut project = self.load(id)?;

        if !project.is_closed {
            return Err(LedgerError::Validation(format!(
                "Project '{}' is not closed",
                project.name
            )));
        }

        let before = project.clone();
        project.reopen();
        self.save_update(&before, &project)?;

        Ok(project)
    }

    /// Record (or overwrite) the sale of a project
    ///
    /// The project stays open. A sale of exactly zero is stored, but the
    /// metrics treat it as no sale.
    pub fn record_sale(
        &self,
        id: ProjectId,
        amount: Money,
        sale_date: NaiveDate,
    ) -> LedgerResult<Project> {
        let mut project = self.load(id)?;

        if project.is_closed {
            return Err(LedgerError::Locked(project.name));
        }

        if amount.is_negative() {
            return Err(LedgerError::Validation(
                "Sale amount cannot be negative".into(),
            ));
        }

        let before = project.clone();
        project.record_sale(amount, sale_date);

        project
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.save_update(&before, &project)?;

        Ok(project)
    }

    fn load(&self, id: ProjectId) -> LedgerResult<Project> {
        self.storage
            .projects
            .get(id)?
            .ok_or_else(|| LedgerError::project_not_found(id.to_string()))
    }

    fn save_update(&self, before: &Project, after: &Project) -> LedgerResult<()> {
        self.storage.projects.upsert(after.clone())?;
        self.storage.projects.save()?;

        self.storage.log_update(
            EntityType::Project,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}
