//! Project repository for JSON storage
//!
//! Manages loading and saving projects to projects.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Project, ProjectId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProjectData {
    projects: Vec<Project>,
}

/// Repository for project persistence
pub struct ProjectRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProjectId, Project>>,
}

impl ProjectRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load projects from disk, replacing anything held in memory
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ProjectData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for project in file_data.projects {
            data.insert(project.id, project);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = ProjectData {
            projects: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ProjectId) -> Result<Option<Project>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All projects, oldest first (by creation date, then name)
    pub fn get_all(&self) -> Result<Vec<Project>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut projects: Vec<_> = data.values().cloned().collect();
        sort_projects(&mut projects);
        Ok(projects)
    }

    /// Projects whose closed flag equals `closed`
    pub fn get_by_closed(&self, closed: bool) -> Result<Vec<Project>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut projects: Vec<_> = data
            .values()
            .filter(|p| p.is_closed == closed)
            .cloned()
            .collect();
        sort_projects(&mut projects);
        Ok(projects)
    }

    /// Find a project by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Project>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|p| p.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Find a project whose ID matches a full or short ID string
    pub fn get_by_id_str(&self, identifier: &str) -> Result<Option<Project>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|p| p.id.matches(identifier)).cloned())
    }

    pub fn upsert(&self, project: Project) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(project.id, project);
        Ok(())
    }

    pub fn delete(&self, id: ProjectId) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}
