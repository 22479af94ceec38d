//! Storage layer for EasyFinance
//!
//! JSON file repositories with atomic writes, plus the audit logger. Each
//! project is stored as a whole tree (categories, expenses, items, incomes).

pub mod file_io;
pub mod repository;
pub mod tokens;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{Entity, JsonRepository, Repository};
pub use tokens::DeletionToken;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::EasyFinancePaths;
use crate::error::EasyFinanceError;
use crate::models::{Project, ProjectId, User, UserId};

pub type ProjectRepository = JsonRepository<Project>;
pub type UserRepository = JsonRepository<User>;
pub type DeletionTokenRepository = JsonRepository<DeletionToken>;

impl Entity for Project {
    type Id = ProjectId;

    fn entity_id(&self) -> ProjectId {
        self.id()
    }

    fn sort_key(&self) -> String {
        self.name().to_lowercase()
    }
}

impl Entity for User {
    type Id = UserId;

    fn entity_id(&self) -> UserId {
        self.id()
    }

    fn sort_key(&self) -> String {
        self.email().to_string()
    }
}

/// Owns every repository and the audit log
pub struct Storage {
    paths: EasyFinancePaths,
    pub projects: ProjectRepository,
    pub users: UserRepository,
    pub deletion_tokens: DeletionTokenRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: EasyFinancePaths) -> Result<Self, EasyFinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            projects: ProjectRepository::new(paths.projects_file()),
            users: UserRepository::new(paths.users_file()),
            deletion_tokens: DeletionTokenRepository::new(paths.deletion_tokens_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &EasyFinancePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), EasyFinanceError> {
        self.projects.load()?;
        self.users.load()?;
        self.deletion_tokens.load()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), EasyFinanceError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), EasyFinanceError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), EasyFinanceError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
