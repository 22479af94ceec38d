//! Repository abstraction and its JSON-file implementation
//!
//! Services talk to `Repository`; `JsonRepository` keeps entities in a map
//! behind a `RwLock` and reads/writes the whole collection as one JSON array.
//! `save`/`delete` change memory only; `flush` persists.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use super::file_io::{read_json, write_json_atomic};
use crate::error::{EasyFinanceError, EasyFinanceResult};

/// An entity that can be stored in a repository
pub trait Entity: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + std::fmt::Display;

    fn entity_id(&self) -> Self::Id;

    /// Key used to order the persisted file
    fn sort_key(&self) -> String;
}

/// `save`/`find`/`delete` persistence capability per entity type
pub trait Repository<E: Entity> {
    /// Insert or replace
    fn save(&self, entity: E) -> EasyFinanceResult<()>;

    fn find(&self, id: E::Id) -> EasyFinanceResult<Option<E>>;

    /// Returns whether something was removed
    fn delete(&self, id: E::Id) -> EasyFinanceResult<bool>;

    /// All entities ordered by sort key
    fn all(&self) -> EasyFinanceResult<Vec<E>>;

    /// First entity matching the predicate
    fn find_by<F>(&self, predicate: F) -> EasyFinanceResult<Option<E>>
    where
        F: Fn(&E) -> bool,
    {
        Ok(self.all()?.into_iter().find(|e| predicate(e)))
    }
}

pub struct JsonRepository<E: Entity> {
    path: PathBuf,
    entities: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> JsonRepository<E> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the in-memory contents with the file's
    pub fn load(&self) -> EasyFinanceResult<()> {
        let list: Vec<E> = read_json(&self.path)?;
        let mut entities = self
            .entities
            .write()
            .map_err(|e| EasyFinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entities.clear();
        for entity in list {
            entities.insert(entity.entity_id(), entity);
        }
        tracing::debug!(path = %self.path.display(), count = entities.len(), "repository loaded");
        Ok(())
    }

    /// Write the in-memory contents to disk
    pub fn flush(&self) -> EasyFinanceResult<()> {
        let list = self.all()?;
        write_json_atomic(&self.path, &list)
    }
}

impl<E: Entity> Repository<E> for JsonRepository<E> {
    fn save(&self, entity: E) -> EasyFinanceResult<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| EasyFinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entities.insert(entity.entity_id(), entity);
        Ok(())
    }

    fn find(&self, id: E::Id) -> EasyFinanceResult<Option<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| EasyFinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entities.get(&id).cloned())
    }

    fn delete(&self, id: E::Id) -> EasyFinanceResult<bool> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| EasyFinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(entities.remove(&id).is_some())
    }

    fn all(&self) -> EasyFinanceResult<Vec<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| EasyFinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut list: Vec<E> = entities.values().cloned().collect();
        list.sort_by_key(|e| e.sort_key());
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ProjectBuilder;
    use crate::models::Project;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, JsonRepository<Project>) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonRepository::new(temp_dir.path().join("projects.json"));
        (temp_dir, repo)
    }

    fn project(name: &str) -> Project {
        ProjectBuilder::new().add_name(Some(name)).build().unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_find_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let home = project("Home");
        let id = home.id();

        repo.save(home).unwrap();
        assert_eq!(repo.find(id).unwrap().unwrap().name(), "Home");

        assert!(repo.delete(id).unwrap());
        assert!(repo.find(id).unwrap().is_none());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_flush_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let home = project("Home");
        let id = home.id();
        repo.save(home).unwrap();
        repo.save(project("Business")).unwrap();
        repo.flush().unwrap();

        let reloaded: JsonRepository<Project> =
            JsonRepository::new(temp_dir.path().join("projects.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.find(id).unwrap().unwrap().name(), "Home");
    }

    #[test]
    fn test_all_sorted_and_find_by() {
        let (_temp_dir, repo) = create_test_repo();
        repo.save(project("Zoo")).unwrap();
        repo.save(project("Apartment")).unwrap();

        let names: Vec<String> = repo
            .all()
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Apartment", "Zoo"]);

        let zoo = repo.find_by(|p| p.name() == "Zoo").unwrap();
        assert!(zoo.is_some());
    }
}
