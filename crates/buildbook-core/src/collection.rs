//! Generic cached CRUD over one stored collection.

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use buildbook_records::Entity;
use buildbook_storage::{StorageKey, Store};

use crate::Result;

/// One entity collection: the stored array plus an in-memory copy.
///
/// Mutations read the stored array, apply the change, write it back and
/// then reload the cache from storage, so the cache never runs ahead of
/// what is persisted. Stored entries that do not decode are left out of
/// the cache but survive every mutation. Ids are unique within a
/// collection.
pub struct Collection<E: Entity> {
    /// In-memory copy of the stored collection
    cache: Arc<RwLock<Vec<E>>>,
    store: Store,
}

impl<E: Entity> Collection<E> {
    pub fn new(store: Store) -> Self {
        Self {
            cache: Arc::new(RwLock::new(Vec::new())),
            store,
        }
    }

    fn key() -> StorageKey {
        StorageKey::Collection(E::KIND)
    }

    /// Reloads the cache from storage and returns the record count.
    pub fn refresh(&self) -> usize {
        let items: Vec<E> = self.store.read(Self::key());
        let count = items.len();
        *self.cache.write() = items;
        count
    }

    pub fn list(&self) -> Vec<E> {
        self.cache.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<E> {
        self.cache.read().iter().find(|e| e.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cache.read().iter().any(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn filter<P>(&self, pred: P) -> Vec<E>
    where
        P: Fn(&E) -> bool,
    {
        self.cache.read().iter().filter(|e| pred(e)).cloned().collect()
    }

    /// Appends `entity` as given. If its id is already stored this is an
    /// [`update`](Self::update) instead.
    pub fn add(&self, entity: E) -> Result<()> {
        self.upsert(entity)
    }

    /// Replaces the stored record with the same id, stamping `updated_at`.
    /// A record that is not stored yet is appended as given.
    pub fn update(&self, entity: E) -> Result<()> {
        self.upsert(entity)
    }

    /// Drops the record with `id`. Absent ids are ignored.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut items = self.store.read_values(Self::key())?;
        let before = items.len();
        items.retain(|value| stored_id(value) != Some(id));

        if items.len() == before {
            tracing::debug!(kind = %E::KIND, id = %id, "Nothing to remove");
            return Ok(());
        }

        self.store.write(Self::key(), items.as_slice())?;
        self.refresh();

        tracing::info!(kind = %E::KIND, id = %id, "Removed record");

        Ok(())
    }

    // Works on the stored JSON rather than decoded records so that entries
    // this build cannot decode are written back untouched.
    fn upsert(&self, mut entity: E) -> Result<()> {
        let mut items = self.store.read_values(Self::key())?;

        match items.iter().position(|value| stored_id(value) == Some(entity.id())) {
            Some(index) => {
                entity.touch(Utc::now());
                tracing::info!(kind = %E::KIND, id = %entity.id(), "Updated record");
                items[index] = serde_json::to_value(&entity)?;
            }
            None => {
                tracing::info!(kind = %E::KIND, id = %entity.id(), "Added record");
                items.push(serde_json::to_value(&entity)?);
            }
        }

        self.store.write(Self::key(), items.as_slice())?;
        self.refresh();

        Ok(())
    }
}

fn stored_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

impl<E: Entity> Clone for Collection<E> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildbook_records::{EntityKind, Project, ProjectStatus, Task};
    use buildbook_storage::{Database, Keyspace, StorageError};
    use chrono::Duration;

    fn projects() -> Collection<Project> {
        Collection::new(Store::open_in_memory().unwrap())
    }

    #[test]
    fn test_add_then_list() {
        let projects = projects();
        let project = Project::new("Extension", "Acme", "emp-1");

        projects.add(project.clone()).unwrap();

        let listed = projects.list();
        assert_eq!(listed, vec![project.clone()]);
        assert_eq!(projects.get(&project.id), Some(project));
        assert!(projects.get("missing").is_none());
    }

    #[test]
    fn test_update_replaces_and_stamps() {
        let projects = projects();
        let mut project = Project::new("Extension", "Acme", "emp-1");
        project.updated_at = Utc::now() - Duration::days(3);
        projects.add(project.clone()).unwrap();

        let mut edited = project.clone();
        edited.status = ProjectStatus::InProgress;
        let before = Utc::now();
        projects.update(edited.clone()).unwrap();

        let listed = projects.list();
        assert_eq!(listed.len(), 1);
        let stored = &listed[0];
        assert_eq!(stored.status, ProjectStatus::InProgress);
        assert!(stored.updated_at >= before);
        assert_eq!(stored.created_at, project.created_at);

        let mut expected = edited;
        expected.updated_at = stored.updated_at;
        assert_eq!(*stored, expected);
    }

    #[test]
    fn test_update_of_unknown_id_appends() {
        let projects = projects();
        projects.add(Project::new("A", "Acme", "emp-1")).unwrap();

        let other = Project::new("B", "Acme", "emp-1");
        projects.update(other.clone()).unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects.get(&other.id), Some(other));
    }

    #[test]
    fn test_add_existing_id_keeps_ids_unique() {
        let projects = projects();
        let project = Project::new("A", "Acme", "emp-1");
        projects.add(project.clone()).unwrap();

        let mut again = project.clone();
        again.name = "A (revised)".to_string();
        projects.add(again).unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects.get(&project.id).unwrap().name, "A (revised)");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let projects = projects();
        let project = Project::new("A", "Acme", "emp-1");
        projects.add(project.clone()).unwrap();

        projects.remove("missing").unwrap();
        assert_eq!(projects.len(), 1);

        projects.remove(&project.id).unwrap();
        projects.remove(&project.id).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_refresh_sees_other_handles() {
        let store = Store::open_in_memory().unwrap();
        let a: Collection<Task> = Collection::new(store.clone());
        let b: Collection<Task> = Collection::new(store);

        a.add(Task::for_project("Order skip", "proj-1")).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.refresh(), 1);
        assert_eq!(b.filter(|t| t.project_id.as_deref() == Some("proj-1")).len(), 1);
    }

    #[test]
    fn test_mutations_keep_undecodable_records() {
        let store = Store::open_in_memory().unwrap();
        let good = Project::new("Extension", "Acme", "emp-1");
        let mut paused = serde_json::to_value(Project::new("Loft", "Acme", "emp-1")).unwrap();
        paused["status"] = "paused".into();
        store
            .import_all(&serde_json::json!({ "projects": [&good, paused] }).to_string())
            .unwrap();

        let projects: Collection<Project> = Collection::new(store.clone());
        assert_eq!(projects.refresh(), 1);

        let added = Project::new("New", "Acme", "emp-1");
        projects.add(added.clone()).unwrap();
        projects.remove(&good.id).unwrap();

        let stored = store.read_values(StorageKey::Collection(EntityKind::Projects)).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["status"], "paused");
        assert_eq!(projects.list(), vec![added]);
    }

    #[test]
    fn test_unparseable_collection_is_not_overwritten() {
        let store = Store::open_in_memory().unwrap();
        store.database().put("construction_projects", "{not json").unwrap();

        let projects: Collection<Project> = Collection::new(store.clone());
        let err = projects.add(Project::new("A", "Acme", "emp-1")).unwrap_err();

        assert!(matches!(
            err,
            crate::CoreError::Storage(StorageError::Corrupt { .. })
        ));
        assert_eq!(
            store.database().get("construction_projects").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_quota_failure_keeps_cache_and_storage_in_step() {
        let project = Project::new("A", "Acme", "emp-1");
        let payload = serde_json::to_string(&[&project]).unwrap();

        let quota = ("construction_projects".len() + payload.len() + 10) as u64;
        let store = Store::new(Database::open_in_memory(quota).unwrap(), Keyspace::default());
        let projects: Collection<Project> = Collection::new(store.clone());

        assert!(projects.add(project).is_err());
        assert!(projects.is_empty());
        assert_eq!(store.database().get("construction_projects").unwrap(), None);
    }

    #[test]
    fn test_failed_write_leaves_cache_alone() {
        let db = Database::open_in_memory(2048).unwrap();
        let projects: Collection<Project> = Collection::new(Store::new(db, Keyspace::default()));
        projects.add(Project::new("A", "Acme", "emp-1")).unwrap();

        let mut big = Project::new("B", "Acme", "emp-1");
        big.description = Some("x".repeat(4096));
        let err = projects.add(big).unwrap_err();

        assert!(matches!(
            err,
            crate::CoreError::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(projects.len(), 1);
    }
}
