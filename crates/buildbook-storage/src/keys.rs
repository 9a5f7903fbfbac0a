//! Storage key layout.
//!
//! Keys are `<namespace>_<name>`. The names are persisted on users'
//! machines; renaming one orphans the data stored under it.

use buildbook_records::EntityKind;

pub const DEFAULT_NAMESPACE: &str = "construction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Collection(EntityKind),
    Settings,
    LastSync,
}

impl StorageKey {
    /// Every key the store owns.
    pub fn all() -> impl Iterator<Item = StorageKey> {
        EntityKind::ALL
            .into_iter()
            .map(StorageKey::Collection)
            .chain([StorageKey::Settings, StorageKey::LastSync])
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::Collection(kind) => kind.storage_name(),
            StorageKey::Settings => "settings",
            StorageKey::LastSync => "last_sync",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    namespace: String,
}

impl Keyspace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, key: StorageKey) -> String {
        format!("{}_{}", self.namespace, key.name())
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_names_are_stable() {
        let keys = Keyspace::default();
        assert_eq!(
            keys.key(StorageKey::Collection(EntityKind::Projects)),
            "construction_projects"
        );
        assert_eq!(
            keys.key(StorageKey::Collection(EntityKind::BankStatements)),
            "construction_bank_statements"
        );
        assert_eq!(keys.key(StorageKey::Settings), "construction_settings");
        assert_eq!(keys.key(StorageKey::LastSync), "construction_last_sync");
    }

    #[test]
    fn test_all_covers_every_kind() {
        assert_eq!(StorageKey::all().count(), EntityKind::ALL.len() + 2);
    }
}
