//! Typed collection store over the key-value table.

use buildbook_records::{timestamp, AppSettings, EntityKind};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::Database;
use crate::error::StorageError;
use crate::keys::{Keyspace, StorageKey};
use crate::Result;

const SETTINGS_FIELD: &str = "settings";
const EXPORT_DATE_FIELD: &str = "exportDate";

/// Reads and writes whole collections and the settings singleton.
///
/// Each key is written independently. A multi-key operation that fails
/// part-way leaves the keys written before the failure committed.
#[derive(Clone)]
pub struct Store {
    db: Database,
    keys: Keyspace,
}

impl Store {
    pub fn new(db: Database, keys: Keyspace) -> Self {
        Self { db, keys }
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(
            Database::open_in_memory(crate::DEFAULT_QUOTA_BYTES)?,
            Keyspace::default(),
        ))
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keys
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Reads a collection. A missing key or an unparseable payload yields
    /// an empty collection, and records that do not decode as `T` are
    /// skipped. Both cases are logged.
    pub fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Vec<T> {
        let name = self.keys.key(key);
        let Some(raw) = self.read_raw(&name) else {
            return Vec::new();
        };

        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(key = %name, error = %e, "Error reading from storage, using empty collection");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(key = %name, index, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect()
    }

    /// Reads a collection as stored, without decoding its records.
    ///
    /// Unlike [`read`](Self::read) this fails when the payload is not a
    /// JSON array, so a caller rewriting the collection never replaces
    /// data it could not see.
    pub fn read_values(&self, key: StorageKey) -> Result<Vec<Value>> {
        let name = self.keys.key(key);
        let Some(raw) = self.db.get(&name)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(key = %name, error = %e, "Stored collection is not a JSON array");
            StorageError::Corrupt {
                key: name,
                reason: e.to_string(),
            }
        })
    }

    /// Replaces a collection and stamps the last-sync time. Both land in
    /// one transaction, so a rejected write changes nothing.
    pub fn write<T: Serialize>(&self, key: StorageKey, items: &[T]) -> Result<()> {
        let name = self.keys.key(key);
        let json = serde_json::to_string(items)?;
        let stamp = timestamp::format(&Utc::now());
        let sync_key = self.keys.key(StorageKey::LastSync);

        let entries = [
            (name.as_str(), json.as_str()),
            (sync_key.as_str(), stamp.as_str()),
        ];

        if let Err(e) = self.db.put_all(&entries) {
            tracing::error!(key = %name, error = %e, "Error writing to storage");
            return Err(e);
        }

        tracing::debug!(key = %name, count = items.len(), bytes = json.len(), "Wrote collection");
        Ok(())
    }

    /// Reads a singleton, falling back to `T::default()` when it is missing
    /// or unreadable.
    pub fn read_singleton<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        let name = self.keys.key(key);
        let Some(raw) = self.read_raw(&name) else {
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %name, error = %e, "Error reading singleton, using defaults");
                T::default()
            }
        }
    }

    /// Replaces a singleton. Does not stamp the last-sync time.
    pub fn write_singleton<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        let name = self.keys.key(key);
        let json = serde_json::to_string(value)?;

        if let Err(e) = self.db.put(&name, &json) {
            tracing::error!(key = %name, error = %e, "Error writing singleton");
            return Err(e);
        }
        Ok(())
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        let raw = self.read_raw(&self.keys.key(StorageKey::LastSync))?;
        timestamp::parse(raw.trim_matches('"'))
    }

    /// Serializes every collection, the settings and an export timestamp
    /// into one pretty-printed JSON object.
    pub fn export_all(&self) -> Result<String> {
        let mut blob = Map::new();

        for kind in EntityKind::ALL {
            let items: Vec<Value> = self.read(StorageKey::Collection(kind));
            blob.insert(kind.export_field().to_string(), Value::Array(items));
        }

        let settings: AppSettings = self.read_singleton(StorageKey::Settings);
        blob.insert(SETTINGS_FIELD.to_string(), serde_json::to_value(settings)?);
        blob.insert(
            EXPORT_DATE_FIELD.to_string(),
            Value::String(timestamp::format(&Utc::now())),
        );

        tracing::info!("Exported all data");

        Ok(serde_json::to_string_pretty(&Value::Object(blob))?)
    }

    /// Applies an export blob.
    ///
    /// Every recognized, non-null field replaces its collection (or the
    /// settings) wholesale; unknown fields are ignored. Nothing is written
    /// unless the blob parses as a JSON object. Fields are applied in
    /// export order, and a failure part-way keeps earlier fields.
    pub fn import_all(&self, blob: &str) -> Result<()> {
        let data: Value = serde_json::from_str(blob).map_err(|e| {
            tracing::error!(error = %e, "Error importing data");
            StorageError::InvalidFormat(e.to_string())
        })?;

        let Value::Object(fields) = data else {
            return Err(StorageError::InvalidFormat(
                "expected a JSON object at the top level".to_string(),
            ));
        };

        let mut applied = 0usize;

        for kind in EntityKind::ALL {
            let field = kind.export_field();
            match fields.get(field) {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) => {
                    self.write(StorageKey::Collection(kind), items.as_slice())?;
                    applied += 1;
                }
                Some(_) => {
                    return Err(StorageError::InvalidFormat(format!(
                        "`{field}` must be an array"
                    )));
                }
            }
        }

        match fields.get(SETTINGS_FIELD) {
            None | Some(Value::Null) => {}
            Some(settings @ Value::Object(_)) => {
                let settings = AppSettings::deserialize(settings).map_err(|e| {
                    StorageError::InvalidFormat(format!("`{SETTINGS_FIELD}`: {e}"))
                })?;
                self.write_singleton(StorageKey::Settings, &settings)?;
                applied += 1;
            }
            Some(_) => {
                return Err(StorageError::InvalidFormat(format!(
                    "`{SETTINGS_FIELD}` must be an object"
                )));
            }
        }

        tracing::info!(fields = applied, "Imported data");

        Ok(())
    }

    /// Removes every key the store owns, including settings and last-sync.
    pub fn clear_all(&self) -> Result<()> {
        for key in StorageKey::all() {
            self.db.remove(&self.keys.key(key))?;
        }

        tracing::info!(namespace = %self.keys.namespace(), "Cleared all data");

        Ok(())
    }

    fn read_raw(&self, name: &str) -> Option<String> {
        match self.db.get(name) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %name, error = %e, "Error reading from storage");
                None
            }
        }
    }
}
