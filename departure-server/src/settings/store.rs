//! Key-value settings stores.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};

use super::error::SettingsError;

/// A string-keyed store of JSON values.
///
/// No transactional guarantees: each `set` stands alone. Implementations
/// must be shareable across request handlers.
pub trait SettingsStore: Send + Sync {
    /// Read a value. Missing keys are `None`; a stored JSON `null` is returned as is.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, replacing whatever was there.
    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;

    /// Copy of every stored key/value pair.
    fn snapshot(&self) -> Map<String, Value>;
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given pairs.
    pub fn with_values<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Store backed by a single JSON object file.
///
/// The whole file is rewritten on every `set`. A missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Value>(&contents) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(SettingsError::Json {
                        message: format!("expected a JSON object, found {other}"),
                    });
                }
                Err(e) => {
                    return Err(SettingsError::Json {
                        message: e.to_string(),
                    });
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Map<String, Value>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(values).map_err(|e| SettingsError::Json {
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        // Hold the write lock across the file write so the file never lags
        // behind a later in-memory update.
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), value);
        self.persist(&guard)
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
