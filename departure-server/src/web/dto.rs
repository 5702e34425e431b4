//! Data transfer objects for web requests and responses.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::settings::{SettingsStore, keys};

/// Error body for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Raw view of every known settings key; missing keys show as `null`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SettingsView(pub Map<String, Value>);

impl SettingsView {
    /// Read the known keys from a store.
    pub fn from_store<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let values = keys::ALL
            .iter()
            .map(|key| (key.to_string(), store.get(key).unwrap_or(Value::Null)))
            .collect();
        Self(values)
    }
}
