//! Self-healing defaults.
//!
//! The settings page and older releases have written all kinds of shapes
//! into the store. Everything downstream assumes the shapes fixed here.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::collate::compare_line_codes;
use super::error::SettingsError;
use super::keys;
use super::store::SettingsStore;

/// Default page size written when none is stored.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Default lookahead window (minutes) written when none is stored.
pub const DEFAULT_MINUTES_AHEAD: u32 = 120;

pub const DEFAULT_DIRECTION: &str = "any";

pub const DEFAULT_TIME_FORMAT: &str = "auto";

/// The configured stop and line selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    pub stop_id: String,
    pub stop_name: String,
    pub lines: Vec<String>,
}

/// Read the configured stop and line selection.
///
/// Missing or non-string values read as empty.
pub fn get_defaults<S: SettingsStore + ?Sized>(store: &S) -> Defaults {
    Defaults {
        stop_id: string_setting(store, keys::STOP_ID),
        stop_name: string_setting(store, keys::STOP_NAME),
        lines: as_string_array(store.get(keys::LINES).as_ref()),
    }
}

/// Bring the store into its well-typed shape.
///
/// Writes only keys whose stored value needs correcting, so running it on
/// an already-normalized store makes no writes. Returns whether anything
/// was written.
pub fn normalize_defaults<S: SettingsStore + ?Sized>(store: &S) -> Result<bool, SettingsError> {
    let mut dirty = false;

    for key in [keys::STOP_ID, keys::STOP_NAME] {
        if !matches!(store.get(key), Some(Value::String(_))) {
            store.set(key, Value::String(String::new()))?;
            dirty = true;
        }
    }

    let stored_lines = store.get(keys::LINES);
    let canonical = canonical_line_codes(as_string_array(stored_lines.as_ref()));
    let canonical = Value::Array(canonical.into_iter().map(Value::String).collect());
    if stored_lines.as_ref() != Some(&canonical) {
        store.set(keys::LINES, canonical)?;
        dirty = true;
    }

    // Only fill gaps here; a present value is never overwritten, even if
    // it has the wrong type. The resolver copes with those.
    let fallbacks = [
        (keys::MAX_RESULTS, json!(DEFAULT_MAX_RESULTS)),
        (keys::MINUTES_AHEAD, json!(DEFAULT_MINUTES_AHEAD)),
        (keys::DIRECTION, json!(DEFAULT_DIRECTION)),
        (keys::TIME_FORMAT, json!(DEFAULT_TIME_FORMAT)),
    ];
    for (key, fallback) in fallbacks {
        if store.get(key).is_none_or(|v| v.is_null()) {
            store.set(key, fallback)?;
            dirty = true;
        }
    }

    if dirty {
        info!("normalized default settings");
    } else {
        debug!("default settings already normalized");
    }

    Ok(dirty)
}

/// Coerce a stored value into a list of trimmed, non-empty strings.
///
/// Anything that isn't an array yields an empty list. Elements are
/// stringified first, so `[12, " 31 "]` becomes `["12", "31"]`.
pub fn as_string_array(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .map(|v| stringify(v).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Deduplicate (first occurrence wins) and sort by line code collation.
fn canonical_line_codes(codes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = codes
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect();
    unique.sort_by(|a, b| compare_line_codes(a, b));
    unique
}

fn string_setting<S: SettingsStore + ?Sized>(store: &S, key: &str) -> String {
    match store.get(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Render a JSON value as the settings page would show it.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 12.0 is stored by some clients for 12
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| if v.is_null() { String::new() } else { stringify(v) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
