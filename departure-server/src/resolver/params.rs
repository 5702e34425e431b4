//! Effective query parameters: overrides merged over stored defaults.

use std::collections::HashSet;

use serde_json::Value;

use crate::settings::{
    DEFAULT_DIRECTION, DEFAULT_TIME_FORMAT, SettingsStore, as_string_array, keys,
};

use super::board::BoardMeta;
use super::request::{DepartureRequest, parse_number};

/// Page size used when neither the request nor the store has one.
/// Deliberately above the cap; it clamps to [`MAX_RESULTS_CAP`].
const MAX_RESULTS_FALLBACK: i64 = 200;
const MAX_RESULTS_FLOOR: i64 = 1;
const MAX_RESULTS_CAP: i64 = 50;

/// Lookahead (minutes) used when neither the request nor the store has one.
const MINUTES_AHEAD_FALLBACK: i64 = 180;
const MINUTES_AHEAD_FLOOR: i64 = 5;
const MINUTES_AHEAD_CAP: i64 = 480;

const TIME_RANGE_FLOOR_SECS: i64 = 5 * 60;
const TIME_RANGE_CAP_SECS: i64 = 8 * 60 * 60;

/// Which journey-pattern directions to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionFilter {
    Any,
    /// Lowercased direction type, e.g. "inbound".
    Only(String),
}

impl DirectionFilter {
    /// Parse a direction name. "any" (in any case) keeps everything.
    ///
    /// Matching ignores case and surrounding whitespace, so a stored
    /// "Inbound" keeps rows whose direction is "inbound".
    pub fn parse(s: &str) -> Self {
        let direction = s.trim().to_lowercase();
        if direction == DEFAULT_DIRECTION {
            DirectionFilter::Any
        } else {
            DirectionFilter::Only(direction)
        }
    }

    /// Whether a row with this (lowercased) direction passes.
    pub fn matches(&self, direction: &str) -> bool {
        match self {
            DirectionFilter::Any => true,
            DirectionFilter::Only(wanted) => wanted == direction,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DirectionFilter::Any => DEFAULT_DIRECTION,
            DirectionFilter::Only(direction) => direction,
        }
    }
}

/// Everything needed to run one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveParams {
    /// Empty when no stop is configured or defaults are disabled.
    pub stop_id: String,
    pub used_defaults: bool,
    /// Stored line codes, for the client-side fallback filter.
    pub allowed_codes: Vec<String>,
    /// Stored line ids, for the server-side whitelist.
    pub line_ids: Vec<String>,
    pub max_results: u32,
    pub minutes_ahead: u32,
    pub time_range_secs: u32,
    pub direction: DirectionFilter,
    /// Display only; passed through untouched.
    pub time_format: String,
    pub show_canceled: bool,
}

impl EffectiveParams {
    /// Merge request overrides over the stored defaults.
    ///
    /// The stop and line selection come from the store only, and only when
    /// `use_defaults` is set.
    pub fn resolve<S: SettingsStore + ?Sized>(store: &S, request: &DepartureRequest) -> Self {
        let used_defaults = request.use_defaults;

        let (stop_id, allowed_codes, line_ids) = if used_defaults {
            let stop_id = match store.get(keys::STOP_ID) {
                Some(Value::String(s)) => s,
                _ => String::new(),
            };
            (
                stop_id,
                dedup(as_string_array(store.get(keys::LINES).as_ref())),
                as_string_array(store.get(keys::LINE_IDS).as_ref()),
            )
        } else {
            (String::new(), Vec::new(), Vec::new())
        };

        let max_results = clamp_max_results(
            request
                .max_results
                .or_else(|| number_setting(store, keys::MAX_RESULTS))
                .unwrap_or(MAX_RESULTS_FALLBACK),
        );

        let minutes_ahead = clamp_minutes_ahead(
            request
                .minutes_ahead
                .or_else(|| number_setting(store, keys::MINUTES_AHEAD))
                .unwrap_or(MINUTES_AHEAD_FALLBACK),
        );

        let direction = request
            .direction
            .clone()
            .or_else(|| string_setting(store, keys::DIRECTION))
            .map(|d| DirectionFilter::parse(&d))
            .unwrap_or(DirectionFilter::Any);

        let time_format = request
            .time_format
            .clone()
            .or_else(|| string_setting(store, keys::TIME_FORMAT))
            .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string());

        Self {
            stop_id,
            used_defaults,
            allowed_codes,
            line_ids,
            max_results,
            minutes_ahead,
            time_range_secs: time_range_secs(minutes_ahead),
            direction,
            time_format,
            show_canceled: request.show_canceled,
        }
    }

    /// Whether rows must be filtered locally by line code.
    ///
    /// True for configurations saved before line ids were stored: there are
    /// codes to filter by but nothing was whitelisted upstream.
    pub fn needs_code_fallback(&self) -> bool {
        !self.allowed_codes.is_empty() && self.line_ids.is_empty()
    }

    pub fn to_meta(&self) -> BoardMeta {
        BoardMeta {
            stop_id: self.stop_id.clone(),
            used_defaults: self.used_defaults,
            line_filter: self.allowed_codes.clone(),
            effective_max_results: self.max_results,
            effective_minutes_ahead: self.minutes_ahead,
            effective_time_range_secs: self.time_range_secs,
            effective_direction: self.direction.as_str().to_string(),
            effective_time_format: self.time_format.clone(),
            show_canceled: self.show_canceled,
            whitelisted_line_ids: self.line_ids.clone(),
        }
    }
}

/// Clamp a requested page size to 1..=50.
pub fn clamp_max_results(requested: i64) -> u32 {
    requested.clamp(MAX_RESULTS_FLOOR, MAX_RESULTS_CAP) as u32
}

/// Clamp a requested lookahead to 5..=480 minutes.
pub fn clamp_minutes_ahead(requested: i64) -> u32 {
    requested.clamp(MINUTES_AHEAD_FLOOR, MINUTES_AHEAD_CAP) as u32
}

/// Lookahead in seconds, clamped to 5 minutes..=8 hours.
pub fn time_range_secs(minutes_ahead: u32) -> u32 {
    (i64::from(minutes_ahead) * 60).clamp(TIME_RANGE_FLOOR_SECS, TIME_RANGE_CAP_SECS) as u32
}

/// Read a numeric setting. Numeric strings count; other types don't.
fn number_setting<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<i64> {
    match store.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_number(&s),
        _ => None,
    }
}

/// Read a non-blank string setting.
fn string_setting<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

fn dedup(codes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect()
}
