//! Per-request overrides from the widget.

use serde::Deserialize;

/// Query bag as the widget sends it: every value is a string.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDepartureQuery {
    /// "true" (default) or "false"
    pub use_defaults: Option<String>,
    pub max_results: Option<String>,
    pub minutes_ahead: Option<String>,
    pub direction: Option<String>,
    pub time_format: Option<String>,
    /// "true" or "false" (default)
    pub show_canceled: Option<String>,

    /// Accepted but ignored: the stored stop always wins.
    pub stop_id: Option<String>,

    /// Accepted but ignored: the stored line selection always wins.
    pub line_filter: Option<String>,
}

/// Typed per-request overrides.
///
/// There is deliberately no stop or line override here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRequest {
    /// Use the stored stop and lines. When false no stop is selected at all.
    pub use_defaults: bool,
    pub max_results: Option<i64>,
    pub minutes_ahead: Option<i64>,
    pub direction: Option<String>,
    pub time_format: Option<String>,
    pub show_canceled: bool,
}

impl Default for DepartureRequest {
    fn default() -> Self {
        Self {
            use_defaults: true,
            max_results: None,
            minutes_ahead: None,
            direction: None,
            time_format: None,
            show_canceled: false,
        }
    }
}

impl From<RawDepartureQuery> for DepartureRequest {
    fn from(raw: RawDepartureQuery) -> Self {
        Self {
            use_defaults: raw.use_defaults.as_deref().is_none_or(|v| v == "true"),
            max_results: raw.max_results.as_deref().and_then(parse_number),
            minutes_ahead: raw.minutes_ahead.as_deref().and_then(parse_number),
            direction: raw.direction.filter(|d| !d.trim().is_empty()),
            time_format: raw.time_format.filter(|f| !f.trim().is_empty()),
            show_canceled: raw.show_canceled.as_deref() == Some("true"),
        }
    }
}

/// Parse a numeric override or setting.
///
/// Fractions are truncated. Blank or non-numeric input is `None` so the
/// next fallback applies.
pub(crate) fn parse_number(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}
