//! Canonical departure row.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One departure as shown on the widget.
///
/// Built from an upstream estimated call; see `entur::convert` for the
/// fallback chain behind each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRow {
    /// Public line code (e.g. "31"), the line name, or "?".
    pub line: String,

    /// Destination display text.
    pub destination: String,

    /// Expected departure time, falling back to the aimed time.
    pub time: Option<DateTime<FixedOffset>>,

    pub canceled: bool,

    /// Quay display name.
    pub platform: String,

    /// Short platform/track code, explicit or inferred from `platform`.
    pub track_or_stop: String,

    /// Lowercased journey-pattern direction ("inbound", "outbound", "unknown", ...).
    pub direction: String,

    /// Whether `time` is backed by real-time data.
    pub realtime: bool,

    /// Lowercased transport mode ("bus", "tram", "metro", ...), or empty.
    pub mode: String,
}
