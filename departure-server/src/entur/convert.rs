//! Conversion from Entur DTOs to departure rows.
//!
//! Each row field has a fallback chain because the API leaves fields out
//! depending on mode and operator. The chains are applied here and
//! nowhere else.

use chrono::{DateTime, FixedOffset};

use crate::domain::{DepartureRow, extract_quay_code};

use super::types::{DeparturesData, EstimatedCall};

/// Shown when a call has neither a public code nor a line name.
const UNKNOWN_LINE: &str = "?";

/// Direction used when the journey pattern doesn't say.
const UNKNOWN_DIRECTION: &str = "unknown";

/// Error during DTO to row conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A departure timestamp isn't RFC 3339
    #[error("invalid {field}: {value:?}")]
    InvalidTime { field: &'static str, value: String },
}

/// Convert the `data` block of a `Departures` response into rows.
///
/// An unknown stop (`stopPlace: null`) or a missing call list yields no rows.
/// One bad timestamp fails the whole batch rather than dropping the call.
pub fn convert_estimated_calls(
    data: Option<&DeparturesData>,
) -> Result<Vec<DepartureRow>, ConversionError> {
    let calls = data
        .and_then(|d| d.stop_place.as_ref())
        .and_then(|sp| sp.estimated_calls.as_deref())
        .unwrap_or(&[]);

    calls.iter().map(convert_call).collect()
}

/// Convert a single estimated call.
pub fn convert_call(call: &EstimatedCall) -> Result<DepartureRow, ConversionError> {
    let journey = call.service_journey.as_ref();
    let line = journey.and_then(|sj| sj.line.as_ref());
    let pattern = journey.and_then(|sj| sj.journey_pattern.as_ref());
    let quay = call.quay.as_ref();

    let time = match non_empty(call.expected_departure_time.as_deref()) {
        Some(expected) => Some(parse_time("expectedDepartureTime", expected)?),
        None => non_empty(call.aimed_departure_time.as_deref())
            .map(|aimed| parse_time("aimedDepartureTime", aimed))
            .transpose()?,
    };

    let line_label = non_empty(line.and_then(|l| l.public_code.as_deref()))
        .or_else(|| non_empty(line.and_then(|l| l.name.as_deref())))
        .unwrap_or(UNKNOWN_LINE);

    let direction = non_empty(pattern.and_then(|p| p.direction_type.as_deref()))
        .unwrap_or(UNKNOWN_DIRECTION)
        .to_lowercase();

    let platform = non_empty(quay.and_then(|q| q.name.as_deref())).unwrap_or_default();
    let track_or_stop = match non_empty(quay.and_then(|q| q.public_code.as_deref())) {
        Some(code) => code.to_string(),
        None => extract_quay_code(platform),
    };

    // Only a missing mode falls through; an empty one is kept as is.
    let mode = line
        .and_then(|l| l.transport_mode.as_deref())
        .or_else(|| {
            pattern
                .and_then(|p| p.line.as_ref())
                .and_then(|l| l.transport_mode.as_deref())
        })
        .unwrap_or_default()
        .to_lowercase();

    let destination = non_empty(
        call.destination_display
            .as_ref()
            .and_then(|d| d.front_text.as_deref()),
    )
    .unwrap_or_default();

    Ok(DepartureRow {
        line: line_label.to_string(),
        destination: destination.to_string(),
        time,
        canceled: call.cancellation.unwrap_or(false),
        platform: platform.to_string(),
        track_or_stop,
        direction,
        realtime: call.realtime.unwrap_or(false),
        mode,
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn parse_time(
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(value).map_err(|_| ConversionError::InvalidTime {
        field,
        value: value.to_string(),
    })
}
