//! Entur GraphQL request and response DTOs.
//!
//! Response types mirror the selection set of the `Departures` query.
//! Everything is `Option` because the API omits or nulls fields freely
//! (flexible lines have no quay code, some calls lack a journey pattern).

use serde::{Deserialize, Serialize};

/// Body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphRequest<'a> {
    pub query: &'a str,
    pub variables: DepartureVariables<'a>,
}

/// Variables for the `Departures` query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureVariables<'a> {
    pub stop_id: &'a str,
    pub n: u32,
    /// Lookahead window in seconds.
    pub time_range: u32,
    /// `None` serializes as `null`, which means "no restriction".
    pub whitelist_lines: Option<&'a [String]>,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphResponse {
    pub data: Option<DeparturesData>,
    pub errors: Option<Vec<GraphError>>,
}

impl GraphResponse {
    /// Joined error messages, if the response carries any errors.
    pub fn error_messages(&self) -> Option<String> {
        let errors = self.errors.as_ref().filter(|e| !e.is_empty())?;
        Some(
            errors
                .iter()
                .map(|e| e.message.as_deref().unwrap_or("unknown error"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphError {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesData {
    /// `null` when the stop id is unknown.
    pub stop_place: Option<StopPlace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    pub estimated_calls: Option<Vec<EstimatedCall>>,
}

/// One vehicle departure at the stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedCall {
    /// Whether the expected time comes from real-time data.
    pub realtime: Option<bool>,

    /// Timetabled departure (ISO 8601).
    pub aimed_departure_time: Option<String>,

    /// Real-time estimate (ISO 8601).
    pub expected_departure_time: Option<String>,

    pub cancellation: Option<bool>,

    pub destination_display: Option<DestinationDisplay>,

    pub quay: Option<Quay>,

    pub service_journey: Option<ServiceJourney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDisplay {
    pub front_text: Option<String>,
}

/// A platform, track or bay within the stop place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quay {
    pub name: Option<String>,
    pub public_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceJourney {
    pub line: Option<Line>,
    pub journey_pattern: Option<JourneyPattern>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Provider id, e.g. "RUT:Line:31". This is what the whitelist takes.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Short code shown on the vehicle, e.g. "31".
    pub public_code: Option<String>,
    pub transport_mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPattern {
    pub direction_type: Option<String>,
    pub line: Option<PatternLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternLine {
    pub transport_mode: Option<String>,
}
