//! What the widget gets back.

use serde::Serialize;

use crate::domain::DepartureRow;

/// Configuration problems that stop resolution before any upstream call.
///
/// These end up as the `error` text of a [`DepartureBoard`], not as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No stop selected in Settings.")]
    NoStopSelected,
}

/// Effective parameters behind a resolved board, for debugging on the widget side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMeta {
    pub stop_id: String,
    pub used_defaults: bool,
    /// Stored line codes, deduplicated in stored order.
    pub line_filter: Vec<String>,
    pub effective_max_results: u32,
    pub effective_minutes_ahead: u32,
    pub effective_time_range_secs: u32,
    pub effective_direction: String,
    pub effective_time_format: String,
    pub show_canceled: bool,
    /// Line ids actually sent upstream (empty means no restriction).
    pub whitelisted_line_ids: Vec<String>,
}

/// Result of a departure lookup.
///
/// Serializes as `{rows, meta}` or `{rows: [], error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DepartureBoard {
    Resolved {
        rows: Vec<DepartureRow>,
        meta: BoardMeta,
    },
    Unconfigured {
        rows: Vec<DepartureRow>,
        error: String,
    },
}

impl DepartureBoard {
    /// An empty board explaining why nothing was looked up.
    pub fn unconfigured(err: ConfigurationError) -> Self {
        DepartureBoard::Unconfigured {
            rows: Vec::new(),
            error: err.to_string(),
        }
    }

    pub fn rows(&self) -> &[DepartureRow] {
        match self {
            DepartureBoard::Resolved { rows, .. } | DepartureBoard::Unconfigured { rows, .. } => {
                rows
            }
        }
    }

    pub fn meta(&self) -> Option<&BoardMeta> {
        match self {
            DepartureBoard::Resolved { meta, .. } => Some(meta),
            DepartureBoard::Unconfigured { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DepartureBoard::Resolved { .. } => None,
            DepartureBoard::Unconfigured { error, .. } => Some(error),
        }
    }
}
