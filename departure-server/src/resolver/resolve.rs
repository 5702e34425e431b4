//! The departure lookup itself.

use tracing::debug;

use crate::domain::DepartureRow;
use crate::entur::UpstreamError;
use crate::settings::SettingsStore;

use super::board::{ConfigurationError, DepartureBoard};
use super::params::EffectiveParams;
use super::request::DepartureRequest;
use super::source::DepartureSource;

/// Resolve the departure board for the configured stop.
///
/// With no stop configured (or defaults disabled) this returns an
/// unconfigured board without touching `source`. Upstream failures are
/// returned unchanged; nothing is retried and no partial rows are kept.
pub async fn get_departures<S, D>(
    store: &S,
    source: &D,
    request: &DepartureRequest,
) -> Result<DepartureBoard, UpstreamError>
where
    S: SettingsStore + ?Sized,
    D: DepartureSource,
{
    let params = EffectiveParams::resolve(store, request);

    if params.stop_id.is_empty() {
        debug!(used_defaults = params.used_defaults, "no stop selected, skipping lookup");
        return Ok(DepartureBoard::unconfigured(
            ConfigurationError::NoStopSelected,
        ));
    }

    debug!(
        stop_id = %params.stop_id,
        max_results = params.max_results,
        time_range_secs = params.time_range_secs,
        direction = params.direction.as_str(),
        whitelisted = params.line_ids.len(),
        code_fallback = params.needs_code_fallback(),
        "resolving departures"
    );

    let rows = source
        .fetch_departures(
            &params.stop_id,
            params.max_results,
            params.time_range_secs,
            &params.line_ids,
        )
        .await?;

    let fetched = rows.len();
    let rows = apply_filters(rows, &params);
    debug!(fetched, kept = rows.len(), "filtered departures");

    Ok(DepartureBoard::Resolved {
        rows,
        meta: params.to_meta(),
    })
}

/// Narrow fetched rows: code fallback, canceled, direction, then the cap.
pub fn apply_filters(rows: Vec<DepartureRow>, params: &EffectiveParams) -> Vec<DepartureRow> {
    let code_fallback = params.needs_code_fallback();

    rows.into_iter()
        .filter(|row| !code_fallback || params.allowed_codes.contains(&row.line))
        .filter(|row| params.show_canceled || !row.canceled)
        .filter(|row| params.direction.matches(&row.direction))
        .take(params.max_results as usize)
        .collect()
}
