//! Where departures come from.

use std::future::Future;

use crate::domain::DepartureRow;
use crate::entur::{EnturClient, UpstreamError};

/// Provider of raw departure rows for a stop.
///
/// Implemented by [`EnturClient`]; tests substitute a recording fake.
pub trait DepartureSource: Send + Sync {
    /// Fetch up to `count` departures within `time_range_secs`, restricted
    /// to `whitelist_lines` unless it is empty.
    fn fetch_departures(
        &self,
        stop_id: &str,
        count: u32,
        time_range_secs: u32,
        whitelist_lines: &[String],
    ) -> impl Future<Output = Result<Vec<DepartureRow>, UpstreamError>> + Send;
}

impl DepartureSource for EnturClient {
    fn fetch_departures(
        &self,
        stop_id: &str,
        count: u32,
        time_range_secs: u32,
        whitelist_lines: &[String],
    ) -> impl Future<Output = Result<Vec<DepartureRow>, UpstreamError>> + Send {
        EnturClient::fetch_departures(self, stop_id, count, time_range_secs, whitelist_lines)
    }
}
