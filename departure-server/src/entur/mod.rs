//! Entur journey planner client.
//!
//! Entur serves Norwegian public transport data through a GraphQL API.
//! We send exactly one query shape, `Departures`, which lists the next
//! estimated calls at a stop place, and flatten each call into a
//! [`DepartureRow`](crate::domain::DepartureRow).
//!
//! Key characteristics of the API:
//! - Every request must carry an `ET-Client-Name` header identifying the app
//! - GraphQL failures come back as HTTP 200 with an `errors` list
//! - Most fields are optional; a missing quay or line is normal for some modes

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEPARTURES_QUERY, EnturClient, EnturConfig};
pub use convert::{ConversionError, convert_estimated_calls};
pub use error::UpstreamError;
pub use types::{DeparturesData, EstimatedCall, GraphResponse, StopPlace};
