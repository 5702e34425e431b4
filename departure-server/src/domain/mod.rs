//! Domain types for the departure board.
//!
//! These are the canonical shapes handed to the dashboard widget,
//! independent of how the upstream provider spells them.

mod departure;
mod quay;

pub use departure::DepartureRow;
pub use quay::extract_quay_code;
