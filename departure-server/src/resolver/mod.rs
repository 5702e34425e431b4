//! Departure resolution.
//!
//! Turns stored defaults plus a widget's per-request overrides into a
//! single upstream query, then narrows the result down:
//!
//! 1. line-code fallback (only when no line ids are stored)
//! 2. canceled departures dropped, unless asked for
//! 3. direction filter, unless "any"
//! 4. cap at the effective page size
//!
//! The cap comes last; capping first would under-fill the page.

mod board;
mod params;
mod request;
mod resolve;
mod source;


pub use board::{BoardMeta, ConfigurationError, DepartureBoard};
pub use params::{DirectionFilter, EffectiveParams};
pub use request::{DepartureRequest, RawDepartureQuery};
pub use resolve::{apply_filters, get_departures};
pub use source::DepartureSource;
