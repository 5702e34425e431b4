//! HTTP layer for the dashboard widget.
//!
//! Exposes departure lookups and the stored settings as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
