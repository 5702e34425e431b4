//! Persisted widget configuration.
//!
//! Settings live in a string-keyed store of JSON values. The store itself
//! is deliberately dumb; [`normalize_defaults`] is what keeps it well-typed.

mod collate;
mod error;
mod normalize;
mod store;

pub use collate::compare_line_codes;
pub use error::SettingsError;
pub use normalize::{
    DEFAULT_DIRECTION, DEFAULT_TIME_FORMAT, Defaults, as_string_array, get_defaults,
    normalize_defaults,
};
pub use store::{FileStore, MemoryStore, SettingsStore};

/// Store keys shared by the normalizer, the resolver and the HTTP layer.
pub mod keys {
    pub const STOP_ID: &str = "defaultStopId";
    pub const STOP_NAME: &str = "defaultStopName";
    pub const LINES: &str = "defaultLines";
    pub const LINE_IDS: &str = "defaultLineIds";
    pub const MAX_RESULTS: &str = "defaultMaxResults";
    pub const MINUTES_AHEAD: &str = "defaultMinutesAhead";
    pub const DIRECTION: &str = "defaultDirection";
    pub const TIME_FORMAT: &str = "defaultTimeFormat";

    /// Every key the application reads or writes.
    pub const ALL: [&str; 8] = [
        STOP_ID,
        STOP_NAME,
        LINES,
        LINE_IDS,
        MAX_RESULTS,
        MINUTES_AHEAD,
        DIRECTION,
        TIME_FORMAT,
    ];
}
