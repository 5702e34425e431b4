//! Application state for the web layer.

use std::sync::Arc;

use crate::entur::EnturClient;
use crate::settings::SettingsStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Widget configuration
    pub settings: Arc<dyn SettingsStore>,

    /// Upstream departure provider
    pub entur: Arc<EnturClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(settings: impl SettingsStore + 'static, entur: EnturClient) -> Self {
        Self {
            settings: Arc::new(settings),
            entur: Arc::new(entur),
        }
    }
}
