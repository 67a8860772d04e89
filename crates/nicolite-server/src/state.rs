//! Application state.

use std::sync::Arc;

use nicolite_core::{NicoError, NicoRelay};

use crate::config::ServerConfig;

/// Shared application state.
///
/// Immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub relay: NicoRelay,
}

impl AppState {
    /// Create state talking to the production upstreams.
    pub fn new(config: ServerConfig) -> Result<Self, NicoError> {
        let relay = NicoRelay::with_config(config.client_config())?;
        Ok(Self::with_relay(config, relay))
    }

    /// Create state around an already configured relay.
    pub fn with_relay(config: ServerConfig, relay: NicoRelay) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }
}
