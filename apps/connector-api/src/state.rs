//! Application state shared across handlers.

use std::sync::Arc;

use wtl_client::{WtlClient, WtlError};

use crate::config::Config;
use crate::mapping::ActionMap;
use crate::processor::EventProcessor;

/// Immutable state constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// The per-event processor.
    pub processor: EventProcessor,
}

impl AppState {
    /// Build the state from configuration and a validated action map.
    pub fn new(config: Config, actions: ActionMap) -> Result<Self, WtlError> {
        let config = Arc::new(config);
        let wtl = Arc::new(WtlClient::new(config.wtl.clone())?);
        let processor = EventProcessor::new(Arc::clone(&config), actions, wtl);

        Ok(Self { config, processor })
    }
}
