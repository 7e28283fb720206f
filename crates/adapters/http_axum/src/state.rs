//! Shared application state for axum handlers.

use std::sync::Arc;

use roomconf_app::ports::ConfigurationSink;
use roomconf_app::services::configuration_service::ConfigurationService;

/// Application state shared across all axum handlers.
///
/// Generic over the configuration sink to avoid dynamic dispatch.
/// `Clone` is implemented manually so the sink itself does not need to be
/// `Clone`: only the `Arc` wrapper is cloned.
pub struct AppState<K> {
    /// Compile and publish service.
    pub configuration_service: Arc<ConfigurationService<K>>,
}

impl<K> Clone for AppState<K> {
    fn clone(&self) -> Self {
        Self {
            configuration_service: Arc::clone(&self.configuration_service),
        }
    }
}

impl<K> AppState<K>
where
    K: ConfigurationSink + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(configuration_service: ConfigurationService<K>) -> Self {
        Self {
            configuration_service: Arc::new(configuration_service),
        }
    }
}
