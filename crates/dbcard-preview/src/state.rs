//! Application state shared across all request handlers.

use std::sync::Arc;

use dbcard_core::CardStore;

use crate::config::Config;

/// Shared application state available to all request handlers.
///
/// Built once at startup; handlers receive the data-service client through
/// this state rather than reaching for a global.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Data-service client. `None` when credentials are missing or invalid.
    pub store: Option<CardStore>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state, constructing the data-service client from
    /// the configured credentials.
    pub fn new(config: Config) -> Self {
        let store = config.credentials.as_ref().and_then(|creds| {
            match CardStore::new(creds, config.lookup_timeout) {
                Ok(store) => {
                    tracing::info!(rest_url = %store.rest_url(), "data service client ready");
                    Some(store)
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to build data service client");
                    None
                }
            }
        });

        Self::with_store(config, store)
    }

    /// Create application state around an existing client.
    pub fn with_store(config: Config, store: Option<CardStore>) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// The data-service client, or the misconfiguration error.
    pub fn require_store(&self) -> Result<&CardStore, crate::error::PreviewError> {
        self.store
            .as_ref()
            .ok_or_else(crate::error::PreviewError::missing_credentials)
    }
}
