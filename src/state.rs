//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::validation::{GeminiValidator, SheetValidator};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub validator: Arc<dyn SheetValidator>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent(concat!("phantom-intel-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create reqwest client");

        let validator: Arc<dyn SheetValidator> = Arc::new(GeminiValidator::new(
            http_client,
            config.gemini_api_key.clone().unwrap_or_default(),
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
        ));

        Self { config, validator }
    }

    /// Build state around an arbitrary validator, used by tests to swap the
    /// collaborator for a deterministic double.
    pub fn with_validator(config: AppConfig, validator: Arc<dyn SheetValidator>) -> Self {
        Self { config, validator }
    }
}
