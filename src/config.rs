//! Environment-driven configuration.

use anyhow::Context;
use std::env;

use crate::validation::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::voucher::order::OrderIdStrategy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PROCESSING_DELAY_MS: u64 = 1500;

/// Whether submissions pass through the validation collaborator before
/// report synthesis, or skip straight to synthesis behind an artificial
/// processing delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub validation_policy: ValidationPolicy,
    pub order_id_strategy: OrderIdStrategy,
    /// Stand-in for processing time when validation is disabled.
    pub processing_delay_ms: u64,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `VALIDATION_POLICY` defaults to `enabled` when `GEMINI_API_KEY` is
    /// set and `disabled` otherwise; setting it to `enabled` without a key
    /// is a startup error.
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let validation_policy = match env::var("VALIDATION_POLICY") {
            Ok(raw) => match raw.to_ascii_lowercase().as_str() {
                "enabled" => ValidationPolicy::Enabled,
                "disabled" => ValidationPolicy::Disabled,
                other => anyhow::bail!(
                    "VALIDATION_POLICY must be 'enabled' or 'disabled', got '{other}'"
                ),
            },
            Err(_) => {
                if gemini_api_key.is_some() {
                    ValidationPolicy::Enabled
                } else {
                    ValidationPolicy::Disabled
                }
            }
        };

        if validation_policy == ValidationPolicy::Enabled && gemini_api_key.is_none() {
            anyhow::bail!("GEMINI_API_KEY must be set when VALIDATION_POLICY=enabled");
        }

        let order_id_strategy = match env::var("ORDER_ID_STRATEGY") {
            Ok(raw) => raw
                .parse::<OrderIdStrategy>()
                .map_err(anyhow::Error::msg)
                .context("invalid ORDER_ID_STRATEGY")?,
            Err(_) => OrderIdStrategy::Random,
        };

        let processing_delay_ms = env::var("PROCESSING_DELAY_MS")
            .ok()
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("PROCESSING_DELAY_MS must be a non-negative integer")?
            .unwrap_or(DEFAULT_PROCESSING_DELAY_MS);

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            validation_policy,
            order_id_strategy,
            processing_delay_ms,
            gemini_api_key,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            validation_policy: ValidationPolicy::Disabled,
            order_id_strategy: OrderIdStrategy::Random,
            processing_delay_ms: DEFAULT_PROCESSING_DELAY_MS,
            gemini_api_key: None,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
        }
    }
}
