//! Generation orchestrator - sequences id/timestamp creation, the optional
//! validation call, report synthesis, and result assembly.
//!
//! Every fault is absorbed here: the caller always receives exactly one
//! [`GenerationResult`] variant, never an exception and never a partial
//! voucher.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::state::AppState;
use crate::validation::ValidationVerdict;

use super::models::{GenerateVoucherRequest, GenerationResult, ServiceName, VoucherRecord, VoucherStatus};
use super::{order, report};

pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred during voucher generation.";

const REJECTION_FALLBACK_MESSAGE: &str = "The submitted data failed validation.";

#[derive(Debug, Error)]
pub enum VoucherError {
    #[error("voucher sheet rejected: {message}")]
    Rejected {
        message: String,
        suggestions: Vec<String>,
    },
    #[error("failed to serialize validation payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("corrected payload is not valid JSON: {0}")]
    Correction(#[source] serde_json::Error),
}

/// Preliminary sheet sent to the validation collaborator before the report
/// exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreliminarySheet<'a> {
    order_id: &'a str,
    service: ServiceName,
    input: &'a str,
    status: &'a str,
    timestamp: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInputRecord<'a> {
    service: ServiceName,
    input_value: &'a str,
}

pub async fn generate_voucher(
    state: &AppState,
    request: GenerateVoucherRequest,
) -> GenerationResult {
    let service = request.service;
    match try_generate(state, request).await {
        Ok(voucher) => {
            log::info!(
                "voucher {} generated for service '{}'",
                voucher.order_id,
                voucher.service
            );
            GenerationResult::success(voucher)
        }
        Err(VoucherError::Rejected {
            message,
            suggestions,
        }) => {
            log::warn!("voucher for service '{service}' rejected by validation: {message}");
            let suggestions = (!suggestions.is_empty()).then_some(suggestions);
            GenerationResult::failure(message, suggestions)
        }
        Err(err) => {
            log::error!("voucher generation for service '{service}' failed: {err}");
            GenerationResult::failure(GENERIC_FAILURE_MESSAGE, None)
        }
    }
}

async fn try_generate(
    state: &AppState,
    request: GenerateVoucherRequest,
) -> Result<VoucherRecord, VoucherError> {
    let order_id = order::generate_order_id(state.config.order_id_strategy);
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let (service, input_value) = match state.config.validation_policy {
        crate::config::ValidationPolicy::Enabled => {
            run_validation(state, &request, &order_id, &timestamp).await?
        }
        crate::config::ValidationPolicy::Disabled => {
            // Stand-in for processing time; nothing to wait on otherwise.
            if state.config.processing_delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(
                    state.config.processing_delay_ms,
                ))
                .await;
            }
            (request.service, request.input_value.clone())
        }
    };

    let report = report::synthesize(service, &input_value);

    Ok(VoucherRecord {
        order_id,
        service,
        input_value,
        timestamp,
        status: VoucherStatus::Success,
        report,
        operator: request.operator,
        time_duration: request.time_duration,
        payment_total: request.payment_total,
        delivery_time: request.delivery_time,
    })
}

/// Run the collaborator and fold its verdict into the final
/// (service, input) pair.
async fn run_validation(
    state: &AppState,
    request: &GenerateVoucherRequest,
    order_id: &str,
    timestamp: &str,
) -> Result<(ServiceName, String), VoucherError> {
    let sheet = serde_json::to_string(&PreliminarySheet {
        order_id,
        service: request.service,
        input: &request.input_value,
        status: "pending",
        timestamp,
    })
    .map_err(VoucherError::Encode)?;

    let user_input = serde_json::to_string(&UserInputRecord {
        service: request.service,
        input_value: &request.input_value,
    })
    .map_err(VoucherError::Encode)?;

    let verdict = state.validator.validate(&sheet, &user_input).await;

    if verdict.is_rejection() {
        let message = if verdict.errors.is_empty() {
            REJECTION_FALLBACK_MESSAGE.to_string()
        } else {
            verdict.errors.join("; ")
        };
        return Err(VoucherError::Rejected {
            message,
            suggestions: verdict.suggestions,
        });
    }

    apply_corrections(&verdict, request.service, &request.input_value)
}

/// Substitute the verdict's corrected service/input when present and
/// non-empty, keeping the originals otherwise. A corrected service that is
/// not one of the known labels keeps the original.
fn apply_corrections(
    verdict: &ValidationVerdict,
    service: ServiceName,
    input_value: &str,
) -> Result<(ServiceName, String), VoucherError> {
    // Both corrected payloads must at least be well-formed JSON.
    parse_correction(&verdict.corrected_voucher_sheet_data)?;
    let corrected = parse_correction(&verdict.corrected_user_input_data)?;

    let mut service = service;
    let mut input_value = input_value.to_string();

    if let Some(corrected) = corrected {
        if let Some(value) = corrected.get("inputValue").and_then(Value::as_str) {
            if !value.is_empty() {
                input_value = value.to_string();
            }
        }
        if let Some(label) = corrected.get("service") {
            if let Ok(corrected_service) = serde_json::from_value::<ServiceName>(label.clone()) {
                service = corrected_service;
            }
        }
    }

    Ok((service, input_value))
}

fn parse_correction(raw: &str) -> Result<Option<Value>, VoucherError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(VoucherError::Correction)
}
