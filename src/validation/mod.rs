//! Sheet validation - the external collaborator that sanity-checks a
//! preliminary voucher sheet and the user input before report synthesis.
//!
//! The collaborator is a hosted language model; only its I/O contract is
//! owned here. The trait exists so the orchestrator can be driven by a
//! deterministic double in tests.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use gemini::GeminiValidator;

/// Corrected payload standing for "no correction".
pub const EMPTY_CORRECTION: &str = "{}";

/// Structured verdict returned by the validation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    /// Corrected voucher sheet as a JSON string; `"{}"` when untouched.
    #[serde(default = "empty_correction")]
    pub corrected_voucher_sheet_data: String,
    /// Corrected user input as a JSON string; `"{}"` when untouched.
    #[serde(default = "empty_correction")]
    pub corrected_user_input_data: String,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

fn empty_correction() -> String {
    EMPTY_CORRECTION.to_string()
}

impl ValidationVerdict {
    /// The verdict every collaborator fault collapses to: invalid, empty
    /// corrections, the fault message as the sole error, no suggestions.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            corrected_voucher_sheet_data: empty_correction(),
            corrected_user_input_data: empty_correction(),
            errors: vec![message.into()],
            suggestions: Vec::new(),
        }
    }

    /// A passing verdict with no corrections, for doubles and tests.
    pub fn pass() -> Self {
        Self {
            is_valid: true,
            corrected_voucher_sheet_data: empty_correction(),
            corrected_user_input_data: empty_correction(),
            errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Whether the orchestrator must abort: explicitly invalid, or any
    /// error reported at all.
    pub fn is_rejection(&self) -> bool {
        !self.is_valid || !self.errors.is_empty()
    }
}

/// Capability interface over the validation collaborator.
///
/// Implementations absorb their own faults: any transport or parse failure
/// is returned as [`ValidationVerdict::fault`], never as an `Err`.
#[async_trait]
pub trait SheetValidator: Send + Sync {
    async fn validate(
        &self,
        voucher_sheet_data: &str,
        user_input_data: &str,
    ) -> ValidationVerdict;
}
