//! Gemini-backed implementation of the validation collaborator.
//!
//! Drives the `generateContent` REST endpoint with the fixed instruction
//! prompt and parses the model's JSON reply into a [`ValidationVerdict`].
//! Every fault on this path collapses to [`ValidationVerdict::fault`] so the
//! orchestrator only ever sees a verdict.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::prompt::build_validation_prompt;
use super::{SheetValidator, ValidationVerdict};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
enum GeminiError {
    #[error("validation model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("validation model returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("validation model returned no candidate text")]
    EmptyResponse,
    #[error("validation model verdict is not valid JSON: {0}")]
    Verdict(#[from] serde_json::Error),
}

pub struct GeminiValidator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiValidator {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    async fn request_verdict(
        &self,
        voucher_sheet_data: &str,
        user_input_data: &str,
    ) -> Result<ValidationVerdict, GeminiError> {
        let prompt = build_validation_prompt(voucher_sheet_data, user_input_data);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.first_text().ok_or(GeminiError::EmptyResponse)?;

        let verdict = serde_json::from_str(strip_code_fences(text))?;
        Ok(verdict)
    }
}

#[async_trait]
impl SheetValidator for GeminiValidator {
    async fn validate(
        &self,
        voucher_sheet_data: &str,
        user_input_data: &str,
    ) -> ValidationVerdict {
        match self
            .request_verdict(voucher_sheet_data, user_input_data)
            .await
        {
            Ok(verdict) => verdict,
            Err(err) => {
                log::error!("sheet validation call failed: {err}");
                ValidationVerdict::fault(err.to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

/// Models wrap JSON in Markdown fences often enough that tolerating them is
/// part of the parsing contract.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(strip_code_fences(r#"{"isValid":true}"#), r#"{"isValid":true}"#);
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let fenced = "```json\n{\"isValid\": false}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"isValid\": false}");

        let bare_fence = "```\n{\"isValid\": true}\n```";
        assert_eq!(strip_code_fences(bare_fence), "{\"isValid\": true}");
    }

    #[test]
    fn first_text_walks_candidates_and_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [ {}, { "text": "hello" } ] } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(payload.first_text(), Some("hello"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }

    #[test]
    fn fenced_verdict_parses_with_defaults() {
        let text = "```json\n{\"isValid\": true, \"errors\": []}\n```";
        let verdict: ValidationVerdict =
            serde_json::from_str(strip_code_fences(text)).unwrap();
        assert!(verdict.is_valid);
        assert!(!verdict.is_rejection());
        assert_eq!(verdict.corrected_user_input_data, "{}");
        assert!(verdict.suggestions.is_empty());
    }
}
