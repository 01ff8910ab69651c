//! Contract tests for the validation verdict and prompt.

use phantom_intel_server::validation::prompt::build_validation_prompt;
use phantom_intel_server::validation::{ValidationVerdict, EMPTY_CORRECTION};

#[test]
fn verdict_parses_the_full_collaborator_response() {
    let verdict: ValidationVerdict = serde_json::from_str(
        r#"{
            "isValid": false,
            "correctedVoucherSheetData": "{\"orderId\":\"IQDATA1\"}",
            "correctedUserInputData": "{\"inputValue\":\"01711000000\"}",
            "errors": ["missing field X"],
            "suggestions": ["add X"]
        }"#,
    )
    .unwrap();

    assert!(!verdict.is_valid);
    assert!(verdict.is_rejection());
    assert_eq!(verdict.errors, vec!["missing field X"]);
    assert_eq!(verdict.suggestions, vec!["add X"]);
    assert!(verdict.corrected_user_input_data.contains("01711000000"));
}

#[test]
fn missing_optional_fields_default_sensibly() {
    let verdict: ValidationVerdict = serde_json::from_str(r#"{ "isValid": true }"#).unwrap();

    assert!(verdict.is_valid);
    assert!(!verdict.is_rejection());
    assert_eq!(verdict.corrected_voucher_sheet_data, EMPTY_CORRECTION);
    assert_eq!(verdict.corrected_user_input_data, EMPTY_CORRECTION);
    assert!(verdict.errors.is_empty());
    assert!(verdict.suggestions.is_empty());
}

#[test]
fn fault_verdict_follows_the_boundary_contract() {
    let verdict = ValidationVerdict::fault("request timed out");

    assert!(!verdict.is_valid);
    assert_eq!(verdict.corrected_voucher_sheet_data, EMPTY_CORRECTION);
    assert_eq!(verdict.corrected_user_input_data, EMPTY_CORRECTION);
    assert_eq!(verdict.errors, vec!["request timed out"]);
    assert!(verdict.suggestions.is_empty());
}

#[test]
fn valid_verdict_with_errors_still_rejects() {
    let verdict = ValidationVerdict {
        is_valid: true,
        errors: vec!["inconsistent payloads".to_string()],
        ..ValidationVerdict::pass()
    };
    assert!(verdict.is_rejection());
}

#[test]
fn verdict_serializes_back_to_camel_case() {
    let encoded = serde_json::to_value(ValidationVerdict::pass()).unwrap();

    assert_eq!(encoded["isValid"], true);
    assert!(encoded.get("correctedVoucherSheetData").is_some());
    assert!(encoded.get("correctedUserInputData").is_some());
    assert!(encoded["errors"].as_array().unwrap().is_empty());
}

#[test]
fn prompt_lists_all_five_validation_requirements() {
    let prompt = build_validation_prompt("{}", "{}");

    assert!(prompt.contains("all required fields are present"));
    assert!(prompt.contains("data types of the fields are correct"));
    assert!(prompt.contains("inconsistencies between the voucher sheet data and user input data"));
    assert!(prompt.contains("security vulnerabilities"));
    assert!(prompt.contains("Suggest corrections"));
}
