//! The fixed instruction prompt driving the validation model.

/// Build the instruction prompt with both JSON payloads embedded verbatim.
pub fn build_validation_prompt(voucher_sheet_data: &str, user_input_data: &str) -> String {
    format!(
        r#"You are an AI assistant specializing in validating and correcting voucher sheets and user inputs for a data service platform.

You will receive voucher sheet data and user input data as JSON strings. Your task is to identify any errors or inconsistencies in the data, correct them, and provide a report of the validation results.

Here are the validation requirements:
1.  Ensure that all required fields are present in both the voucher sheet and user input data.
2.  Verify that the data types of the fields are correct (e.g., numbers are numbers, strings are strings).
3.  Check for any inconsistencies between the voucher sheet data and user input data.
4.  Identify any potential security vulnerabilities in the data.
5.  Suggest corrections for any errors or inconsistencies found.

Voucher Sheet Data: {voucher_sheet_data}
User Input Data: {user_input_data}

Based on the validation requirements, please provide the following output in JSON format:
{{
  "isValid": true/false,
  "correctedVoucherSheetData": "corrected voucher sheet data as JSON string",
  "correctedUserInputData": "corrected user input data as JSON string",
  "errors": ["list of errors found"],
  "suggestions": ["list of suggestions for correcting the errors"]
}}
"#
    )
}
