use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

/// The nine lookup services the portal offers. Serialized by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ServiceName {
    #[serde(rename = "NID to All Number")]
    NidToAllNumber,
    #[serde(rename = "Mobile Number to NID")]
    MobileNumberToNid,
    #[serde(rename = "CDR (Call Logs)")]
    CdrCallLogs,
    #[serde(rename = "Location Tracking")]
    LocationTracking,
    #[serde(rename = "IMEI to All Numbers")]
    ImeiToAllNumbers,
    #[serde(rename = "Nagad Info")]
    NagadInfo,
    #[serde(rename = "Nagad Statement")]
    NagadStatement,
    #[serde(rename = "Bkash Info")]
    BkashInfo,
    #[serde(rename = "Bkash Statement")]
    BkashStatement,
}

impl ServiceName {
    pub const ALL: [ServiceName; 9] = [
        ServiceName::NidToAllNumber,
        ServiceName::MobileNumberToNid,
        ServiceName::CdrCallLogs,
        ServiceName::LocationTracking,
        ServiceName::ImeiToAllNumbers,
        ServiceName::NagadInfo,
        ServiceName::NagadStatement,
        ServiceName::BkashInfo,
        ServiceName::BkashStatement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceName::NidToAllNumber => "NID to All Number",
            ServiceName::MobileNumberToNid => "Mobile Number to NID",
            ServiceName::CdrCallLogs => "CDR (Call Logs)",
            ServiceName::LocationTracking => "Location Tracking",
            ServiceName::ImeiToAllNumbers => "IMEI to All Numbers",
            ServiceName::NagadInfo => "Nagad Info",
            ServiceName::NagadStatement => "Nagad Statement",
            ServiceName::BkashInfo => "Bkash Info",
            ServiceName::BkashStatement => "Bkash Statement",
        }
    }

    /// Input-field placeholder shown by the front-end for this service.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ServiceName::NidToAllNumber => "Enter NID number...",
            ServiceName::MobileNumberToNid => "Enter mobile number...",
            ServiceName::CdrCallLogs => "Enter MSISDN...",
            ServiceName::LocationTracking => "Enter MSISDN or Target ID...",
            ServiceName::ImeiToAllNumbers => "Enter IMEI number...",
            ServiceName::NagadInfo | ServiceName::NagadStatement => "Enter Nagad account number...",
            ServiceName::BkashInfo | ServiceName::BkashStatement => "Enter Bkash account number...",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mobile network operators selectable for call-log lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OperatorName {
    Grameenphone,
    Robi,
    Airtel,
    Banglalink,
    Teletalk,
}

impl OperatorName {
    pub const ALL: [OperatorName; 5] = [
        OperatorName::Grameenphone,
        OperatorName::Robi,
        OperatorName::Airtel,
        OperatorName::Banglalink,
        OperatorName::Teletalk,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TimeDuration {
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[serde(rename = "6 months")]
    SixMonths,
}

impl TimeDuration {
    pub const ALL: [TimeDuration; 2] = [TimeDuration::ThreeMonths, TimeDuration::SixMonths];
}

/// One user submission. Immutable; discarded once the response is produced.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVoucherRequest {
    pub service: ServiceName,
    #[schema(example = "01711000000")]
    pub input_value: String,
    #[serde(default)]
    pub operator: Option<OperatorName>,
    #[serde(default)]
    pub time_duration: Option<TimeDuration>,
    #[serde(default)]
    #[schema(example = "৳500")]
    pub payment_total: Option<String>,
    #[serde(default)]
    pub delivery_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VoucherStatus {
    Success,
    Failed,
}

/// The generated voucher document. Assembled once per successful
/// orchestration and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRecord {
    #[schema(example = "IQDATA4F9K2M1X")]
    pub order_id: String,
    pub service: ServiceName,
    pub input_value: String,
    /// ISO 8601, UTC, millisecond precision.
    #[schema(example = "2025-11-05T08:30:00.000Z")]
    pub timestamp: String,
    pub status: VoucherStatus,
    /// Service-specific key-value payload standing in for real lookup data.
    #[schema(value_type = Object)]
    pub report: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<OperatorName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_duration: Option<TimeDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_total: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

/// Outcome of one orchestration: a voucher or a user-visible error, never
/// both. The JSON field names are the wire contract the front-end consumes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum GenerationResult {
    Success {
        #[serde(rename = "voucherData")]
        voucher_data: VoucherRecord,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suggestions: Option<Vec<String>>,
    },
}

impl GenerationResult {
    pub fn success(voucher_data: VoucherRecord) -> Self {
        GenerationResult::Success { voucher_data }
    }

    pub fn failure(error: impl Into<String>, suggestions: Option<Vec<String>>) -> Self {
        GenerationResult::Failure {
            error: error.into(),
            suggestions,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }
}

/// One entry of the service catalog served to form-rendering clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: ServiceName,
    #[schema(example = "Enter mobile number...")]
    pub placeholder: String,
}

/// Everything a client needs to render the submission form.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalog {
    pub services: Vec<ServiceInfo>,
    pub operators: Vec<OperatorName>,
    pub time_durations: Vec<TimeDuration>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self {
            services: ServiceName::ALL
                .iter()
                .map(|service| ServiceInfo {
                    name: *service,
                    placeholder: service.placeholder().to_string(),
                })
                .collect(),
            operators: OperatorName::ALL.to_vec(),
            time_durations: TimeDuration::ALL.to_vec(),
        }
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}
