//! Voucher generation - models, order ids, report synthesis, orchestration,
//! and the HTTP handlers in front of them.

pub mod handlers;
pub mod models;
pub mod order;
pub mod orchestrator;
pub mod report;

pub use models::{
    GenerateVoucherRequest, GenerationResult, OperatorName, ServiceCatalog, ServiceName,
    TimeDuration, VoucherRecord, VoucherStatus,
};
pub use orchestrator::{generate_voucher, VoucherError, GENERIC_FAILURE_MESSAGE};
