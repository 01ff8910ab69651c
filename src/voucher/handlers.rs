use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};

use crate::state::AppState;
use crate::ErrorResponse;

use super::models::{GenerateVoucherRequest, GenerationResult, ServiceCatalog};
use super::orchestrator;

lazy_static! {
    pub static ref VOUCHER_REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "voucher_requests_total",
            "Voucher generation requests by service and outcome."
        ),
        &["service", "outcome"]
    )
    .expect("voucher_requests_total metric definition is valid");
}

#[utoipa::path(
    context_path = "/api",
    tag = "Voucher Service",
    post,
    path = "/vouchers",
    request_body = GenerateVoucherRequest,
    responses(
        (status = 200, description = "Generation outcome: a voucher or a user-visible error with optional suggestions", body = GenerationResult),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    )
)]
pub async fn generate_voucher(
    state: web::Data<AppState>,
    body: web::Json<GenerateVoucherRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let service_label = request.service.to_string();
    log::info!("voucher requested for service '{service_label}'");

    let result = orchestrator::generate_voucher(&state, request).await;

    let outcome = if result.is_success() { "success" } else { "failure" };
    VOUCHER_REQUESTS
        .with_label_values(&[service_label.as_str(), outcome])
        .inc();

    HttpResponse::Ok().json(result)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Service Catalog",
    get,
    path = "/services",
    responses(
        (status = 200, description = "Available services with input placeholders, plus operator and time-duration options", body = ServiceCatalog)
    )
)]
pub async fn get_service_catalog() -> impl Responder {
    HttpResponse::Ok().json(ServiceCatalog::new())
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()));
    error::InternalError::from_response(err, response).into()
}

/// Register voucher routes and the JSON error mapping they share.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.service(web::resource("/vouchers").route(web::post().to(generate_voucher)));
    cfg.service(web::resource("/services").route(web::get().to(get_service_catalog)));
}
