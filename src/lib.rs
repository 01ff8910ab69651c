use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod state;
pub mod validation;
pub mod voucher;

pub use crate::config::{AppConfig, ValidationPolicy};
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::voucher::handlers::generate_voucher,
            crate::voucher::handlers::get_service_catalog,
        ),
        components(
            schemas(
                voucher::models::ServiceName,
                voucher::models::OperatorName,
                voucher::models::TimeDuration,
                voucher::models::GenerateVoucherRequest,
                voucher::models::VoucherStatus,
                voucher::models::VoucherRecord,
                voucher::models::GenerationResult,
                voucher::models::ServiceInfo,
                voucher::models::ServiceCatalog,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Voucher Service", description = "Voucher generation endpoint."),
            (name = "Service Catalog", description = "Service listing for form rendering.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost server")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration, refusing to start: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Validation policy: {:?}, order id strategy: {:?}",
        app_config.validation_policy,
        app_config.order_id_strategy
    );

    let registry = prometheus::Registry::new();
    registry
        .register(Box::new(voucher::handlers::VOUCHER_REQUESTS.clone()))
        .expect("Failed to register voucher request counter");

    let prometheus = PrometheusMetricsBuilder::new("phantom_intel_server")
        .registry(registry)
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let bind_addr = app_config.bind_addr.clone();
    let app_state = web::Data::new(AppState::new(app_config));

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:9002")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(voucher::handlers::config))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .max_connections(25000)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(&bind_addr)?
    .run()
    .await
}
