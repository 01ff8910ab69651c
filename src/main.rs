#[actix_web::main]
async fn main() -> std::io::Result<()> {
    phantom_intel_server::run().await
}
