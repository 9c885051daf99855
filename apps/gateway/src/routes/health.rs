use actix_web::{guard, web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Liveness of the gateway process itself; never touches the upstream.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "api-gateway",
    })
}

/// Guarded on the resource so other methods fall through to the 404 default.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").guard(guard::Get()).to(health));
}
