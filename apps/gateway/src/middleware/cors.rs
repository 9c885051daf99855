use actix_cors::Cors;
use actix_web::http::header;

/// Explicit-origin CORS for the gateway. Origins are validated when the
/// config is parsed; only the methods the route table uses are allowed.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
