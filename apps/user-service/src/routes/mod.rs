use actix_web::web;

use crate::error::AppError;

pub mod health;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    cfg.service(web::scope("/users").configure(users::configure_routes));
}

/// Default service: any path or method not registered above.
pub async fn route_not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found("NOT_FOUND", "Route not found"))
}
