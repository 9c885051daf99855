use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use auth_token::SecurityConfig;
use tracing::{error, info};
use user_service::config::ServiceConfig;
use user_service::crypto::PasswordHasher;
use user_service::infra::{connect_db, ensure_schema};
use user_service::repos::UserStoreSea;
use user_service::routes;
use user_service::services::UserService;
use user_service::state::AppState;
use web_support::{RequestTrace, StructuredLogger, TraceSpan};

const SERVICE_NAME: &str = "user-service";
const DEFAULT_LOG_DIRECTIVES: &str = "info,actix_web=info,sea_orm=warn,sqlx=warn";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = web_support::telemetry::init_tracing(SERVICE_NAME, DEFAULT_LOG_DIRECTIVES) {
        eprintln!("failed to initialise tracing: {e}");
        std::process::exit(1);
    }

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid user service configuration");
            std::process::exit(1);
        }
    };

    let conn = match connect_db(&config.db).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect to the database");
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&conn).await {
        error!(error = %e, "schema bootstrap failed");
        std::process::exit(1);
    }

    let security = SecurityConfig::new(config.jwt_secret.as_bytes()).with_ttl(config.token_ttl);
    let users = UserService::new(
        Arc::new(UserStoreSea::new(conn)),
        PasswordHasher::new(config.bcrypt_cost),
        security,
    );
    let data = web::Data::new(AppState::new(users));

    info!(host = %config.host, port = config.port, db = ?config.db, "starting user service");

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger::new(SERVICE_NAME))
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::route_not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
