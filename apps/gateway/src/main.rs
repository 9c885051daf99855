use actix_web::{web, App, HttpServer};
use gateway::config::GatewayConfig;
use gateway::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use gateway::routes;
use gateway::state::AppState;
use tracing::{error, info};

const SERVICE_NAME: &str = "api-gateway";
const DEFAULT_LOG_DIRECTIVES: &str = "info,actix_web=info,reqwest=warn,hyper=warn";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = web_support::telemetry::init_tracing(SERVICE_NAME, DEFAULT_LOG_DIRECTIVES) {
        eprintln!("failed to initialise tracing: {e}");
        std::process::exit(1);
    }

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid gateway configuration");
            std::process::exit(1);
        }
    };

    let app_state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        upstream = %config.upstream.base_url,
        "starting api gateway"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();
    let max_body_bytes = config.max_body_bytes;

    HttpServer::new(move || {
        let security = data.security.clone();

        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger::new(SERVICE_NAME))
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(|cfg| routes::configure(cfg, &security))
            .default_service(web::to(routes::route_not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
