pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod state;

pub use auth::{authenticate, AuthFailure};
pub use config::{GatewayConfig, UpstreamConfig};
pub use error::AppError;
pub use extractors::Identity;
pub use middleware::{cors_middleware, AuthGate, RequestTrace, StructuredLogger, TraceSpan};
pub use proxy::{ForwardDescriptor, ForwardingProxy};
pub use state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
