pub mod auth_gate;
pub mod cors;

pub use auth_gate::AuthGate;
pub use cors::cors_middleware;
pub use web_support::{RequestTrace, StructuredLogger, TraceId, TraceSpan};
