//! Request tracing shared by the gateway and the user service.
//!
//! Wire the middleware in this order so `RequestTrace` runs first:
//!
//! ```ignore
//! App::new()
//!     .wrap(StructuredLogger::new("my-service"))
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)
//! ```

pub mod request_trace;
pub mod structured_logger;
pub mod telemetry;
pub mod trace_ctx;
pub mod trace_span;

pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::{RequestSubject, StructuredLogger};
pub use trace_span::TraceSpan;
