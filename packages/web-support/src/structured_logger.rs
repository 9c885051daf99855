//! Request-completion logging.
//!
//! Emits one `request_completed` event per request. The level follows the
//! status class, and the subject is included when an auth layer recorded one.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use crate::request_trace::TraceId;

/// Authenticated subject, inserted into request extensions by whichever
/// layer verified the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSubject(pub String);

pub struct StructuredLogger {
    service: &'static str,
}

impl StructuredLogger {
    pub fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware {
            service,
            service_name: self.service,
        }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
    service_name: &'static str,
}

/// What the completion event needs from the request, captured before the
/// request is handed to the inner service.
struct RequestSummary {
    service: &'static str,
    method: String,
    route: String,
    trace_id: String,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let summary = RequestSummary {
            service: self.service_name,
            method: req.method().to_string(),
            route: route_label(req.match_pattern(), req.path()),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                Ok(res) => {
                    // The auth layer runs inside us, so its subject is only
                    // visible on the way out.
                    let subject = res
                        .request()
                        .extensions()
                        .get::<RequestSubject>()
                        .map(|s| s.0.clone());
                    let bytes = match res.response().body().size() {
                        BodySize::Sized(n) => Some(n),
                        BodySize::None => Some(0),
                        BodySize::Stream => None,
                    };
                    log_completion(&summary, res.status(), started, subject.as_deref(), bytes);
                }
                Err(err) => {
                    let status = err.as_response_error().status_code();
                    log_completion(&summary, status, started, None, None);
                }
            }

            result
        })
    }
}

/// Registered pattern (`/api/users/{id}`) when routing matched, so ids do
/// not fan out the label space. Falls back to the raw path.
fn route_label(pattern: Option<String>, path: &str) -> String {
    pattern.unwrap_or_else(|| path.to_string())
}

fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn log_completion(
    summary: &RequestSummary,
    status: StatusCode,
    started: Instant,
    subject: Option<&str>,
    response_bytes: Option<u64>,
) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let subject = subject.unwrap_or("-");

    // `tracing` needs the level at the callsite.
    macro_rules! completed {
        ($level:expr) => {
            tracing::event!(
                $level,
                service = summary.service,
                trace_id = %summary.trace_id,
                http.method = %summary.method,
                http.route = %summary.route,
                http.status_code = status.as_u16(),
                elapsed_ms,
                subject,
                response_bytes,
                "request_completed"
            )
        };
    }

    let level = completion_level(status);
    if level == Level::ERROR {
        completed!(Level::ERROR);
    } else if level == Level::WARN {
        completed!(Level::WARN);
    } else {
        completed!(Level::INFO);
    }
}
