use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

/// Per-request trace id, stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

/// Assigns a trace id to every request, runs the rest of the chain inside
/// the matching `trace_ctx` scope and echoes the id as `x-trace-id`.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(TraceId(trace_id.clone()));

        let service = Rc::clone(&self.service);

        Box::pin(trace_ctx::with_trace_id(trace_id.clone(), async move {
            let mut res = service.call(req).await?;

            // Error responses already carry the header.
            if !res.headers().contains_key("x-trace-id") {
                if let Ok(value) = header::HeaderValue::from_str(&trace_id) {
                    res.headers_mut()
                        .insert(header::HeaderName::from_static("x-trace-id"), value);
                }
            }

            Ok(res)
        }))
    }
}
