//! Bearer-token gate for protected resources.
//!
//! On success the resolved `Identity` is placed in the request extensions,
//! together with a `RequestSubject` for the completion log, and the inner
//! service runs. On failure the request is answered here
//! with the uniform 401 body and the inner service is never called.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use auth_token::SecurityConfig;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;
use web_support::RequestSubject;

use crate::auth::authenticate;
use crate::error::AppError;

#[derive(Clone)]
pub struct AuthGate {
    security: Arc<SecurityConfig>,
}

impl AuthGate {
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            security: Arc::new(security),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            security: Arc::clone(&self.security),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    security: Arc<SecurityConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        match authenticate(req.headers(), &self.security) {
            Ok(identity) => {
                debug!(subject_id = %identity.subject_id, "request authenticated");
                {
                    let mut extensions = req.extensions_mut();
                    extensions.insert(RequestSubject(identity.subject_id.clone()));
                    extensions.insert(identity);
                }

                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(reason) => {
                debug!(%reason, "request rejected");

                // Rendered inside the future so the body picks up the trace scope.
                Box::pin(async move {
                    let error = AppError::unauthorized(reason);
                    let (http_req, _payload) = req.into_parts();
                    let response = error.error_response().map_into_right_body();
                    Ok(ServiceResponse::new(http_req, response))
                })
            }
        }
    }
}
