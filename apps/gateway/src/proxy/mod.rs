//! Forwarding proxy: one pooled outbound client, shared by every request.

pub mod descriptor;
pub mod handler;

use actix_web::http::header::{HeaderValue, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};

pub use descriptor::ForwardDescriptor;
pub use handler::forward;

use crate::config::UpstreamConfig;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ForwardingProxy {
    client: Client,
    upstream: UpstreamConfig,
}

impl ForwardingProxy {
    /// Builds the shared client. Redirects are relayed to the caller, not followed.
    pub fn new(upstream: UpstreamConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(upstream.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| AppError::config(format!("failed to build upstream client: {e}")))?;

        Ok(Self { client, upstream })
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    /// Issue the outbound request and relay status, content-type and body.
    pub async fn dispatch(&self, descriptor: ForwardDescriptor) -> Result<HttpResponse, AppError> {
        let ForwardDescriptor {
            method,
            target_url,
            headers,
            body,
        } = descriptor;

        let mut request = self
            .client
            .request(method.clone(), &target_url)
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let upstream = request.send().await.map_err(|e| {
            warn!(%method, %target_url, timeout = e.is_timeout(), error = %e, "upstream dispatch failed");
            AppError::bad_gateway(e.to_string())
        })?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .map_err(|e| AppError::bad_gateway(format!("invalid upstream status: {e}")))?;
        let content_type = upstream
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| HeaderValue::from_bytes(value.as_bytes()).ok());

        let bytes = upstream.bytes().await.map_err(|e| {
            warn!(%method, %target_url, error = %e, "failed to read upstream body");
            AppError::upstream_read(e.to_string())
        })?;

        debug!(%method, %target_url, status = status.as_u16(), "forwarded");

        let mut response = HttpResponse::build(status);
        if let Some(content_type) = content_type {
            response.insert_header((CONTENT_TYPE, content_type));
        }
        Ok(response.body(bytes))
    }
}
