//! Translation of an inbound actix request into an outbound request.

use actix_web::HttpRequest;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::error::AppError;

/// Headers describing the inbound connection or framing. The outbound
/// client recomputes these for the new connection and body.
const FRAMING_HEADERS: [&str; 4] = ["host", "content-length", "transfer-encoding", "connection"];

/// Everything needed to issue the outbound request.
#[derive(Debug, Clone)]
pub struct ForwardDescriptor {
    pub method: Method,
    pub target_url: String,
    /// Multi-valued headers are kept as separate entries, in order.
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl ForwardDescriptor {
    pub fn from_request(
        req: &HttpRequest,
        body: Bytes,
        base_url: &str,
        strip_prefix: &str,
    ) -> Result<Self, AppError> {
        let method = Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|e| AppError::internal(format!("unsupported method: {e}")))?;

        let target_url = target_url(
            base_url,
            service_path(req.path(), strip_prefix),
            req.query_string(),
        );

        Ok(Self {
            method,
            target_url,
            headers: copy_headers(req)?,
            body: (!body.is_empty()).then_some(body),
        })
    }
}

/// Remove `strip_prefix` from the start of `path`. A path that does not
/// start with the prefix passes through unchanged.
pub fn service_path<'a>(path: &'a str, strip_prefix: &str) -> &'a str {
    if strip_prefix.is_empty() {
        return path;
    }
    path.strip_prefix(strip_prefix).unwrap_or(path)
}

pub fn target_url(base_url: &str, service_path: &str, raw_query: &str) -> String {
    if raw_query.is_empty() {
        format!("{base_url}{service_path}")
    } else {
        format!("{base_url}{service_path}?{raw_query}")
    }
}

fn copy_headers(req: &HttpRequest) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::with_capacity(req.headers().len());

    // actix yields one entry per value, so repeated headers survive.
    for (name, value) in req.headers().iter() {
        if FRAMING_HEADERS.contains(&name.as_str()) {
            continue;
        }

        let name = HeaderName::from_bytes(name.as_str().as_bytes())
            .map_err(|e| AppError::internal(format!("invalid header name: {e}")))?;
        let value = HeaderValue::from_bytes(value.as_bytes())
            .map_err(|e| AppError::internal(format!("invalid header value: {e}")))?;
        headers.append(name, value);
    }

    Ok(headers)
}
