//! Assertions for the JSON error contract shared by both services:
//! `{error, code, trace_id}` plus an `x-trace-id` header carrying the
//! same id.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirrors the services' error body without depending on either crate.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ErrorBodyLike {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

/// Check status, parse the body and verify trace id parity. Returns the
/// parsed body for further assertions.
pub fn assert_error_contract(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "body: {}", String::from_utf8_lossy(body));

    let parsed: ErrorBodyLike =
        serde_json::from_slice(body).expect("error body should match {error, code, trace_id}");

    let header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be ASCII");

    assert_eq!(parsed.trace_id, header, "trace_id in body should match x-trace-id header");
    assert_eq!(parsed.code, expected_code);

    parsed
}
