#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_contract::{assert_error_contract, ErrorBodyLike};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Consume the response and check it against the JSON error contract.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_error_contract(status, &headers, &body, expected_status, expected_code)
}
