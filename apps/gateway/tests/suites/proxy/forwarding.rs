use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::support::auth::{bearer_header, test_security};
use crate::support::downstream::Echo;
use crate::support::{create_test_app, start_downstream};

fn auth() -> String {
    bearer_header("user-9", "nine@example.com", &test_security())
}

#[actix_web::test]
async fn test_prefix_is_stripped_and_query_preserved() {
    let downstream = start_downstream().await;
    let app = create_test_app(downstream.base_url()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/users/99")
        .insert_header(("Authorization", auth()))
        .to_request();
    let echo: Echo = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/users/99");
    assert_eq!(echo.query, "");

    let req = test::TestRequest::get()
        .uri("/api/users?page=2&sort=email&tag=a&tag=b")
        .insert_header(("Authorization", auth()))
        .to_request();
    let echo: Echo = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(echo.path, "/users");
    assert_eq!(echo.query, "page=2&sort=email&tag=a&tag=b");

    downstream.stop().await;
}

#[actix_web::test]
async fn test_repeated_headers_are_all_forwarded() {
    let downstream = start_downstream().await;
    let app = create_test_app(downstream.base_url()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", auth()))
        .append_header(("X-Trace", "first"))
        .append_header(("X-Trace", "second"))
        .to_request();

    let echo: Echo = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(echo.header_values("x-trace"), vec!["first", "second"]);

    downstream.stop().await;
}

#[actix_web::test]
async fn test_method_and_body_are_forwarded() {
    let downstream = start_downstream().await;
    let app = create_test_app(downstream.base_url()).build().await;

    let req = test::TestRequest::put()
        .uri("/api/users/7")
        .insert_header(("Authorization", auth()))
        .set_json(json!({ "username": "renamed" }))
        .to_request();

    let echo: Echo = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.path, "/users/7");
    assert_eq!(echo.header_values("content-type"), vec!["application/json"]);

    let sent: serde_json::Value = serde_json::from_str(&echo.body).unwrap();
    assert_eq!(sent, json!({ "username": "renamed" }));

    let req = test::TestRequest::delete()
        .uri("/api/users/7")
        .insert_header(("Authorization", auth()))
        .to_request();
    let echo: Echo = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(echo.method, "DELETE");
    assert!(echo.body.is_empty());

    downstream.stop().await;
}

#[actix_web::test]
async fn test_status_and_content_type_are_relayed() {
    let downstream = start_downstream().await;
    let app = create_test_app(downstream.base_url()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/users/teapot")
        .insert_header(("Authorization", auth()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    assert_eq!(test::read_body(resp).await, "short and stout");

    downstream.stop().await;
}

#[actix_web::test]
async fn test_success_responses_carry_trace_header() {
    let downstream = start_downstream().await;
    let app = create_test_app(downstream.base_url()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("x-trace-id").is_some());

    downstream.stop().await;
}
