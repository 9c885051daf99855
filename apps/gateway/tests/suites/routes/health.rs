use actix_web::test;
use serde_json::{json, Value};

use crate::support::{create_test_app, refused_base_url};

#[actix_web::test]
async fn test_health_does_not_need_upstream() {
    let app = create_test_app(refused_base_url()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().get("x-trace-id").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "healthy", "service": "api-gateway" }));
}
