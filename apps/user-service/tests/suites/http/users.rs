use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};
use user_service::routes::users::{LoginResponse, MessageResponse, UserResponse};

use crate::common::assert_error_response;
use crate::support::{create_test_app, MemoryUserStore};

async fn register<S>(app: &S, email: &str) -> UserResponse
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({"email": email, "username": "tester", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_register_returns_201_without_password() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;

    let email = unique_email("new");

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({"email": email, "username": "newbie", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["username"], "newbie");
    assert!(body["id"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_is_409() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    register(&app, "twice@example.com").await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({"email": "twice@example.com", "username": "again", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::CONFLICT, "EMAIL_TAKEN").await;
}

#[actix_web::test]
async fn test_register_validation_is_400() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;

    for payload in [
        json!({"email": "bad", "username": "u", "password": "secret123"}),
        json!({"email": "a@example.com", "username": "", "password": "secret123"}),
        json!({"email": "a@example.com", "username": "u", "password": "short"}),
        json!({"username": "u", "password": "secret123"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/users/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    }
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn test_login_success_and_failures() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    let user = register(&app, "login@example.com").await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": "login@example.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: LoginResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Login successful");
    assert!(!body.token.is_empty());
    assert_eq!(body.user, user);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": "login@example.com", "password": "wrong-one"}))
        .to_request();
    let wrong_password =
        assert_error_response(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            .await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": "ghost@example.com", "password": "secret123"}))
        .to_request();
    let unknown_email =
        assert_error_response(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            .await;

    assert_eq!(wrong_password.error, unknown_email.error);
}

#[actix_web::test]
async fn test_list_get_update_delete() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    let user = register(&app, &unique_email("crud")).await;
    let path = format!("/users/{}", user.id);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let all: Vec<UserResponse> = test::read_body_json(resp).await;
    assert_eq!(all, vec![user]);

    let req = test::TestRequest::put()
        .uri(&path)
        .set_json(json!({"username": "renamed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MessageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "User updated successfully");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&path).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: UserResponse = test::read_body_json(resp).await;
    assert_eq!(fetched.username, "renamed");

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&path).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MessageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "User deleted successfully");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&path).to_request()).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
}

#[actix_web::test]
async fn test_missing_user_is_404() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    let missing = format!("/users/{}", uuid::Uuid::new_v4());

    let req = test::TestRequest::put()
        .uri(&missing)
        .set_json(json!({"username": "x"}))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;

    let req = test::TestRequest::delete().uri(&missing).to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;

    let req = test::TestRequest::get().uri("/users/not-a-uuid").to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
}

#[actix_web::test]
async fn test_update_with_empty_username_is_400() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    let user = register(&app, &unique_email("empty")).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", user.id))
        .set_json(json!({"username": ""}))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[actix_web::test]
async fn test_create_user_on_collection_returns_201() {
    let app = create_test_app(Arc::new(MemoryUserStore::new())).await;
    let email = unique_email("created");

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"email": email, "username": "made", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: UserResponse = test::read_body_json(resp).await;
    assert_eq!(created.email, email);
    assert_eq!(created.username, "made");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    let all: Vec<UserResponse> = test::read_body_json(resp).await;
    assert_eq!(all, vec![created]);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"email": email, "username": "again", "password": "secret123"}))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::CONFLICT, "EMAIL_TAKEN").await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"email": "bad", "username": "u", "password": "secret123"}))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}
