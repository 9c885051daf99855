use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::users::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: String,
}

/// Public view of a user. The password hash is not part of it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            created_at: rfc3339(user.created_at),
            updated_at: rfc3339(user.updated_at),
        }
    }
}

fn rfc3339(at: time::OffsetDateTime) -> String {
    // Formatting a UTC timestamp only fails for years outside 0..=9999.
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let user = app_state
        .users
        .register(&req.email, &req.username, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// `POST /users`: the gateway only forwards this with a verified token.
/// Same validation and conflict rules as self-registration.
async fn create_user(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let user = app_state
        .users
        .register(&req.email, &req.username, &req.password)
        .await?;

    debug!(user_id = %user.id, "user created");
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let (token, user) = app_state.users.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = app_state.users.list_users().await?;
    debug!(count = users.len(), "listing users");

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state.users.get_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn update_user(
    path: web::Path<String>,
    body: ValidatedJson<UpdateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .users
        .update_user(&path.into_inner(), &body.username)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}

async fn delete_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.users.delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(
            web::resource("")
                .route(web::get().to(list_users))
                .route(web::post().to(create_user)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_user))
                .route(web::put().to(update_user))
                .route(web::delete().to(delete_user)),
        );
}
