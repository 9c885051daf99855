use std::sync::Arc;

use auth_token::SecurityConfig;
use tracing::{debug, info};
use uuid::Uuid;

use crate::crypto::{new_id, PasswordHasher};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::users::{NewUser, User, UserStore};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration, credential checks and user CRUD on top of a `UserStore`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    security: SecurityConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, security: SecurityConfig) -> Self {
        Self {
            store,
            hasher,
            security,
        }
    }

    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim();
        let username = username.trim();
        validate_email(email)?;
        validate_username(username)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.store.find_by_email(email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = self.hash_off_thread(password.to_string()).await?;
        let user = self
            .store
            .create(NewUser {
                id: new_id(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Returns a signed token and the user. Unknown email and wrong
    /// password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), DomainError> {
        let email = email.trim();
        validate_email(email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        let Some(user) = self.store.find_by_email(email).await? else {
            debug!("login for unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.verify_off_thread(password.to_string(), user.password_hash.clone()).await? {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = auth_token::encode_now(&user.id.to_string(), &user.email, &self.security)
            .map_err(|e| DomainError::infra(InfraErrorKind::Token, format!("token signing failed: {e}")))?;

        info!(user_id = %user.id, "user logged in");
        Ok((token, user))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.store.find_all().await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::user_not_found)
    }

    pub async fn update_user(&self, id: &str, username: &str) -> Result<(), DomainError> {
        let username = username.trim();
        validate_username(username)?;
        let id = parse_id(id)?;
        self.store.update_username(id, username).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        let id = parse_id(id)?;
        self.store.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn hash_off_thread(&self, password: String) -> Result<String, DomainError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::infra(InfraErrorKind::Hashing, format!("hash task failed: {e}")))?
    }

    async fn verify_off_thread(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::infra(InfraErrorKind::Hashing, format!("verify task failed: {e}")))
    }
}

fn email_taken() -> DomainError {
    DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
}

/// Ids that are not UUIDs cannot exist, so they read as not found.
fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| DomainError::user_not_found())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(DomainError::validation("email must be a valid address")),
    }
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::validation("username is required"));
    }
    Ok(())
}
