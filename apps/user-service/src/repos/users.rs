//! User store: the persistence contract the service depends on, and its
//! SeaORM implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model. `password_hash` never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A user about to be stored; id and hash are already generated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict(UniqueEmail)` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    /// Fails with `NotFound(User)` when no row matches.
    async fn update_username(&self, id: Uuid, username: &str) -> Result<(), DomainError>;
    /// Fails with `NotFound(User)` when no row matches.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub struct UserStoreSea {
    conn: DatabaseConnection,
}

impl UserStoreSea {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for UserStoreSea {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let dto = users_adapter::UserCreate::new(user.id, user.email, user.username, user.password_hash);
        let model = users_adapter::create_user(&self.conn, dto)
            .await
            .map_err(map_db_err)?;
        Ok(User::from(model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let model = users_adapter::find_user_by_email(&self.conn, email)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let model = users_adapter::find_user_by_id(&self.conn, id)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(User::from))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let models = users_adapter::find_all_users(&self.conn)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update_username(&self, id: Uuid, username: &str) -> Result<(), DomainError> {
        let rows = users_adapter::update_username(&self.conn, id, username)
            .await
            .map_err(map_db_err)?;
        if rows == 0 {
            return Err(DomainError::user_not_found());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let rows = users_adapter::delete_user(&self.conn, id)
            .await
            .map_err(map_db_err)?;
        if rows == 0 {
            return Err(DomainError::user_not_found());
        }
        Ok(())
    }
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
