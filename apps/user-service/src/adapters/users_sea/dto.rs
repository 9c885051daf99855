//! DTOs for the users_sea adapter.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(
        id: Uuid,
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
