use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use user_service::errors::{ConflictKind, DomainError};
use user_service::repos::{NewUser, User, UserStore};
use uuid::Uuid;

/// `UserStore` backed by a map, with the same uniqueness and not-found
/// behavior as the database store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn stored(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            ));
        }

        let now = OffsetDateTime::now_utc();
        let stored = User {
            id: user.id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.stored(email))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let mut all: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn update_username(&self, id: Uuid, username: &str) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or_else(DomainError::user_not_found)?;
        user.username = username.to_string();
        user.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(DomainError::user_not_found)
    }
}
