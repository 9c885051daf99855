//! Password hashing and id generation.

use uuid::Uuid;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// bcrypt with a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::infra(InfraErrorKind::Hashing, format!("hash failed: {e}")))
    }

    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
