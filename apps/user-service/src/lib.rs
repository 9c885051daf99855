pub mod adapters;
pub mod config;
pub mod crypto;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{DbConfig, ServiceConfig};
pub use crypto::PasswordHasher;
pub use error::AppError;
pub use errors::DomainError;
pub use repos::{NewUser, User, UserStore, UserStoreSea};
pub use services::UserService;
pub use state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
