//! Start-up table bootstrap. Idempotent; not a migration mechanism.

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::info;

use crate::error::AppError;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) UNIQUE NOT NULL,
    username VARCHAR(100) NOT NULL,
    password VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

const CREATE_EMAIL_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)";

pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), AppError> {
    let backend = conn.get_database_backend();

    for sql in [CREATE_USERS, CREATE_EMAIL_INDEX] {
        conn.execute(Statement::from_string(backend, sql.to_string()))
            .await?;
    }

    info!("users table ready");
    Ok(())
}
