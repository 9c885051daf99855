use std::time::Duration;

use sea_orm::{Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::AppError;

pub const CONNECT_ATTEMPTS: u32 = 10;
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Connect and ping, retrying while the database is still starting.
/// Does not create or migrate anything.
pub async fn connect_db(config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    connect_with_retry(&config.url(), CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY).await
}

pub async fn connect_with_retry(
    url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<DatabaseConnection, AppError> {
    let mut last_error = None;

    for attempt in 1..=attempts {
        match try_connect(url).await {
            Ok(conn) => {
                info!(attempt, "connected to database");
                return Ok(conn);
            }
            Err(e) => {
                warn!(attempt, attempts, error = %e, "waiting for database");
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(AppError::DbUnavailable {
        detail: match last_error {
            Some(e) => format!("database not reachable after {attempts} attempts: {e}"),
            None => "no connection attempts were made".to_string(),
        },
    })
}

async fn try_connect(url: &str) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let conn = Database::connect(url).await?;
    conn.ping().await?;
    Ok(conn)
}
