//! SeaORM adapter for the users table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        email: Set(dto.email),
        username: Set(dto.username),
        password_hash: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_all_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .all(conn)
        .await
}

/// Returns the number of rows touched; zero means no such user.
pub async fn update_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    username: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::Username, Expr::value(username))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

/// Returns the number of rows removed; zero means no such user.
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = users::Entity::delete_by_id(user_id).exec(conn).await?;
    Ok(result.rows_affected)
}
