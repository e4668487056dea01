use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::user::{CreateUserRequest, User};

pub async fn list(pool: &PgPool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(users)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

/// The password digest is produced by the caller; the store never sees the
/// plaintext.
pub async fn create(pool: &PgPool, req: &CreateUserRequest, password_hash: &str) -> AppResult<User> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (name, email, password_hash, section)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(password_hash)
    .bind(&req.section)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn touch_last_login(pool: &PgPool, id: i64) -> AppResult<User> {
    let result = sqlx::query("UPDATE users SET last_login_at = CURRENT_DATE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User"));
    }
    get(pool, id).await
}

pub async fn update_section(pool: &PgPool, id: i64, section: &str) -> AppResult<User> {
    let result = sqlx::query("UPDATE users SET section = $2 WHERE id = $1")
        .bind(id)
        .bind(section)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User"));
    }
    get(pool, id).await
}
