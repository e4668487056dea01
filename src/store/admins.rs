use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::admin::{Admin, AdminRole, RegisterAdminRequest, UpdateAdminRequest};

/// Password digests are produced by the caller; the store only persists and
/// exposes them.
pub async fn register(
    pool: &PgPool,
    req: &RegisterAdminRequest,
    password_hash: &str,
) -> AppResult<Admin> {
    ensure_email_free(pool, &req.email, None).await?;

    let role = req.role.unwrap_or_default();
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO administrators (name, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get_by_email(pool: &PgPool, email: &str) -> AppResult<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM administrators WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(admin)
}

/// Side effect of successful authentication.
pub async fn touch_last_access(pool: &PgPool, id: i64) -> AppResult<()> {
    sqlx::query("UPDATE administrators SET last_access_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Admin>> {
    let admins = sqlx::query_as::<_, Admin>("SELECT * FROM administrators ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(admins)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Admin> {
    sqlx::query_as::<_, Admin>("SELECT * FROM administrators WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Administrator"))
}

/// `new_password_hash` is present only when the caller received a new
/// plaintext password; otherwise the stored digest is untouched.
pub async fn update(
    pool: &PgPool,
    id: i64,
    req: &UpdateAdminRequest,
    new_password_hash: Option<String>,
) -> AppResult<Admin> {
    let current = get(pool, id).await?;

    if let Some(email) = &req.email {
        if email != &current.email {
            ensure_email_free(pool, email, Some(id)).await?;
        }
    }

    let name = req.name.clone().unwrap_or(current.name);
    let email = req.email.clone().unwrap_or(current.email);
    let password_hash = new_password_hash.unwrap_or(current.password_hash);
    let role = req.role.unwrap_or(current.role);

    sqlx::query(
        r#"
        UPDATE administrators
        SET name = $2, email = $3, password_hash = $4, role = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .execute(pool)
    .await?;

    get(pool, id).await
}

/// Deletion guards: the sole remaining superadmin is undeletable, and an
/// administrator with assigned reports must have them reassigned first. The
/// checks and the delete share a transaction.
pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let target = sqlx::query_as::<_, Admin>("SELECT * FROM administrators WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Administrator"))?;

    if target.role == AdminRole::Superadmin {
        let superadmins = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM administrators WHERE role = 'superadmin'",
        )
        .fetch_one(&mut *tx)
        .await?;
        if superadmins <= 1 {
            return Err(AppError::DependencyConflict(
                "the only superadmin".into(),
            ));
        }
    }

    let reports = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports WHERE admin_id = $1")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if reports > 0 {
        return Err(AppError::DependencyConflict(format!(
            "{reports} report(s) are still assigned to this administrator; reassign them first"
        )));
    }

    sqlx::query("DELETE FROM administrators WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn ensure_email_free(pool: &PgPool, email: &str, exclude_id: Option<i64>) -> AppResult<()> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM administrators WHERE email = $1 AND id != COALESCE($2, -1)",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    if existing > 0 {
        return Err(AppError::Conflict("Email already registered".into()));
    }
    Ok(())
}
