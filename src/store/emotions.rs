use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::emotion::{CreateEmotionRequest, Emotion, UpdateEmotionRequest};
use crate::models::phrase::Phrase;
use crate::store::query::{ListQuery, Page};

pub async fn list(pool: &PgPool, page: Page) -> AppResult<(Vec<Emotion>, i64)> {
    let query = ListQuery::new("SELECT * FROM emotions", "SELECT COUNT(*) FROM emotions")
        .order_by("id")
        .paginate(page);
    let emotions = query.fetch_all::<Emotion>(pool).await?;
    let total = query.fetch_total(pool).await?;
    Ok((emotions, total))
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Emotion> {
    sqlx::query_as::<_, Emotion>("SELECT * FROM emotions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Emotion"))
}

pub async fn create(pool: &PgPool, req: &CreateEmotionRequest) -> AppResult<Emotion> {
    ensure_name_free(pool, &req.name, None).await?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO emotions (name, description, score)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.score)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn update(pool: &PgPool, id: i64, req: UpdateEmotionRequest) -> AppResult<Emotion> {
    let current = get(pool, id).await?;

    if let Some(name) = &req.name {
        if name != &current.name {
            ensure_name_free(pool, name, Some(id)).await?;
        }
    }

    let name = req.name.unwrap_or(current.name);
    let description = req.description.resolve(current.description);
    let score = req.score.resolve(current.score);

    sqlx::query("UPDATE emotions SET name = $2, description = $3, score = $4 WHERE id = $1")
        .bind(id)
        .bind(&name)
        .bind(&description)
        .bind(score)
        .execute(pool)
        .await?;

    get(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let records = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM emotion_records WHERE emotion_id = $1",
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    if records > 0 {
        return Err(AppError::DependencyConflict(format!(
            "{records} emotion record(s) reference this emotion"
        )));
    }

    let result = sqlx::query("DELETE FROM emotions WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Emotion"));
    }

    tx.commit().await?;
    Ok(())
}

/// Phrases attached to an emotion; an empty list is a valid outcome, but the
/// emotion itself must exist.
pub async fn phrases_for(pool: &PgPool, id: i64) -> AppResult<Vec<Phrase>> {
    get(pool, id).await?;

    let phrases =
        sqlx::query_as::<_, Phrase>("SELECT * FROM phrases WHERE emotion_id = $1 ORDER BY id")
            .bind(id)
            .fetch_all(pool)
            .await?;
    Ok(phrases)
}

async fn ensure_name_free(pool: &PgPool, name: &str, exclude_id: Option<i64>) -> AppResult<()> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM emotions WHERE name = $1 AND id != COALESCE($2, -1)",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    if existing > 0 {
        return Err(AppError::Conflict("This emotion already exists".into()));
    }
    Ok(())
}
