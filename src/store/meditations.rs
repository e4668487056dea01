use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::meditation::{
    CreateMeditationRequest, Meditation, MeditationDetail, MeditationWithActivity,
    UpdateMeditationRequest,
};

const SELECT_WITH_ACTIVITY: &str = r#"
    SELECT m.*, a.name AS activity_name
    FROM meditations m
    JOIN activities a ON m.activity_id = a.id
"#;

/// An activity holds at most one meditation; the check and the insert share a
/// transaction so a concurrent create cannot slip between them.
pub async fn create(pool: &PgPool, req: &CreateMeditationRequest) -> AppResult<MeditationWithActivity> {
    let mut tx = pool.begin().await?;

    let activity_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities WHERE id = $1")
            .bind(req.activity_id)
            .fetch_one(&mut *tx)
            .await?;
    if activity_exists == 0 {
        return Err(AppError::not_found("Activity"));
    }

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meditations WHERE activity_id = $1")
            .bind(req.activity_id)
            .fetch_one(&mut *tx)
            .await?;
    if existing > 0 {
        return Err(AppError::Conflict(
            "This activity already has a meditation".into(),
        ));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO meditations (activity_id, duration_minutes)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(req.activity_id)
    .bind(req.duration_minutes)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    get_with_activity(pool, id).await
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<MeditationDetail> {
    sqlx::query_as::<_, MeditationDetail>(
        r#"
        SELECT m.*, a.name AS activity_name, a.description AS activity_description
        FROM meditations m
        JOIN activities a ON m.activity_id = a.id
        WHERE m.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Meditation"))
}

pub async fn by_activity(pool: &PgPool, activity_id: i64) -> AppResult<MeditationWithActivity> {
    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE m.activity_id = $1");
    sqlx::query_as::<_, MeditationWithActivity>(&sql)
        .bind(activity_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No meditation found for this activity".into()))
}

pub async fn update(pool: &PgPool, id: i64, req: UpdateMeditationRequest) -> AppResult<MeditationWithActivity> {
    let current = sqlx::query_as::<_, Meditation>("SELECT * FROM meditations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Meditation"))?;

    let duration_minutes = req.duration_minutes.unwrap_or(current.duration_minutes);

    sqlx::query("UPDATE meditations SET duration_minutes = $2 WHERE id = $1")
        .bind(id)
        .bind(duration_minutes)
        .execute(pool)
        .await?;

    get_with_activity(pool, id).await
}

/// Idempotent pending -> completed transition.
pub async fn complete(pool: &PgPool, id: i64) -> AppResult<MeditationWithActivity> {
    let result = sqlx::query("UPDATE meditations SET completed = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Meditation"));
    }
    get_with_activity(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM meditations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Meditation"));
    }
    Ok(())
}

pub async fn completed(pool: &PgPool) -> AppResult<Vec<MeditationWithActivity>> {
    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE m.completed = TRUE ORDER BY m.id");
    let meditations = sqlx::query_as::<_, MeditationWithActivity>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(meditations)
}

async fn get_with_activity(pool: &PgPool, id: i64) -> AppResult<MeditationWithActivity> {
    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE m.id = $1");
    sqlx::query_as::<_, MeditationWithActivity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Meditation"))
}
