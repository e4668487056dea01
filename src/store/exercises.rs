use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::exercise::{
    CreateExerciseRequest, Exercise, ExerciseWithActivity, Shift, ShiftStats,
    UpdateExerciseRequest,
};
use crate::store::activities;

const SELECT_WITH_ACTIVITY: &str = r#"
    SELECT e.*, a.name AS activity_name
    FROM exercises e
    JOIN activities a ON e.activity_id = a.id
"#;

pub async fn create(pool: &PgPool, req: &CreateExerciseRequest) -> AppResult<ExerciseWithActivity> {
    activities::ensure_exists(pool, req.activity_id).await?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO exercises (activity_id, shift, duration_minutes)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(req.activity_id)
    .bind(req.shift)
    .bind(req.duration_minutes)
    .fetch_one(pool)
    .await?;

    get_with_activity(pool, id).await
}

pub async fn by_activity(pool: &PgPool, activity_id: i64) -> AppResult<Vec<ExerciseWithActivity>> {
    activities::ensure_exists(pool, activity_id).await?;

    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE e.activity_id = $1 ORDER BY e.id");
    let exercises = sqlx::query_as::<_, ExerciseWithActivity>(&sql)
        .bind(activity_id)
        .fetch_all(pool)
        .await?;
    Ok(exercises)
}

pub async fn update(pool: &PgPool, id: i64, req: UpdateExerciseRequest) -> AppResult<ExerciseWithActivity> {
    let current = sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise"))?;

    let shift = req.shift.resolve(current.shift);
    let duration_minutes = req.duration_minutes.resolve(current.duration_minutes);

    sqlx::query("UPDATE exercises SET shift = $2, duration_minutes = $3 WHERE id = $1")
        .bind(id)
        .bind(shift)
        .bind(duration_minutes)
        .execute(pool)
        .await?;

    get_with_activity(pool, id).await
}

/// Idempotent pending -> completed transition; a second call rereads the
/// already-completed record.
pub async fn complete(pool: &PgPool, id: i64) -> AppResult<ExerciseWithActivity> {
    let result = sqlx::query("UPDATE exercises SET completed = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Exercise"));
    }
    get_with_activity(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Exercise"));
    }
    Ok(())
}

pub async fn by_shift(pool: &PgPool, shift: Shift) -> AppResult<Vec<ExerciseWithActivity>> {
    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE e.shift = $1 ORDER BY e.id");
    let exercises = sqlx::query_as::<_, ExerciseWithActivity>(&sql)
        .bind(shift)
        .fetch_all(pool)
        .await?;
    Ok(exercises)
}

/// Exercise volume per shift, busiest first, with the completed count split
/// out.
pub async fn shift_stats(pool: &PgPool) -> AppResult<Vec<ShiftStats>> {
    let stats = sqlx::query_as::<_, ShiftStats>(
        r#"
        SELECT shift,
               COUNT(*) AS total,
               COUNT(*) FILTER (WHERE completed) AS completed
        FROM exercises
        WHERE shift IS NOT NULL
        GROUP BY shift
        ORDER BY total DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

async fn get_with_activity(pool: &PgPool, id: i64) -> AppResult<ExerciseWithActivity> {
    let sql = format!("{SELECT_WITH_ACTIVITY} WHERE e.id = $1");
    sqlx::query_as::<_, ExerciseWithActivity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise"))
}
