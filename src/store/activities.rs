use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::activity::{
    Activity, ActivityDetail, ActivitySummary, CreateActivityRequest, UpdateActivityRequest,
};
use crate::models::exercise::Exercise;
use crate::models::meditation::Meditation;

pub async fn list(pool: &PgPool) -> AppResult<Vec<ActivitySummary>> {
    let activities = sqlx::query_as::<_, ActivitySummary>(
        r#"
        SELECT a.*,
               COUNT(DISTINCT e.id) AS exercise_count,
               MIN(m.id) AS meditation_id
        FROM activities a
        LEFT JOIN exercises e ON e.activity_id = a.id
        LEFT JOIN meditations m ON m.activity_id = a.id
        GROUP BY a.id
        ORDER BY a.id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(activities)
}

pub async fn create(pool: &PgPool, req: &CreateActivityRequest) -> AppResult<Activity> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO activities (name, description, duration_minutes)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.duration_minutes)
    .fetch_one(pool)
    .await?;

    fetch(pool, id).await
}

/// Point lookup with the activity's dependents embedded.
pub async fn get(pool: &PgPool, id: i64) -> AppResult<ActivityDetail> {
    let activity = fetch(pool, id).await?;

    let exercises =
        sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE activity_id = $1 ORDER BY id")
            .bind(id)
            .fetch_all(pool)
            .await?;

    let meditation = sqlx::query_as::<_, Meditation>(
        "SELECT * FROM meditations WHERE activity_id = $1 LIMIT 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(ActivityDetail {
        activity,
        exercises,
        meditation,
    })
}

pub async fn update(pool: &PgPool, id: i64, req: UpdateActivityRequest) -> AppResult<Activity> {
    let current = fetch(pool, id).await?;

    let name = req.name.unwrap_or(current.name);
    let description = req.description.resolve(current.description);
    let duration_minutes = req.duration_minutes.resolve(current.duration_minutes);

    sqlx::query(
        "UPDATE activities SET name = $2, description = $3, duration_minutes = $4 WHERE id = $1",
    )
    .bind(id)
    .bind(&name)
    .bind(&description)
    .bind(duration_minutes)
    .execute(pool)
    .await?;

    fetch(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let exercises =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exercises WHERE activity_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    let meditations =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meditations WHERE activity_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

    if exercises > 0 || meditations > 0 {
        let mut blockers = Vec::new();
        if exercises > 0 {
            blockers.push(format!("{exercises} exercise(s)"));
        }
        if meditations > 0 {
            blockers.push(format!("{meditations} meditation(s)"));
        }
        return Err(AppError::DependencyConflict(format!(
            "{} reference this activity",
            blockers.join(" and ")
        )));
    }

    let result = sqlx::query("DELETE FROM activities WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Activity"));
    }

    tx.commit().await?;
    Ok(())
}

/// Case-insensitive substring match on activity name.
pub async fn search(pool: &PgPool, term: &str) -> AppResult<Vec<Activity>> {
    let pattern = format!("%{term}%");
    let activities =
        sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE name ILIKE $1 ORDER BY id")
            .bind(&pattern)
            .fetch_all(pool)
            .await?;
    Ok(activities)
}

async fn fetch(pool: &PgPool, id: i64) -> AppResult<Activity> {
    sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Activity"))
}

pub(crate) async fn ensure_exists(pool: &PgPool, id: i64) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(AppError::not_found("Activity"));
    }
    Ok(())
}
