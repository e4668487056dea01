use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::emotion_record::{
    CreateEmotionRecordRequest, EmotionRecordDetail, EmotionStat, UserEmotionRecord,
};
use crate::store::query::{Bind, ListQuery, Page};

pub async fn list(pool: &PgPool) -> AppResult<Vec<EmotionRecordDetail>> {
    let records = sqlx::query_as::<_, EmotionRecordDetail>(
        r#"
        SELECT re.id, re.captured_at,
               u.id AS user_id, u.name AS user_name,
               e.id AS emotion_id, e.name AS emotion_name
        FROM emotion_records re
        JOIN users u ON re.user_id = u.id
        JOIN emotions e ON re.emotion_id = e.id
        ORDER BY re.id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(records)
}

pub async fn create(
    pool: &PgPool,
    req: &CreateEmotionRecordRequest,
) -> AppResult<EmotionRecordDetail> {
    let user_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(req.user_id)
        .fetch_one(pool)
        .await?;
    if user_exists == 0 {
        return Err(AppError::not_found("User"));
    }

    let emotion_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM emotions WHERE id = $1")
            .bind(req.emotion_id)
            .fetch_one(pool)
            .await?;
    if emotion_exists == 0 {
        return Err(AppError::not_found("Emotion"));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO emotion_records (user_id, emotion_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(req.user_id)
    .bind(req.emotion_id)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<EmotionRecordDetail> {
    sqlx::query_as::<_, EmotionRecordDetail>(
        r#"
        SELECT re.id, re.captured_at,
               u.id AS user_id, u.name AS user_name,
               e.id AS emotion_id, e.name AS emotion_name
        FROM emotion_records re
        JOIN users u ON re.user_id = u.id
        JOIN emotions e ON re.emotion_id = e.id
        WHERE re.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Emotion record"))
}

pub async fn list_by_user(
    pool: &PgPool,
    user_id: i64,
    page: Page,
) -> AppResult<(Vec<UserEmotionRecord>, i64)> {
    let query = ListQuery::new(
        r#"SELECT re.id, re.captured_at, e.name AS emotion_name, e.score AS emotion_score
           FROM emotion_records re
           JOIN emotions e ON re.emotion_id = e.id"#,
        "SELECT COUNT(*) FROM emotion_records re",
    )
    .filter("re.user_id = $?", Bind::Int(user_id))
    .order_by("re.captured_at DESC")
    .paginate(page);

    let records = query.fetch_all::<UserEmotionRecord>(pool).await?;
    let total = query.fetch_total(pool).await?;
    Ok((records, total))
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM emotion_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Emotion record"));
    }
    Ok(())
}

/// Per-emotion count and average score over a user's whole record history.
pub async fn stats_by_user(pool: &PgPool, user_id: i64) -> AppResult<Vec<EmotionStat>> {
    let stats = sqlx::query_as::<_, EmotionStat>(
        r#"
        SELECT e.name AS emotion_name,
               COUNT(*) AS total,
               AVG(e.score)::float8 AS average_score
        FROM emotion_records re
        JOIN emotions e ON re.emotion_id = e.id
        WHERE re.user_id = $1
        GROUP BY e.id
        ORDER BY total DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}
