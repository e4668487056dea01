use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::emotion_record::EmotionRecord;
use crate::models::journal::{
    CreateJournalEntryRequest, EmotionSummary, JournalEntry, JournalEntryDetail,
    JournalEntryWithEmotion, UpdateNoteRequest,
};
use crate::store::query::{Bind, ListQuery, Page};

pub async fn create(pool: &PgPool, req: &CreateJournalEntryRequest) -> AppResult<JournalEntryDetail> {
    let user_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(req.user_id)
        .fetch_one(pool)
        .await?;
    if user_exists == 0 {
        return Err(AppError::not_found("User"));
    }

    // The capture event must belong to the user the entry names.
    let record =
        sqlx::query_as::<_, EmotionRecord>("SELECT * FROM emotion_records WHERE id = $1")
            .bind(req.record_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Emotion record"))?;

    if record.user_id != req.user_id {
        return Err(AppError::Forbidden(
            "The emotion record does not belong to this user".into(),
        ));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO journal_entries (user_id, record_id, note)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(req.user_id)
    .bind(req.record_id)
    .bind(&req.note)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<JournalEntryDetail> {
    sqlx::query_as::<_, JournalEntryDetail>(
        r#"
        SELECT j.*,
               u.name AS user_name,
               u.email AS user_email,
               re.captured_at,
               e.name AS emotion_name,
               e.description AS emotion_description,
               e.score AS emotion_score
        FROM journal_entries j
        JOIN users u ON j.user_id = u.id
        JOIN emotion_records re ON j.record_id = re.id
        JOIN emotions e ON re.emotion_id = e.id
        WHERE j.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Journal entry"))
}

pub async fn list_by_user(
    pool: &PgPool,
    user_id: i64,
    page: Page,
) -> AppResult<(Vec<JournalEntryWithEmotion>, i64)> {
    let query = ListQuery::new(
        r#"SELECT j.*, re.captured_at, e.name AS emotion_name, e.score AS emotion_score
           FROM journal_entries j
           JOIN emotion_records re ON j.record_id = re.id
           JOIN emotions e ON re.emotion_id = e.id"#,
        "SELECT COUNT(*) FROM journal_entries j",
    )
    .filter("j.user_id = $?", Bind::Int(user_id))
    .order_by("j.id DESC")
    .paginate(page);

    let entries = query.fetch_all::<JournalEntryWithEmotion>(pool).await?;
    let total = query.fetch_total(pool).await?;
    Ok((entries, total))
}

pub async fn update_note(pool: &PgPool, id: i64, req: UpdateNoteRequest) -> AppResult<JournalEntry> {
    let current = sqlx::query_as::<_, JournalEntry>("SELECT * FROM journal_entries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Journal entry"))?;

    if req.note.is_missing() {
        return Ok(current);
    }

    let note = req.note.resolve(current.note);

    let entry = sqlx::query_as::<_, JournalEntry>(
        "UPDATE journal_entries SET note = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&note)
    .fetch_one(pool)
    .await?;
    Ok(entry)
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Journal entry"));
    }
    Ok(())
}

/// Per-emotion aggregate over a trailing day window of a user's journal:
/// entry count, average score, first and last capture time.
pub async fn emotional_summary(
    pool: &PgPool,
    user_id: i64,
    days: i64,
) -> AppResult<Vec<EmotionSummary>> {
    let summary = sqlx::query_as::<_, EmotionSummary>(
        r#"
        SELECT e.name AS emotion_name,
               COUNT(j.id) AS total_entries,
               AVG(e.score)::float8 AS average_score,
               MIN(re.captured_at) AS first_at,
               MAX(re.captured_at) AS last_at
        FROM journal_entries j
        JOIN emotion_records re ON j.record_id = re.id
        JOIN emotions e ON re.emotion_id = e.id
        WHERE j.user_id = $1
          AND re.captured_at >= NOW() - make_interval(days => $2::int)
        GROUP BY e.id
        ORDER BY total_entries DESC
        "#,
    )
    .bind(user_id)
    .bind(days)
    .fetch_all(pool)
    .await?;
    Ok(summary)
}
