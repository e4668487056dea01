use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::phrase::{CreatePhraseRequest, Phrase, PhraseWithEmotion, UpdatePhraseRequest};

const SELECT_WITH_EMOTION: &str = r#"
    SELECT p.*, e.name AS emotion_name
    FROM phrases p
    JOIN emotions e ON p.emotion_id = e.id
"#;

pub async fn list(pool: &PgPool) -> AppResult<Vec<PhraseWithEmotion>> {
    let sql = format!("{SELECT_WITH_EMOTION} ORDER BY p.id");
    let phrases = sqlx::query_as::<_, PhraseWithEmotion>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(phrases)
}

pub async fn create(pool: &PgPool, req: &CreatePhraseRequest) -> AppResult<PhraseWithEmotion> {
    ensure_emotion_exists(pool, req.emotion_id).await?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO phrases (text, author, emotion_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&req.text)
    .bind(&req.author)
    .bind(req.emotion_id)
    .fetch_one(pool)
    .await?;

    get_with_emotion(pool, id).await
}

pub async fn by_emotion(pool: &PgPool, emotion_id: i64) -> AppResult<Vec<PhraseWithEmotion>> {
    let sql = format!("{SELECT_WITH_EMOTION} WHERE p.emotion_id = $1 ORDER BY p.id");
    let phrases = sqlx::query_as::<_, PhraseWithEmotion>(&sql)
        .bind(emotion_id)
        .fetch_all(pool)
        .await?;

    if phrases.is_empty() {
        return Err(AppError::NotFound(
            "No phrases found for this emotion".into(),
        ));
    }
    Ok(phrases)
}

/// Single random phrase for an emotion, selected by the store in one query.
pub async fn random_by_emotion(pool: &PgPool, emotion_id: i64) -> AppResult<PhraseWithEmotion> {
    let sql = format!("{SELECT_WITH_EMOTION} WHERE p.emotion_id = $1 ORDER BY random() LIMIT 1");
    sqlx::query_as::<_, PhraseWithEmotion>(&sql)
        .bind(emotion_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No phrases found for this emotion".into()))
}

pub async fn update(pool: &PgPool, id: i64, req: UpdatePhraseRequest) -> AppResult<PhraseWithEmotion> {
    let current = sqlx::query_as::<_, Phrase>("SELECT * FROM phrases WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Phrase"))?;

    if let Some(emotion_id) = req.emotion_id {
        if emotion_id != current.emotion_id {
            ensure_emotion_exists(pool, emotion_id).await?;
        }
    }

    let text = req.text.unwrap_or(current.text);
    let author = req.author.resolve(current.author);
    let emotion_id = req.emotion_id.unwrap_or(current.emotion_id);

    sqlx::query("UPDATE phrases SET text = $2, author = $3, emotion_id = $4 WHERE id = $1")
        .bind(id)
        .bind(&text)
        .bind(&author)
        .bind(emotion_id)
        .execute(pool)
        .await?;

    get_with_emotion(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM phrases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Phrase"));
    }
    Ok(())
}

/// Case-insensitive substring match over text and author.
pub async fn search(pool: &PgPool, term: &str) -> AppResult<Vec<PhraseWithEmotion>> {
    let pattern = format!("%{term}%");
    let sql = format!("{SELECT_WITH_EMOTION} WHERE p.text ILIKE $1 OR p.author ILIKE $1 ORDER BY p.id");
    let phrases = sqlx::query_as::<_, PhraseWithEmotion>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(phrases)
}

async fn get_with_emotion(pool: &PgPool, id: i64) -> AppResult<PhraseWithEmotion> {
    let sql = format!("{SELECT_WITH_EMOTION} WHERE p.id = $1");
    sqlx::query_as::<_, PhraseWithEmotion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Phrase"))
}

async fn ensure_emotion_exists(pool: &PgPool, emotion_id: i64) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM emotions WHERE id = $1")
        .bind(emotion_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(AppError::not_found("Emotion"));
    }
    Ok(())
}
