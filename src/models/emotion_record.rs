use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmotionRecord {
    pub id: i64,
    pub user_id: i64,
    pub emotion_id: i64,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmotionRecordRequest {
    pub user_id: i64,
    pub emotion_id: i64,
}

/// Record joined with its user and emotion, for list and create responses.
#[derive(Debug, Serialize, FromRow)]
pub struct EmotionRecordDetail {
    pub id: i64,
    pub captured_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub emotion_id: i64,
    pub emotion_name: String,
}

/// Per-user listing row; the user is implied by the path.
#[derive(Debug, Serialize, FromRow)]
pub struct UserEmotionRecord {
    pub id: i64,
    pub captured_at: DateTime<Utc>,
    pub emotion_name: String,
    pub emotion_score: Option<i32>,
}

/// Per-emotion aggregate for a user's record history.
#[derive(Debug, Serialize, FromRow)]
pub struct EmotionStat {
    pub emotion_name: String,
    pub total: i64,
    pub average_score: Option<f64>,
}
