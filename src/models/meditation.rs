use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meditation {
    pub id: i64,
    pub activity_id: i64,
    pub duration_minutes: i32,
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeditationRequest {
    pub activity_id: i64,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: i32,
}

/// Completion only transitions through the mark-complete operation.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeditationRequest {
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct MeditationWithActivity {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meditation: Meditation,
    pub activity_name: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct MeditationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meditation: Meditation,
    pub activity_name: String,
    pub activity_description: Option<String>,
}
