use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::field_error;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: i64,
    pub record_id: i64,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalEntryRequest {
    pub user_id: i64,
    pub record_id: i64,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub note: Patch<String>,
}

impl Validate for UpdateNoteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Patch::Value(note) = &self.note {
            if note.chars().count() > 1000 {
                errors.add(
                    "note",
                    field_error("length", "Note must be at most 1000 characters"),
                );
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Entry joined with its capture event and emotion, for per-user listings.
#[derive(Debug, Serialize, FromRow)]
pub struct JournalEntryWithEmotion {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub captured_at: DateTime<Utc>,
    pub emotion_name: String,
    pub emotion_score: Option<i32>,
}

/// Fully joined entry for point lookups and create responses.
#[derive(Debug, Serialize, FromRow)]
pub struct JournalEntryDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub user_name: String,
    pub user_email: String,
    pub captured_at: DateTime<Utc>,
    pub emotion_name: String,
    pub emotion_description: Option<String>,
    pub emotion_score: Option<i32>,
}

/// Per-emotion aggregate over a trailing day window of a user's journal.
#[derive(Debug, Serialize, FromRow)]
pub struct EmotionSummary {
    pub emotion_name: String,
    pub total_entries: i64,
    pub average_score: Option<f64>,
    pub first_at: DateTime<Utc>,
    pub last_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_note_over_limit_is_rejected() {
        let req = UpdateNoteRequest {
            note: Patch::Value("x".repeat(1001)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_note_null_and_missing_are_valid() {
        assert!(UpdateNoteRequest { note: Patch::Null }.validate().is_ok());
        assert!(UpdateNoteRequest {
            note: Patch::Missing
        }
        .validate()
        .is_ok());
    }
}
