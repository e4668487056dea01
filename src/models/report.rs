use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::admin::AdminRole;
use crate::models::field_error;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Report {
    pub id: i64,
    pub admin_id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub admin_id: i64,

    #[validate(length(min = 1, max = 255, message = "Question must be 1-255 characters"))]
    pub question: String,

    #[validate(length(max = 1000, message = "Answer must be at most 1000 characters"))]
    pub answer: Option<String>,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnswerRequest {
    #[serde(default)]
    pub answer: Patch<String>,
    #[serde(default)]
    pub note: Patch<String>,
}

impl Validate for UpdateAnswerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Patch::Value(answer) = &self.answer {
            if answer.chars().count() > 1000 {
                errors.add(
                    "answer",
                    field_error("length", "Answer must be at most 1000 characters"),
                );
            }
        }
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

#[derive(Debug, Serialize, FromRow)]
pub struct ReportWithAdmin {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub report: Report,
    pub admin_name: String,
    pub admin_role: AdminRole,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ReportDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub report: Report,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_role: AdminRole,
}

#[derive(Debug, Deserialize)]
pub struct ReportFilterParams {
    pub answered: Option<bool>,
    pub admin_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Per-role report volume split into answered and pending.
#[derive(Debug, Serialize, FromRow)]
pub struct RoleReportStats {
    pub role: AdminRole,
    pub total: i64,
    pub answered: i64,
    pub pending: i64,
}
