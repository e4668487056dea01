use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::exercise::Exercise;
use crate::models::field_error;
use crate::models::meditation::Meditation;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub duration_minutes: Patch<i32>,
}

impl Validate for UpdateActivityRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.is_empty() {
                errors.add("name", field_error("length", "Name is required"));
            } else if name.chars().count() > 255 {
                errors.add(
                    "name",
                    field_error("length", "Name must be at most 255 characters"),
                );
            }
        }
        if let Patch::Value(minutes) = self.duration_minutes {
            if minutes < 1 {
                errors.add(
                    "duration_minutes",
                    field_error("range", "Duration must be positive"),
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

/// Listing row: activity plus how many exercises reference it and the id of
/// its meditation, when one exists.
#[derive(Debug, Serialize, FromRow)]
pub struct ActivitySummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub activity: Activity,
    pub exercise_count: i64,
    pub meditation_id: Option<i64>,
}

/// Point lookup: activity with its dependents embedded.
#[derive(Debug, Serialize)]
pub struct ActivityDetail {
    #[serde(flatten)]
    pub activity: Activity,
    pub exercises: Vec<Exercise>,
    pub meditation: Option<Meditation>,
}
