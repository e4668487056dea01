use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::field_error;
use crate::models::patch::Patch;

/// Time-of-day category an exercise is scheduled for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "shift", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub activity_id: i64,
    pub shift: Option<Shift>,
    pub duration_minutes: Option<i32>,
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    pub activity_id: i64,

    pub shift: Option<Shift>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: Option<i32>,
}

/// Completion is deliberately absent: the pending -> completed transition only
/// happens through the explicit mark-complete operation and cannot be undone.
#[derive(Debug, Deserialize)]
pub struct UpdateExerciseRequest {
    #[serde(default)]
    pub shift: Patch<Shift>,
    #[serde(default)]
    pub duration_minutes: Patch<i32>,
}

impl Validate for UpdateExerciseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
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

#[derive(Debug, Serialize, FromRow)]
pub struct ExerciseWithActivity {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub exercise: Exercise,
    pub activity_name: String,
}

/// Per-shift exercise volume, completed split out.
#[derive(Debug, Serialize, FromRow)]
pub struct ShiftStats {
    pub shift: Shift,
    pub total: i64,
    pub completed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Shift::Morning).unwrap(), r#""morning""#);
        let shift: Shift = serde_json::from_str(r#""evening""#).unwrap();
        assert_eq!(shift, Shift::Evening);
    }

    #[test]
    fn unknown_shift_is_rejected() {
        assert!(serde_json::from_str::<Shift>(r#""midnight""#).is_err());
    }

    #[test]
    fn update_cannot_touch_completed() {
        let req: UpdateExerciseRequest =
            serde_json::from_str(r#"{"completed": false, "duration_minutes": 5}"#).unwrap();
        // unknown fields are ignored; only shift and duration are patchable
        assert_eq!(req.duration_minutes, Patch::Value(5));
        assert!(req.validate().is_ok());
    }
}
