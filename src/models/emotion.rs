use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::field_error;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Emotion {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmotionRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmotionRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub score: Patch<i32>,
}

impl Validate for UpdateEmotionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.is_empty() {
                errors.add("name", field_error("length", "Name is required"));
            } else if name.chars().count() > 100 {
                errors.add(
                    "name",
                    field_error("length", "Name must be at most 100 characters"),
                );
            }
        }
        if let Patch::Value(score) = self.score {
            if !(1..=10).contains(&score) {
                errors.add(
                    "score",
                    field_error("range", "Score must be between 1 and 10"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_out_of_range_score() {
        let req: CreateEmotionRequest =
            serde_json::from_str(r#"{"name": "alegría", "score": 11}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("score"));
    }

    #[test]
    fn update_allows_clearing_score() {
        let req: UpdateEmotionRequest = serde_json::from_str(r#"{"score": null}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.score, Patch::Null);
        assert!(req.description.is_missing());
    }

    #[test]
    fn update_collects_every_violation() {
        let req: UpdateEmotionRequest =
            serde_json::from_str(r#"{"name": "", "score": 0}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("score"));
    }
}
