use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::field_error;
use crate::models::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Phrase {
    pub id: i64,
    pub emotion_id: i64,
    pub text: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhraseRequest {
    #[validate(length(min = 1, max = 255, message = "Text must be 1-255 characters"))]
    pub text: String,

    #[validate(length(max = 255, message = "Author must be at most 255 characters"))]
    pub author: Option<String>,

    pub emotion_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePhraseRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub author: Patch<String>,
    pub emotion_id: Option<i64>,
}

impl Validate for UpdatePhraseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(text) = &self.text {
            if text.is_empty() {
                errors.add("text", field_error("length", "Text is required"));
            } else if text.chars().count() > 255 {
                errors.add(
                    "text",
                    field_error("length", "Text must be at most 255 characters"),
                );
            }
        }
        if let Patch::Value(author) = &self.author {
            if author.chars().count() > 255 {
                errors.add(
                    "author",
                    field_error("length", "Author must be at most 255 characters"),
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
pub struct PhraseWithEmotion {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub phrase: Phrase,
    pub emotion_name: String,
}
