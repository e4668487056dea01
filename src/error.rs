use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid or missing credentials")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cannot delete: {0}")]
    DependencyConflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{entity} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string(), None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".into(),
                Some(validation_details(errors)),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::DependencyConflict(msg) => {
                (StatusCode::BAD_REQUEST, format!("Cannot delete: {msg}"), None)
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage temporarily unavailable".into(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    None,
                )
            }
        };

        let mut error = json!({
            "message": message,
            "code": status.as_u16(),
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Flatten `ValidationErrors` into a field -> [messages] map so a response
/// carries every violated field, not just the first.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let map: serde_json::Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| Value::String(m.to_string()))
                        .unwrap_or_else(|| Value::String(e.code.to_string()))
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect();
    Value::Object(map)
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, max = 10, message = "Score must be 1-10"))]
        score: i32,
    }

    #[test]
    fn validation_details_lists_every_field() {
        let probe = Probe {
            name: String::new(),
            score: 42,
        };
        let errors = probe.validate().unwrap_err();
        let details = validation_details(&errors);
        let obj = details.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["name"][0], "Name is required");
        assert_eq!(obj["score"][0], "Score must be 1-10");
    }
}
