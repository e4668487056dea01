use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub section: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(length(min = 1, message = "Section must not be empty"))]
    pub section: String,
}
