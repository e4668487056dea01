use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::field_error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "admin_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Moderator,
    Editor,
}

impl Default for AdminRole {
    fn default() -> Self {
        Self::Moderator
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub last_access_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Option<AdminRole>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password is rehashed only when a new plaintext value is supplied; absent
/// fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<AdminRole>,
}

impl Validate for UpdateAdminRequest {
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
        if let Some(email) = &self.email {
            if !validator::validate_email(email) {
                errors.add("email", field_error("email", "Invalid email format"));
            }
        }
        if let Some(password) = &self.password {
            if password.chars().count() < 8 {
                errors.add(
                    "password",
                    field_error("length", "Password must be at least 8 characters"),
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

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub admin: Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&AdminRole::Superadmin).unwrap(),
            r#""superadmin""#
        );
        let role: AdminRole = serde_json::from_str(r#""editor""#).unwrap();
        assert_eq!(role, AdminRole::Editor);
    }

    #[test]
    fn update_with_short_password_is_rejected() {
        let req: UpdateAdminRequest =
            serde_json::from_str(r#"{"password": "short"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn update_without_password_skips_password_rule() {
        let req: UpdateAdminRequest =
            serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.password.is_none());
    }
}
