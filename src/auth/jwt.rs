use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::admin::AdminRole;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: AdminRole,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(admin_id: i64, role: AdminRole, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        role,
        exp: (now + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 1,
            db_acquire_timeout_secs: 1,
            jwt_secret: "test-secret".into(),
            jwt_ttl_secs: 28800,
        }
    }

    #[test]
    fn round_trip_preserves_identity_and_role() {
        let config = test_config();
        let token = issue_token(42, AdminRole::Moderator, &config).unwrap();
        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, 42);
        assert_eq!(data.claims.role, AdminRole::Moderator);
        assert_eq!(data.claims.exp - data.claims.iat, 28800);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_token(1, AdminRole::Superadmin, &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "other-secret".into();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(verify_token("not-a-token", &config).is_err());
    }
}
