use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::models::admin::AdminRole;
use crate::AppState;

/// Authenticated administrator identity, inserted as a request extension by
/// `require_admin`. Role checks happen in the handlers via `auth::allowed`.
#[derive(Debug, Clone, Copy)]
pub struct AuthAdmin {
    pub id: i64,
    pub role: AdminRole,
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    let auth_admin = AuthAdmin {
        id: token_data.claims.sub,
        role: token_data.claims.role,
    };

    req.extensions_mut().insert(auth_admin);
    Ok(next.run(req).await)
}
