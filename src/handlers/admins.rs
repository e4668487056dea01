use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthAdmin;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{self, jwt::issue_token};
use crate::error::{AppError, AppResult};
use crate::models::admin::{
    Admin, AdminRole, LoginRequest, LoginResponse, RegisterAdminRequest, UpdateAdminRequest,
};
use crate::store;
use crate::AppState;

fn require_role(auth_admin: AuthAdmin, required: &[AdminRole]) -> AppResult<()> {
    if auth::allowed(auth_admin.role, required) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission for this action".into(),
        ))
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<Admin>)> {
    body.validate()?;

    let password_hash = hash_password(&body.password)?;
    let admin = store::admins::register(&state.db, &body, &password_hash).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    body.validate()?;

    let admin = store::admins::get_by_email(&state.db, &body.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &admin.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    store::admins::touch_last_access(&state.db, admin.id).await?;
    let token = issue_token(admin.id, admin.role, &state.config)?;

    // Reread so the response carries the committed last_access_at.
    let admin = store::admins::get(&state.db, admin.id).await?;

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt_ttl_secs,
        admin,
    }))
}

pub async fn list_admins(
    State(state): State<AppState>,
    Extension(auth_admin): Extension<AuthAdmin>,
) -> AppResult<Json<Vec<Admin>>> {
    require_role(auth_admin, &[AdminRole::Superadmin])?;

    let admins = store::admins::list(&state.db).await?;
    Ok(Json(admins))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Extension(auth_admin): Extension<AuthAdmin>,
    Path(admin_id): Path<i64>,
) -> AppResult<Json<Admin>> {
    require_role(auth_admin, &[AdminRole::Superadmin])?;

    let admin = store::admins::get(&state.db, admin_id).await?;
    Ok(Json(admin))
}

/// Any authenticated administrator may update; the middleware already
/// verified the token.
pub async fn update_admin(
    State(state): State<AppState>,
    Extension(_auth_admin): Extension<AuthAdmin>,
    Path(admin_id): Path<i64>,
    Json(body): Json<UpdateAdminRequest>,
) -> AppResult<Json<Admin>> {
    body.validate()?;

    let new_password_hash = match &body.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let admin = store::admins::update(&state.db, admin_id, &body, new_password_hash).await?;
    Ok(Json(admin))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(auth_admin): Extension<AuthAdmin>,
    Path(admin_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    require_role(auth_admin, &[AdminRole::Superadmin])?;

    store::admins::delete(&state.db, admin_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
