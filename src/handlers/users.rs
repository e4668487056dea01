use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::AppResult;
use crate::models::user::{CreateUserRequest, UpdateSectionRequest, User};
use crate::store;
use crate::AppState;

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = store::users::list(&state.db).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = store::users::get(&state.db, user_id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    body.validate()?;

    let password_hash = hash_password(&body.password)?;
    let user = store::users::create(&state.db, &body, &password_hash).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_last_login(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = store::users::touch_last_login(&state.db, user_id).await?;
    Ok(Json(user))
}

pub async fn update_section(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<UpdateSectionRequest>,
) -> AppResult<Json<User>> {
    body.validate()?;

    let user = store::users::update_section(&state.db, user_id, &body.section).await?;
    Ok(Json(user))
}
