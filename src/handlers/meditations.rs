use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::meditation::{
    CreateMeditationRequest, MeditationDetail, MeditationWithActivity, UpdateMeditationRequest,
};
use crate::store;
use crate::AppState;

pub async fn create_meditation(
    State(state): State<AppState>,
    Json(body): Json<CreateMeditationRequest>,
) -> AppResult<(StatusCode, Json<MeditationWithActivity>)> {
    body.validate()?;

    let meditation = store::meditations::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(meditation)))
}

pub async fn get_meditation(
    State(state): State<AppState>,
    Path(meditation_id): Path<i64>,
) -> AppResult<Json<MeditationDetail>> {
    let meditation = store::meditations::get(&state.db, meditation_id).await?;
    Ok(Json(meditation))
}

pub async fn get_meditation_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> AppResult<Json<MeditationWithActivity>> {
    let meditation = store::meditations::by_activity(&state.db, activity_id).await?;
    Ok(Json(meditation))
}

pub async fn update_meditation(
    State(state): State<AppState>,
    Path(meditation_id): Path<i64>,
    Json(body): Json<UpdateMeditationRequest>,
) -> AppResult<Json<MeditationWithActivity>> {
    body.validate()?;

    let meditation = store::meditations::update(&state.db, meditation_id, body).await?;
    Ok(Json(meditation))
}

pub async fn complete_meditation(
    State(state): State<AppState>,
    Path(meditation_id): Path<i64>,
) -> AppResult<Json<MeditationWithActivity>> {
    let meditation = store::meditations::complete(&state.db, meditation_id).await?;
    Ok(Json(meditation))
}

pub async fn delete_meditation(
    State(state): State<AppState>,
    Path(meditation_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::meditations::delete(&state.db, meditation_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list_completed_meditations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MeditationWithActivity>>> {
    let meditations = store::meditations::completed(&state.db).await?;
    Ok(Json(meditations))
}
