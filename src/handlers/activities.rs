use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::activity::{
    Activity, ActivityDetail, ActivitySummary, CreateActivityRequest, UpdateActivityRequest,
};
use crate::models::common::SearchParams;
use crate::store;
use crate::AppState;

pub async fn list_activities(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActivitySummary>>> {
    let activities = store::activities::list(&state.db).await?;
    Ok(Json(activities))
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    body.validate()?;

    let activity = store::activities::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> AppResult<Json<ActivityDetail>> {
    let activity = store::activities::get(&state.db, activity_id).await?;
    Ok(Json(activity))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
    Json(body): Json<UpdateActivityRequest>,
) -> AppResult<Json<Activity>> {
    body.validate()?;

    let activity = store::activities::update(&state.db, activity_id, body).await?;
    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::activities::delete(&state.db, activity_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn search_activities(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Activity>>> {
    let activities = store::activities::search(&state.db, &params.query).await?;
    Ok(Json(activities))
}
