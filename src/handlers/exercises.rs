use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::exercise::{
    CreateExerciseRequest, ExerciseWithActivity, Shift, ShiftStats, UpdateExerciseRequest,
};
use crate::store;
use crate::AppState;

pub async fn create_exercise(
    State(state): State<AppState>,
    Json(body): Json<CreateExerciseRequest>,
) -> AppResult<(StatusCode, Json<ExerciseWithActivity>)> {
    body.validate()?;

    let exercise = store::exercises::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn list_exercises_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> AppResult<Json<Vec<ExerciseWithActivity>>> {
    let exercises = store::exercises::by_activity(&state.db, activity_id).await?;
    Ok(Json(exercises))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<i64>,
    Json(body): Json<UpdateExerciseRequest>,
) -> AppResult<Json<ExerciseWithActivity>> {
    body.validate()?;

    let exercise = store::exercises::update(&state.db, exercise_id, body).await?;
    Ok(Json(exercise))
}

pub async fn complete_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<i64>,
) -> AppResult<Json<ExerciseWithActivity>> {
    let exercise = store::exercises::complete(&state.db, exercise_id).await?;
    Ok(Json(exercise))
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::exercises::delete(&state.db, exercise_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list_exercises_by_shift(
    State(state): State<AppState>,
    Path(shift): Path<Shift>,
) -> AppResult<Json<Vec<ExerciseWithActivity>>> {
    let exercises = store::exercises::by_shift(&state.db, shift).await?;
    Ok(Json(exercises))
}

pub async fn exercise_shift_stats(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ShiftStats>>> {
    let stats = store::exercises::shift_stats(&state.db).await?;
    Ok(Json(stats))
}
