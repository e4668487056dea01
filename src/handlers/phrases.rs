use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::common::SearchParams;
use crate::models::phrase::{CreatePhraseRequest, PhraseWithEmotion, UpdatePhraseRequest};
use crate::store;
use crate::AppState;

pub async fn list_phrases(State(state): State<AppState>) -> AppResult<Json<Vec<PhraseWithEmotion>>> {
    let phrases = store::phrases::list(&state.db).await?;
    Ok(Json(phrases))
}

pub async fn create_phrase(
    State(state): State<AppState>,
    Json(body): Json<CreatePhraseRequest>,
) -> AppResult<(StatusCode, Json<PhraseWithEmotion>)> {
    body.validate()?;

    let phrase = store::phrases::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(phrase)))
}

pub async fn list_phrases_by_emotion(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
) -> AppResult<Json<Vec<PhraseWithEmotion>>> {
    let phrases = store::phrases::by_emotion(&state.db, emotion_id).await?;
    Ok(Json(phrases))
}

pub async fn random_phrase_by_emotion(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
) -> AppResult<Json<PhraseWithEmotion>> {
    let phrase = store::phrases::random_by_emotion(&state.db, emotion_id).await?;
    Ok(Json(phrase))
}

pub async fn update_phrase(
    State(state): State<AppState>,
    Path(phrase_id): Path<i64>,
    Json(body): Json<UpdatePhraseRequest>,
) -> AppResult<Json<PhraseWithEmotion>> {
    body.validate()?;

    let phrase = store::phrases::update(&state.db, phrase_id, body).await?;
    Ok(Json(phrase))
}

pub async fn delete_phrase(
    State(state): State<AppState>,
    Path(phrase_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::phrases::delete(&state.db, phrase_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn search_phrases(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<PhraseWithEmotion>>> {
    let phrases = store::phrases::search(&state.db, &params.query).await?;
    Ok(Json(phrases))
}
