use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::common::{PageInfo, PageParams, Paginated};
use crate::models::emotion::{CreateEmotionRequest, Emotion, UpdateEmotionRequest};
use crate::models::phrase::Phrase;
use crate::store;
use crate::store::query::Page;
use crate::AppState;

pub async fn list_emotions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<Emotion>>> {
    let (page, page_no) = Page::from_page(params.page, params.limit);
    let (emotions, total) = store::emotions::list(&state.db, page).await?;

    Ok(Json(Paginated {
        data: emotions,
        pagination: PageInfo::page(total, page.limit, page_no),
    }))
}

pub async fn get_emotion(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
) -> AppResult<Json<Emotion>> {
    let emotion = store::emotions::get(&state.db, emotion_id).await?;
    Ok(Json(emotion))
}

pub async fn create_emotion(
    State(state): State<AppState>,
    Json(body): Json<CreateEmotionRequest>,
) -> AppResult<(StatusCode, Json<Emotion>)> {
    body.validate()?;

    let emotion = store::emotions::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(emotion)))
}

pub async fn update_emotion(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
    Json(body): Json<UpdateEmotionRequest>,
) -> AppResult<Json<Emotion>> {
    body.validate()?;

    let emotion = store::emotions::update(&state.db, emotion_id, body).await?;
    Ok(Json(emotion))
}

pub async fn delete_emotion(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::emotions::delete(&state.db, emotion_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list_emotion_phrases(
    State(state): State<AppState>,
    Path(emotion_id): Path<i64>,
) -> AppResult<Json<Vec<Phrase>>> {
    let phrases = store::emotions::phrases_for(&state.db, emotion_id).await?;
    Ok(Json(phrases))
}
