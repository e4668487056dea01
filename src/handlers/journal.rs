use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::common::{ListParams, PageInfo, Paginated};
use crate::models::journal::{
    CreateJournalEntryRequest, EmotionSummary, JournalEntry, JournalEntryDetail,
    JournalEntryWithEmotion, SummaryParams, UpdateNoteRequest,
};
use crate::store;
use crate::store::query::Page;
use crate::AppState;

const DEFAULT_SUMMARY_DAYS: i64 = 30;

pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateJournalEntryRequest>,
) -> AppResult<(StatusCode, Json<JournalEntryDetail>)> {
    body.validate()?;

    let entry = store::journal::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<JournalEntryWithEmotion>>> {
    let page = Page::new(params.limit, params.offset);
    let (entries, total) = store::journal::list_by_user(&state.db, user_id, page).await?;

    Ok(Json(Paginated {
        data: entries,
        pagination: PageInfo::offset(total, page.limit, page.offset),
    }))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> AppResult<Json<JournalEntryDetail>> {
    let entry = store::journal::get(&state.db, entry_id).await?;
    Ok(Json(entry))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
    Json(body): Json<UpdateNoteRequest>,
) -> AppResult<Json<JournalEntry>> {
    body.validate()?;

    let entry = store::journal::update_note(&state.db, entry_id, body).await?;
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::journal::delete(&state.db, entry_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn emotional_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<SummaryParams>,
) -> AppResult<Json<Vec<EmotionSummary>>> {
    let days = params.days.unwrap_or(DEFAULT_SUMMARY_DAYS).max(1);
    let summary = store::journal::emotional_summary(&state.db, user_id, days).await?;
    Ok(Json(summary))
}
