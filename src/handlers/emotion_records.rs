use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::common::{ListParams, PageInfo, Paginated};
use crate::models::emotion_record::{
    CreateEmotionRecordRequest, EmotionRecordDetail, EmotionStat, UserEmotionRecord,
};
use crate::store;
use crate::store::query::Page;
use crate::AppState;

pub async fn list_records(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EmotionRecordDetail>>> {
    let records = store::emotion_records::list(&state.db).await?;
    Ok(Json(records))
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(body): Json<CreateEmotionRecordRequest>,
) -> AppResult<(StatusCode, Json<EmotionRecordDetail>)> {
    let record = store::emotion_records::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_records_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<UserEmotionRecord>>> {
    let page = Page::new(params.limit, params.offset);
    let (records, total) = store::emotion_records::list_by_user(&state.db, user_id, page).await?;

    Ok(Json(Paginated {
        data: records,
        pagination: PageInfo::offset(total, page.limit, page.offset),
    }))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::emotion_records::delete(&state.db, record_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn user_record_stats(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<EmotionStat>>> {
    let stats = store::emotion_records::stats_by_user(&state.db, user_id).await?;
    Ok(Json(stats))
}
