use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::models::common::{PageInfo, Paginated};
use crate::models::report::{
    CreateReportRequest, ReportDetail, ReportFilterParams, ReportWithAdmin, RoleReportStats,
    UpdateAnswerRequest,
};
use crate::store;
use crate::store::query::Page;
use crate::AppState;

pub async fn create_report(
    State(state): State<AppState>,
    Json(body): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<ReportWithAdmin>)> {
    body.validate()?;

    let report = store::reports::create(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<Json<Paginated<ReportWithAdmin>>> {
    let page = Page::new(params.limit, params.offset);
    let (reports, total) = store::reports::list(&state.db, &params).await?;

    Ok(Json(Paginated {
        data: reports,
        pagination: PageInfo::offset(total, page.limit, page.offset),
    }))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> AppResult<Json<ReportDetail>> {
    let report = store::reports::get(&state.db, report_id).await?;
    Ok(Json(report))
}

pub async fn update_answer(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
    Json(body): Json<UpdateAnswerRequest>,
) -> AppResult<Json<ReportWithAdmin>> {
    body.validate()?;

    let report = store::reports::update_answer(&state.db, report_id, body).await?;
    Ok(Json(report))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    store::reports::delete(&state.db, report_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn report_stats(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoleReportStats>>> {
    let stats = store::reports::stats(&state.db).await?;
    Ok(Json(stats))
}
