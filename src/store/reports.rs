use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::report::{
    CreateReportRequest, Report, ReportDetail, ReportFilterParams, ReportWithAdmin,
    RoleReportStats, UpdateAnswerRequest,
};
use crate::store::query::{Bind, ListQuery, Page};

const SELECT_WITH_ADMIN: &str = r#"
    SELECT r.*, a.name AS admin_name, a.role AS admin_role
    FROM reports r
    JOIN administrators a ON r.admin_id = a.id
"#;

pub async fn create(pool: &PgPool, req: &CreateReportRequest) -> AppResult<ReportWithAdmin> {
    let admin_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM administrators WHERE id = $1")
            .bind(req.admin_id)
            .fetch_one(pool)
            .await?;
    if admin_exists == 0 {
        return Err(AppError::not_found("Administrator"));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO reports (admin_id, question, answer, note)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(req.admin_id)
    .bind(&req.question)
    .bind(&req.answer)
    .bind(&req.note)
    .fetch_one(pool)
    .await?;

    get_with_admin(pool, id).await
}

pub async fn list(
    pool: &PgPool,
    params: &ReportFilterParams,
) -> AppResult<(Vec<ReportWithAdmin>, i64)> {
    let page = Page::new(params.limit, params.offset);

    let mut query = ListQuery::new(SELECT_WITH_ADMIN, "SELECT COUNT(*) FROM reports r");
    match params.answered {
        Some(true) => query = query.filter_raw("r.answer IS NOT NULL"),
        Some(false) => query = query.filter_raw("r.answer IS NULL"),
        None => {}
    }
    if let Some(admin_id) = params.admin_id {
        query = query.filter("r.admin_id = $?", Bind::Int(admin_id));
    }
    let query = query.order_by("r.id DESC").paginate(page);

    let reports = query.fetch_all::<ReportWithAdmin>(pool).await?;
    let total = query.fetch_total(pool).await?;
    Ok((reports, total))
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<ReportDetail> {
    sqlx::query_as::<_, ReportDetail>(
        r#"
        SELECT r.*,
               a.name AS admin_name,
               a.email AS admin_email,
               a.role AS admin_role
        FROM reports r
        JOIN administrators a ON r.admin_id = a.id
        WHERE r.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Report"))
}

pub async fn update_answer(
    pool: &PgPool,
    id: i64,
    req: UpdateAnswerRequest,
) -> AppResult<ReportWithAdmin> {
    let current = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Report"))?;

    let answer = req.answer.resolve(current.answer);
    let note = req.note.resolve(current.note);

    sqlx::query("UPDATE reports SET answer = $2, note = $3, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(&answer)
        .bind(&note)
        .execute(pool)
        .await?;

    get_with_admin(pool, id).await
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Report"));
    }
    Ok(())
}

/// Report volume per administrator role, split into answered and pending.
pub async fn stats(pool: &PgPool) -> AppResult<Vec<RoleReportStats>> {
    let stats = sqlx::query_as::<_, RoleReportStats>(
        r#"
        SELECT a.role,
               COUNT(*) AS total,
               COUNT(r.answer) AS answered,
               COUNT(*) FILTER (WHERE r.answer IS NULL) AS pending
        FROM reports r
        JOIN administrators a ON r.admin_id = a.id
        GROUP BY a.role
        ORDER BY total DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

async fn get_with_admin(pool: &PgPool, id: i64) -> AppResult<ReportWithAdmin> {
    let sql = format!("{SELECT_WITH_ADMIN} WHERE r.id = $1");
    sqlx::query_as::<_, ReportWithAdmin>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Report"))
}
