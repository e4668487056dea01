use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Postgres};

/// Sanitized limit/offset window for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// Page-number style pagination; returns the window plus the sanitized
    /// page number for the response envelope.
    pub fn from_page(page: Option<i64>, limit: Option<i64>) -> (Self, i64) {
        let page_no = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT);
        (
            Self {
                limit,
                offset: (page_no - 1) * limit,
            },
            page_no,
        )
    }
}

#[derive(Debug, Clone)]
pub enum Bind {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// Composable filtered list query: a base SELECT, a parallel COUNT base, a
/// predicate list and an optional window. Keeps per-handler SQL string
/// assembly out of the boundary layer; the count runs over the same
/// predicates but never the window, so `total` reflects the whole filter.
pub struct ListQuery {
    select_from: String,
    count_from: String,
    predicates: Vec<String>,
    binds: Vec<Bind>,
    order_by: Option<String>,
    page: Option<Page>,
}

impl ListQuery {
    pub fn new(select_from: &str, count_from: &str) -> Self {
        Self {
            select_from: select_from.into(),
            count_from: count_from.into(),
            predicates: Vec::new(),
            binds: Vec::new(),
            order_by: None,
            page: None,
        }
    }

    /// Adds a predicate with one bound value. The expression must contain a
    /// single `$?` marker, replaced with the next placeholder ordinal.
    pub fn filter(mut self, expr: &str, bind: Bind) -> Self {
        let ordinal = self.binds.len() + 1;
        self.predicates.push(expr.replace("$?", &format!("${ordinal}")));
        self.binds.push(bind);
        self
    }

    /// Adds a predicate without bound values (e.g. `answer IS NULL`).
    pub fn filter_raw(mut self, expr: &str) -> Self {
        self.predicates.push(expr.into());
        self
    }

    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    pub fn paginate(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }

    pub fn select_sql(&self) -> String {
        let mut sql = format!("{}{}", self.select_from, self.where_clause());
        if let Some(order) = &self.order_by {
            sql.push_str(&format!(" ORDER BY {order}"));
        }
        if let Some(page) = self.page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit, page.offset));
        }
        sql
    }

    pub fn count_sql(&self) -> String {
        format!("{}{}", self.count_from, self.where_clause())
    }

    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.select_sql();
        let mut query = sqlx::query_as::<_, T>(&sql);
        for bind in &self.binds {
            query = bind_query_as(query, bind);
        }
        query.fetch_all(pool).await
    }

    pub async fn fetch_total(&self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        let sql = self.count_sql();
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for bind in &self.binds {
            query = bind_query_scalar(query, bind);
        }
        query.fetch_one(pool).await
    }
}

fn bind_query_as<'q, T>(
    query: sqlx::query::QueryAs<'q, Postgres, T, PgArguments>,
    bind: &'q Bind,
) -> sqlx::query::QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    match bind {
        Bind::Int(v) => query.bind(*v),
        Bind::Bool(v) => query.bind(*v),
        Bind::Text(v) => query.bind(v.as_str()),
    }
}

fn bind_query_scalar<'q>(
    query: sqlx::query::QueryScalar<'q, Postgres, i64, PgArguments>,
    bind: &'q Bind,
) -> sqlx::query::QueryScalar<'q, Postgres, i64, PgArguments> {
    match bind {
        Bind::Int(v) => query.bind(*v),
        Bind::Bool(v) => query.bind(*v),
        Bind::Text(v) => query.bind(v.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_limit_and_offset() {
        let page = Page::new(Some(10_000), Some(-5));
        assert_eq!(page.limit, Page::MAX_LIMIT);
        assert_eq!(page.offset, 0);

        let page = Page::new(None, None);
        assert_eq!(page.limit, Page::DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn from_page_computes_offset() {
        let (page, page_no) = Page::from_page(Some(3), Some(10));
        assert_eq!(page_no, 3);
        assert_eq!(page.offset, 20);

        let (page, page_no) = Page::from_page(Some(0), None);
        assert_eq!(page_no, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn predicates_get_sequential_placeholders() {
        let query = ListQuery::new("SELECT * FROM reports r", "SELECT COUNT(*) FROM reports r")
            .filter("r.admin_id = $?", Bind::Int(7))
            .filter("r.question ILIKE $?", Bind::Text("%x%".into()))
            .filter_raw("r.answer IS NULL")
            .order_by("r.id DESC")
            .paginate(Page::new(Some(10), Some(20)));

        assert_eq!(
            query.select_sql(),
            "SELECT * FROM reports r WHERE r.admin_id = $1 AND r.question ILIKE $2 \
             AND r.answer IS NULL ORDER BY r.id DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            query.count_sql(),
            "SELECT COUNT(*) FROM reports r WHERE r.admin_id = $1 AND r.question ILIKE $2 \
             AND r.answer IS NULL"
        );
    }

    #[test]
    fn unfiltered_query_has_no_where() {
        let query = ListQuery::new("SELECT * FROM emotions", "SELECT COUNT(*) FROM emotions")
            .order_by("id")
            .paginate(Page::new(None, None));
        assert_eq!(
            query.select_sql(),
            "SELECT * FROM emotions ORDER BY id LIMIT 10 OFFSET 0"
        );
        assert_eq!(query.count_sql(), "SELECT COUNT(*) FROM emotions");
    }
}
