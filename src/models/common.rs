use serde::{Deserialize, Serialize};

/// Paginated list envelope: `{ data: [...], pagination: {...} }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PageInfo {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

impl PageInfo {
    pub fn offset(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset: Some(offset),
            page: None,
            total_pages: None,
        }
    }

    pub fn page(total: i64, limit: i64, page: i64) -> Self {
        Self {
            total,
            limit,
            offset: None,
            page: Some(page),
            total_pages: Some((total + limit - 1) / limit),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageInfo::page(15, 10, 1).total_pages, Some(2));
        assert_eq!(PageInfo::page(20, 10, 1).total_pages, Some(2));
        assert_eq!(PageInfo::page(0, 10, 1).total_pages, Some(0));
        assert_eq!(PageInfo::page(1, 10, 1).total_pages, Some(1));
    }

    #[test]
    fn offset_envelope_omits_page_fields() {
        let info = PageInfo::offset(15, 10, 0);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["total"], 15);
        assert_eq!(json["offset"], 0);
        assert!(json.get("page").is_none());
        assert!(json.get("total_pages").is_none());
    }
}
