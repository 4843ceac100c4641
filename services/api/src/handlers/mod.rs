pub mod catalog;
pub mod health;
pub mod mark;
pub mod recipe;
pub mod response;
pub mod shopping_list;
pub mod short_link;
pub mod subscription;
pub mod user;

use axum::extract::rejection::JsonRejection;
use axum_extra::extract::QueryRejection;
use serde::Deserialize;

use foodgram_domain::pagination::PageRequest;

use crate::error::ApiError;

/// `?page=&limit=` shared by the paginated lists.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page, self.limit)
    }
}

pub(crate) fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError::validation("query", rejection.to_string())
}

/// Malformed or mistyped JSON bodies answer like any other validation error.
pub(crate) fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::validation("body", rejection.body_text())
}

/// `recipes_limit` must be a non-negative integer when present.
pub(crate) fn parse_recipes_limit(raw: Option<&str>) -> Result<Option<u64>, ApiError> {
    raw.map(|v| {
        v.trim().parse::<u64>().map_err(|_| {
            ApiError::validation("recipes_limit", "recipes_limit must be a non-negative integer")
        })
    })
    .transpose()
}

/// `1` and `true` switch a boolean filter on.
pub(crate) fn flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("1" | "true"))
}
