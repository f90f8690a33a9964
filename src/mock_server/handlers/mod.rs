//! HTTP request handlers for the mock server.

pub mod assignments;
pub mod courses;
pub mod outcomes;

pub use assignments::*;
pub use courses::*;
pub use outcomes::*;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Canvas default page size.
const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination query parameters understood by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A Canvas-style 404 body.
pub(crate) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "errors": [{"message": "The specified resource does not exist."}]
        })),
    )
        .into_response()
}

/// A Canvas-style 400 body with a custom message.
pub(crate) fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "errors": [{"message": message}]
        })),
    )
        .into_response()
}

/// Serve one page of `items` with the `Link` headers Canvas emits.
///
/// `path` is the endpoint path relative to `api/v1/`; it is echoed into
/// the absolute URLs in the header so clients can follow `rel="next"`.
pub(crate) fn paginated_json<T: Serialize>(
    items: Vec<T>,
    query: &PageQuery,
    base_url: &str,
    path: &str,
) -> Response {
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let last_page = (items.len() as u32).div_ceil(per_page).max(1);

    let start = ((page - 1) * per_page) as usize;
    let end = (start + per_page as usize).min(items.len());
    let slice: Vec<&T> = if start < items.len() {
        items[start..end].iter().collect()
    } else {
        vec![]
    };

    let link_for = |p: u32, rel: &str| {
        format!("<{base_url}/api/v1/{path}?page={p}&per_page={per_page}>; rel=\"{rel}\"")
    };
    let mut rels = vec![link_for(page, "current")];
    if page < last_page {
        rels.push(link_for(page + 1, "next"));
    }
    rels.push(link_for(1, "first"));
    rels.push(link_for(last_page, "last"));

    (
        StatusCode::OK,
        [(header::LINK, rels.join(","))],
        Json(slice),
    )
        .into_response()
}
