//! Course and account endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use super::not_found;
use crate::mock_server::state::MockState;

/// GET /api/v1/courses/{course_id}
pub async fn get_course(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(course_id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.courses.get(&course_id) {
        Some(course) => (StatusCode::OK, Json(course.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/v1/accounts/{account_id}
pub async fn get_account(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(account_id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.accounts.get(&account_id) {
        Some(account) => (StatusCode::OK, Json(account.clone())).into_response(),
        None => not_found(),
    }
}
