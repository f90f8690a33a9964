//! Assignment endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{not_found, paginated_json, PageQuery};
use crate::mock_server::state::MockState;

/// Partial-update fields accepted by the assignment edit endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub points_possible: Option<f64>,
    pub position: Option<u32>,
    pub assignment_group_id: Option<u64>,
    pub published: Option<bool>,
}

/// Edit request body; Canvas nests the fields under `assignment`.
#[derive(Debug, Deserialize)]
pub struct EditAssignmentBody {
    pub assignment: AssignmentPatch,
}

/// GET /api/v1/courses/{course_id}/assignments/{assignment_id}
pub async fn get_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((course_id, assignment_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.assignments.get(&(course_id, assignment_id)) {
        Some(assignment) => (StatusCode::OK, Json(assignment.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/v1/courses/{course_id}/assignments
pub async fn list_assignments(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(course_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if !state.courses.contains_key(&course_id) {
        return not_found();
    }

    let assignments: Vec<_> = state
        .assignments_for_course(course_id)
        .into_iter()
        .cloned()
        .collect();
    paginated_json(
        assignments,
        &query,
        &state.base_url,
        &format!("courses/{course_id}/assignments"),
    )
}

/// PUT /api/v1/courses/{course_id}/assignments/{assignment_id}
pub async fn edit_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((course_id, assignment_id)): Path<(u64, u64)>,
    Json(body): Json<EditAssignmentBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let Some(assignment) = state.assignments.get_mut(&(course_id, assignment_id)) else {
        return not_found();
    };

    let patch = body.assignment;
    if let Some(name) = patch.name {
        assignment.name = Some(name);
    }
    if let Some(description) = patch.description {
        assignment.description = Some(description);
    }
    if let Some(due_at) = patch.due_at {
        assignment.due_at = Some(due_at);
    }
    if let Some(points) = patch.points_possible {
        assignment.points_possible = Some(points);
    }
    if let Some(position) = patch.position {
        assignment.position = Some(position);
    }
    if let Some(group_id) = patch.assignment_group_id {
        assignment.assignment_group_id = Some(group_id);
    }
    if let Some(published) = patch.published {
        assignment.published = Some(published);
    }

    (StatusCode::OK, Json(assignment.clone())).into_response()
}

/// DELETE /api/v1/courses/{course_id}/assignments/{assignment_id}
pub async fn delete_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((course_id, assignment_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.assignments.remove(&(course_id, assignment_id)) {
        Some(assignment) => (StatusCode::OK, Json(assignment)).into_response(),
        None => not_found(),
    }
}

/// GET /api/v1/courses/{course_id}/assignment_groups/{group_id}
pub async fn get_assignment_group(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((course_id, group_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.assignment_groups.get(&(course_id, group_id)) {
        Some(group) => (StatusCode::OK, Json(group.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/v1/courses/{course_id}/assignment_groups
pub async fn list_assignment_groups(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(course_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if !state.courses.contains_key(&course_id) {
        return not_found();
    }

    let groups: Vec<_> = state
        .assignment_groups_for_course(course_id)
        .into_iter()
        .cloned()
        .collect();
    paginated_json(
        groups,
        &query,
        &state.base_url,
        &format!("courses/{course_id}/assignment_groups"),
    )
}
