//! Outcome, outcome group, and outcome link endpoint handlers.
//!
//! Every group operation exists under three URL families (global,
//! account, course); thin wrappers resolve the route into a [`Context`]
//! and delegate to shared logic.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{bad_request, not_found, paginated_json, PageQuery};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;
use crate::{Context, OutcomeRating};

type SharedState = Arc<RwLock<MockState>>;

/// Partial-update fields accepted by the outcome endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct OutcomePatch {
    pub title: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub mastery_points: Option<f64>,
}

/// Partial-update fields accepted by the group endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GroupPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub vendor_guid: Option<String>,
    pub parent_outcome_group_id: Option<u64>,
}

/// Body for creating a subgroup.
#[derive(Debug, Deserialize)]
pub struct GroupBody {
    pub title: String,
    pub description: Option<String>,
    pub vendor_guid: Option<String>,
}

/// Body for creating a new outcome inside a group.
#[derive(Debug, Deserialize)]
pub struct NewOutcomeBody {
    pub title: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub mastery_points: Option<f64>,
    #[serde(default)]
    pub ratings: Vec<OutcomeRating>,
}

/// Body for importing a group.
#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub source_outcome_group_id: u64,
}

// =============================================================================
// Outcomes (context-free endpoints)
// =============================================================================

/// GET /api/v1/outcomes/{outcome_id}
pub async fn get_outcome(
    State(state): State<SharedState>,
    Path(outcome_id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.outcomes.get(&outcome_id) {
        Some(outcome) => (StatusCode::OK, Json(outcome.clone())).into_response(),
        None => not_found(),
    }
}

/// PUT /api/v1/outcomes/{outcome_id}
pub async fn update_outcome(
    State(state): State<SharedState>,
    Path(outcome_id): Path<u64>,
    Json(patch): Json<OutcomePatch>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let Some(outcome) = state.outcomes.get_mut(&outcome_id) else {
        return not_found();
    };

    if let Some(title) = patch.title {
        outcome.title = title;
    }
    if let Some(display_name) = patch.display_name {
        outcome.display_name = Some(display_name);
    }
    if let Some(description) = patch.description {
        outcome.description = Some(description);
    }
    if let Some(mastery_points) = patch.mastery_points {
        outcome.mastery_points = Some(mastery_points);
    }

    (StatusCode::OK, Json(outcome.clone())).into_response()
}

// =============================================================================
// Shared group logic
// =============================================================================

async fn root_group(state: SharedState, context: Context) -> Response {
    let state = state.read().await;

    match state.root_group(context) {
        Some(group) => (StatusCode::OK, Json(group.clone())).into_response(),
        None => not_found(),
    }
}

async fn list_groups(state: SharedState, context: Context, query: PageQuery) -> Response {
    let state = state.read().await;

    let groups: Vec<_> = state
        .groups_in_context(context)
        .into_iter()
        .cloned()
        .collect();
    paginated_json(
        groups,
        &query,
        &state.base_url,
        &format!("{}/outcome_groups", context.prefix()),
    )
}

async fn list_links(state: SharedState, context: Context, query: PageQuery) -> Response {
    let state = state.read().await;

    let links: Vec<_> = state
        .links_in_context(context)
        .into_iter()
        .cloned()
        .collect();
    paginated_json(
        links,
        &query,
        &state.base_url,
        &format!("{}/outcome_group_links", context.prefix()),
    )
}

async fn show_group(state: SharedState, context: Context, group_id: u64) -> Response {
    let state = state.read().await;

    match state.group_in_context(context, group_id) {
        Some(group) => (StatusCode::OK, Json(group.clone())).into_response(),
        None => not_found(),
    }
}

async fn update_group(
    state: SharedState,
    context: Context,
    group_id: u64,
    patch: GroupPatch,
) -> Response {
    let mut state = state.write().await;

    let new_parent = patch
        .parent_outcome_group_id
        .and_then(|pid| state.outcome_groups.get(&pid).cloned());

    let Some(group) = state.outcome_groups.get_mut(&group_id) else {
        return not_found();
    };
    if group.context() != context {
        return not_found();
    }
    if let Some(title) = patch.title {
        group.title = title;
    }
    if let Some(description) = patch.description {
        group.description = Some(description);
    }
    if let Some(vendor_guid) = patch.vendor_guid {
        group.vendor_guid = Some(vendor_guid);
    }
    if let Some(parent) = new_parent {
        group.parent_outcome_group = Some(Box::new(parent));
    }

    (StatusCode::OK, Json(group.clone())).into_response()
}

async fn delete_group(state: SharedState, context: Context, group_id: u64) -> Response {
    let mut state = state.write().await;

    if state.group_in_context(context, group_id).is_none() {
        return not_found();
    }
    if state.root_groups.values().any(|&id| id == group_id) {
        return bad_request("Cannot delete the root outcome group");
    }

    state.links.remove(&group_id);
    let Some(group) = state.outcome_groups.remove(&group_id) else {
        return not_found();
    };

    (StatusCode::OK, Json(group)).into_response()
}

async fn list_linked(
    state: SharedState,
    context: Context,
    group_id: u64,
    query: PageQuery,
) -> Response {
    let state = state.read().await;

    if state.group_in_context(context, group_id).is_none() {
        return not_found();
    }

    let links: Vec<_> = state
        .links_for_group(group_id)
        .into_iter()
        .cloned()
        .collect();
    paginated_json(
        links,
        &query,
        &state.base_url,
        &format!("{}/outcome_groups/{}/outcomes", context.prefix(), group_id),
    )
}

async fn link_existing(
    state: SharedState,
    context: Context,
    group_id: u64,
    outcome_id: u64,
) -> Response {
    let mut state = state.write().await;

    let Some(group) = state.group_in_context(context, group_id).cloned() else {
        return not_found();
    };
    let Some(outcome) = state.outcomes.get(&outcome_id).cloned() else {
        return not_found();
    };

    // Re-linking an already linked outcome replaces the existing link
    state.remove_link(group_id, outcome_id);
    let link = Fixtures::link(&group, &outcome);
    state.add_link(link.clone());

    (StatusCode::OK, Json(link)).into_response()
}

async fn unlink_outcome(
    state: SharedState,
    context: Context,
    group_id: u64,
    outcome_id: u64,
) -> Response {
    let mut state = state.write().await;

    if state.group_in_context(context, group_id).is_none() {
        return not_found();
    }

    match state.remove_link(group_id, outcome_id) {
        Some(link) => (StatusCode::OK, Json(link)).into_response(),
        None => not_found(),
    }
}

async fn link_new(
    state: SharedState,
    context: Context,
    group_id: u64,
    body: NewOutcomeBody,
) -> Response {
    let mut state = state.write().await;

    let Some(group) = state.group_in_context(context, group_id).cloned() else {
        return not_found();
    };

    let outcome_id = state.allocate_id();
    let mut outcome = Fixtures::minimal_outcome(outcome_id, &body.title);
    outcome.display_name = body.display_name;
    outcome.description = body.description;
    outcome.mastery_points = body.mastery_points;
    if !body.ratings.is_empty() {
        outcome.extra.insert(
            "ratings".to_string(),
            serde_json::to_value(&body.ratings).unwrap_or_default(),
        );
    }
    state.outcomes.insert(outcome_id, outcome.clone());

    let link = Fixtures::link(&group, &outcome);
    state.add_link(link.clone());

    (StatusCode::OK, Json(link)).into_response()
}

async fn list_subgroups(
    state: SharedState,
    context: Context,
    group_id: u64,
    query: PageQuery,
) -> Response {
    let state = state.read().await;

    if state.group_in_context(context, group_id).is_none() {
        return not_found();
    }

    let groups: Vec<_> = state.subgroups_of(group_id).into_iter().cloned().collect();
    paginated_json(
        groups,
        &query,
        &state.base_url,
        &format!("{}/outcome_groups/{}/subgroups", context.prefix(), group_id),
    )
}

async fn create_subgroup(
    state: SharedState,
    context: Context,
    group_id: u64,
    body: GroupBody,
) -> Response {
    let mut state = state.write().await;

    let Some(parent) = state.group_in_context(context, group_id).cloned() else {
        return not_found();
    };

    let id = state.allocate_id();
    let mut group = Fixtures::subgroup_of(&parent, id, &body.title);
    group.description = body.description;
    group.vendor_guid = body.vendor_guid;
    state.outcome_groups.insert(id, group.clone());

    (StatusCode::OK, Json(group)).into_response()
}

async fn import_group(
    state: SharedState,
    context: Context,
    group_id: u64,
    body: ImportBody,
) -> Response {
    let mut state = state.write().await;

    let Some(target) = state.group_in_context(context, group_id).cloned() else {
        return not_found();
    };
    let Some(source) = state
        .outcome_groups
        .get(&body.source_outcome_group_id)
        .cloned()
    else {
        return not_found();
    };

    let id = state.allocate_id();
    let mut imported = Fixtures::subgroup_of(&target, id, &source.title);
    imported.description = source.description.clone();
    imported.vendor_guid = source.vendor_guid.clone();
    state.outcome_groups.insert(id, imported.clone());

    // The import carries the source group's outcome links along
    let outcomes: Vec<_> = state
        .links_for_group(source.id)
        .into_iter()
        .map(|l| l.outcome.clone())
        .collect();
    for outcome in outcomes {
        state.add_link(Fixtures::link(&imported, &outcome));
    }

    (StatusCode::OK, Json(imported)).into_response()
}

// =============================================================================
// Route wrappers: global
// =============================================================================

pub async fn root_group_global(State(state): State<SharedState>) -> Response {
    root_group(state, Context::Global).await
}

pub async fn list_groups_global(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_groups(state, Context::Global, query).await
}

pub async fn list_links_global(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_links(state, Context::Global, query).await
}

pub async fn show_group_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
) -> Response {
    show_group(state, Context::Global, group_id).await
}

pub async fn update_group_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Json(patch): Json<GroupPatch>,
) -> Response {
    update_group(state, Context::Global, group_id, patch).await
}

pub async fn delete_group_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
) -> Response {
    delete_group(state, Context::Global, group_id).await
}

pub async fn list_linked_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_linked(state, Context::Global, group_id, query).await
}

pub async fn link_existing_global(
    State(state): State<SharedState>,
    Path((group_id, outcome_id)): Path<(u64, u64)>,
) -> Response {
    link_existing(state, Context::Global, group_id, outcome_id).await
}

pub async fn unlink_outcome_global(
    State(state): State<SharedState>,
    Path((group_id, outcome_id)): Path<(u64, u64)>,
) -> Response {
    unlink_outcome(state, Context::Global, group_id, outcome_id).await
}

pub async fn link_new_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Json(body): Json<NewOutcomeBody>,
) -> Response {
    link_new(state, Context::Global, group_id, body).await
}

pub async fn list_subgroups_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_subgroups(state, Context::Global, group_id, query).await
}

pub async fn create_subgroup_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Json(body): Json<GroupBody>,
) -> Response {
    create_subgroup(state, Context::Global, group_id, body).await
}

pub async fn import_group_global(
    State(state): State<SharedState>,
    Path(group_id): Path<u64>,
    Json(body): Json<ImportBody>,
) -> Response {
    import_group(state, Context::Global, group_id, body).await
}

// =============================================================================
// Route wrappers: account
// =============================================================================

pub async fn root_group_account(
    State(state): State<SharedState>,
    Path(account_id): Path<u64>,
) -> Response {
    root_group(state, Context::Account(account_id)).await
}

pub async fn list_groups_account(
    State(state): State<SharedState>,
    Path(account_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_groups(state, Context::Account(account_id), query).await
}

pub async fn list_links_account(
    State(state): State<SharedState>,
    Path(account_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_links(state, Context::Account(account_id), query).await
}

pub async fn show_group_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
) -> Response {
    show_group(state, Context::Account(account_id), group_id).await
}

pub async fn update_group_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Json(patch): Json<GroupPatch>,
) -> Response {
    update_group(state, Context::Account(account_id), group_id, patch).await
}

pub async fn delete_group_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
) -> Response {
    delete_group(state, Context::Account(account_id), group_id).await
}

pub async fn list_linked_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_linked(state, Context::Account(account_id), group_id, query).await
}

pub async fn link_existing_account(
    State(state): State<SharedState>,
    Path((account_id, group_id, outcome_id)): Path<(u64, u64, u64)>,
) -> Response {
    link_existing(state, Context::Account(account_id), group_id, outcome_id).await
}

pub async fn unlink_outcome_account(
    State(state): State<SharedState>,
    Path((account_id, group_id, outcome_id)): Path<(u64, u64, u64)>,
) -> Response {
    unlink_outcome(state, Context::Account(account_id), group_id, outcome_id).await
}

pub async fn link_new_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<NewOutcomeBody>,
) -> Response {
    link_new(state, Context::Account(account_id), group_id, body).await
}

pub async fn list_subgroups_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_subgroups(state, Context::Account(account_id), group_id, query).await
}

pub async fn create_subgroup_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<GroupBody>,
) -> Response {
    create_subgroup(state, Context::Account(account_id), group_id, body).await
}

pub async fn import_group_account(
    State(state): State<SharedState>,
    Path((account_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<ImportBody>,
) -> Response {
    import_group(state, Context::Account(account_id), group_id, body).await
}

// =============================================================================
// Route wrappers: course
// =============================================================================

pub async fn root_group_course(
    State(state): State<SharedState>,
    Path(course_id): Path<u64>,
) -> Response {
    root_group(state, Context::Course(course_id)).await
}

pub async fn list_groups_course(
    State(state): State<SharedState>,
    Path(course_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_groups(state, Context::Course(course_id), query).await
}

pub async fn list_links_course(
    State(state): State<SharedState>,
    Path(course_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_links(state, Context::Course(course_id), query).await
}

pub async fn show_group_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
) -> Response {
    show_group(state, Context::Course(course_id), group_id).await
}

pub async fn update_group_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Json(patch): Json<GroupPatch>,
) -> Response {
    update_group(state, Context::Course(course_id), group_id, patch).await
}

pub async fn delete_group_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
) -> Response {
    delete_group(state, Context::Course(course_id), group_id).await
}

pub async fn list_linked_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_linked(state, Context::Course(course_id), group_id, query).await
}

pub async fn link_existing_course(
    State(state): State<SharedState>,
    Path((course_id, group_id, outcome_id)): Path<(u64, u64, u64)>,
) -> Response {
    link_existing(state, Context::Course(course_id), group_id, outcome_id).await
}

pub async fn unlink_outcome_course(
    State(state): State<SharedState>,
    Path((course_id, group_id, outcome_id)): Path<(u64, u64, u64)>,
) -> Response {
    unlink_outcome(state, Context::Course(course_id), group_id, outcome_id).await
}

pub async fn link_new_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<NewOutcomeBody>,
) -> Response {
    link_new(state, Context::Course(course_id), group_id, body).await
}

pub async fn list_subgroups_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Query(query): Query<PageQuery>,
) -> Response {
    list_subgroups(state, Context::Course(course_id), group_id, query).await
}

pub async fn create_subgroup_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<GroupBody>,
) -> Response {
    create_subgroup(state, Context::Course(course_id), group_id, body).await
}

pub async fn import_group_course(
    State(state): State<SharedState>,
    Path((course_id, group_id)): Path<(u64, u64)>,
    Json(body): Json<ImportBody>,
) -> Response {
    import_group(state, Context::Course(course_id), group_id, body).await
}
