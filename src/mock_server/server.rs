//! Mock Canvas API server.
//!
//! Provides an axum-based HTTP server that simulates the Canvas LMS API.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;
use crate::Context;

/// A mock Canvas API server for testing.
///
/// The server runs in the background and can be used to test the Canvas
/// client against a realistic API implementation, including the `Link`
/// pagination headers real Canvas instances emit.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        // The pagination handlers need the bound address to build the
        // absolute URLs that go into Link headers
        state.base_url = url.clone();

        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `CanvasClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let global_root = Fixtures::outcome_group(1, "ROOT", Context::Global);
        let account_root = Fixtures::outcome_group(10, "ROOT", Context::Account(1));
        let course_root = Fixtures::outcome_group(20, "ROOT", Context::Course(1));

        let course_group = Fixtures::subgroup_of(&course_root, 2, "Course Test Outcome Group");
        let global_group = Fixtures::subgroup_of(&global_root, 4, "Global Test Outcome Group");
        let account_group = Fixtures::subgroup_of(&account_root, 11, "Account Test Outcome Group");

        let outcome_show = Fixtures::minimal_outcome(3, "Outcome Show Example");
        let outcome_think = Fixtures::minimal_outcome(8, "Critical Thinking");
        let outcome_write = Fixtures::minimal_outcome(9, "Written Communication");

        MockState::new()
            .with_account(Fixtures::minimal_account(1, "Example University"))
            .with_course(Fixtures::minimal_course(1, "Introductory Biology"))
            .with_assignment(Fixtures::minimal_assignment(1, 5, "Essay 1"))
            .with_assignment(Fixtures::minimal_assignment(1, 6, "Essay 2"))
            .with_assignment(Fixtures::minimal_assignment(1, 7, "Final Exam"))
            .with_assignment_group(1, Fixtures::assignment_group(5, "Essays", 40.0))
            .with_outcome_group(global_root, true)
            .with_outcome_group(account_root, true)
            .with_outcome_group(course_root, true)
            .with_link(Fixtures::link(&course_group, &outcome_show))
            .with_link(Fixtures::link(&course_group, &outcome_think))
            .with_link(Fixtures::link(&account_group, &outcome_show))
            .with_link(Fixtures::link(&global_group, &outcome_write))
            .with_outcome_group(course_group, false)
            .with_outcome_group(global_group, false)
            .with_outcome_group(account_group, false)
            .with_outcome(outcome_show)
            .with_outcome(outcome_think)
            .with_outcome(outcome_write)
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Course and account routes
            .route("/api/v1/courses/:course_id", get(handlers::get_course))
            .route("/api/v1/accounts/:account_id", get(handlers::get_account))
            // Assignment routes
            .route(
                "/api/v1/courses/:course_id/assignments",
                get(handlers::list_assignments),
            )
            .route(
                "/api/v1/courses/:course_id/assignments/:assignment_id",
                get(handlers::get_assignment)
                    .put(handlers::edit_assignment)
                    .delete(handlers::delete_assignment),
            )
            .route(
                "/api/v1/courses/:course_id/assignment_groups",
                get(handlers::list_assignment_groups),
            )
            .route(
                "/api/v1/courses/:course_id/assignment_groups/:group_id",
                get(handlers::get_assignment_group),
            )
            // Outcome routes
            .route(
                "/api/v1/outcomes/:outcome_id",
                get(handlers::get_outcome).put(handlers::update_outcome),
            )
            // Outcome group routes: global context
            .route(
                "/api/v1/global/root_outcome_group",
                get(handlers::root_group_global),
            )
            .route(
                "/api/v1/global/outcome_groups",
                get(handlers::list_groups_global),
            )
            .route(
                "/api/v1/global/outcome_group_links",
                get(handlers::list_links_global),
            )
            .route(
                "/api/v1/global/outcome_groups/:group_id",
                get(handlers::show_group_global)
                    .put(handlers::update_group_global)
                    .delete(handlers::delete_group_global),
            )
            .route(
                "/api/v1/global/outcome_groups/:group_id/outcomes",
                get(handlers::list_linked_global).post(handlers::link_new_global),
            )
            .route(
                "/api/v1/global/outcome_groups/:group_id/outcomes/:outcome_id",
                put(handlers::link_existing_global).delete(handlers::unlink_outcome_global),
            )
            .route(
                "/api/v1/global/outcome_groups/:group_id/subgroups",
                get(handlers::list_subgroups_global).post(handlers::create_subgroup_global),
            )
            .route(
                "/api/v1/global/outcome_groups/:group_id/import",
                post(handlers::import_group_global),
            )
            // Outcome group routes: account context
            .route(
                "/api/v1/accounts/:account_id/root_outcome_group",
                get(handlers::root_group_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups",
                get(handlers::list_groups_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_group_links",
                get(handlers::list_links_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups/:group_id",
                get(handlers::show_group_account)
                    .put(handlers::update_group_account)
                    .delete(handlers::delete_group_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups/:group_id/outcomes",
                get(handlers::list_linked_account).post(handlers::link_new_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups/:group_id/outcomes/:outcome_id",
                put(handlers::link_existing_account).delete(handlers::unlink_outcome_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups/:group_id/subgroups",
                get(handlers::list_subgroups_account).post(handlers::create_subgroup_account),
            )
            .route(
                "/api/v1/accounts/:account_id/outcome_groups/:group_id/import",
                post(handlers::import_group_account),
            )
            // Outcome group routes: course context
            .route(
                "/api/v1/courses/:course_id/root_outcome_group",
                get(handlers::root_group_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups",
                get(handlers::list_groups_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_group_links",
                get(handlers::list_links_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups/:group_id",
                get(handlers::show_group_course)
                    .put(handlers::update_group_course)
                    .delete(handlers::delete_group_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups/:group_id/outcomes",
                get(handlers::list_linked_course).post(handlers::link_new_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups/:group_id/outcomes/:outcome_id",
                put(handlers::link_existing_course).delete(handlers::unlink_outcome_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups/:group_id/subgroups",
                get(handlers::list_subgroups_course).post(handlers::create_subgroup_course),
            )
            .route(
                "/api/v1/courses/:course_id/outcome_groups/:group_id/import",
                post(handlers::import_group_course),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasClient, Course, Get};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_course_with_canvas_client() {
        let server = MockServer::start().await;
        let client = CanvasClient::new("test-token", server.url()).unwrap();

        let course = Course::get(&client, 1).await.expect("Failed to get course");

        assert_eq!(course.name.as_deref(), Some("Introductory Biology"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = CanvasClient::new("test-token", server.url()).unwrap();

        let result = Course::get(&client, 99).await;

        assert!(result.is_err());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new()
            .with_course(crate::mock_server::Fixtures::minimal_course(7, "Organic Chemistry"));

        let server = MockServer::with_state(state).await;
        let client = CanvasClient::new("test-token", server.url()).unwrap();

        let course = Course::get(&client, 7).await.expect("Failed to get course");

        assert_eq!(course.name.as_deref(), Some("Organic Chemistry"));

        server.shutdown().await;
    }
}
