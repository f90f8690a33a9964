//! Mock Canvas API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Canvas
//! LMS API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing (update-then-show,
//! delete-then-404, link-then-list).
//!
//! # Example
//!
//! ```ignore
//! use canvasapi::mock_server::MockServer;
//! use canvasapi::{CanvasClient, Course, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CanvasClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let course = Course::get(&client, 1).await.unwrap();
//!     assert_eq!(course.name.as_deref(), Some("Introductory Biology"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
