//! Canvas LMS API client library.
//!
//! A Rust library for interacting with the Canvas LMS REST API. A
//! low-level [`CanvasClient`] handles authentication and transport; the
//! model types ([`Course`], [`Assignment`], [`Outcome`], [`OutcomeGroup`],
//! …) expose the per-resource operations and hand paginated listings back
//! as lazy [`PageSequence`]s.
//!
//! # Quick Start
//!
//! ```no_run
//! use canvasapi::{AssignmentEditParams, CanvasClient, Course, Get};
//!
//! #[tokio::main]
//! async fn main() -> canvasapi::Result<()> {
//!     let client = CanvasClient::new("your-api-token", "https://canvas.example.edu")?;
//!
//!     // Fetch a course by id
//!     let course = Course::get(&client, 1).await?;
//!     println!("Course: {course}");
//!
//!     // Rename an assignment
//!     let assignment = course.assignment(&client, 5).await?;
//!     let edited = assignment
//!         .edit(
//!             &client,
//!             AssignmentEditParams {
//!                 name: Some("New Name".to_string()),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("Renamed to {:?}", edited.name);
//!
//!     // Walk the course's outcome links lazily, page by page
//!     let mut links = course.outcome_links(&client);
//!     while let Some(page) = links.next_page().await? {
//!         for link in page {
//!             println!("{link}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`CanvasClient`] - authenticated HTTP adapter; one best-effort call
//!   per request, no retries or caching.
//! - [`Get`] - fetch a single entity by id; implemented by every model
//!   that has a show endpoint.
//! - [`PageSequence`] - lazy pagination following the `Link` response
//!   headers Canvas uses for list endpoints.
//! - [`Context`] - selects the global/account/course endpoint family for
//!   outcome groups and links.
//!
//! Mutations are inherent methods on the models because Canvas endpoints
//! differ in what they return: `Assignment::edit` yields the fresh
//! assignment, `OutcomeGroup::update` hydrates in place and reports a
//! boolean, `Assignment::delete` echoes the deleted entity.
//!
//! # Configuration
//!
//! The caller supplies the API token and the base URL of the Canvas
//! instance; the library reads no environment variables or files.

mod client;
mod context;
mod error;
mod models;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::CanvasClient;
pub use context::Context;
pub use error::{CanvasError, Result};
pub use pagination::PageSequence;

// Re-export traits
pub use traits::Get;

// Re-export models
pub use models::{
    // Account types
    Account,
    // Assignment types
    Assignment,
    AssignmentEditParams,
    AssignmentGroup,
    // Course types
    Course,
    // Outcome types
    NewOutcomeParams,
    Outcome,
    OutcomeGroup,
    OutcomeGroupParams,
    OutcomeGroupUpdateParams,
    OutcomeId,
    OutcomeLink,
    OutcomeRating,
    OutcomeUpdateParams,
};
