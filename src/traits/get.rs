//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::CanvasClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (typically the API-assigned numeric id; entities
/// addressed through a parent use a compound id).
///
/// # Example
///
/// ```ignore
/// use canvasapi::{CanvasClient, Course, Get};
///
/// let client = CanvasClient::new("token", "https://canvas.example.edu")?;
/// let course = Course::get(&client, 1).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g. `u64`, or `(course_id, id)` for
    /// entities nested under a course).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &CanvasClient, id: Self::Id) -> Result<Self>;
}
