//! Assignment and assignment group models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::CanvasClient;
use crate::error::{CanvasError, Result};
use crate::traits::Get;

/// A Canvas assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// The API-assigned assignment id.
    pub id: u64,

    /// Owning course. Canvas includes it in every assignment payload;
    /// the assignment's own endpoints are addressed through it.
    pub course_id: u64,

    /// Assignment name.
    #[serde(default)]
    pub name: Option<String>,

    /// Assignment description (HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// Due date.
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,

    /// Maximum points for this assignment.
    #[serde(default)]
    pub points_possible: Option<f64>,

    /// Position within the assignment group.
    #[serde(default)]
    pub position: Option<u32>,

    /// Assignment group this assignment belongs to.
    #[serde(default)]
    pub assignment_group_id: Option<u64>,

    /// Whether the assignment is visible to students.
    #[serde(default)]
    pub published: Option<bool>,

    /// Link to the assignment in the Canvas UI.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "assignment {}", self.id),
        }
    }
}

/// Parameters for editing an assignment.
///
/// Only set fields are sent; the server leaves the rest untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentEditParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_group_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl Assignment {
    fn path(&self) -> String {
        format!("courses/{}/assignments/{}", self.course_id, self.id)
    }

    /// Edit this assignment and return the updated version.
    ///
    /// The request body nests the fields under `assignment`, matching the
    /// Canvas update endpoint.
    #[tracing::instrument(skip(client, params))]
    pub async fn edit(
        &self,
        client: &CanvasClient,
        params: AssignmentEditParams,
    ) -> Result<Assignment> {
        #[derive(Serialize)]
        struct EditBody<'a> {
            assignment: &'a AssignmentEditParams,
        }

        let response = client
            .put(&self.path(), &EditBody { assignment: &params })
            .await?;
        let assignment: Assignment = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(assignment)
    }

    /// Delete this assignment.
    ///
    /// Canvas echoes the deleted assignment back, so the removed entity is
    /// returned for inspection.
    #[tracing::instrument(skip(client))]
    pub async fn delete(&self, client: &CanvasClient) -> Result<Assignment> {
        let response = client.delete(&self.path()).await?;
        let assignment: Assignment = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(assignment)
    }
}

#[async_trait]
impl Get for Assignment {
    type Id = (u64, u64); // (course_id, assignment_id)

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: Self::Id) -> Result<Self> {
        let (course_id, assignment_id) = id;
        let path = format!("courses/{course_id}/assignments/{assignment_id}");
        let response = client.get(&path).await?;
        let assignment: Assignment = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(assignment)
    }
}

/// A group of assignments within a course, with an optional grade weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentGroup {
    /// The API-assigned group id.
    pub id: u64,

    /// Group display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Position within the course.
    #[serde(default)]
    pub position: Option<u32>,

    /// Weight of this group in the final grade, as a percentage.
    #[serde(default)]
    pub group_weight: Option<f64>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for AssignmentGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "assignment group {}", self.id),
        }
    }
}

#[async_trait]
impl Get for AssignmentGroup {
    type Id = (u64, u64); // (course_id, group_id)

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: Self::Id) -> Result<Self> {
        let (course_id, group_id) = id;
        let path = format!("courses/{course_id}/assignment_groups/{group_id}");
        let response = client.get(&path).await?;
        let group: AssignmentGroup = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let assignment: Assignment = serde_json::from_value(serde_json::json!({
            "id": 5,
            "course_id": 1,
            "name": "Essay 1",
        }))
        .unwrap();
        assert_eq!(assignment.to_string(), "Essay 1 (5)");

        let minimal: Assignment =
            serde_json::from_value(serde_json::json!({"id": 6, "course_id": 1})).unwrap();
        assert_eq!(minimal.to_string(), "assignment 6");
    }

    #[test]
    fn test_missing_course_id_is_a_hydration_error() {
        let result: core::result::Result<Assignment, _> =
            serde_json::from_value(serde_json::json!({"id": 5, "name": "Orphan"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_edit_params_skip_unset_fields() {
        let params = AssignmentEditParams {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"name": "New Name"}));
    }
}
