//! Course model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::CanvasClient;
use crate::context::Context;
use crate::error::{CanvasError, Result};
use crate::pagination::PageSequence;
use crate::traits::Get;

use super::assignment::{Assignment, AssignmentGroup};
use super::outcome::{OutcomeGroup, OutcomeLink};

/// A Canvas course.
///
/// Courses are the main containers for teaching content. Assignments,
/// assignment groups, and course-scoped outcomes all hang off a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// The API-assigned course id.
    pub id: u64,

    /// Full course name.
    #[serde(default)]
    pub name: Option<String>,

    /// Short course code (e.g. "BIO 101").
    #[serde(default)]
    pub course_code: Option<String>,

    /// Lifecycle state ("unpublished", "available", "completed", "deleted").
    #[serde(default)]
    pub workflow_state: Option<String>,

    /// Owning account.
    #[serde(default)]
    pub account_id: Option<u64>,

    /// Course start date.
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,

    /// Course end date.
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "course {}", self.id),
        }
    }
}

impl Course {
    fn context(&self) -> Context {
        Context::Course(self.id)
    }

    /// Fetch a single assignment in this course.
    pub async fn assignment(&self, client: &CanvasClient, assignment_id: u64) -> Result<Assignment> {
        Assignment::get(client, (self.id, assignment_id)).await
    }

    /// List the assignments in this course.
    pub fn assignments(&self, client: &CanvasClient) -> PageSequence<Assignment> {
        PageSequence::new(client, format!("courses/{}/assignments", self.id))
    }

    /// Fetch a single assignment group in this course.
    pub async fn assignment_group(
        &self,
        client: &CanvasClient,
        group_id: u64,
    ) -> Result<AssignmentGroup> {
        AssignmentGroup::get(client, (self.id, group_id)).await
    }

    /// List the assignment groups in this course.
    pub fn assignment_groups(&self, client: &CanvasClient) -> PageSequence<AssignmentGroup> {
        PageSequence::new(client, format!("courses/{}/assignment_groups", self.id))
    }

    /// Fetch the root outcome group of this course.
    pub async fn root_outcome_group(&self, client: &CanvasClient) -> Result<OutcomeGroup> {
        OutcomeGroup::root(client, self.context()).await
    }

    /// List all outcome groups in this course.
    pub fn outcome_groups(&self, client: &CanvasClient) -> PageSequence<OutcomeGroup> {
        OutcomeGroup::in_context(client, self.context())
    }

    /// List all outcome links in this course, regardless of group.
    pub fn outcome_links(&self, client: &CanvasClient) -> PageSequence<OutcomeLink> {
        OutcomeLink::in_context(client, self.context())
    }
}

#[async_trait]
impl Get for Course {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("courses/{id}")).await?;
        let course: Course = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_name() {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Introductory Biology",
        }))
        .unwrap();
        assert_eq!(course.to_string(), "Introductory Biology (1)");
    }

    #[test]
    fn test_display_minimal() {
        let course: Course = serde_json::from_value(serde_json::json!({"id": 9})).unwrap();
        assert_eq!(course.to_string(), "course 9");
    }

    #[test]
    fn test_unknown_fields_land_in_extra() {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Biology",
            "enrollment_term_id": 3,
            "is_public": true,
        }))
        .unwrap();
        assert_eq!(course.extra.get("enrollment_term_id").unwrap(), 3);
        assert_eq!(course.extra.get("is_public").unwrap(), true);
    }

    #[test]
    fn test_missing_id_is_a_hydration_error() {
        let result: core::result::Result<Course, _> =
            serde_json::from_value(serde_json::json!({"name": "No Id"}));
        assert!(result.is_err());
    }
}
