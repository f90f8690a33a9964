//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    Account, Assignment, AssignmentGroup, Context, Course, Outcome, OutcomeGroup, OutcomeLink,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Course / Account Fixtures
    // =========================================================================

    /// Create a minimal course with required fields only.
    pub fn minimal_course(id: u64, name: &str) -> Course {
        Course {
            id,
            name: Some(name.to_string()),
            course_code: None,
            workflow_state: Some("available".to_string()),
            account_id: Some(1),
            start_at: None,
            end_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create a minimal account.
    pub fn minimal_account(id: u64, name: &str) -> Account {
        Account {
            id,
            name: Some(name.to_string()),
            parent_account_id: None,
            root_account_id: Some(id),
            workflow_state: Some("active".to_string()),
            extra: serde_json::Map::new(),
        }
    }

    // =========================================================================
    // Assignment Fixtures
    // =========================================================================

    /// Create a minimal assignment.
    pub fn minimal_assignment(course_id: u64, id: u64, name: &str) -> Assignment {
        Assignment {
            id,
            course_id,
            name: Some(name.to_string()),
            description: None,
            due_at: None,
            points_possible: Some(10.0),
            position: None,
            assignment_group_id: Some(5),
            published: Some(true),
            html_url: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create an assignment group with a grade weight.
    pub fn assignment_group(id: u64, name: &str, weight: f64) -> AssignmentGroup {
        AssignmentGroup {
            id,
            name: Some(name.to_string()),
            position: Some(1),
            group_weight: Some(weight),
            extra: serde_json::Map::new(),
        }
    }

    // =========================================================================
    // Outcome Fixtures
    // =========================================================================

    /// Create a minimal outcome.
    pub fn minimal_outcome(id: u64, title: &str) -> Outcome {
        Outcome {
            id,
            title: title.to_string(),
            display_name: None,
            description: None,
            context_type: None,
            context_id: None,
            url: Some(format!("/api/v1/outcomes/{id}")),
            points_possible: Some(5.0),
            mastery_points: Some(3.0),
            can_edit: Some(true),
            extra: serde_json::Map::new(),
        }
    }

    /// Create an outcome group in a context.
    pub fn outcome_group(id: u64, title: &str, context: Context) -> OutcomeGroup {
        let (context_type, context_id) = match context {
            Context::Global => (None, None),
            Context::Account(cid) => (Some("Account".to_string()), Some(cid)),
            Context::Course(cid) => (Some("Course".to_string()), Some(cid)),
        };

        let prefix = context.prefix();
        OutcomeGroup {
            id,
            title: title.to_string(),
            description: None,
            vendor_guid: None,
            context_type,
            context_id,
            url: Some(format!("/api/v1/{prefix}/outcome_groups/{id}")),
            subgroups_url: Some(format!("/api/v1/{prefix}/outcome_groups/{id}/subgroups")),
            outcomes_url: Some(format!("/api/v1/{prefix}/outcome_groups/{id}/outcomes")),
            can_edit: Some(true),
            parent_outcome_group: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create a subgroup of `parent`, inheriting its context.
    pub fn subgroup_of(parent: &OutcomeGroup, id: u64, title: &str) -> OutcomeGroup {
        let mut group = Self::outcome_group(id, title, parent.context());
        group.parent_outcome_group = Some(Box::new(parent.clone()));
        group
    }

    /// Create the link between a group and an outcome.
    ///
    /// The embedded group and outcome are the abbreviated forms Canvas
    /// puts inside link payloads.
    pub fn link(group: &OutcomeGroup, outcome: &Outcome) -> OutcomeLink {
        OutcomeLink {
            url: group
                .outcomes_url
                .as_ref()
                .map(|u| format!("{}/{}", u, outcome.id)),
            context_type: group.context_type.clone(),
            context_id: group.context_id,
            outcome_group: group.clone(),
            outcome: outcome.clone(),
            assessed: Some(false),
            can_unlink: Some(true),
            extra: serde_json::Map::new(),
        }
    }
}
