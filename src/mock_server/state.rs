//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Canvas API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    Account, Assignment, AssignmentGroup, Context, Course, Outcome, OutcomeGroup, OutcomeLink,
};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Base URL of the running server, filled in at bind time. Needed to
    /// build the absolute URLs that go into `Link` pagination headers.
    pub base_url: String,

    /// Courses indexed by id.
    pub courses: HashMap<u64, Course>,

    /// Accounts indexed by id.
    pub accounts: HashMap<u64, Account>,

    /// Assignments indexed by (course id, assignment id).
    pub assignments: HashMap<(u64, u64), Assignment>,

    /// Assignment groups indexed by (course id, group id).
    pub assignment_groups: HashMap<(u64, u64), AssignmentGroup>,

    /// Outcomes indexed by id.
    pub outcomes: HashMap<u64, Outcome>,

    /// Outcome groups indexed by id. Each group records its own context.
    pub outcome_groups: HashMap<u64, OutcomeGroup>,

    /// Root outcome group ids keyed by context prefix ("global",
    /// "accounts/1", "courses/1").
    pub root_groups: HashMap<String, u64>,

    /// Outcome links indexed by the id of the group side.
    pub links: HashMap<u64, Vec<OutcomeLink>>,

    /// Next id handed out for entities created during a test.
    pub next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Allocate a fresh entity id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a course to the state.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.insert(course.id, course);
        self
    }

    /// Add an account to the state.
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.id, account);
        self
    }

    /// Add an assignment to the state.
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments
            .insert((assignment.course_id, assignment.id), assignment);
        self
    }

    /// Add an assignment group to the state.
    pub fn with_assignment_group(mut self, course_id: u64, group: AssignmentGroup) -> Self {
        self.assignment_groups.insert((course_id, group.id), group);
        self
    }

    /// Add an outcome to the state.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcomes.insert(outcome.id, outcome);
        self
    }

    /// Add an outcome group to the state; marks it as its context's root
    /// when `root` is set.
    pub fn with_outcome_group(mut self, group: OutcomeGroup, root: bool) -> Self {
        if root {
            self.root_groups.insert(group.context().prefix(), group.id);
        }
        self.outcome_groups.insert(group.id, group);
        self
    }

    /// Link an outcome into a group, recording the link.
    pub fn with_link(mut self, link: OutcomeLink) -> Self {
        self.add_link(link);
        self
    }

    /// Record a link (non-builder form, for use during request handling).
    pub fn add_link(&mut self, link: OutcomeLink) {
        self.links.entry(link.outcome_group.id).or_default().push(link);
    }

    /// Remove the link between a group and an outcome, returning it.
    pub fn remove_link(&mut self, group_id: u64, outcome_id: u64) -> Option<OutcomeLink> {
        let links = self.links.get_mut(&group_id)?;
        let idx = links.iter().position(|l| l.outcome.id == outcome_id)?;
        Some(links.remove(idx))
    }

    /// Get an outcome group by id, checked against an expected context.
    pub fn group_in_context(&self, context: Context, id: u64) -> Option<&OutcomeGroup> {
        self.outcome_groups
            .get(&id)
            .filter(|g| g.context() == context)
    }

    /// Get the root outcome group of a context.
    pub fn root_group(&self, context: Context) -> Option<&OutcomeGroup> {
        let id = self.root_groups.get(&context.prefix())?;
        self.outcome_groups.get(id)
    }

    /// All outcome groups in a context, sorted by id for stable listings.
    pub fn groups_in_context(&self, context: Context) -> Vec<&OutcomeGroup> {
        let mut groups: Vec<_> = self
            .outcome_groups
            .values()
            .filter(|g| g.context() == context)
            .collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    /// All outcome links in a context, sorted by outcome id.
    pub fn links_in_context(&self, context: Context) -> Vec<&OutcomeLink> {
        let mut links: Vec<_> = self
            .links
            .values()
            .flatten()
            .filter(|l| l.context() == context)
            .collect();
        links.sort_by_key(|l| l.outcome.id);
        links
    }

    /// Links belonging to one group, in insertion order.
    pub fn links_for_group(&self, group_id: u64) -> Vec<&OutcomeLink> {
        self.links
            .get(&group_id)
            .map(|v| v.iter().collect())
            .unwrap_or_default()
    }

    /// Immediate subgroups of a group, sorted by id.
    pub fn subgroups_of(&self, group_id: u64) -> Vec<&OutcomeGroup> {
        let mut groups: Vec<_> = self
            .outcome_groups
            .values()
            .filter(|g| {
                g.parent_outcome_group
                    .as_ref()
                    .is_some_and(|p| p.id == group_id)
            })
            .collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    /// Assignments of a course, sorted by id.
    pub fn assignments_for_course(&self, course_id: u64) -> Vec<&Assignment> {
        let mut assignments: Vec<_> = self
            .assignments
            .values()
            .filter(|a| a.course_id == course_id)
            .collect();
        assignments.sort_by_key(|a| a.id);
        assignments
    }

    /// Assignment groups of a course, sorted by id.
    pub fn assignment_groups_for_course(&self, course_id: u64) -> Vec<&AssignmentGroup> {
        let mut groups: Vec<_> = self
            .assignment_groups
            .iter()
            .filter(|((cid, _), _)| *cid == course_id)
            .map(|(_, g)| g)
            .collect();
        groups.sort_by_key(|g| g.id);
        groups
    }
}
