//! E2E tests using the mock Canvas server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use canvasapi::mock_server::{Fixtures, MockServer, MockState};
use canvasapi::{
    Account, AssignmentEditParams, CanvasClient, Context, Course, Get, NewOutcomeParams, Outcome,
    OutcomeGroup, OutcomeGroupParams, OutcomeGroupUpdateParams, OutcomeUpdateParams,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Assignment Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_edit_assignment_workflow() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    // Step 1: Get course 1 and assignment 5
    let course = Course::get(&client, 1).await.expect("Failed to get course");
    let assignment = course
        .assignment(&client, 5)
        .await
        .expect("Failed to get assignment");
    assert_eq!(assignment.name.as_deref(), Some("Essay 1"));

    // Step 2: Rename it
    let edited = assignment
        .edit(
            &client,
            AssignmentEditParams {
                name: Some("New Name".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to edit assignment");
    assert_eq!(edited.name.as_deref(), Some("New Name"));

    // Step 3: The change persisted server-side
    let fetched = course.assignment(&client, 5).await.unwrap();
    assert_eq!(fetched.name.as_deref(), Some("New Name"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_assignment_then_404() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let assignment = course.assignment(&client, 6).await.unwrap();

    let deleted = assignment
        .delete(&client)
        .await
        .expect("Failed to delete assignment");
    assert_eq!(deleted.id, 6);

    // A subsequent fetch fails with not-found
    let err = course.assignment(&client, 6).await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got {err:?}");

    server.shutdown().await;
}

#[tokio::test]
async fn test_assignment_group_and_listing() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();

    let group = course
        .assignment_group(&client, 5)
        .await
        .expect("Failed to get assignment group");
    assert_eq!(group.name.as_deref(), Some("Essays"));

    let assignments = course.assignments(&client).collect_all().await.unwrap();
    let ids: Vec<u64> = assignments.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![5, 6, 7]);

    server.shutdown().await;
}

// =============================================================================
// Outcome Group Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_update_root_group_in_every_context() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let account = Account::get(&client, 1).await.unwrap();
    let course = Course::get(&client, 1).await.unwrap();

    let roots = vec![
        OutcomeGroup::root(&client, Context::Global).await.unwrap(),
        account.root_outcome_group(&client).await.unwrap(),
        course.root_outcome_group(&client).await.unwrap(),
    ];

    for mut group in roots {
        assert_eq!(group.title, "ROOT");

        let result = group
            .update(
                &client,
                OutcomeGroupUpdateParams {
                    title: Some("New Outcome Group Title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update group");

        assert!(result);
        assert_eq!(group.title, "New Outcome Group Title");

        // The update persisted server-side
        let shown = group.show(&client).await.unwrap();
        assert_eq!(shown.title, "New Outcome Group Title");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_linked_outcomes_match_their_group() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let groups = course.outcome_groups(&client).collect_all().await.unwrap();
    let group = groups
        .iter()
        .find(|g| g.title == "Course Test Outcome Group")
        .expect("fixture group missing");

    let links = group.linked_outcomes(&client).collect_all().await.unwrap();

    assert_eq!(links.len(), 2);
    // Server order, each link pointing back at its group
    assert_eq!(links[0].outcome.title, "Outcome Show Example");
    assert_eq!(links[1].outcome.title, "Critical Thinking");
    for link in &links {
        assert_eq!(link.group_id(), group.id);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_link_and_unlink_workflow() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let groups = course.outcome_groups(&client).collect_all().await.unwrap();
    let group = groups
        .iter()
        .find(|g| g.title == "Course Test Outcome Group")
        .unwrap();

    // Link outcome 9 by raw id
    let link = group.link_existing(&client, 9).await.unwrap();
    assert_eq!(link.group_id(), group.id);
    assert_eq!(link.outcome_id(), 9);

    let links = group.linked_outcomes(&client).collect_all().await.unwrap();
    assert_eq!(links.len(), 3);

    // And remove it again
    let removed = group.unlink_outcome(&client, 9).await.unwrap();
    assert_eq!(removed.outcome_id(), 9);

    let links = group.linked_outcomes(&client).collect_all().await.unwrap();
    assert_eq!(links.len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_link_existing_object_and_id_are_equivalent() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let account = Account::get(&client, 1).await.unwrap();
    let groups = account.outcome_groups(&client).collect_all().await.unwrap();
    let group = groups
        .iter()
        .find(|g| g.title == "Account Test Outcome Group")
        .unwrap();
    let outcome = Outcome::get(&client, 9).await.unwrap();

    let by_object = group.link_existing(&client, &outcome).await.unwrap();
    let by_id = group.link_existing(&client, 9).await.unwrap();

    assert_eq!(by_object.group_id(), by_id.group_id());
    assert_eq!(by_object.outcome_id(), by_id.outcome_id());

    server.shutdown().await;
}

#[tokio::test]
async fn test_subgroup_create_delete_workflow() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let root = course.root_outcome_group(&client).await.unwrap();

    let subgroup = root
        .create_subgroup(
            &client,
            OutcomeGroupParams {
                title: "Lab Skills".to_string(),
                description: Some("Wet-lab technique outcomes".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create subgroup");

    assert_eq!(subgroup.title, "Lab Skills");
    assert_eq!(
        subgroup.parent_outcome_group.as_ref().map(|p| p.id),
        Some(root.id)
    );

    let subgroups = root.subgroups(&client).collect_all().await.unwrap();
    assert!(subgroups.iter().any(|g| g.id == subgroup.id));

    // Deleting the subgroup works; a later show fails with 404
    let result = subgroup.delete(&client).await.unwrap();
    assert!(result);

    let err = subgroup.show(&client).await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got {err:?}");

    server.shutdown().await;
}

#[tokio::test]
async fn test_root_group_cannot_be_deleted() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let root = course.root_outcome_group(&client).await.unwrap();

    let err = root.delete(&client).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));

    server.shutdown().await;
}

#[tokio::test]
async fn test_link_new_creates_and_links_an_outcome() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let root = course.root_outcome_group(&client).await.unwrap();

    let link = root
        .link_new(
            &client,
            NewOutcomeParams {
                title: "Data Literacy".to_string(),
                mastery_points: Some(3.0),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to link new outcome");

    assert_eq!(link.group_id(), root.id);
    assert_eq!(link.outcome.title, "Data Literacy");

    // The new outcome is a real entity with its own endpoint
    let outcome = link.get_outcome(&client).await.unwrap();
    assert_eq!(outcome.title, "Data Literacy");
    assert_eq!(outcome.mastery_points, Some(3.0));

    server.shutdown().await;
}

#[tokio::test]
async fn test_import_copies_group_and_links() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 1).await.unwrap();
    let root = course.root_outcome_group(&client).await.unwrap();

    // Import the account's test group (id 11, one linked outcome)
    let imported = root.import_outcome_group(&client, 11).await.unwrap();

    assert_eq!(imported.title, "Account Test Outcome Group");
    assert_eq!(imported.context(), Context::Course(1));

    let links = imported.linked_outcomes(&client).collect_all().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].outcome.title, "Outcome Show Example");

    server.shutdown().await;
}

// =============================================================================
// Outcome Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_outcome_update_persists() {
    let server = MockServer::start().await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let mut outcome = Outcome::get(&client, 3).await.unwrap();
    assert_eq!(outcome.title, "Outcome Show Example");

    let result = outcome
        .update(
            &client,
            OutcomeUpdateParams {
                title: Some("new_title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(result);
    assert_eq!(outcome.title, "new_title");

    let shown = outcome.show(&client).await.unwrap();
    assert_eq!(shown.title, "new_title");

    server.shutdown().await;
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[tokio::test]
async fn test_listing_walks_all_pages_in_order() {
    // 25 assignments paginate into 3 pages at the Canvas default of 10
    let mut state = MockState::new().with_course(Fixtures::minimal_course(2, "Large Course"));
    for id in 1..=25 {
        state = state.with_assignment(Fixtures::minimal_assignment(2, id, &format!("A{id}")));
    }

    let server = MockServer::with_state(state).await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();

    let course = Course::get(&client, 2).await.unwrap();

    let mut sequence = course.assignments(&client);
    let mut pages = 0;
    let mut ids = Vec::new();
    while let Some(page) = sequence.next_page().await.unwrap() {
        pages += 1;
        ids.extend(page.into_iter().map(|a| a.id));
    }

    assert_eq!(pages, 3);
    assert_eq!(ids, (1..=25).collect::<Vec<u64>>());

    server.shutdown().await;
}

#[tokio::test]
async fn test_per_page_controls_page_count() {
    let mut state = MockState::new().with_course(Fixtures::minimal_course(2, "Large Course"));
    for id in 1..=9 {
        state = state.with_assignment(Fixtures::minimal_assignment(2, id, &format!("A{id}")));
    }

    let server = MockServer::with_state(state).await;
    let client = CanvasClient::new("test-token", server.url()).unwrap();
    let course = Course::get(&client, 2).await.unwrap();

    let mut sequence = course.assignments(&client).per_page(4);
    let mut sizes = Vec::new();
    while let Some(page) = sequence.next_page().await.unwrap() {
        sizes.push(page.len());
    }

    assert_eq!(sizes, vec![4, 4, 1]);

    server.shutdown().await;
}
