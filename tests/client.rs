//! Tests for the low-level client: authentication and error mapping.
//!
//! Uses wiremock to pin down the exact requests the client sends and how
//! it surfaces Canvas error responses.

use canvasapi::{CanvasClient, CanvasError, Course, Get};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn course_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Introductory Biology",
        "course_code": "BIO-101",
        "workflow_state": "available"
    })
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("test-token", &mock_server.uri()).unwrap();
    let course = Course::get(&client, 1).await.expect("get should succeed");

    assert_eq!(course.id, 1);
    assert_eq!(course.course_code.as_deref(), Some("BIO-101"));
}

#[tokio::test]
async fn test_canvas_error_body_message_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"message": "The specified resource does not exist."}]
        })))
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Course::get(&client, 404).await.unwrap_err();

    match err {
        CanvasError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "The specified resource does not exist.");
            assert_eq!(status_code, Some(404));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_is_not_found_helper() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"message": "The specified resource does not exist."}]
        })))
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Course::get(&client, 404).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_bare_message_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid access token."
        })))
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("bad-token", &mock_server.uri()).unwrap();
    let err = Course::get(&client, 1).await.unwrap_err();

    match err {
        CanvasError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "Invalid access token.");
            assert_eq!(status_code, Some(401));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Course::get(&client, 1).await.unwrap_err();

    match err {
        CanvasError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "upstream exploded");
            assert_eq!(status_code, Some(500));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = CanvasClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Course::get(&client, 1).await.unwrap_err();

    match err {
        CanvasError::RateLimited { retry_after_secs } => {
            assert_eq!(retry_after_secs, Some(30));
        }
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}
