mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use meeting_backend::domain::models::booking::{Booking, BookingStatus};
use meeting_backend::domain::ports::BookingStore;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn join(
    app: &TestApp,
    organization_id: &str,
    booking_id: &str,
    payload: Value,
) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/bookings/{}/join", organization_id, booking_id))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn fetch_booking(app: &TestApp, organization_id: &str, booking_id: &str) -> Booking {
    app.state
        .booking_store
        .find_by_id(organization_id, booking_id)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_host_joins_long_before_start() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() + Duration::hours(3),
            30,
            BookingStatus::Scheduled,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "host@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["role"], "host");
    assert_eq!(body["room_id"], format!("meeting-{}", booking.id));
    assert!(body["token"].as_str().unwrap().len() > 0);
    assert!(body["expires_at"].as_str().is_some());

    // Joining a Scheduled booking never starts it.
    let after = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(after.status, BookingStatus::Scheduled);
}

#[tokio::test]
async fn test_customer_too_early_is_a_decision_not_an_error() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() + Duration::minutes(20),
            30,
            BookingStatus::Scheduled,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "customer@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "too_early");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_customer_inside_early_join_window() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() + Duration::minutes(10),
            30,
            BookingStatus::Scheduled,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "customer@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["role"], "customer");

    // Customer joins never apply the start transition.
    let after = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(after.status, BookingStatus::Scheduled);
}

#[tokio::test]
async fn test_customer_after_end_is_too_late() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() - Duration::minutes(45),
            30,
            BookingStatus::Completed,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "customer@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "too_late");
}

#[tokio::test]
async fn test_customer_rejoins_running_session_past_end() {
    let app = TestApp::new().await;
    // Running over time: the in-progress status overrides the window check.
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() - Duration::minutes(45),
            30,
            BookingStatus::InProgress,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "customer@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
}

#[tokio::test]
async fn test_host_join_starts_a_waiting_session() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() - Duration::minutes(2),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "host@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["booking"]["status"], "in_progress");

    let after = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(after.status, BookingStatus::InProgress);
    assert!(after.metadata.started_at.is_some());
    assert_eq!(after.metadata.started_by.as_deref(), Some("host@example.com"));
}

#[tokio::test]
async fn test_second_host_join_keeps_the_original_start_stamp() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now(),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    join(&app, "org-1", &booking.id, json!({"identity": "host@example.com"})).await;
    let first = fetch_booking(&app, "org-1", &booking.id).await;
    let stamped_at = first.metadata.started_at.unwrap();

    // A rejoin finds the booking InProgress and leaves the stamp alone.
    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "host@example.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);

    let second = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(second.status, BookingStatus::InProgress);
    assert_eq!(second.metadata.started_at, Some(stamped_at));
}

#[tokio::test]
async fn test_transition_can_be_suppressed() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now(),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) = join(
        &app,
        "org-1",
        &booking.id,
        json!({"identity": "host@example.com", "apply_transition": false}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);

    let after = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(after.status, BookingStatus::Waiting);
    assert!(after.metadata.started_at.is_none());
}

#[tokio::test]
async fn test_admin_member_joins_and_starts_the_session() {
    let app = TestApp::new().await;
    app.seed_member("org-1", "ops@example.com", "admin").await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now() + Duration::minutes(40),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "ops@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
    assert_eq!(body["role"], "admin");

    let after = fetch_booking(&app, "org-1", &booking.id).await;
    assert_eq!(after.status, BookingStatus::InProgress);
    assert_eq!(after.metadata.started_by.as_deref(), Some("ops@example.com"));
}

#[tokio::test]
async fn test_non_admin_member_is_not_authorized() {
    let app = TestApp::new().await;
    app.seed_member("org-1", "viewer@example.com", "viewer").await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now(),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) =
        join(&app, "org-1", &booking.id, json!({"identity": "viewer@example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "not_authorized");
}

#[tokio::test]
async fn test_unknown_booking_is_404() {
    let app = TestApp::new().await;

    let (status, body) =
        join(&app, "org-1", "no-such-booking", json!({"identity": "host@example.com"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_booking_from_another_org_is_404() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-other",
            Utc::now(),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, _) =
        join(&app, "org-1", &booking.id, json!({"identity": "host@example.com"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_identity_is_rejected() {
    let app = TestApp::new().await;
    let booking = app
        .seed_booking(
            "org-1",
            Utc::now(),
            30,
            BookingStatus::Waiting,
            "host@example.com",
            "customer@example.com",
        )
        .await;

    let (status, body) = join(&app, "org-1", &booking.id, json!({"identity": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}
