//! Handler tests for the events domain
//!
//! These drive the events router end to end against an in-memory store:
//! - Request parsing (JSON and url-encoded bodies, query strings)
//! - Response bodies and status codes
//! - Error messages

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use common::test_app;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const UNKNOWN_ID: &str = "000000000000000000000000";

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn event_body(name: &str) -> Value {
    json!({
        "name": name,
        "tagline": "Build things",
        "schedule": "2024-06-01T10:00:00Z",
        "description": "A day of hacking",
        "moderator": "alice",
        "category": "tech"
    })
}

async fn create(app: &Router, name: &str) -> String {
    let (status, body) = send(app, json_request("POST", "/", event_body(name))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["eventId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_event_returns_201_and_id() {
    let (app, repo) = test_app();

    let (status, body) = send(&app, json_request("POST", "/", event_body("Hack Day"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Event created successfully");
    let id = body["eventId"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_created_event_has_defaults() {
    let (app, _) = test_app();
    // Stored timestamps are truncated to milliseconds
    let started = Utc::now() - Duration::seconds(1);
    let id = create(&app, "Hack Day").await;

    let (status, event) = send(&app, get(&format!("/?id={id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["_id"], id.as_str());
    assert_eq!(event["type"], "event");
    assert_eq!(event["name"], "Hack Day");
    assert_eq!(event["rigor_rank"], 0);
    assert_eq!(event["attendees"], json!([]));
    assert_eq!(event["sub_category"], Value::Null);
    let created_at: DateTime<Utc> = event["createdAt"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= started);
    assert!(event.get("updatedAt").is_none());
}

#[tokio::test]
async fn test_create_event_missing_field_returns_400() {
    let (app, repo) = test_app();
    let mut body = event_body("Hack Day");
    body.as_object_mut().unwrap().remove("category");

    let (status, body) = send(&app, json_request("POST", "/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Missing required fields" }));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_create_event_empty_string_is_missing() {
    let (app, _) = test_app();
    let mut body = event_body("Hack Day");
    body["moderator"] = json!("");

    let (status, body) = send(&app, json_request("POST", "/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn test_create_event_without_body_is_missing_fields() {
    let (app, repo) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Missing required fields" }));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_create_event_empty_json_body_is_missing_fields() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Missing required fields" }));
}

#[tokio::test]
async fn test_create_event_malformed_json_returns_400() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_event_from_form_body() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Meetup&tagline=Talks&schedule=tomorrow&description=Rust&moderator=bob\
             &category=community&rigor_rank=7abc&uid=u1",
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["eventId"].as_str().unwrap();
    let (_, event) = send(&app, get(&format!("/?id={id}"))).await;
    assert_eq!(event["name"], "Meetup");
    assert_eq!(event["schedule"], "tomorrow");
    assert_eq!(event["rigor_rank"], 7);
    assert_eq!(event["uid"], "u1");
}

#[tokio::test]
async fn test_get_unknown_event_returns_404() {
    let (app, _) = test_app();

    let (status, body) = send(&app, get(&format!("/?id={UNKNOWN_ID}"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Event not found" }));
}

#[tokio::test]
async fn test_malformed_id_returns_400_everywhere() {
    let (app, _) = test_app();
    let expected = json!({ "message": "Invalid event ID" });

    let (status, body) = send(&app, get("/?id=not-an-id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let (status, body) = send(&app, json_request("PUT", "/xyz", json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let (status, body) = send(&app, delete("/123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_get_without_mode_returns_400() {
    let (app, _) = test_app();

    for uri in ["/", "/?type=oldest", "/?id="] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body, json!({ "message": "Invalid query parameters" }));
    }
}

#[tokio::test]
async fn test_negative_page_returns_400() {
    let (app, _) = test_app();

    let (status, body) = send(&app, get("/?type=latest&page=-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid query parameters");
}

#[tokio::test]
async fn test_id_takes_precedence_over_latest() {
    let (app, _) = test_app();
    let id = create(&app, "Only").await;

    let (status, event) = send(&app, get(&format!("/?id={id}&type=latest"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["name"], "Only");
    assert!(event.get("events").is_none());
}

fn names(page: &Value) -> Vec<&str> {
    page["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_latest_pages_are_disjoint_and_newest_first() {
    let (app, _) = test_app();
    for i in 0..12 {
        create(&app, &format!("event-{i}")).await;
    }

    let (status, first) = send(&app, get("/?type=latest&page=1&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["page"], 1);
    assert_eq!(first["limit"], 5);
    assert_eq!(first["total"], 12);
    assert_eq!(first["totalPages"], 3);
    assert_eq!(
        names(&first),
        ["event-11", "event-10", "event-9", "event-8", "event-7"]
    );

    let (_, second) = send(&app, get("/?type=latest&page=2&limit=5")).await;
    assert_eq!(
        names(&second),
        ["event-6", "event-5", "event-4", "event-3", "event-2"]
    );

    let (_, third) = send(&app, get("/?type=latest&page=3")).await;
    assert_eq!(names(&third), ["event-1", "event-0"]);

    let (_, past_end) = send(&app, get("/?type=latest&page=4&limit=5")).await;
    assert_eq!(past_end["events"], json!([]));
    assert_eq!(past_end["total"], 12);
}

#[tokio::test]
async fn test_latest_far_past_the_data_is_empty() {
    let (app, _) = test_app();
    create(&app, "Only").await;

    let (status, body) = send(&app, get("/?type=latest&page=3000000000&limit=4000000000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"], json!([]));
    assert_eq!(body["total"], 1);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_latest_uses_defaults_for_unusable_values() {
    let (app, _) = test_app();

    for uri in [
        "/?type=latest",
        "/?type=latest&page=abc&limit=0",
        "/?type=latest&page=0",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "uri: {uri}");
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 5);
        assert_eq!(body["total"], 0);
        assert_eq!(body["totalPages"], 0);
    }
}

#[tokio::test]
async fn test_update_merges_fields_and_stamps_updated_at() {
    let (app, _) = test_app();
    let id = create(&app, "Before").await;
    let (_, before) = send(&app, get(&format!("/?id={id}"))).await;

    // Stored timestamps are truncated to milliseconds
    let started = Utc::now() - Duration::seconds(1);
    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/{id}"), json!({ "name": "After", "venue": "Hall B" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Event updated successfully" }));

    let (_, event) = send(&app, get(&format!("/?id={id}"))).await;
    assert_eq!(event["name"], "After");
    assert_eq!(event["venue"], "Hall B");
    assert_eq!(event["tagline"], "Build things");
    assert_eq!(event["type"], "event");
    assert_eq!(event["createdAt"], before["createdAt"]);

    let updated_at: DateTime<Utc> = event["updatedAt"].as_str().unwrap().parse().unwrap();
    assert!(updated_at >= started);
}

#[tokio::test]
async fn test_update_with_empty_body_only_stamps_updated_at() {
    let (app, _) = test_app();
    let id = create(&app, "Same").await;

    let (status, _) = send(&app, json_request("PUT", &format!("/{id}"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, event) = send(&app, get(&format!("/?id={id}"))).await;
    assert_eq!(event["name"], "Same");
    assert!(event["updatedAt"].is_string());
}

#[tokio::test]
async fn test_update_unknown_event_returns_404() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/{UNKNOWN_ID}"), json!({ "name": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn test_update_with_non_object_body_returns_400() {
    let (app, _) = test_app();
    let id = create(&app, "Event").await;

    let (status, body) = send(&app, json_request("PUT", &format!("/{id}"), json!([1, 2]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_delete_twice_returns_200_then_404() {
    let (app, repo) = test_app();
    let id = create(&app, "Doomed").await;

    let (status, body) = send(&app, delete(&format!("/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Event deleted successfully" }));
    assert_eq!(repo.len(), 0);

    let (status, body) = send(&app, delete(&format!("/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");

    let (status, _) = send(&app, get(&format!("/?id={id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
