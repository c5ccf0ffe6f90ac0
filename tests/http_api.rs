//! HTTP contract tests
//!
//! Drives the assembled router request-by-request, covering the dashboard's
//! entire surface: list, create, partial update (status transitions and
//! detail edits), delete, and the error translation on each path.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bagtrack::http_server::HttpServer;
use bagtrack::store::MemoryBagStore;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};
use tower::util::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn test_router() -> Router {
    HttpServer::new(Arc::new(MemoryBagStore::new())).router()
}

async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn timestamp(record: &Value, key: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(record[key].as_str().unwrap()).unwrap()
}

async fn create_bag(router: &Router, tag: &str) -> Value {
    let (status, body) = request(
        router,
        Method::POST,
        "/api/bags",
        Some(json!({
            "tagNumber": tag,
            "passengerName": "J. Doe",
            "flightNumber": "AA100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// =============================================================================
// Lifecycle Scenario
// =============================================================================

/// Create, transition to Loaded, delete, and confirm the listing no
/// longer includes the record.
#[tokio::test]
async fn test_full_bag_lifecycle() {
    let router = test_router();

    let (status, created) = request(
        &router,
        Method::POST,
        "/api/bags",
        Some(json!({
            "tagNumber": "AA123456",
            "passengerName": "J. Doe",
            "flightNumber": "AA100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Checked In");
    assert_eq!(created["createdAt"], created["updatedAt"]);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = request(
        &router,
        Method::PUT,
        &format!("/api/bags/{}", id),
        Some(json!({"status": "Loaded"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Loaded");
    assert!(
        timestamp(&updated, "updatedAt") > timestamp(&created, "updatedAt"),
        "updatedAt must advance on every mutation"
    );

    let (status, ack) = request(
        &router,
        Method::DELETE,
        &format!("/api/bags/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({"ok": true}));

    let (status, listed) = request(&router, Method::GET, "/api/bags", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

// =============================================================================
// Create Path
// =============================================================================

/// Missing required field: 400 with an error message, nothing persisted.
#[tokio::test]
async fn test_create_missing_passenger_name() {
    let router = test_router();

    let (status, body) = request(
        &router,
        Method::POST,
        "/api/bags",
        Some(json!({"tagNumber": "AA123456", "flightNumber": "AA100"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("passengerName"));

    let (_, listed) = request(&router, Method::GET, "/api/bags", None).await;
    assert_eq!(listed, json!([]));
}

/// Duplicate tag: 400 carrying the tag in the message; one record kept.
#[tokio::test]
async fn test_create_duplicate_tag() {
    let router = test_router();
    create_bag(&router, "AA123456").await;

    let (status, body) = request(
        &router,
        Method::POST,
        "/api/bags",
        Some(json!({
            "tagNumber": "AA123456",
            "passengerName": "B. Smith",
            "flightNumber": "AA200"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("AA123456"));

    let (_, listed) = request(&router, Method::GET, "/api/bags", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

/// Optional fields default to empty strings and Checked In.
#[tokio::test]
async fn test_create_fills_defaults() {
    let router = test_router();
    let created = create_bag(&router, "AA123456").await;

    assert_eq!(created["gate"], "");
    assert_eq!(created["belt"], "");
    assert_eq!(created["destination"], "");
    assert_eq!(created["status"], "Checked In");
}

/// A syntactically broken body is a 400 with the same `{error}` shape.
#[tokio::test]
async fn test_create_malformed_json() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bags")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().is_some());
}

// =============================================================================
// Update Path
// =============================================================================

/// Multi-field detail edit leaves omitted fields untouched.
#[tokio::test]
async fn test_update_merges_partial_fields() {
    let router = test_router();
    let created = create_bag(&router, "AA123456").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = request(
        &router,
        Method::PUT,
        &format!("/api/bags/{}", id),
        Some(json!({"gate": "B22", "destination": "SFO"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["gate"], "B22");
    assert_eq!(updated["destination"], "SFO");
    assert_eq!(updated["passengerName"], "J. Doe");
    assert_eq!(updated["tagNumber"], "AA123456");
}

/// Unknown id on update: client error with the message.
#[tokio::test]
async fn test_update_unknown_id() {
    let router = test_router();

    let (status, body) = request(
        &router,
        Method::PUT,
        "/api/bags/00000000-0000-0000-0000-000000000000",
        Some(json!({"status": "Loaded"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

/// A status outside the four enumerated values never reaches the store.
#[tokio::test]
async fn test_update_rejects_unknown_status() {
    let router = test_router();
    let created = create_bag(&router, "AA123456").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = request(
        &router,
        Method::PUT,
        &format!("/api/bags/{}", id),
        Some(json!({"status": "Misplaced"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    let (_, listed) = request(&router, Method::GET, "/api/bags", None).await;
    assert_eq!(listed[0]["status"], "Checked In");
}

/// Changing the tag number after creation is rejected.
#[tokio::test]
async fn test_update_rejects_tag_change() {
    let router = test_router();
    let created = create_bag(&router, "AA123456").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = request(
        &router,
        Method::PUT,
        &format!("/api/bags/{}", id),
        Some(json!({"tagNumber": "XX999999"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("tagNumber"));
}

/// A malformed id is a client error, not a routing miss.
#[tokio::test]
async fn test_update_malformed_id() {
    let router = test_router();

    let (status, body) = request(
        &router,
        Method::PUT,
        "/api/bags/not-a-uuid",
        Some(json!({"status": "Loaded"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));
}

// =============================================================================
// Delete Path
// =============================================================================

/// Delete acknowledges unknown ids exactly like existing ones.
#[tokio::test]
async fn test_delete_unknown_id_acknowledged() {
    let router = test_router();

    let (status, ack) = request(
        &router,
        Method::DELETE,
        "/api/bags/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({"ok": true}));
}

// =============================================================================
// List Path
// =============================================================================

/// The listing is most-recently-touched first and reflects mutations.
#[tokio::test]
async fn test_list_orders_by_recency() {
    let router = test_router();
    let first = create_bag(&router, "AA000001").await;
    create_bag(&router, "AA000002").await;
    let third = create_bag(&router, "AA000003").await;

    let (_, listed) = request(&router, Method::GET, "/api/bags", None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["id"], third["id"]);

    let id = first["id"].as_str().unwrap();
    request(
        &router,
        Method::PUT,
        &format!("/api/bags/{}", id),
        Some(json!({"status": "In Transit"})),
    )
    .await;

    let (_, listed) = request(&router, Method::GET, "/api/bags", None).await;
    assert_eq!(listed[0]["id"], first["id"]);
    assert_eq!(listed[0]["status"], "In Transit");
}

// =============================================================================
// Service Routes
// =============================================================================

#[tokio::test]
async fn test_health_reports_ok() {
    let router = test_router();

    let (status, body) = request(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_root_banner() {
    let router = test_router();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Baggage Tracker API Running");
}
