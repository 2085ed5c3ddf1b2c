//! Integration tests for the user directory HTTP API.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::{json, Value};
use tower::ServiceExt;
use user_directory::{app, build_state, Config, InMemoryUserStore};
use user_directory_common::{ErrorEnvelope, UserRecord};

fn test_config() -> Config {
    Config {
        api: Default::default(),
        store: Default::default(),
    }
}

fn test_app(store: Arc<InMemoryUserStore>) -> Router {
    app(build_state(test_config(), store))
}

fn seeded(documents: Vec<Document>) -> Arc<InMemoryUserStore> {
    Arc::new(InMemoryUserStore::with_documents(documents))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

#[tokio::test]
async fn test_root_greeting() {
    let app = test_app(seeded(vec![]));
    let (status, headers, body) = send(&app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body, json!({ "hello": "world" }));
}

#[tokio::test]
async fn test_list_empty_store() {
    let app = test_app(seeded(vec![]));
    let (status, headers, body) = send(&app, Method::GET, "/bo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_returns_every_record() {
    let oid = ObjectId::new();
    let app = test_app(seeded(vec![
        doc! { "_id": oid, "user_id": "u1", "fullname": "Ada Lovelace", "nickname": "ada" },
        doc! { "user_id": "u2", "fullname": "Grace Hopper" },
    ]));

    let (status, _, body) = send(&app, Method::GET, "/bo").await;
    assert_eq!(status, StatusCode::OK);

    let users: Vec<UserRecord> = serde_json::from_value(body).unwrap();
    assert_eq!(
        users,
        vec![
            UserRecord::new("Ada Lovelace")
                .with_id(oid.to_hex())
                .with_external_user_id("u1")
                .with_nickname("ada"),
            UserRecord::new("Grace Hopper").with_external_user_id("u2"),
        ]
    );
}

#[tokio::test]
async fn test_get_user_exact_body() {
    let app = test_app(seeded(vec![
        doc! { "user_id": "u1", "fullname": "Ada Lovelace" },
    ]));

    let response = app
        .oneshot(Request::builder().uri("/bo/u1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], br#"{"user_id":"u1","fullname":"Ada Lovelace"}"#);
}

#[tokio::test]
async fn test_get_user_options_behaves_like_get() {
    let app = test_app(seeded(vec![
        doc! { "user_id": "u1", "fullname": "Ada Lovelace" },
    ]));

    let (status, _, body) = send(&app, Method::OPTIONS, "/bo/u1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullname"], "Ada Lovelace");
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let app = test_app(seeded(vec![
        doc! { "user_id": "u1", "fullname": "Ada Lovelace" },
    ]));

    let (status, headers, body) = send(&app, Method::GET, "/bo/unknown-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let envelope: ErrorEnvelope = serde_json::from_value(body).unwrap();
    assert_eq!(envelope.status, 404);
    assert!(envelope.message.contains("unknown-id"));
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let app = test_app(seeded(vec![
        doc! { "user_id": "dup", "fullname": "First" },
        doc! { "user_id": "dup", "fullname": "Second" },
    ]));

    let (_, _, first) = send(&app, Method::GET, "/bo/dup").await;
    let (_, _, second) = send(&app, Method::GET, "/bo/dup").await;
    assert_eq!(first, second);
    assert_eq!(first["fullname"], "First");
}

#[tokio::test]
async fn test_unreachable_store_reports_500_and_keeps_serving() {
    let store = seeded(vec![doc! { "user_id": "u1", "fullname": "Ada Lovelace" }]);
    let app = test_app(store.clone());

    store.set_unavailable(true);
    let (status, _, body) = send(&app, Method::GET, "/bo").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "status": 500, "message": "Server selection timeout: No available servers" })
    );

    let (status, _, _) = send(&app, Method::GET, "/bo/u1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    store.set_unavailable(false);
    let (status, _, body) = send(&app, Method::GET, "/bo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_malformed_document_in_lookup_is_500() {
    let app = test_app(seeded(vec![doc! { "user_id": "u1", "fullname": 7 }]));

    let (status, _, body) = send(&app, Method::GET, "/bo/u1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);

    // The list view drops the same document rather than failing
    let (status, _, body) = send(&app, Method::GET, "/bo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_strict_decoding_fails_list() {
    let mut config = test_config();
    config.store.skip_malformed = false;
    let store = seeded(vec![
        doc! { "user_id": "u1", "fullname": 7 },
        doc! { "user_id": "u2", "fullname": "Grace Hopper" },
    ]);
    let router = app(build_state(config, store));

    let (status, _, body) = send(&router, Method::GET, "/bo").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn test_health_tracks_store() {
    let store = seeded(vec![]);
    let app = test_app(store.clone());

    let (status, _, body) = send(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "ok", "store": "memory", "database": "db_intern" })
    );

    store.set_unavailable(true);
    let (status, _, body) = send(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["database"], "db_intern");
}

#[tokio::test]
async fn test_cross_origin_options_request() {
    let app = test_app(seeded(vec![doc! { "user_id": "u1", "fullname": "Ada Lovelace" }]));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/bo")
                .header(header::ORIGIN, "https://dashboard.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let users: Vec<UserRecord> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(users.len(), 1);
}
