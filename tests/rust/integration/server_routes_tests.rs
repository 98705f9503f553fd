use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mango_n1ql::{
    config::ServerConfig,
    n1ql_query_generator::OutputCompat,
    server::{
        build_router,
        models::{NormalizeResponse, StatementResponse, TranslationError},
    },
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, bytes.to_vec())
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        panic!(
            "unexpected body {}: {}",
            String::from_utf8_lossy(bytes),
            e
        )
    })
}

fn app() -> Router {
    build_router(ServerConfig::default())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = decode(&bytes);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mango-n1ql");
}

#[tokio::test]
async fn test_translate_find() {
    let (status, bytes) = post_json(
        app(),
        "/translate/find",
        json!({
            "bucketName": "jobs",
            "selector": {"status": "ready", "retries": {"$lt": 3}},
            "limit": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: StatementResponse = decode(&bytes);
    assert_eq!(
        response.statement,
        "SELECT meta().id as _id, jobs.* FROM jobs WHERE `status` = 'ready' AND `retries` < 3 LIMIT 10"
    );
    assert!(response.elapsed_ms >= 0.0);
}

#[tokio::test]
async fn test_translate_count_and_where() {
    let query = json!({
        "bucketName": "jobs",
        "selector": {"$or": [{"a": 1}, {"b": null}]}
    });

    let (status, bytes) = post_json(app(), "/translate/count", query.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decode::<StatementResponse>(&bytes).statement,
        "SELECT COUNT(`a`) AS docCount FROM jobs WHERE  `a` = 1 OR `b` IS NULL"
    );

    let (status, bytes) = post_json(app(), "/translate/where", query).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decode::<StatementResponse>(&bytes).statement,
        "WHERE  `a` = 1 OR `b` IS NULL"
    );
}

#[tokio::test]
async fn test_translate_index_from_selector() {
    let (status, bytes) = post_json(
        app(),
        "/translate/index",
        json!({
            "bucketName": "jobs",
            "selector": {"owner.name": "x", "jobDate": {"$gt": null}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decode::<StatementResponse>(&bytes).statement,
        "CREATE INDEX idx_owner-name_jobDate ON jobs (`owner`.`name`, `jobDate`)"
    );
}

#[tokio::test]
async fn test_field_scoped_or_has_single_space() {
    let (status, bytes) = post_json(
        app(),
        "/translate/where",
        json!({"bucketName": "jobs", "selector": {"status": {"$or": ["new", "queued"]}}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decode::<StatementResponse>(&bytes).statement,
        "WHERE `status` = 'new' OR `status` = 'queued'"
    );
}

#[tokio::test]
async fn test_normalize() {
    let (status, bytes) = post_json(
        app(),
        "/normalize",
        json!({"selector": {"a": null, "b": {"$in": [1, 2]}}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: NormalizeResponse = decode(&bytes);
    assert_eq!(
        response.selector,
        json!({"$and": [{"a": {"$eq": null}}, {"b": {"$in": [1, 2]}}]})
    );
}

#[tokio::test]
async fn test_unsupported_operator_is_bad_request() {
    let (status, bytes) = post_json(
        app(),
        "/translate/find",
        json!({"bucketName": "jobs", "selector": {"name": {"$regex": "^a"}}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: TranslationError = decode(&bytes);
    assert_eq!(error.error_type, "UnsupportedOperator");
    assert!(error.error.contains("$regex"));
}

#[tokio::test]
async fn test_missing_bucket_is_bad_request() {
    let (status, bytes) = post_json(
        app(),
        "/translate/find",
        json!({"bucketName": "  ", "selector": {"a": 1}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decode::<TranslationError>(&bytes).error_type, "MissingBucketName");
}

#[tokio::test]
async fn test_absent_bucket_is_bad_request() {
    let (status, bytes) = post_json(app(), "/translate/find", json!({"selector": {"a": 1}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decode::<TranslationError>(&bytes).error_type, "MissingBucketName");

    let (status, bytes) = post_json(
        app(),
        "/translate/index",
        json!({"index": {"fields": ["a"]}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decode::<TranslationError>(&bytes).error_type, "MissingBucketName");
}

#[tokio::test]
async fn test_wrongly_typed_body_is_bad_request() {
    let (status, bytes) = post_json(
        app(),
        "/translate/count",
        json!({"bucketName": "jobs", "limit": "ten"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: TranslationError = decode(&bytes);
    assert_eq!(error.error_type, "MalformedRequest");
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/normalize")
        .header("content-type", "application/json")
        .body(Body::from("{\"selector\": "))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(decode::<TranslationError>(&bytes).error_type, "MalformedRequest");
}

#[tokio::test]
async fn test_strict_mode_rejects_gte_null() {
    let config = ServerConfig {
        compat: OutputCompat::Strict,
        ..ServerConfig::default()
    };
    let (status, bytes) = post_json(
        build_router(config),
        "/translate/where",
        json!({"bucketName": "jobs", "selector": {"a": {"$gte": null}}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        decode::<TranslationError>(&bytes).error_type,
        "UnsupportedNullComparison"
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let config = ServerConfig {
        max_body_bytes: 1024,
        ..ServerConfig::default()
    };
    let padding = "x".repeat(4096);
    let (status, bytes) = post_json(
        build_router(config),
        "/translate/find",
        json!({"bucketName": "jobs", "selector": {"a": padding}}),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(decode::<TranslationError>(&bytes).error_type, "PayloadTooLarge");
}
