//! Upstream Client Tests
//!
//! Drives `UpstreamClient` against local mock servers to check retry,
//! status propagation and body size limits over real sockets.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tourist_guide::http::{ApiRequest, FetchError, HttpClientConfig, RetryPolicy, UpstreamClient};

// == Helper Functions ==

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String, max_body_bytes: usize) -> UpstreamClient {
    UpstreamClient::new(HttpClientConfig {
        base_url,
        user_agent: "tourist-guide-tests".to_string(),
        connect_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_secs(2),
        write_timeout: Duration::from_secs(2),
        max_body_bytes,
        retry: RetryPolicy::new(2, Duration::from_millis(10), 0.0),
    })
    .unwrap()
}

/// Upstream answering `failure` for the first `failures` calls, then "ok".
fn flaky_upstream(failure: StatusCode, failures: usize, hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/data",
            get(move |State(hits): State<Arc<AtomicUsize>>| async move {
                if hits.fetch_add(1, Ordering::SeqCst) < failures {
                    (failure, "unavailable")
                } else {
                    (StatusCode::OK, "ok")
                }
            }),
        )
        .with_state(hits)
}

// == Retry Tests ==

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_upstream(flaky_upstream(
        StatusCode::SERVICE_UNAVAILABLE,
        2,
        hits.clone(),
    ))
    .await;

    let body = client(url, 1024)
        .fetch_text(&ApiRequest::get("/data"))
        .await
        .unwrap();

    assert_eq!(body, "ok");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_rate_limiting_is_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_upstream(flaky_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        1,
        hits.clone(),
    ))
    .await;

    let body = client(url, 1024)
        .fetch_text(&ApiRequest::get("/data"))
        .await
        .unwrap();

    assert_eq!(body, "ok");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_gives_up_after_two_retries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_upstream(flaky_upstream(
        StatusCode::BAD_GATEWAY,
        usize::MAX,
        hits.clone(),
    ))
    .await;

    let err = client(url, 1024)
        .fetch(&ApiRequest::get("/data"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Status { status, .. } if status == StatusCode::BAD_GATEWAY
    ));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_upstream(flaky_upstream(StatusCode::NOT_FOUND, usize::MAX, hits.clone())).await;

    let err = client(url, 1024)
        .fetch(&ApiRequest::get("/data"))
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_oversized_error_body_is_still_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/data",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::SERVICE_UNAVAILABLE, "e".repeat(4096))
                } else {
                    (StatusCode::OK, "ok".to_string())
                }
            }),
        )
        .with_state(hits.clone());
    let url = spawn_upstream(router).await;

    let body = client(url, 1024)
        .fetch_text(&ApiRequest::get("/data"))
        .await
        .unwrap();

    assert_eq!(body, "ok");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_oversized_error_body_keeps_status() {
    let router = Router::new().route(
        "/missing",
        get(|| async { (StatusCode::NOT_FOUND, "n".repeat(4096)) }),
    );
    let url = spawn_upstream(router).await;

    let err = client(url, 1024)
        .fetch(&ApiRequest::get("/missing"))
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body.len(), 1024);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// == Request Shape Tests ==

#[tokio::test]
async fn test_query_and_form_are_sent() {
    let router = Router::new().route(
        "/echo",
        axum::routing::post(
            |axum::extract::RawQuery(query): axum::extract::RawQuery, body: String| async move {
                format!("{}|{}", query.unwrap_or_default(), body)
            },
        ),
    );
    let url = spawn_upstream(router).await;

    let request = ApiRequest::post_form("/echo", vec![("data".to_string(), "a b".to_string())])
        .query("key", "secret");
    let body = client(url, 1024).fetch_text(&request).await.unwrap();

    assert_eq!(body, "key=secret|data=a+b");
}

// == Body Limit Tests ==

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let router = Router::new().route("/big", get(|| async { "x".repeat(4096) }));
    let url = spawn_upstream(router).await;

    let err = client(url, 1024)
        .fetch(&ApiRequest::get("/big"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::BodyTooLarge { limit: 1024 }));
}

#[tokio::test]
async fn test_body_at_limit_is_accepted() {
    let router = Router::new().route("/exact", get(|| async { "y".repeat(1024) }));
    let url = spawn_upstream(router).await;

    let body = client(url, 1024)
        .fetch(&ApiRequest::get("/exact"))
        .await
        .unwrap();

    assert_eq!(body.len(), 1024);
}
