//! In-process stand-in for the simulation host's control API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

/// Body the simulation host answers `/api/stop` with.
pub const STOP_BODY: &str = r#"{"success":true}"#;

/// A running fake backend.
pub struct Backend {
    /// Base URL, e.g. `http://127.0.0.1:43123`.
    pub base_url: String,
    state: BackendState,
}

impl Backend {
    pub fn status_hits(&self) -> usize {
        self.state.status_hits.load(Ordering::SeqCst)
    }

    pub fn stop_hits(&self) -> usize {
        self.state.stop_hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct BackendState {
    status_hits: Arc<AtomicUsize>,
    stop_hits: Arc<AtomicUsize>,
    /// Number of leading status requests answered with a 500.
    failing_status: usize,
    status_code: StatusCode,
    status_body: String,
}

/// Start a backend whose status route always answers `body` with `200`.
pub async fn spawn_backend(body: &str) -> Backend {
    spawn_backend_with(StatusCode::OK, body, 0).await
}

/// Start a backend whose status route answers `body` with `code`, after
/// failing the first `failing_status` requests with a 500.
pub async fn spawn_backend_with(code: StatusCode, body: &str, failing_status: usize) -> Backend {
    let state = BackendState {
        status_hits: Arc::new(AtomicUsize::new(0)),
        stop_hits: Arc::new(AtomicUsize::new(0)),
        failing_status,
        status_code: code,
        status_body: body.to_string(),
    };

    let app = Router::new()
        .route("/api/stop", get(stop))
        .route("/api/status", get(status))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Backend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Start a backend whose status route accepts the request and never
/// answers in time.
pub async fn spawn_hanging_backend() -> String {
    let app = Router::new().route(
        "/api/status",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            "too late"
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn stop(State(state): State<BackendState>) -> (StatusCode, &'static str) {
    state.stop_hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, STOP_BODY)
}

async fn status(State(state): State<BackendState>) -> (StatusCode, String) {
    let hit = state.status_hits.fetch_add(1, Ordering::SeqCst) + 1;
    if hit <= state.failing_status {
        return (StatusCode::INTERNAL_SERVER_ERROR, "simulation host error".into());
    }
    (state.status_code, state.status_body.clone())
}
