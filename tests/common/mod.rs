//! Local HTTP listener recording every POST it receives, in arrival order.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::routing::post;
use axum::Router;
use log_shipper::LogEvent;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl ReceivedRequest {
    /// Decode the body as a batch of events.
    pub fn batch(&self) -> Vec<LogEvent> {
        serde_json::from_str(&self.body).expect("body should be a JSON array of events")
    }
}

#[derive(Clone)]
struct AppState {
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    status: StatusCode,
}

pub struct CaptureServer {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    _runtime: Runtime,
}

impl CaptureServer {
    /// Start a server answering every request with 200.
    pub fn start() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// Start a server on a random port answering every request with `status`.
    pub fn with_status(status: StatusCode) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Failed to build server runtime");

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("Failed to bind capture server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let received = Arc::new(Mutex::new(Vec::new()));
        let state = AppState {
            received: received.clone(),
            status,
        };
        let app = Router::new().route("/", post(capture)).with_state(state);

        runtime.spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{}", addr),
            received,
            _runtime: runtime,
        }
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.received.lock().unwrap().push(ReceivedRequest {
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body,
    });

    let reply = if state.status == StatusCode::OK { "" } else { "ingest rejected" };
    (state.status, reply)
}

/// A URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// A URL that accepts connections and never answers them.
pub fn silent_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    std::thread::spawn(move || {
        // Keep every accepted stream open without reading or replying
        let _held: Vec<_> = listener.incoming().collect();
    });
    format!("http://{}", addr)
}
