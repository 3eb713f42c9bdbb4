//! Mock Azure speech backend for integration tests
//!
//! Accepts SSML on the synthesis path, records what it received and answers
//! with a tiny RIFF payload or a configured failure

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Bytes returned for every successful synthesis
pub const FAKE_AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// One synthesis request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub ssml: String,
}

impl RecordedRequest {
    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Mock Azure backend with predictable responses
pub struct MockAzure {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockAzureState>,
}

struct MockAzureState {
    request_count: AtomicU32,
    requests: Mutex<Vec<RecordedRequest>>,
    /// Status and body returned instead of audio
    failure: Option<(StatusCode, String)>,
}

impl MockAzure {
    /// Start a mock that synthesizes successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that answers every request with `status`
    pub async fn start_failing(status: u16, message: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some((StatusCode::from_u16(status)?, message.to_owned()))).await
    }

    async fn start_inner(failure: Option<(StatusCode, String)>) -> anyhow::Result<Self> {
        let state = Arc::new(MockAzureState {
            request_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
            failure,
        });

        let app = Router::new()
            .route("/cognitiveservices/v1", routing::post(handle_synthesis))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of synthesis requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Most recent synthesis request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().unwrap().last().cloned()
    }
}

impl Drop for MockAzure {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_synthesis(State(state): State<Arc<MockAzureState>>, headers: HeaderMap, body: String) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.requests.lock().unwrap().push(RecordedRequest { headers, ssml: body });

    if let Some((status, message)) = &state.failure {
        return (*status, message.clone()).into_response();
    }

    ([(axum::http::header::CONTENT_TYPE, "audio/wav")], FAKE_AUDIO).into_response()
}
