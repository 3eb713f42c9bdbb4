use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    provider_ready: bool,
}

/// Health check handler
///
/// Reports healthy even without a provider, since markup previews still work.
pub async fn health_handler(State(server): State<Arc<tts::Server>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "waifu-voice",
        version: env!("CARGO_PKG_VERSION"),
        provider_ready: server.provider_ready(),
    })
}
