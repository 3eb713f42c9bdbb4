#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::{HeaderValue, header};

pub use error::{Result, TtsError};
pub use provider::SpeechProvider;
use request::ExtractPayload;
pub use server::{RequestDefaults, Server, TtsServerBuilder};
pub use types::{RenderedMarkup, SpeechResponse, SynthesisRequest, VoiceCatalog};

const SSML_CONTENT_TYPE: &str = "application/ssml+xml";

/// Build the voice server from configuration
pub fn build_server(config: &waifu_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize voice server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for the voice API
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/synthesize", post(synthesize))
        .route("/markup", post(markup))
        .route("/voices", get(voices))
}

/// Synthesize speech and return it as a downloadable file
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SynthesisRequest>,
) -> Result<Response> {
    let (rendered, speech) = server.synthesize(&request).await?;

    let disposition = HeaderValue::try_from(format!("attachment; filename=\"{}\"", rendered.file_name()))
        .map_err(|e| TtsError::InternalError(Some(format!("invalid file name: {e}"))))?;

    tracing::debug!("speech synthesis complete, {} bytes", speech.audio.len());

    Response::builder()
        .header(header::CONTENT_TYPE, speech.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(speech.audio))
        .map_err(|e| TtsError::InternalError(Some(e.to_string())))
}

/// Return the markup a synthesis request would send, without calling the provider
async fn markup(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SynthesisRequest>,
) -> Result<Response> {
    let rendered = server.render(&request)?;

    Ok(([(header::CONTENT_TYPE, SSML_CONTENT_TYPE)], rendered.document.to_ssml()).into_response())
}

/// List characters, emotions and expressions
async fn voices(State(server): State<Arc<Server>>) -> Json<VoiceCatalog> {
    Json(server.catalog())
}
