use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use waifu_config::TtsProviderConfig;

use crate::{error::TtsError, http_client::http_client, types::SpeechResponse};

use super::SpeechProvider;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const SYNTHESIS_PATH: &str = "cognitiveservices/v1";
const DEFAULT_CONTENT_TYPE: &str = "audio/wav";

/// Azure Cognitive Services neural text to speech
pub(crate) struct AzureSpeechProvider {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    output_format: String,
    timeout: Duration,
}

impl AzureSpeechProvider {
    pub fn from_config(config: &TtsProviderConfig) -> crate::error::Result<Self> {
        let timeout = config.timeout().map_err(|e| TtsError::ConfigError(e.to_string()))?;

        Ok(Self {
            client: http_client(),
            endpoint: endpoint(&config.region, config.base_url.as_ref()),
            api_key: config.api_key.clone(),
            output_format: config.output_format.clone(),
            timeout,
        })
    }
}

/// Synthesis URL, either under the override or the regional host
fn endpoint(region: &str, base_url: Option<&Url>) -> String {
    match base_url {
        Some(base) => format!("{}/{SYNTHESIS_PATH}", base.as_str().trim_end_matches('/')),
        None => format!("https://{region}.tts.speech.microsoft.com/{SYNTHESIS_PATH}"),
    }
}

/// Map a non-success provider status to an error
fn status_error(status: StatusCode, message: String) -> TtsError {
    match status {
        StatusCode::UNAUTHORIZED => TtsError::AuthenticationFailed(message),
        StatusCode::REQUEST_TIMEOUT => TtsError::Timeout,
        _ => TtsError::ProviderApiError {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl SpeechProvider for AzureSpeechProvider {
    async fn synthesize(&self, ssml: &str) -> crate::error::Result<SpeechResponse> {
        tracing::debug!(
            "Azure TTS request: format={}, ssml_len={}",
            self.output_format,
            ssml.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key.expose_secret())
            .header(http::header::CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, &self.output_format)
            .body(ssml.to_owned())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Azure TTS request failed: {e}");

                if e.is_timeout() {
                    TtsError::Timeout
                } else {
                    TtsError::ConnectionError(format!("Failed to send request to Azure TTS: {e}"))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());
            let error_text = if error_text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_owned()
            } else {
                error_text
            };

            tracing::error!("Azure TTS API error ({status}): {error_text}");

            return Err(status_error(status, error_text));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read Azure TTS response body: {e}");

            if e.is_timeout() {
                TtsError::Timeout
            } else {
                TtsError::InternalError(None)
            }
        })?;

        tracing::debug!("Azure TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        "azure"
    }

    fn is_ready(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}
