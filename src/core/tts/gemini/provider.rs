use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::config::GeminiTTSConfig;
use super::messages::{GenerateSpeechRequest, interpret_response};
use crate::core::audio::RawAudio;
use crate::core::tts::base::{SpeechSynthesizer, SynthesisError, SynthesisResult, Voice};
use crate::core::tts::transport::SpeechTransport;

/// Longest slice of an error body kept for logs and error messages.
const MAX_ERROR_BODY: usize = 512;

/// Gemini speech generation with bounded, fixed-delay retries.
pub struct GeminiTTS {
    config: GeminiTTSConfig,
    transport: Arc<dyn SpeechTransport>,
}

impl GeminiTTS {
    pub fn new(config: GeminiTTSConfig, transport: Arc<dyn SpeechTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GeminiTTSConfig {
        &self.config
    }

    /// One provider round trip, classified into audio or a [`SynthesisError`].
    async fn attempt(&self, text: &str, voice: Voice) -> SynthesisResult<RawAudio> {
        let payload = serde_json::to_value(GenerateSpeechRequest::new(text, voice))
            .map_err(|e| SynthesisError::Transport(format!("Failed to encode request: {e}")))?;

        let endpoint = self.config.endpoint().map_err(SynthesisError::Transport)?;

        let response = self
            .transport
            .post_json(endpoint.as_str(), &payload)
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        if response.status >= 400 {
            let body = String::from_utf8_lossy(&response.body);
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            error!(status = response.status, body = %body, "Gemini TTS request failed");
            return Err(SynthesisError::ProviderHttp {
                status: response.status,
                body,
            });
        }

        interpret_response(&response.body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiTTS {
    async fn synthesize(&self, text: &str, voice: Voice) -> SynthesisResult<RawAudio> {
        let retry = self.config.retry;
        let mut attempt = 1u32;

        loop {
            debug!(attempt, voice = %voice, "Requesting speech from Gemini");

            match self.attempt(text, voice).await {
                Ok(audio) => {
                    info!(
                        attempt,
                        bytes = audio.samples.len(),
                        sample_rate = audio.sample_rate,
                        "Gemini TTS synthesis succeeded"
                    );
                    return Ok(audio);
                }
                Err(e) if e.is_retryable() && attempt < retry.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = retry.max_attempts,
                        delay_ms = retry.delay.as_millis() as u64,
                        error = %e,
                        "Retryable Gemini TTS failure, retrying"
                    );
                    tokio::time::sleep(retry.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Gemini TTS synthesis failed");
                    return Err(e);
                }
            }
        }
    }
}
