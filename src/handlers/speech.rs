use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::audio::RawAudio;
use crate::core::transcode::{Codec, spawn_transcoder};
use crate::core::tts::Voice;
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

/// Output container/codec requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Raw 16-bit mono PCM
    Pcm,
    /// PCM in a WAV container
    Wav,
    /// Opus in Ogg, via the encoder
    Ogg,
    /// MP3, via the encoder
    Mp3,
}

impl ResponseFormat {
    /// `wav`, `pcm` and `ogg` are recognised; anything else, including a
    /// missing or non-string value, means MP3.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(serde_json::Value::as_str) {
            Some("wav") => Self::Wav,
            Some("pcm") => Self::Pcm,
            Some("ogg") => Self::Ogg,
            _ => Self::Mp3,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpeechRequestBody {
    input: Option<String>,
    voice: Option<String>,
    response_format: Option<serde_json::Value>,
}

/// A validated `/v1/audio/speech` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub input: String,
    pub voice: Voice,
    pub response_format: ResponseFormat,
}

impl SpeechRequest {
    /// Parse and validate a JSON request body.
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        let body: SpeechRequestBody = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

        let input = body
            .input
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("'input' must be a non-empty string".to_string()))?;

        let voice_name = body
            .voice
            .ok_or_else(|| AppError::BadRequest("'voice' is required".to_string()))?;
        let voice = Voice::parse(&voice_name)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported voice '{voice_name}'")))?;

        Ok(Self {
            input,
            voice,
            response_format: ResponseFormat::from_value(body.response_format.as_ref()),
        })
    }
}

/// Handler for `POST /v1/audio/speech`
///
/// Synthesizes the input text and answers with raw PCM, a WAV file, or a
/// streamed Ogg/Opus or MP3 encoding. Once a streamed response has started,
/// encoder failures can only cut the connection short; they are logged by the
/// transcoder.
pub async fn speech_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    let request = SpeechRequest::parse(&body)?;

    info!(
        voice = %request.voice,
        format = ?request.response_format,
        text_length = request.input.len(),
        "Speech request received"
    );

    let audio = state
        .synthesizer
        .synthesize(&request.input, request.voice)
        .await?;

    match request.response_format {
        ResponseFormat::Pcm => Ok(pcm_response(audio)),
        ResponseFormat::Wav => Ok(wav_response(&audio)),
        ResponseFormat::Ogg => transcoded_response(&state, &audio, Codec::OggOpus),
        ResponseFormat::Mp3 => transcoded_response(&state, &audio, Codec::Mp3),
    }
}

fn pcm_response(audio: RawAudio) -> Response {
    let content_type = audio.content_type();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        audio.samples,
    )
        .into_response()
}

fn wav_response(audio: &RawAudio) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/wav")],
        audio.to_wav(),
    )
        .into_response()
}

fn transcoded_response(state: &AppState, audio: &RawAudio, codec: Codec) -> AppResult<Response> {
    let wav = Bytes::from(audio.to_wav());
    let stream = spawn_transcoder(&state.encoder_command(codec), wav)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, codec.content_type())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalServerError(format!("Failed to build response: {e}")))
}

/// Fallback for every other path and method
pub async fn not_found() -> AppError {
    AppError::NotFound
}
