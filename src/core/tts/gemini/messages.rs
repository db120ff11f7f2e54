//! Wire types for the Gemini `generateContent` speech endpoint and the
//! classification of its responses.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::config::TRANSIENT_FINISH_REASON;
use crate::core::audio::{MAX_SAMPLE_RATE, RawAudio};
use crate::core::tts::base::{SynthesisError, SynthesisResult, Voice};

static RATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rate=(\d+)").expect("rate pattern is valid")
});

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpeechRequest<'a> {
    pub contents: [RequestContent<'a>; 1],
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: [&'static str; 1],
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: &'static str,
}

impl<'a> GenerateSpeechRequest<'a> {
    pub fn new(text: &'a str, voice: Voice) -> Self {
        Self {
            contents: [RequestContent {
                parts: [TextPart { text }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.as_str(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

/// Extract the sample rate from a MIME string such as `audio/L16;codec=pcm;rate=24000`.
///
/// Zero and rates whose WAV byte rate would not fit in 32 bits are rejected.
pub fn parse_sample_rate(mime_type: &str) -> Option<u32> {
    RATE_PATTERN
        .captures(mime_type)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|rate| (1..=MAX_SAMPLE_RATE).contains(rate))
}

/// Render a provider error object as `code: message`, tolerating odd field types.
fn describe_provider_error(error: &serde_json::Value) -> String {
    let field = |name: &str| match error.get(name)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    let message = match error {
        serde_json::Value::String(s) => s.clone(),
        _ => field("message")
            .or_else(|| field("status"))
            .unwrap_or_else(|| "unknown provider error".to_string()),
    };

    match field("code") {
        Some(code) => format!("{code}: {message}"),
        None => message,
    }
}

/// Classify a 2xx response body.
///
/// Order matters: a top-level error wins over any candidates, audio wins over
/// a finish reason on the same candidate.
pub fn interpret_response(body: &[u8]) -> SynthesisResult<RawAudio> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| SynthesisError::ResponseParse(e.to_string()))?;

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        return Err(SynthesisError::ProviderReported(describe_provider_error(error)));
    }

    let response: GenerateContentResponse =
        serde_json::from_value(value).map_err(|_| SynthesisError::UnrecognizedResponse)?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(SynthesisError::UnrecognizedResponse);
    };

    let inline = candidate
        .content
        .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data));

    if let Some(inline) = inline {
        let mime_type = inline.mime_type.unwrap_or_default();
        let sample_rate = parse_sample_rate(&mime_type).ok_or_else(|| {
            SynthesisError::MalformedResponse(format!("no sample rate in mime type '{mime_type}'"))
        })?;
        let samples = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| SynthesisError::MalformedResponse(format!("invalid base64 audio: {e}")))?;
        return Ok(RawAudio::new(samples, sample_rate));
    }

    match candidate.finish_reason {
        Some(reason) if reason == TRANSIENT_FINISH_REASON => {
            Err(SynthesisError::TransientGeneration(reason))
        }
        Some(reason) => Err(SynthesisError::GenerationStopped(reason)),
        None => Err(SynthesisError::UnrecognizedResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audio_body(data: &[u8], mime: &str) -> Vec<u8> {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": mime, "data": BASE64.encode(data) }
                    }]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_request_serialization() {
        let voice = Voice::parse("Puck").unwrap();
        let request = GenerateSpeechRequest::new("Hello there", voice);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Hello there" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Puck" } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_parse_sample_rate() {
        assert_eq!(parse_sample_rate("audio/L16;codec=pcm;rate=24000"), Some(24000));
        assert_eq!(parse_sample_rate("audio/L16;rate=16000"), Some(16000));
        assert_eq!(parse_sample_rate("audio/L16;codec=pcm"), None);
        assert_eq!(parse_sample_rate("audio/L16;rate=0"), None);
        assert_eq!(parse_sample_rate("audio/L16;rate=3000000000"), None);
        assert_eq!(parse_sample_rate("audio/L16;rate=99999999999"), None);
        assert_eq!(
            parse_sample_rate("audio/L16;rate=2147483647"),
            Some(2_147_483_647)
        );
        assert_eq!(parse_sample_rate(""), None);
    }

    #[test]
    fn test_interpret_audio() {
        let pcm = [1u8, 0, 2, 0, 3, 0];
        let audio = interpret_response(&audio_body(&pcm, "audio/L16;codec=pcm;rate=24000")).unwrap();
        assert_eq!(audio.samples, pcm);
        assert_eq!(audio.sample_rate, 24000);
    }

    #[test]
    fn test_interpret_audio_without_rate_is_malformed() {
        let err = interpret_response(&audio_body(&[0, 0], "audio/L16;codec=pcm")).unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedResponse(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_interpret_oversized_rate_is_malformed() {
        let err = interpret_response(&audio_body(&[0, 0], "audio/L16;rate=3000000000")).unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedResponse(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_interpret_bad_base64_is_malformed() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16;rate=24000", "data": "%%%" } }] }
            }]
        });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedResponse(_)));
    }

    #[test]
    fn test_interpret_top_level_error() {
        let body = json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::ProviderReported("400: API key not valid".to_string())
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_interpret_loosely_typed_error_is_final() {
        let body = json!({ "error": { "code": "RESOURCE_EXHAUSTED", "message": "quota" } });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::ProviderReported("RESOURCE_EXHAUSTED: quota".to_string())
        );
        assert!(!err.is_retryable());

        let body = json!({ "error": { "code": 429, "message": "quota" }, "candidates": {} });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err, SynthesisError::ProviderReported("429: quota".to_string()));
        assert!(!err.is_retryable());

        let body = json!({ "error": "backend unavailable" });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::ProviderReported("backend unavailable".to_string())
        );
    }

    #[test]
    fn test_interpret_null_error_is_ignored() {
        let body = json!({ "error": null, "candidates": [{ "finishReason": "OTHER" }] });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err, SynthesisError::TransientGeneration("OTHER".to_string()));
    }

    #[test]
    fn test_interpret_transient_finish_reason() {
        let body = json!({ "candidates": [{ "finishReason": "OTHER" }] });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err, SynthesisError::TransientGeneration("OTHER".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_interpret_other_finish_reason_is_final() {
        let body = json!({ "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }] });
        let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err, SynthesisError::GenerationStopped("SAFETY".to_string()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_interpret_unrecognized_shapes() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "hi" }] } }] }),
            json!({ "candidates": "nope" }),
            json!([1, 2, 3]),
        ] {
            let err = interpret_response(body.to_string().as_bytes()).unwrap_err();
            assert_eq!(err, SynthesisError::UnrecognizedResponse, "body: {body}");
        }
    }

    #[test]
    fn test_interpret_invalid_json() {
        let err = interpret_response(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, SynthesisError::ResponseParse(_)));
        assert!(!err.is_retryable());
    }
}
