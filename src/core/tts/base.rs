//! # Speech synthesis abstractions
//!
//! The relay talks to exactly one provider, but the handler only sees the
//! [`SpeechSynthesizer`] trait so that the request pipeline can be exercised
//! without network access.

use async_trait::async_trait;

use crate::core::audio::RawAudio;

/// Prebuilt voices accepted by the provider.
pub const VOICES: [&str; 30] = [
    "Zephyr",
    "Puck",
    "Charon",
    "Kore",
    "Fenrir",
    "Leda",
    "Orus",
    "Aoede",
    "Callirrhoe",
    "Autonoe",
    "Enceladus",
    "Iapetus",
    "Umbriel",
    "Algieba",
    "Despina",
    "Erinome",
    "Algenib",
    "Rasalgethi",
    "Laomedeia",
    "Achernar",
    "Alnilam",
    "Schedar",
    "Gacrux",
    "Pulcherrima",
    "Achird",
    "Zubenelgenubi",
    "Vindemiatrix",
    "Sadachbia",
    "Sadaltager",
    "Sulafat",
];

/// A voice name that is known to be in [`VOICES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice(&'static str);

impl Voice {
    /// Look up `name` in the voice set. Matching is exact.
    pub fn parse(name: &str) -> Option<Self> {
        VOICES.iter().copied().find(|v| *v == name).map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Failures of a single synthesis attempt.
///
/// Only [`MalformedResponse`](Self::MalformedResponse),
/// [`TransientGeneration`](Self::TransientGeneration) and
/// [`UnrecognizedResponse`](Self::UnrecognizedResponse) are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("Provider returned HTTP {status}: {body}")]
    ProviderHttp { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider reported an error: {0}")]
    ProviderReported(String),

    #[error("Malformed audio response: {0}")]
    MalformedResponse(String),

    #[error("Transient generation failure (finish reason {0})")]
    TransientGeneration(String),

    #[error("Generation stopped without audio (finish reason {0})")]
    GenerationStopped(String),

    #[error("Unrecognized provider response")]
    UnrecognizedResponse,

    #[error("Failed to parse provider response: {0}")]
    ResponseParse(String),
}

impl SynthesisError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse(_) | Self::TransientGeneration(_) | Self::UnrecognizedResponse
        )
    }
}

pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Turns text into raw 16-bit mono PCM.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice`, retrying internally where the provider
    /// failure allows it. The returned error is the last one observed.
    async fn synthesize(&self, text: &str, voice: Voice) -> SynthesisResult<RawAudio>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_parse_known() {
        let voice = Voice::parse("Kore").unwrap();
        assert_eq!(voice.as_str(), "Kore");
        assert_eq!(voice.to_string(), "Kore");
    }

    #[test]
    fn test_voice_parse_is_exact() {
        assert!(Voice::parse("kore").is_none());
        assert!(Voice::parse(" Kore").is_none());
        assert!(Voice::parse("alloy").is_none());
        assert!(Voice::parse("").is_none());
    }

    #[test]
    fn test_every_listed_voice_parses() {
        for name in VOICES {
            assert_eq!(Voice::parse(name).map(|v| v.as_str()), Some(name));
        }
    }

    #[test]
    fn test_retry_classification() {
        assert!(SynthesisError::MalformedResponse("no rate".into()).is_retryable());
        assert!(SynthesisError::TransientGeneration("OTHER".into()).is_retryable());
        assert!(SynthesisError::UnrecognizedResponse.is_retryable());

        assert!(
            !SynthesisError::ProviderHttp {
                status: 500,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!SynthesisError::Transport("reset".into()).is_retryable());
        assert!(!SynthesisError::ProviderReported("quota".into()).is_retryable());
        assert!(!SynthesisError::GenerationStopped("SAFETY".into()).is_retryable());
        assert!(!SynthesisError::ResponseParse("eof".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = SynthesisError::ProviderHttp {
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned HTTP 429: slow down");
        assert_eq!(
            SynthesisError::UnrecognizedResponse.to_string(),
            "Unrecognized provider response"
        );
    }
}
