//! Gemini speech generation (`generateContent` with the AUDIO modality).

pub mod config;
pub mod messages;
pub mod provider;

pub use config::{
    DEFAULT_TTS_MODEL, GEMINI_API_URL, GeminiTTSConfig, RetryPolicy, TRANSIENT_FINISH_REASON,
};
pub use provider::GeminiTTS;
