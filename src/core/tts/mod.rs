mod base;
pub mod gemini;
pub mod transport;

pub use base::{SpeechSynthesizer, SynthesisError, SynthesisResult, VOICES, Voice};
pub use gemini::{GeminiTTS, GeminiTTSConfig, RetryPolicy};
pub use transport::{ReqwestTransport, SpeechTransport, TransportError, TransportResponse};
