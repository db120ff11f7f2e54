//! HTTP request handlers
//!
//! - `speech` - OpenAI-style text-to-speech endpoint and the 404 fallback

pub mod speech;

pub use speech::{not_found, speech_handler};
