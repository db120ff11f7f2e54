pub mod audio;
pub mod transcode;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{RawAudio, frame_wav};
pub use transcode::{Codec, EncoderCommand, TranscodeError, spawn_transcoder};
pub use tts::{GeminiTTS, SpeechSynthesizer, SynthesisError, Voice};
