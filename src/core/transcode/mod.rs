//! WAV to compressed audio through an external encoder process.

pub mod encoder;
pub mod stream;

pub use encoder::{Codec, EncoderCommand};
pub use stream::{EncodedStream, RELAY_CHANNEL_CAPACITY, TranscodeError, spawn_transcoder};
