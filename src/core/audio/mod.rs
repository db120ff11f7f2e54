//! Raw PCM helpers shared by the response paths.

pub mod wav;

pub use wav::{BITS_PER_SAMPLE, CHANNELS, MAX_SAMPLE_RATE, WAV_HEADER_LEN, frame_wav};

/// Linear PCM returned by the synthesis provider.
///
/// Samples are 16-bit signed little-endian mono. The buffer is owned by the
/// request that produced it until it is handed to the framing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAudio {
    pub samples: Vec<u8>,
    pub sample_rate: u32,
}

impl RawAudio {
    pub fn new(samples: Vec<u8>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Content type for passthrough responses, e.g. `audio/l16;rate=24000;channels=1`.
    pub fn content_type(&self) -> String {
        format!("audio/l16;rate={};channels={}", self.sample_rate, CHANNELS)
    }

    /// Wrap the samples in a canonical WAV container.
    pub fn to_wav(&self) -> Vec<u8> {
        frame_wav(&self.samples, self.sample_rate)
    }
}
