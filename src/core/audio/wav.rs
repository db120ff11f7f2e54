//! Canonical 44-byte RIFF/WAVE framing for 16-bit mono PCM.
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 4 | `RIFF` |
//! | 4  | 4 | data length + 36 |
//! | 8  | 4 | `WAVE` |
//! | 12 | 4 | `fmt ` |
//! | 16 | 4 | 16 (fmt chunk size) |
//! | 20 | 2 | 1 (PCM) |
//! | 22 | 2 | channels |
//! | 24 | 4 | sample rate |
//! | 28 | 4 | byte rate |
//! | 32 | 2 | block align |
//! | 34 | 2 | bits per sample |
//! | 36 | 4 | `data` |
//! | 40 | 4 | data length |

pub const WAV_HEADER_LEN: usize = 44;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Highest sample rate whose byte rate still fits the 32-bit header field.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / BLOCK_ALIGN as u32;

/// Prefix `samples` with a WAV header describing 16-bit mono PCM at `sample_rate`.
///
/// Size fields saturate at `u32::MAX`; callers keep `sample_rate` within
/// [`MAX_SAMPLE_RATE`] and buffers under 4 GiB for an exact header.
pub fn frame_wav(samples: &[u8], sample_rate: u32) -> Vec<u8> {
    let data_len = u32::try_from(samples.len()).unwrap_or(u32::MAX);
    let byte_rate = sample_rate.saturating_mul(u32::from(BLOCK_ALIGN));

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + samples.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&data_len.saturating_add(36).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(samples);
    out
}

/// Fields decoded from a canonical WAV header, used to check framing round-trips.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_len: u32,
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

#[cfg(test)]
impl WavHeader {
    /// Decode the canonical header at the start of `bytes`.
    ///
    /// Returns `None` if the buffer is shorter than 44 bytes or the chunk
    /// identifiers are not where the canonical layout puts them.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < WAV_HEADER_LEN {
            return None;
        }
        if &bytes[0..4] != b"RIFF"
            || &bytes[8..12] != b"WAVE"
            || &bytes[12..16] != b"fmt "
            || &bytes[36..40] != b"data"
        {
            return None;
        }

        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        Some(Self {
            riff_len: u32_at(4),
            format: u16_at(20),
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_len: u32_at(40),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_extreme_rate_does_not_overflow() {
        let wav = frame_wav(&[0, 0], MAX_SAMPLE_RATE);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.byte_rate, MAX_SAMPLE_RATE * 2);

        let wav = frame_wav(&[0, 0], u32::MAX);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.sample_rate, u32::MAX);
        assert_eq!(header.byte_rate, u32::MAX);
    }

    #[test]
    fn test_frame_empty_samples() {
        let wav = frame_wav(&[], 24000);
        assert_eq!(wav.len(), WAV_HEADER_LEN);

        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.data_len, 0);
        assert_eq!(header.riff_len, 36);
    }

    #[test]
    fn test_frame_sizes_track_sample_length() {
        for len in [2usize, 480, 48_000, 100_002] {
            let samples = vec![0x5a; len];
            let wav = frame_wav(&samples, 24000);
            assert_eq!(wav.len(), len + WAV_HEADER_LEN);

            let header = WavHeader::parse(&wav).unwrap();
            assert_eq!(header.data_len as usize, len);
            assert_eq!(header.riff_len as usize, len + 36);
        }
    }

    #[test]
    fn test_header_round_trip() {
        for rate in [8000u32, 16000, 22050, 24000, 44100, 48000] {
            let wav = frame_wav(&[0, 0, 1, 0], rate);
            let header = WavHeader::parse(&wav).unwrap();

            assert_eq!(header.sample_rate, rate);
            assert_eq!(header.channels, 1);
            assert_eq!(header.bits_per_sample, 16);
            assert_eq!(header.format, 1);
            assert_eq!(header.block_align, 2);
            assert_eq!(header.byte_rate, rate * 2);
        }
    }

    #[test]
    fn test_header_bytes_exact() {
        let wav = frame_wav(&[0x01, 0x02], 24000);
        let expected: [u8; 44] = [
            b'R', b'I', b'F', b'F', 38, 0, 0, 0, // riff size = 2 + 36
            b'W', b'A', b'V', b'E', b'f', b'm', b't', b' ', //
            16, 0, 0, 0, // fmt chunk size
            1, 0, // PCM
            1, 0, // mono
            0xc0, 0x5d, 0, 0, // 24000
            0x80, 0xbb, 0, 0, // 48000 byte rate
            2, 0, // block align
            16, 0, // bits per sample
            b'd', b'a', b't', b'a', 2, 0, 0, 0,
        ];
        assert_eq!(&wav[..WAV_HEADER_LEN], &expected);
        assert_eq!(&wav[WAV_HEADER_LEN..], &[0x01, 0x02]);
    }

    #[test]
    fn test_parse_rejects_short_or_foreign_buffers() {
        assert!(WavHeader::parse(&[0u8; 10]).is_none());

        let mut wav = frame_wav(&[0, 0], 16000);
        wav[0] = b'X';
        assert!(WavHeader::parse(&wav).is_none());
    }
}
