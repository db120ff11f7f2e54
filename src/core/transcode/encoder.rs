/// Compressed output codecs produced by the external encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Opus at 64 kbit/s CBR in an Ogg container
    OggOpus,
    /// MP3 at 128 kbit/s
    Mp3,
}

impl Codec {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::OggOpus => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
        }
    }

    /// ffmpeg arguments reading WAV on stdin and writing the codec on stdout.
    fn ffmpeg_args(&self) -> &'static [&'static str] {
        match self {
            Self::OggOpus => &[
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "wav",
                "-i",
                "pipe:0",
                "-c:a",
                "libopus",
                "-b:a",
                "64k",
                "-vbr",
                "off",
                "-f",
                "ogg",
                "pipe:1",
            ],
            Self::Mp3 => &[
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "wav",
                "-i",
                "pipe:0",
                "-c:a",
                "libmp3lame",
                "-b:a",
                "128k",
                "-f",
                "mp3",
                "pipe:1",
            ],
        }
    }
}

/// Program and arguments of an encoder that reads stdin and writes stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EncoderCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// ffmpeg invocation for `codec`, using the binary at `ffmpeg_path`.
    pub fn ffmpeg(ffmpeg_path: &str, codec: Codec) -> Self {
        Self::new(ffmpeg_path, codec.ffmpeg_args().iter().copied())
    }
}
