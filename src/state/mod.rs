use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::transcode::{Codec, EncoderCommand};
use crate::core::tts::{
    GeminiTTS, GeminiTTSConfig, ReqwestTransport, SpeechSynthesizer, TransportError,
};

/// Application state that can be shared across handlers
///
/// Built once at startup; nothing in it changes while requests are served.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Provider client used by the speech endpoint
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    /// Build state with the Gemini client talking over `reqwest`.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, TransportError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        let synthesizer = Arc::new(GeminiTTS::new(
            GeminiTTSConfig::from_server_config(&config),
            transport,
        ));
        Ok(Self::with_synthesizer(config, synthesizer))
    }

    /// Build state around an already constructed synthesizer.
    pub fn with_synthesizer(
        config: ServerConfig,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            synthesizer,
        })
    }

    /// Encoder invocation for `codec` using the configured ffmpeg binary.
    pub fn encoder_command(&self, codec: Codec) -> EncoderCommand {
        EncoderCommand::ffmpeg(&self.config.ffmpeg_path, codec)
    }
}
