use std::env;

use super::utils::{non_empty_env, parse_env_or};
use super::validation::{validate_base_url, validate_required, validate_retries};
use super::{DEFAULT_FFMPEG_PATH, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS, ServerConfig};
use crate::core::tts::gemini::{DEFAULT_TTS_MODEL, GEMINI_API_URL};

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads configuration from environment variables, with sensible defaults.
    /// Also loads from .env file if present using dotenvy.
    ///
    /// # Returns
    /// * `Result<Self, Box<dyn std::error::Error>>` - The loaded configuration or an error
    ///
    /// # Errors
    /// Returns an error if:
    /// - `GEMINI_API_KEY` or `AUTH_API_SECRET` is missing
    /// - Numeric variables are malformed
    /// - `MAX_RETRIES` is zero
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        // Server configuration
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env_or::<u16>("PORT", 3001)?;

        // Provider configuration
        let gemini_api_key = non_empty_env("GEMINI_API_KEY");
        let provider_base_url =
            non_empty_env("PROVIDER_BASE_URL").unwrap_or_else(|| GEMINI_API_URL.to_string());
        let tts_model = non_empty_env("TTS_MODEL").unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string());

        // Retry policy
        let max_retries = parse_env_or("MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        let retry_delay_ms = parse_env_or("RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?;

        // Authentication configuration
        let auth_api_secret = non_empty_env("AUTH_API_SECRET");

        // Encoder
        let ffmpeg_path =
            non_empty_env("FFMPEG_PATH").unwrap_or_else(|| DEFAULT_FFMPEG_PATH.to_string());

        validate_required("GEMINI_API_KEY", &gemini_api_key)?;
        validate_required("AUTH_API_SECRET", &auth_api_secret)?;
        validate_retries(max_retries)?;
        validate_base_url(&provider_base_url)?;

        Ok(ServerConfig {
            host,
            port,
            gemini_api_key: gemini_api_key.unwrap_or_default(),
            provider_base_url,
            tts_model,
            max_retries,
            retry_delay_ms,
            auth_api_secret: auth_api_secret.unwrap_or_default(),
            ffmpeg_path,
        })
    }
}
