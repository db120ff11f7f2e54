//! Configuration module for the speech relay
//!
//! All settings are read once at startup from environment variables (with an
//! optional `.env` file) and are immutable afterwards. The resulting
//! [`ServerConfig`] is handed to the application state and from there to the
//! provider client and the request handler.
//!
//! # Modules
//! - `env`: Environment variable loading
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use speech_relay::config::ServerConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

mod env;
mod utils;
mod validation;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Server configuration
///
/// Contains everything needed to run the relay:
/// - Server settings (host, port)
/// - Provider settings (API key, endpoint, model)
/// - Retry policy for provider calls
/// - Bearer secret for inbound requests
/// - Path to the external encoder
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Provider settings
    pub gemini_api_key: String,
    pub provider_base_url: String,
    pub tts_model: String,

    // Retry policy
    pub max_retries: u32,
    pub retry_delay_ms: u64,

    // Authentication
    pub auth_api_secret: String,

    // Encoder
    pub ffmpeg_path: String,
}

impl ServerConfig {
    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
