//! Gemini speech-generation configuration.

use reqwest::Url;
use std::time::Duration;

use crate::config::ServerConfig;

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Finish reason Gemini reports when it gave up on producing audio for
/// reasons unrelated to the input. Worth another attempt.
pub const TRANSIENT_FINISH_REASON: &str = "OTHER";

/// Bounded, fixed-delay retry policy for a single synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

#[derive(Debug, Clone)]
pub struct GeminiTTSConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub retry: RetryPolicy,
}

impl GeminiTTSConfig {
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.provider_base_url.clone(),
            model: config.tts_model.clone(),
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            ),
        }
    }

    /// Full `generateContent` URL including the API key query parameter.
    ///
    /// The model is encoded as a single path segment and the key as a query
    /// value, so neither can alter the rest of the URL.
    pub fn endpoint(&self) -> Result<Url, String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid provider base URL: {e}"))?;
        url.path_segments_mut()
            .map_err(|_| "Provider base URL cannot carry a path".to_string())?
            .pop_if_empty()
            .extend(["v1beta", "models", &format!("{}:generateContent", self.model)]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl Default for GeminiTTSConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: GEMINI_API_URL.to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let config = GeminiTTSConfig {
            api_key: "abc123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-tts:generateContent?key=abc123"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GeminiTTSConfig {
            api_key: "k".to_string(),
            base_url: "http://127.0.0.1:9000/".to_string(),
            model: "m".to_string(),
            retry: RetryPolicy::default(),
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://127.0.0.1:9000/v1beta/models/m:generateContent?key=k"
        );
    }

    #[test]
    fn test_endpoint_encodes_model_and_key() {
        let config = GeminiTTSConfig {
            api_key: "a b&model=x#frag".to_string(),
            base_url: "http://127.0.0.1:9000/proxy/".to_string(),
            model: "evil/../model?x".to_string(),
            retry: RetryPolicy::default(),
        };
        let url = config.endpoint().unwrap();

        assert_eq!(
            url.path(),
            "/proxy/v1beta/models/evil%2F..%2Fmodel%3Fx:generateContent"
        );
        assert_eq!(url.fragment(), None);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("key".to_string(), "a b&model=x#frag".to_string())]
        );
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let config = GeminiTTSConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn test_retry_policy_floor() {
        let policy = RetryPolicy::new(0, Duration::from_millis(5));
        assert_eq!(policy.max_attempts, 1);
    }
}
