/// Validate that a required secret is present
pub fn validate_required(
    name: &str,
    value: &Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if value.is_none() {
        return Err(format!("{name} must be set").into());
    }
    Ok(())
}

/// Validate the retry policy
///
/// `MAX_RETRIES` counts total attempts, so zero would never call the provider.
pub fn validate_retries(max_retries: u32) -> Result<(), Box<dyn std::error::Error>> {
    if max_retries == 0 {
        return Err("MAX_RETRIES must be at least 1".into());
    }
    Ok(())
}

/// Validate the provider base URL
pub fn validate_base_url(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(format!("PROVIDER_BASE_URL must be an http(s) URL, got '{url}'").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("GEMINI_API_KEY", &Some("k".to_string())).is_ok());

        let err = validate_required("GEMINI_API_KEY", &None).unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_API_KEY must be set");
    }

    #[test]
    fn test_validate_retries() {
        assert!(validate_retries(1).is_ok());
        assert!(validate_retries(10).is_ok());
        assert!(validate_retries(0).is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://generativelanguage.googleapis.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:4000").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("").is_err());
    }
}
