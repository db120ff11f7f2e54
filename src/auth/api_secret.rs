use subtle::ConstantTimeEq;

/// Byte-for-byte, constant-time comparison of a bearer token with the configured secret.
pub fn api_secret_matches(token: &str, secret: &str) -> bool {
    bool::from(token.as_bytes().ct_eq(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(api_secret_matches("s3cret", "s3cret"));
    }

    #[test]
    fn test_mismatch() {
        assert!(!api_secret_matches("s3cret", "S3cret"));
        assert!(!api_secret_matches("s3cret ", "s3cret"));
        assert!(!api_secret_matches("s3cre", "s3cret"));
        assert!(!api_secret_matches("", "s3cret"));
    }
}
