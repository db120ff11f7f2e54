use crate::auth::api_secret_matches;
use crate::errors::auth_error::AuthError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authentication middleware that validates bearer tokens
///
/// The middleware:
/// 1. Extracts the Authorization header and parses the bearer token
/// 2. Compares the token with the configured API secret in constant time
/// 3. Returns 401 if validation fails, or passes the request through if successful
///
/// It runs before the body is read, so an unauthenticated request is rejected
/// regardless of its content.
///
/// # Arguments
/// * `state` - Application state containing the ServerConfig
/// * `request` - The incoming HTTP request
/// * `next` - The next middleware or handler in the chain
///
/// # Returns
/// * `Result<Response, AuthError>` - The response from the next handler or an auth error
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let request_method = request.method().to_string();
    let request_path = request.uri().path().to_string();

    // Extract the Authorization header
    let auth_header = request
        .headers()
        .get("authorization")
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    // Parse the Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    if !api_secret_matches(token, &state.config.auth_api_secret) {
        tracing::warn!(
            method = %request_method,
            path = %request_path,
            "API secret authentication failed: token mismatch"
        );
        return Err(AuthError::Unauthorized("Invalid API secret".to_string()));
    }

    tracing::debug!(
        method = %request_method,
        path = %request_path,
        "API secret authentication successful"
    );

    Ok(next.run(request).await)
}
