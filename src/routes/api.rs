use axum::{Router, middleware, routing::post};
use tower_http::trace::TraceLayer;

use crate::handlers::{not_found, speech};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use std::sync::Arc;

pub const SPEECH_PATH: &str = "/v1/audio/speech";

/// Speech route with bearer auth on the POST endpoint only; other methods on
/// the path, and all other paths, fall through to 404.
pub fn create_api_router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            SPEECH_PATH,
            post(speech::speech_handler)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                ))
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

/// Fully assembled application with state applied.
pub fn create_app(state: Arc<AppState>) -> Router {
    create_api_router(&state).with_state(state)
}
