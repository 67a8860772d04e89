//! API routes.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::error::panic_response;
use crate::handlers::{diagnose, parse_input, search_videos};
use crate::middleware::{cors_layer, request_logging};
use crate::state::AppState;

/// Create the relay router.
///
/// Anything outside `/api` is served from the configured public directory.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/parse", get(parse_input))
        .route("/search", get(search_videos))
        .route("/diag/:id", get(diagnose));

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer())
        .with_state(state)
}
