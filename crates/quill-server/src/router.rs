use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Inline image uploads arrive base64-encoded in JSON bodies; allow
/// reasonably large ones.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the axum router over all Quill endpoints.
pub fn build_router(state: AppState) -> Router {
    let uploads_dir = state.uploads_dir.as_ref().clone();
    Router::new()
        .route("/api/health", get(handler::health))
        .route("/api/globals", get(handler::global_data))
        .route(
            "/api/posts",
            get(handler::list_posts)
                .post(handler::create_post)
                .delete(handler::delete_post),
        )
        .route("/api/posts/:slug", get(handler::get_post))
        .route("/api/posts/:slug/related", get(handler::related_posts))
        .route("/api/authors/:slug", get(handler::get_author))
        .route("/api/authors/:slug/posts", get(handler::author_posts))
        .route("/api/auth/login", post(handler::login))
        .route("/api/upload", post(handler::upload))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
