//! HTTP server for the Quill blog engine.
//!
//! Exposes the public JSON read surface (posts, authors, related posts,
//! site globals) and the credential-gated admin surface (create post,
//! delete post, upload image). Reads never fail from the client's point of
//! view — store errors are logged and collapsed to empty values. Mutations
//! surface their errors as HTTP status plus `{"error": "..."}`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::SessionAuthority;
pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::QuillServer;
pub use state::AppState;
