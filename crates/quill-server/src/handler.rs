use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use quill_types::{derive_slug, derive_teaser, GlobalData, Post, POST_TYPE};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticate the request and run the principal through the access
/// policy. Mutating handlers call this before touching storage; a missing
/// or invalid session is the same as "no principal" and is denied.
fn require_mutator(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let email = auth::principal_email(headers, &state.sessions);
    if state.policy.evaluate(email.as_deref()).is_allowed() {
        Ok(email.unwrap_or_default())
    } else {
        Err(ApiError::Unauthorized)
    }
}

// ---------------------------------------------------------------------------
// Read surface. Reads are total: store failures are logged and collapsed to
// empty values, so clients always get a response of the expected shape.
// ---------------------------------------------------------------------------

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn global_data(State(state): State<AppState>) -> Json<GlobalData> {
    match state.store.global_data().await {
        Ok(data) => Json(data),
        Err(e) => {
            tracing::warn!(error = %e, "global data fetch failed; returning default");
            Json(GlobalData::default())
        }
    }
}

pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    match state.store.list_posts().await {
        Ok(posts) => Json(posts),
        Err(e) => {
            tracing::warn!(error = %e, "post listing failed; returning empty");
            Json(Vec::new())
        }
    }
}

pub async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> Json<Value> {
    match state.store.get_post(&slug).await {
        Ok(Some(post)) => Json(serde_json::to_value(&post).unwrap_or_else(|_| json!({}))),
        Ok(None) => Json(json!({})),
        Err(e) => {
            tracing::warn!(%slug, error = %e, "post fetch failed; returning empty");
            Json(json!({}))
        }
    }
}

pub async fn related_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<Vec<Post>> {
    match state.store.get_related_posts(&slug).await {
        Ok(posts) => Json(posts),
        Err(e) => {
            tracing::warn!(%slug, error = %e, "related posts fetch failed; returning empty");
            Json(Vec::new())
        }
    }
}

pub async fn get_author(State(state): State<AppState>, Path(slug): Path<String>) -> Json<Value> {
    match state.store.get_author(&slug).await {
        Ok(Some(author)) => Json(serde_json::to_value(&author).unwrap_or_else(|_| json!({}))),
        Ok(None) => Json(json!({})),
        Err(e) => {
            tracing::warn!(%slug, error = %e, "author fetch failed; returning empty");
            Json(json!({}))
        }
    }
}

pub async fn author_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<Vec<Post>> {
    let author = match state.store.get_author(&slug).await {
        Ok(Some(author)) => author,
        Ok(None) => return Json(Vec::new()),
        Err(e) => {
            tracing::warn!(%slug, error = %e, "author lookup failed; returning empty");
            return Json(Vec::new());
        }
    };
    match state.store.get_posts_by_author(&author.id).await {
        Ok(posts) => Json(posts),
        Err(e) => {
            tracing::warn!(%slug, error = %e, "author posts fetch failed; returning empty");
            Json(Vec::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    match state.sessions.login(&req.username, &req.password) {
        Some((token, email)) => Ok(Json(json!({ "token": token, "email": email }))),
        None => Err(ApiError::Unauthorized),
    }
}

// ---------------------------------------------------------------------------
// Write gateway
// ---------------------------------------------------------------------------

pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Post>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let email = require_mutator(&state, &headers)?;

    let Json(mut post) = body.map_err(|_| ApiError::BadRequest("Missing body".to_string()))?;

    if post.slug.trim().is_empty() {
        let title = if post.title.is_empty() {
            "post"
        } else {
            post.title.as_str()
        };
        post.slug = derive_slug(title);
    }
    if post.id.is_empty() {
        post.id = post.slug.clone();
    }
    if post.object_type.is_empty() {
        post.object_type = POST_TYPE.to_string();
    }
    // A caller-supplied teaser is authoritative; derive one only when absent.
    if post.metadata.teaser.is_empty() && !post.metadata.content.is_empty() {
        post.metadata.teaser = derive_teaser(&post.metadata.content);
    }

    tracing::info!(slug = %post.slug, by = %email, "creating post");
    match state.store.insert_post(&post).await {
        Ok(Some(result)) => Ok((
            StatusCode::CREATED,
            Json(json!({ "ok": true, "result": result })),
        )),
        Ok(None) => Ok((StatusCode::CREATED, Json(json!({ "ok": true })))),
        // Contract: the error message round-trips verbatim into the body.
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub slug: String,
}

pub async fn delete_post(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let email = require_mutator(&state, &headers)?;

    let slug = params.slug.trim();
    if slug.is_empty() {
        return Err(ApiError::BadRequest("Missing slug".to_string()));
    }

    match state.store.delete_post(slug).await {
        Ok(true) => {
            tracing::info!(%slug, by = %email, "deleted post");
            Ok(Json(json!({ "ok": true })))
        }
        Ok(false) => Err(ApiError::NotFound("Post not found".to_string())),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: Option<String>,
    pub data: Option<String>,
}

pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let email = require_mutator(&state, &headers)?;

    let Json(req) =
        body.map_err(|_| ApiError::BadRequest("filename and data are required".to_string()))?;
    let (filename, data) = match (req.filename, req.data) {
        (Some(f), Some(d)) if !f.is_empty() && !d.is_empty() => (f, d),
        _ => return Err(ApiError::BadRequest("filename and data are required".to_string())),
    };

    match quill_assets::store_upload(&state.uploads_dir, &filename, &data) {
        Ok(asset) => {
            tracing::info!(file = %asset.file_name, by = %email, "stored upload");
            Ok(Json(json!({ "url": asset.url, "mime": asset.mime })))
        }
        Err(quill_assets::AssetError::InvalidDataUrl)
        | Err(quill_assets::AssetError::InvalidPayload(_)) => {
            Err(ApiError::BadRequest("Invalid data URL".to_string()))
        }
        // Unlike the write gateway, upload failures stay generic — the
        // underlying I/O error is logged, never sent to the client.
        Err(quill_assets::AssetError::Io(e)) => {
            tracing::error!(error = %e, "upload write failed");
            Err(ApiError::Internal("Internal error".to_string()))
        }
    }
}
