use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use quill_types::{Author, GlobalData, Post, POST_TYPE};

use crate::error::{StoreError, StoreResult};
use crate::local::LocalFileStore;
use crate::traits::ContentStore;

/// Default base URL of the hosted bucket API.
pub const DEFAULT_BASE_URL: &str = "https://api.cosmicjs.com/v3";

/// Content store backed by a hosted bucket API.
///
/// The backend is a black-box object store queried by type and slug at
/// `{base}/buckets/{bucket}/objects`. Responses arrive in `{ "objects": [...] }`
/// and `{ "object": {...} }` envelopes.
///
/// Two behaviors are inherited from the original write path and kept on
/// purpose:
///
/// - Inserts require a write key. Without one — or when the remote insert
///   fails for any reason — the post falls through to a one-shot local file
///   write instead of failing the request.
/// - Deletes never touch the remote store; they always operate on the local
///   file store.
pub struct RemoteContentStore {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    read_key: String,
    write_key: Option<String>,
    fallback: LocalFileStore,
}

#[derive(Deserialize)]
struct ObjectsEnvelope<T> {
    #[serde(default = "Vec::new")]
    objects: Vec<T>,
}

#[derive(Deserialize)]
struct ObjectEnvelope<T> {
    object: T,
}

impl RemoteContentStore {
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        read_key: impl Into<String>,
        write_key: Option<String>,
        fallback: LocalFileStore,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bucket: bucket.into(),
            read_key: read_key.into(),
            write_key,
            fallback,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns `true` when inserts can go to the remote store at all.
    pub fn has_write_key(&self) -> bool {
        self.write_key.is_some()
    }

    fn objects_url(&self) -> String {
        format!("{}/buckets/{}/objects", self.base_url, self.bucket)
    }

    async fn find<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> StoreResult<Vec<T>> {
        let resp = self
            .http
            .get(self.objects_url())
            .query(&[("read_key", self.read_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::RemoteStatus {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        let envelope: ObjectsEnvelope<T> = resp.json().await?;
        Ok(envelope.objects)
    }

    async fn find_one<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> StoreResult<Option<T>> {
        let resp = self
            .http
            .get(self.objects_url())
            .query(&[("read_key", self.read_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::RemoteStatus {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        let envelope: ObjectEnvelope<T> = resp.json().await?;
        Ok(Some(envelope.object))
    }

    async fn remote_insert(&self, post: &Post, write_key: &str) -> StoreResult<serde_json::Value> {
        let resp = self
            .http
            .post(self.objects_url())
            .bearer_auth(write_key)
            .json(post)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::RemoteStatus {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ContentStore for RemoteContentStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.find(&[("type", POST_TYPE)]).await
    }

    async fn get_post(&self, slug: &str) -> StoreResult<Option<Post>> {
        self.find_one(&[("type", POST_TYPE), ("slug", slug)]).await
    }

    async fn get_author(&self, slug: &str) -> StoreResult<Option<Author>> {
        self.find_one(&[("type", "authors"), ("slug", slug)]).await
    }

    async fn get_posts_by_author(&self, author_id: &str) -> StoreResult<Vec<Post>> {
        self.find(&[("type", POST_TYPE), ("author", author_id), ("sort", "random")])
            .await
    }

    async fn get_related_posts(&self, exclude_slug: &str) -> StoreResult<Vec<Post>> {
        self.find(&[
            ("type", POST_TYPE),
            ("slug_ne", exclude_slug),
            ("sort", "random"),
        ])
        .await
    }

    async fn global_data(&self) -> StoreResult<GlobalData> {
        match self
            .find_one(&[("type", "globals"), ("slug", "header")])
            .await?
        {
            Some(data) => Ok(data),
            None => Ok(GlobalData::default()),
        }
    }

    async fn insert_post(&self, post: &Post) -> StoreResult<Option<serde_json::Value>> {
        if let Some(write_key) = &self.write_key {
            match self.remote_insert(post, write_key).await {
                Ok(result) => return Ok(Some(result)),
                Err(e) => {
                    // One-shot fallback to the local file write; not a retry.
                    tracing::warn!(slug = %post.slug, error = %e, "remote insert failed, falling back to local write");
                }
            }
        }
        self.fallback.insert_post(post).await
    }

    async fn delete_post(&self, slug: &str) -> StoreResult<bool> {
        // Delete has no remote path by contract.
        self.fallback.delete_post(slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(
        dir: &std::path::Path,
        base_url: &str,
        write_key: Option<String>,
    ) -> RemoteContentStore {
        RemoteContentStore::new(
            base_url,
            "test-bucket",
            "read-key",
            write_key,
            LocalFileStore::new(dir),
        )
    }

    fn sample_post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn objects_url_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), "https://api.example/v3", None);
        assert_eq!(
            store.objects_url(),
            "https://api.example/v3/buckets/test-bucket/objects"
        );
    }

    #[tokio::test]
    async fn insert_without_write_key_goes_local() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), "https://api.example/v3", None);

        let result = store.insert_post(&sample_post("local-only")).await.unwrap();
        assert!(result.is_none());
        assert!(dir.path().join("local-only.json").exists());
    }

    #[tokio::test]
    async fn insert_falls_back_when_remote_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens here; the remote attempt fails fast and the post
        // must still land in the local store.
        let store = store_with(dir.path(), "http://127.0.0.1:1", Some("write-key".into()));

        let result = store.insert_post(&sample_post("fell-back")).await.unwrap();
        assert!(result.is_none());
        assert!(dir.path().join("fell-back.json").exists());
    }

    #[tokio::test]
    async fn delete_only_touches_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(dir.path(), "http://127.0.0.1:1", Some("write-key".into()));
        store.fallback.insert_post(&sample_post("doomed")).await.unwrap();

        // No network involved even though a remote backend is configured.
        assert!(store.delete_post("doomed").await.unwrap());
        assert!(!store.delete_post("doomed").await.unwrap());
    }

    #[test]
    fn write_key_presence() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!store_with(dir.path(), DEFAULT_BASE_URL, None).has_write_key());
        assert!(store_with(dir.path(), DEFAULT_BASE_URL, Some("k".into())).has_write_key());
    }
}
