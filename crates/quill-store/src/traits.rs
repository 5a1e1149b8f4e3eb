use async_trait::async_trait;

use quill_types::{Author, GlobalData, Post};

use crate::error::StoreResult;

/// Polymorphic content store.
///
/// Exactly one implementation is selected at process startup, by
/// configuration presence: [`RemoteContentStore`](crate::RemoteContentStore)
/// when a bucket identifier is configured, [`LocalFileStore`](crate::LocalFileStore)
/// otherwise. The two stores are never synchronized.
///
/// Read operations return `Err` on failure; the HTTP boundary is the only
/// place that collapses failures to empty results (after logging), so that
/// clients always receive a value of the expected shape.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All posts, in the backing store's enumeration order.
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// One post by slug. `Ok(None)` when the post does not exist.
    async fn get_post(&self, slug: &str) -> StoreResult<Option<Post>>;

    /// One author by slug. The local store does not model authors and
    /// always answers `Ok(None)`.
    async fn get_author(&self, slug: &str) -> StoreResult<Option<Author>>;

    /// Posts by author id, in randomized order on the remote backend.
    /// The local store always answers an empty list.
    async fn get_posts_by_author(&self, author_id: &str) -> StoreResult<Vec<Post>>;

    /// Posts other than `exclude_slug`, in randomized order on the remote
    /// backend. The local store always answers an empty list.
    async fn get_related_posts(&self, exclude_slug: &str) -> StoreResult<Vec<Post>>;

    /// Singleton site metadata.
    async fn global_data(&self) -> StoreResult<GlobalData>;

    /// Persist a new post under its slug.
    ///
    /// An existing post with the same slug is overwritten unconditionally —
    /// last-write-wins, with no uniqueness check. This is a tested contract
    /// of the write path, not an accident.
    ///
    /// Returns the remote backend's insert result when one exists.
    async fn insert_post(&self, post: &Post) -> StoreResult<Option<serde_json::Value>>;

    /// Delete a post by slug. Returns `false` when no such post exists.
    ///
    /// Deletion only ever touches the local file store, regardless of which
    /// backend handles reads and inserts.
    async fn delete_post(&self, slug: &str) -> StoreResult<bool>;
}
