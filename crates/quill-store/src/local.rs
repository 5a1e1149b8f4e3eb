use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use tokio::fs;

use quill_types::{Author, GlobalData, Post};

use crate::error::StoreResult;
use crate::traits::ContentStore;

/// Flat-file content store: one pretty-printed `<slug>.json` per post
/// inside a single directory.
///
/// This is the development and single-operator backend. Writes are whole-file
/// overwrites with no locking; concurrent creates against the same slug race
/// with last-write-wins semantics. That is a documented limitation of the
/// single-admin usage pattern, not something this store detects.
///
/// Authors and site metadata are not modeled here: author lookups answer
/// `None`, author/related post queries answer empty lists, and
/// [`global_data`](ContentStore::global_data) answers the built-in default.
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the `<slug>.json` files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.json"))
    }

    /// Slugs arrive percent-encoded from route parameters; decode and trim
    /// so local filenames with spaces still resolve.
    fn normalize_slug(slug: &str) -> String {
        percent_decode_str(slug)
            .decode_utf8_lossy()
            .trim()
            .to_string()
    }
}

#[async_trait]
impl ContentStore for LocalFileStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut posts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = fs::read_to_string(&path).await?;
            // A malformed file fails the whole listing; the HTTP boundary
            // turns that into an empty result after logging.
            posts.push(serde_json::from_str(&raw)?);
        }
        Ok(posts)
    }

    async fn get_post(&self, slug: &str) -> StoreResult<Option<Post>> {
        let slug = Self::normalize_slug(slug);
        match fs::read_to_string(self.post_path(&slug)).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_author(&self, _slug: &str) -> StoreResult<Option<Author>> {
        Ok(None)
    }

    async fn get_posts_by_author(&self, _author_id: &str) -> StoreResult<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn get_related_posts(&self, _exclude_slug: &str) -> StoreResult<Vec<Post>> {
        Ok(Vec::new())
    }

    async fn global_data(&self) -> StoreResult<GlobalData> {
        Ok(GlobalData::local_default())
    }

    async fn insert_post(&self, post: &Post) -> StoreResult<Option<serde_json::Value>> {
        fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(post)?;
        fs::write(self.post_path(&post.slug), json).await?;
        tracing::info!(slug = %post.slug, "wrote post to local store");
        Ok(None)
    }

    async fn delete_post(&self, slug: &str) -> StoreResult<bool> {
        let slug = Self::normalize_slug(slug);
        match fs::remove_file(self.post_path(&slug)).await {
            Ok(()) => {
                tracing::info!(%slug, "deleted post from local store");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
