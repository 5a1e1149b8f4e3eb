use serde::{Deserialize, Serialize};

/// The object type tag carried by every post.
pub const POST_TYPE: &str = "posts";

/// A blog post.
///
/// The slug is the primary key: it is unique within a store, doubles as the
/// local filename (`<slug>.json`), and appears in post URLs. Posts are
/// immutable once created — there is no update operation, only create and
/// delete-by-slug.
///
/// Every field is `#[serde(default)]` so that partial, untrusted submissions
/// from the admin surface still deserialize; the write path fills in the
/// slug and teaser before persisting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub metadata: PostMetadata,
}

impl Post {
    /// Returns `true` if this is the empty sentinel (no slug).
    pub fn is_empty(&self) -> bool {
        self.slug.is_empty()
    }
}

/// Post body and presentation metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default)]
    pub published_date: String,
    /// Plain-text excerpt, at most 160 characters, HTML stripped.
    #[serde(default)]
    pub teaser: String,
    /// Raw HTML or text body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub author: AuthorRef,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Hero image reference. The URL may be empty when no hero was uploaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub imgix_url: String,
}

/// Inline author reference carried on a post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A post category. Ordering within a post is preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub title: String,
}
