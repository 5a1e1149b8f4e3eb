//! Foundation types for the Quill blog engine.
//!
//! This crate provides the content data model shared by every other Quill
//! crate, plus the pure text derivations the write path relies on.
//!
//! # Key Types
//!
//! - [`Post`] — A blog post, keyed by its URL-safe slug
//! - [`Author`] — A post author, sourced from the remote content backend
//! - [`GlobalData`] — Singleton site metadata (title and tagline)
//! - [`derive_slug`] — Deterministic title-to-slug derivation
//! - [`derive_teaser`] — HTML-stripped, length-capped excerpt derivation

pub mod author;
pub mod post;
pub mod site;
pub mod slug;
pub mod teaser;

pub use author::{Author, AuthorMetadata};
pub use post::{AuthorRef, Category, Hero, Post, PostMetadata, POST_TYPE};
pub use site::{GlobalData, GlobalMetadata};
pub use slug::derive_slug;
pub use teaser::{derive_teaser, TEASER_MAX_CHARS};
