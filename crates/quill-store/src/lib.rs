//! Content storage for the Quill blog engine.
//!
//! Posts live in exactly one of two backends, chosen once at process
//! startup by configuration presence:
//!
//! - [`LocalFileStore`] — a directory of pretty-printed `<slug>.json`
//!   files; the development and single-operator backend
//! - [`RemoteContentStore`] — a hosted bucket API queried by object type
//!   and slug; the production backend
//!
//! Both implement the [`ContentStore`] trait. The two stores are never
//! synchronized; a deployment uses one or the other.
//!
//! # Error policy
//!
//! Store methods return honest `Result`s. The HTTP boundary is responsible
//! for collapsing read failures to empty values (after logging), so the
//! public read surface stays total. Writes and deletes surface their errors.

pub mod error;
pub mod local;
pub mod remote;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use local::LocalFileStore;
pub use remote::{RemoteContentStore, DEFAULT_BASE_URL};
pub use traits::ContentStore;
