/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored document could not be parsed, or a post could not be
    /// serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the local file store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure talking to the remote bucket API.
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote bucket API answered with a non-success status.
    #[error("remote store returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
