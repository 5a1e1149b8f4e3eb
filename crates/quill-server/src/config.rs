use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration, built once at startup.
///
/// Backend selection is by presence: when [`bucket`](Self::bucket) is set
/// the server reads from the remote bucket API, otherwise from the local
/// flat-file store. The decision is made once when the process starts, not
/// re-checked per request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory of local `<slug>.json` post files.
    pub posts_dir: PathBuf,
    /// Directory for uploaded assets, served under `/uploads`.
    pub uploads_dir: PathBuf,
    /// Remote bucket identifier. Present means remote mode.
    pub bucket: Option<String>,
    pub read_key: String,
    /// Remote write credential. Without it, inserts go straight to the
    /// local store even in remote mode.
    pub write_key: Option<String>,
    /// Base URL of the bucket API.
    pub base_url: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Secret the session token MAC key is derived from.
    pub session_secret: String,
    /// Comma-separated emails allowed to mutate content.
    pub allowed_emails: String,
    /// Comma-separated email domains allowed to mutate content.
    pub allowed_domains: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid default addr"),
            posts_dir: PathBuf::from("data/posts"),
            uploads_dir: PathBuf::from("public/uploads"),
            bucket: None,
            read_key: String::new(),
            write_key: None,
            base_url: quill_store::DEFAULT_BASE_URL.to_string(),
            admin_username: "admin".to_string(),
            admin_password: "password123".to_string(),
            session_secret: "quill-dev-secret".to_string(),
            allowed_emails: String::new(),
            allowed_domains: String::new(),
        }
    }
}

impl ServerConfig {
    /// Build a configuration from `QUILL_*` environment variables, falling
    /// back to the defaults for anything unset or blank.
    pub fn from_env() -> ServerResult<Self> {
        let mut config = Self::default();
        if let Some(addr) = env_opt("QUILL_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("invalid QUILL_BIND_ADDR: {e}")))?;
        }
        if let Some(dir) = env_opt("QUILL_POSTS_DIR") {
            config.posts_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_opt("QUILL_UPLOADS_DIR") {
            config.uploads_dir = PathBuf::from(dir);
        }
        config.bucket = env_opt("QUILL_BUCKET");
        if let Some(key) = env_opt("QUILL_READ_KEY") {
            config.read_key = key;
        }
        config.write_key = env_opt("QUILL_WRITE_KEY");
        if let Some(url) = env_opt("QUILL_BASE_URL") {
            config.base_url = url;
        }
        if let Some(user) = env_opt("QUILL_ADMIN_USERNAME") {
            config.admin_username = user;
        }
        if let Some(pass) = env_opt("QUILL_ADMIN_PASSWORD") {
            config.admin_password = pass;
        }
        if let Some(secret) = env_opt("QUILL_SESSION_SECRET") {
            config.session_secret = secret;
        }
        if let Some(emails) = env_opt("QUILL_ALLOWED_EMAILS") {
            config.allowed_emails = emails;
        }
        if let Some(domains) = env_opt("QUILL_ALLOWED_DOMAINS") {
            config.allowed_domains = domains;
        }
        Ok(config)
    }

    /// Whether the remote bucket API backs reads and inserts.
    pub fn remote_mode(&self) -> bool {
        self.bucket.is_some()
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.posts_dir, PathBuf::from("data/posts"));
        assert_eq!(c.uploads_dir, PathBuf::from("public/uploads"));
        assert!(c.bucket.is_none());
        assert!(c.write_key.is_none());
        assert!(!c.remote_mode());
    }

    #[test]
    fn bucket_presence_selects_remote_mode() {
        let config = ServerConfig {
            bucket: Some("my-bucket".into()),
            ..Default::default()
        };
        assert!(config.remote_mode());
    }
}
