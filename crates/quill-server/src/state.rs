use std::path::PathBuf;
use std::sync::Arc;

use quill_access::AccessPolicy;
use quill_store::{ContentStore, LocalFileStore, RemoteContentStore};

use crate::auth::SessionAuthority;
use crate::config::ServerConfig;

/// Shared request state: the content store, access policy, and session
/// authority are all constructed once here and injected into handlers via
/// axum `State` — no globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub policy: Arc<AccessPolicy>,
    pub sessions: Arc<SessionAuthority>,
    pub uploads_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        let local = LocalFileStore::new(&config.posts_dir);
        let store: Arc<dyn ContentStore> = match &config.bucket {
            Some(bucket) => {
                tracing::info!(%bucket, "content store: remote bucket API");
                Arc::new(RemoteContentStore::new(
                    config.base_url.clone(),
                    bucket.clone(),
                    config.read_key.clone(),
                    config.write_key.clone(),
                    local,
                ))
            }
            None => {
                tracing::info!(dir = %config.posts_dir.display(), "content store: local files");
                Arc::new(local)
            }
        };
        let policy = AccessPolicy::from_config(&config.allowed_emails, &config.allowed_domains);
        if policy.is_open() {
            tracing::warn!("no allow-lists configured; any authenticated principal may mutate");
        }
        Self {
            store,
            policy: Arc::new(policy),
            sessions: Arc::new(SessionAuthority::new(
                &config.session_secret,
                config.admin_username.clone(),
                config.admin_password.clone(),
            )),
            uploads_dir: Arc::new(config.uploads_dir.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mode_by_default() {
        let state = AppState::from_config(&ServerConfig::default());
        assert!(state.policy.is_open());
        // uploads dir carried through
        assert_eq!(*state.uploads_dir, PathBuf::from("public/uploads"));
    }

    #[test]
    fn allow_lists_flow_into_policy() {
        let config = ServerConfig {
            allowed_emails: "a@x.com".into(),
            ..Default::default()
        };
        let state = AppState::from_config(&config);
        assert!(!state.policy.is_open());
    }
}
