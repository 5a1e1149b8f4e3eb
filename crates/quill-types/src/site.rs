use serde::{Deserialize, Serialize};

/// Singleton site metadata, fetched per request and never persisted by
/// this system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalData {
    #[serde(default)]
    pub metadata: GlobalMetadata,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetadata {
    #[serde(default)]
    pub site_title: String,
    #[serde(default)]
    pub site_tag: String,
}

impl GlobalData {
    /// Built-in site metadata used when no remote backend is configured.
    pub fn local_default() -> Self {
        Self {
            metadata: GlobalMetadata {
                site_title: "Quill".to_string(),
                site_tag: String::new(),
            },
        }
    }
}
