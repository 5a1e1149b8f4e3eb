use serde::{Deserialize, Serialize};

/// A post author.
///
/// Authors are read-only from Quill's perspective and exist only in the
/// remote content backend — the local file store does not model them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AuthorMetadata>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<super::Hero>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_without_metadata() {
        let author: Author = serde_json::from_str(r#"{"id":"1","title":"Jane"}"#).unwrap();
        assert_eq!(author.title, "Jane");
        assert!(author.metadata.is_none());
    }

    #[test]
    fn author_with_image() {
        let json = r#"{"id":"1","slug":"jane","title":"Jane",
            "metadata":{"image":{"imgix_url":"https://img.example/jane.jpg"}}}"#;
        let author: Author = serde_json::from_str(json).unwrap();
        let image = author.metadata.unwrap().image.unwrap();
        assert_eq!(image.imgix_url, "https://img.example/jane.jpg");
    }
}
