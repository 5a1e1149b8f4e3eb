//! Uploaded asset persistence for Quill.
//!
//! The admin surface submits hero images as inline data URLs
//! (`data:<mime>;base64,<payload>`). This crate decodes the payload and
//! persists it under a public asset directory with a collision-resistant
//! name: the current epoch-millisecond timestamp, a hyphen, then the
//! sanitized original basename. Assets are write-once — nothing in the
//! system ever updates or deletes them.

use std::fs;
use std::path::Path;

use base64::Engine;
use serde::Serialize;

/// Public URL prefix under which stored assets are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Errors from asset storage.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The payload did not match `data:<mime>;base64,<payload>`.
    #[error("invalid data URL")]
    InvalidDataUrl,

    /// The base64 payload could not be decoded.
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    /// I/O error while persisting the asset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// A successfully persisted asset.
#[derive(Clone, Debug, Serialize)]
pub struct StoredAsset {
    /// Final on-disk file name, unique by timestamp prefix.
    pub file_name: String,
    /// Public-relative URL (`/uploads/<file_name>`).
    pub url: String,
    /// MIME type declared by the data URL.
    pub mime: String,
}

/// Decode an inline data URL and persist it under `uploads_dir`.
///
/// The stored name is `<epoch_millis>-<sanitized_basename><ext>`, where the
/// sanitized basename contains only `[A-Za-z0-9._-]` (every other character
/// is replaced with `_`) and the original extension is kept as-is.
pub fn store_upload(uploads_dir: &Path, filename: &str, data_url: &str) -> AssetResult<StoredAsset> {
    let (mime, payload) = parse_data_url(data_url).ok_or(AssetError::InvalidDataUrl)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;

    let (stem, ext) = split_extension(basename(filename));
    let unique_name = format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        sanitize_file_name(stem),
        ext
    );

    fs::create_dir_all(uploads_dir)?;
    let path = uploads_dir.join(&unique_name);
    fs::write(&path, &bytes)?;
    tracing::info!(file = %unique_name, mime, size = bytes.len(), "stored upload");

    Ok(StoredAsset {
        url: format!("{UPLOADS_URL_PREFIX}/{unique_name}"),
        file_name: unique_name,
        mime: mime.to_string(),
    })
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn parse_data_url(data: &str) -> Option<(&str, &str)> {
    let rest = data.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() || payload.is_empty() {
        return None;
    }
    let mime_ok = mime
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '+' | '-' | '_' | '.'));
    if !mime_ok {
        return None;
    }
    Some((mime, payload))
}

fn basename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Split `name.ext` into (`name`, `.ext`); no dot means an empty extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn sanitizes_filename_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let asset = store_upload(dir.path(), "My Photo!@#.png", PNG_DATA_URL).unwrap();

        let (prefix, rest) = asset.file_name.split_once('-').unwrap();
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "My_Photo___.png");
        assert!(asset.url.starts_with("/uploads/"));
        assert_eq!(asset.mime, "image/png");
    }

    #[test]
    fn writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        // "hello world" in base64
        let asset = store_upload(dir.path(), "note.txt", "data:text/plain;base64,aGVsbG8gd29ybGQ=")
            .unwrap();
        let written = std::fs::read(dir.path().join(&asset.file_name)).unwrap();
        assert_eq!(written, b"hello world");
    }

    #[test]
    fn creates_uploads_dir_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("public").join("uploads");
        let asset = store_upload(&nested, "a.png", PNG_DATA_URL).unwrap();
        assert!(nested.join(asset.file_name).exists());
    }

    #[test]
    fn rejects_non_data_urls() {
        let dir = tempfile::tempdir().unwrap();
        for bad in [
            "https://example.com/a.png",
            "data:image/png;base64,",
            "data:;base64,aGk=",
            "data:image/png,aGk=",
            "base64,aGk=",
        ] {
            let err = store_upload(dir.path(), "a.png", bad).unwrap_err();
            assert!(matches!(err, AssetError::InvalidDataUrl), "input: {bad}");
        }
    }

    #[test]
    fn rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_upload(dir.path(), "a.png", "data:image/png;base64,!!!not-base64!!!")
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidPayload(_)));
    }

    #[test]
    fn extension_handling() {
        assert_eq!(split_extension("photo.png"), ("photo", ".png"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        // A leading dot is a hidden file, not an extension.
        assert_eq!(split_extension(".gitignore"), (".gitignore", ""));
    }

    #[test]
    fn strips_path_components() {
        let dir = tempfile::tempdir().unwrap();
        let asset = store_upload(dir.path(), "../../etc/passwd.png", PNG_DATA_URL).unwrap();
        let (_, rest) = asset.file_name.split_once('-').unwrap();
        assert_eq!(rest, "passwd.png");
    }
}
