//! Selfie encoding
//!
//! Guests attach an optional photo, stored inline as a base64 `data:` URL.
//! No size limit is applied; large images may not fit the store's quota.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while turning a file into a data URL
#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an image: {0:?}")]
    NotAnImage(PathBuf),
}

/// Encode image bytes as a `data:` URL
pub fn photo_to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, B64.encode(bytes))
}

/// Read an image file and encode it as a data URL.
///
/// `None` means no file was picked, so there is nothing to preview.
pub async fn read_photo_data_url(path: Option<&Path>) -> Result<Option<String>, PhotoError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = tokio::fs::read(path).await?;
    let mime = sniff_image_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .ok_or_else(|| PhotoError::NotAnImage(path.to_path_buf()))?;

    tracing::debug!(path = ?path, mime, bytes = bytes.len(), "Encoded photo");
    Ok(Some(photo_to_data_url(&bytes, mime)))
}

/// Detect common image formats from their leading bytes
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'B', b'M', ..] => Some("image/bmp"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => Some("image/heic"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'a', b'v', b'i', b'f', ..] => Some("image/avif"),
        _ => None,
    }
}

/// Guess an image MIME type from the file extension
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "heic" | "heif" => Some("image/heic"),
        "avif" => Some("image/avif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_data_url() {
        assert_eq!(
            photo_to_data_url(b"hi", "image/png"),
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn test_sniff() {
        assert_eq!(sniff_image_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_mime(b"\0\0\0\x18ftypheic"), Some("image/heic"));
        assert_eq!(sniff_image_mime(b"plain text"), None);
        assert_eq!(sniff_image_mime(&[]), None);
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(mime_from_extension(Path::new("me.JPG")), Some("image/jpeg"));
        assert_eq!(mime_from_extension(Path::new("notes.txt")), None);
        assert_eq!(mime_from_extension(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn test_no_file_selected() {
        assert_eq!(read_photo_data_url(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selfie.bin");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let url = read_photo_data_url(Some(&path)).await.unwrap().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not a photo").unwrap();

        let err = read_photo_data_url(Some(&path)).await.unwrap_err();
        assert!(matches!(err, PhotoError::NotAnImage(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.png");

        let err = read_photo_data_url(Some(&path)).await.unwrap_err();
        assert!(matches!(err, PhotoError::Io(_)));
    }
}
