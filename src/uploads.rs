//! Game image uploads: type and size checks, then storage on disk.

use std::path::Path;

use crate::constants::{
    ALLOWED_IMAGE_CONTENT_TYPES, ALLOWED_IMAGE_EXTENSIONS, MAX_IMAGE_SIZE_BYTES,
    UPLOADS_URL_PREFIX,
};
use crate::error::{AppError, Result};

/// An image received in a multipart upload, not yet written anywhere
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check type and size, returning the normalized file extension
    pub fn validate(&self) -> Result<String> {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| ALLOWED_IMAGE_EXTENSIONS.contains(&e.as_str()))
            .ok_or(AppError::UnsupportedImageType)?;

        if let Some(content_type) = &self.content_type {
            let content_type = content_type.to_ascii_lowercase();
            if !ALLOWED_IMAGE_CONTENT_TYPES.contains(&content_type.as_str()) {
                return Err(AppError::UnsupportedImageType);
            }
        }

        if self.bytes.len() > MAX_IMAGE_SIZE_BYTES {
            tracing::warn!(
                "Image too large: {} bytes (max: {})",
                self.bytes.len(),
                MAX_IMAGE_SIZE_BYTES
            );
            return Err(AppError::ImageTooLarge);
        }

        Ok(extension)
    }
}

/// Write a validated image into the upload directory
///
/// Returns the public URL it is served under.
pub async fn store_image(upload_dir: &Path, extension: &str, bytes: &[u8]) -> Result<String> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let file_name = format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    );
    tokio::fs::write(upload_dir.join(&file_name), bytes).await?;

    tracing::info!("Stored image {} ({} bytes)", file_name, bytes.len());
    Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_accepts_supported_images() {
        assert_eq!(upload("cover.png", Some("image/png"), 10).validate().unwrap(), "png");
        assert_eq!(upload("cover.JPG", None, 10).validate().unwrap(), "jpg");
        assert_eq!(upload("a.b.jpeg", Some("image/jpeg"), 10).validate().unwrap(), "jpeg");
        assert_eq!(upload("cover.webp", Some("image/webp"), 10).validate().unwrap(), "webp");
    }

    #[test]
    fn test_rejects_other_types() {
        for (name, content_type) in [
            ("cover.gif", Some("image/gif")),
            ("cover.gif", None),
            ("notes.txt", Some("text/plain")),
            ("cover", Some("image/png")),
            ("cover.png", Some("application/octet-stream")),
        ] {
            assert!(
                matches!(
                    upload(name, content_type, 10).validate(),
                    Err(AppError::UnsupportedImageType)
                ),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_size_ceiling() {
        assert!(upload("cover.png", None, MAX_IMAGE_SIZE_BYTES).validate().is_ok());
        assert!(matches!(
            upload("cover.png", None, MAX_IMAGE_SIZE_BYTES + 1).validate(),
            Err(AppError::ImageTooLarge)
        ));
    }

    #[tokio::test]
    async fn test_store_image_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let upload_dir = dir.path().join("uploads");

        let url = store_image(&upload_dir, "png", b"not really a png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let file_name = url.trim_start_matches("/uploads/");
        let written = std::fs::read(upload_dir.join(file_name)).unwrap();
        assert_eq!(written, b"not really a png");
    }
}
