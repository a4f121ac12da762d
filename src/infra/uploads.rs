//! Profile picture storage.
//!
//! Stores the uploaded original under the configured directory and a
//! 150x150 thumbnail under its `thumb/` subdirectory. Both files share
//! one name, `{user_id}-{unix_ts}.{ext}`, so swapping a picture only
//! needs the previous filename to clean up.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageFormat;

use crate::config::{THUMB_SIZE, THUMB_SUBDIR};
use crate::errors::{AppError, AppResult};

/// Accepted upload formats, detected from the file's magic bytes rather
/// than its claimed filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
        }
    }
}

/// Filesystem store for profile pictures.
#[derive(Clone)]
pub struct ProfileImageStore {
    base_dir: PathBuf,
}

impl ProfileImageStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn original_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    fn thumb_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(THUMB_SUBDIR).join(filename)
    }

    /// Persist an upload and its thumbnail, returning the stored filename.
    ///
    /// Rejects anything that is not a JPEG or PNG by content. The original
    /// is removed again if thumbnail generation fails, so a stored filename
    /// always has both files behind it.
    pub async fn save(&self, user_id: i64, bytes: Vec<u8>) -> AppResult<String> {
        let kind = ImageKind::detect(&bytes).ok_or_else(|| {
            AppError::field("image", "Only JPEG and PNG images are accepted")
        })?;

        let filename = format!(
            "{}-{}.{}",
            user_id,
            chrono::Utc::now().timestamp(),
            kind.extension()
        );

        tokio::fs::create_dir_all(self.base_dir.join(THUMB_SUBDIR))
            .await
            .map_err(|e| AppError::internal(format!("Failed to prepare upload dir: {e}")))?;

        let original = self.original_path(&filename);
        tokio::fs::write(&original, &bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;

        let thumb = self.thumb_path(&filename);
        let result = tokio::task::spawn_blocking(move || write_thumbnail(&bytes, kind, &thumb))
            .await
            .map_err(|e| AppError::internal(format!("Thumbnail task failed: {e}")))?;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&original).await;
            return Err(e);
        }

        Ok(filename)
    }

    /// Best-effort removal of a stored picture and its thumbnail.
    /// Missing files are not an error; the row is the source of truth.
    pub async fn remove(&self, filename: &str) {
        for path in [self.original_path(filename), self.thumb_path(filename)] {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}

fn write_thumbnail(bytes: &[u8], kind: ImageKind, path: &Path) -> AppResult<()> {
    let img = image::load_from_memory_with_format(bytes, kind.format())
        .map_err(|_| AppError::field("image", "Image data could not be decoded"))?;

    img.resize_to_fill(THUMB_SIZE, THUMB_SIZE, FilterType::Lanczos3)
        .save_with_format(path, kind.format())
        .map_err(|e| AppError::internal(format!("Failed to write thumbnail: {e}")))
}
