use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AppError, Result};

/// A decoded inline image upload
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// File extension taken from the data-URI media type (e.g. "png")
    pub ext: String,
    pub bytes: Vec<u8>,
}

/// Parse an inline `data:image/<ext>;base64,<payload>` upload.
pub fn parse_data_uri(data: &str) -> Result<DecodedImage> {
    let rest = data
        .strip_prefix("data:image/")
        .ok_or_else(|| AppError::InvalidImage("expected a data:image/... URI".to_string()))?;

    let (ext, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::InvalidImage("expected a base64 payload".to_string()))?;

    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidImage(format!(
            "unsupported image extension: {ext:?}"
        )));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::InvalidImage(format!("base64 decode failed: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::InvalidImage("empty image payload".to_string()));
    }

    Ok(DecodedImage {
        ext: ext.to_lowercase(),
        bytes,
    })
}

/// File store rooted at the configured media directory.
///
/// Stored paths are media-root relative, so the root can move between
/// environments without rewriting rows.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write a decoded avatar for the user, returning the stored relative path
    pub fn save_avatar(&self, user_id: i64, image: &DecodedImage) -> Result<String> {
        self.save(&format!("avatars/{user_id}"), "avatar", image)
    }

    /// Write a decoded recipe image, returning the stored relative path
    pub fn save_recipe_image(&self, recipe_id: i64, image: &DecodedImage) -> Result<String> {
        self.save(&format!("recipes/{recipe_id}"), "image", image)
    }

    /// Adopt an existing file (fixture media) into the store.
    ///
    /// Returns `Ok(None)` when the source file does not exist; seeding treats
    /// that as a skippable condition, not a failure.
    pub fn adopt_file(&self, src: &Path, subdir: &str, stem: &str) -> Result<Option<String>> {
        if !src.is_file() {
            return Ok(None);
        }

        let ext = src
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .to_lowercase();
        let image = DecodedImage {
            ext,
            bytes: fs::read(src)?,
        };

        self.save(subdir, stem, &image).map(Some)
    }

    /// Remove a previously stored file; missing files are ignored
    pub fn remove(&self, relative_path: &str) {
        let path = self.root.join(relative_path);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove media file {:?}: {}", path, e);
            }
        }
    }

    fn save(&self, subdir: &str, stem: &str, image: &DecodedImage) -> Result<String> {
        let relative = format!("{subdir}/{stem}.{ext}", ext = image.ext);
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &image.bytes)?;

        Ok(relative)
    }
}
