use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::error::{AppError, Result};
use crate::features::images::catalog::is_image;

/// Lists image files under the public directory as site-root paths
pub struct ImageService {
    public_dir: PathBuf,
}

impl ImageService {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let dir = self.public_dir.clone();
        let images = tokio::task::spawn_blocking(move || scan_public_dir(&dir))
            .await
            .map_err(|e| AppError::Internal(format!("Image scan task failed: {}", e)))?;

        tracing::debug!(count = images.len(), dir = %self.public_dir.display(), "Listed images");
        Ok(images)
    }
}

/// Walk `dir` and return sorted `/`-rooted paths of every image file.
///
/// A missing directory yields an empty list. Unreadable entries and hidden
/// files are skipped.
pub fn scan_public_dir(dir: &Path) -> Vec<String> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Public directory not found");
        return Vec::new();
    }

    let mut images: Vec<String> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| site_path(dir, e.path()))
        .filter(|p| is_image(p))
        .collect();

    images.sort();
    images
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}

fn site_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("/{}", parts.join("/")))
}
