//! On-disk store for original and enhanced JPEGs
//!
//! Each upload is written as `<id>_original.jpg` and `<id>_enhanced.jpg`
//! in a single flat directory. Files are never removed by the service.

use photoboost_image::EnhancedPair;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Flat directory of stored image pairs
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the images
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the normalized original for `id`
    #[must_use]
    pub fn original_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(format!("{id}_original.jpg"))
    }

    /// Path of the enhanced image for `id`
    #[must_use]
    pub fn enhanced_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(format!("{id}_enhanced.jpg"))
    }

    /// Persist both images of a pair
    ///
    /// If the enhanced image cannot be written the original is removed again,
    /// so a failed save leaves no files behind.
    pub async fn save(&self, id: &Uuid, pair: &EnhancedPair) -> io::Result<()> {
        let original = self.original_path(id);
        tokio::fs::write(&original, &pair.original).await?;

        if let Err(e) = tokio::fs::write(self.enhanced_path(id), &pair.enhanced).await {
            if let Err(cleanup) = tokio::fs::remove_file(&original).await {
                tracing::warn!(%id, error = %cleanup, "Cannot remove original after failed save");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Read the enhanced image, `None` if it was never stored
    pub async fn read_enhanced(&self, id: &Uuid) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.enhanced_path(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoboost_image::ImageFormat;
    use tempfile::TempDir;

    fn pair() -> EnhancedPair {
        EnhancedPair {
            original: b"original-bytes".to_vec(),
            enhanced: b"enhanced-bytes".to_vec(),
            width: 1,
            height: 1,
            source_format: ImageFormat::Png,
        }
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("images");

        let store = ImageStore::open(&root).await.unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[tokio::test]
    async fn test_save_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::open(temp_dir.path()).await.unwrap();
        let id = Uuid::new_v4();

        store.save(&id, &pair()).await.unwrap();

        assert_eq!(
            std::fs::read(temp_dir.path().join(format!("{id}_original.jpg"))).unwrap(),
            b"original-bytes"
        );
        assert_eq!(
            store.read_enhanced(&id).await.unwrap().as_deref(),
            Some(&b"enhanced-bytes"[..])
        );
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_original() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::open(temp_dir.path()).await.unwrap();
        let id = Uuid::new_v4();
        // a directory in place of the enhanced file makes the second write fail
        std::fs::create_dir(store.enhanced_path(&id)).unwrap();

        assert!(store.save(&id, &pair()).await.is_err());
        assert!(!store.original_path(&id).exists());
    }

    #[tokio::test]
    async fn test_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::open(temp_dir.path()).await.unwrap();

        assert!(store.read_enhanced(&Uuid::new_v4()).await.unwrap().is_none());
    }
}
