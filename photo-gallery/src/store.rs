use crate::bridge::UriBridge;
use crate::camera::{Camera, CameraError};
use crate::clock::Clock;
use crate::encoder::{data_url, BlobSource, NativeEncoder, PhotoEncoder, WebEncoder};
use crate::filesystem::{FileStore, FileStoreError};
use crate::models::{
    CaptureOptions, GalleryConfig, ImageHandle, Platform, PhotoRecord, RestorePolicy,
};
use crate::preferences::{KeyValueError, KeyValueStore};
use std::sync::Arc;

/// Error type for gallery store operations
#[derive(Debug)]
pub enum GalleryError {
    /// Camera denied, cancelled or returned unusable output
    Capture(CameraError),
    /// Blob fetch or base64 conversion failed
    Encoding(String),
    /// File store read or write failed while capturing
    StorageWrite(FileStoreError),
    /// Index could not be written to the key-value store
    IndexPersist(KeyValueError),
    /// Index or one of its photo files could not be read back
    IndexRestore(String),
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::Capture(e) => write!(f, "Capture failed: {}", e),
            GalleryError::Encoding(msg) => write!(f, "Encoding failed: {}", msg),
            GalleryError::StorageWrite(e) => write!(f, "Storage error: {}", e),
            GalleryError::IndexPersist(e) => write!(f, "Saving gallery index failed: {}", e),
            GalleryError::IndexRestore(msg) => write!(f, "Restoring gallery failed: {}", msg),
        }
    }
}

impl std::error::Error for GalleryError {}

impl From<CameraError> for GalleryError {
    fn from(err: CameraError) -> Self {
        GalleryError::Capture(err)
    }
}

impl From<FileStoreError> for GalleryError {
    fn from(err: FileStoreError) -> Self {
        GalleryError::StorageWrite(err)
    }
}

impl From<KeyValueError> for GalleryError {
    fn from(err: KeyValueError) -> Self {
        GalleryError::IndexPersist(err)
    }
}

/// External collaborators the gallery store works through
#[derive(Clone)]
pub struct GalleryBackends {
    pub camera: Arc<dyn Camera>,
    pub files: Arc<dyn FileStore>,
    pub preferences: Arc<dyn KeyValueStore>,
    pub bridge: Arc<dyn UriBridge>,
    pub blobs: Arc<dyn BlobSource>,
    pub clock: Arc<dyn Clock>,
}

/// Ordered, persisted gallery of captured photos
///
/// Lifecycle: construct, `restore()`, then any number of
/// `capture_and_store()` calls. Both operations take `&mut self`, so a store
/// never has two captures in flight.
pub struct GalleryStore {
    config: GalleryConfig,
    camera: Arc<dyn Camera>,
    files: Arc<dyn FileStore>,
    preferences: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    encoder: Box<dyn PhotoEncoder>,
    photos: Vec<PhotoRecord>,
}

impl GalleryStore {
    /// Creates an empty store, selecting the encoder for `platform`
    pub fn new(platform: Platform, backends: GalleryBackends, config: GalleryConfig) -> Self {
        let encoder: Box<dyn PhotoEncoder> = if platform.is_hybrid() {
            Box::new(NativeEncoder::new(backends.files.clone(), backends.bridge))
        } else {
            Box::new(WebEncoder::new(backends.blobs))
        };
        log::debug!("Gallery store created for {:?}", platform);

        Self {
            config,
            camera: backends.camera,
            files: backends.files,
            preferences: backends.preferences,
            clock: backends.clock,
            encoder,
            photos: Vec::new(),
        }
    }

    /// Photos, newest first
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Takes a picture, stores it and records it at the head of the index.
    ///
    /// The file is written before the record is added, so a failed write never
    /// touches the index. If persisting the index fails, the in-memory index
    /// stays one entry ahead of the stored one until the next successful
    /// capture.
    pub async fn capture_and_store(&mut self) -> Result<PhotoRecord, GalleryError> {
        let options = CaptureOptions::camera_uri(self.config.quality);
        let handle = self.camera.capture(&options).await?;
        log::debug!("Captured image: {:?}", handle);

        let record = self.persist_image(&handle).await?;
        self.photos.insert(0, record.clone());
        self.persist_index().await?;

        log::info!(
            "Stored photo {} ({} in gallery)",
            record.storage_path,
            self.photos.len()
        );
        Ok(record)
    }

    async fn persist_image(&self, handle: &ImageHandle) -> Result<PhotoRecord, GalleryError> {
        let data = self.encoder.encode(handle).await?;

        let filename = format!(
            "{}.{}",
            self.clock.now_millis(),
            self.config.file_extension
        );
        let saved = self
            .files
            .write(&filename, &data, self.config.directory)
            .await?;
        log::debug!("Wrote {} to {}", filename, saved.uri);

        let display_reference = self.encoder.display_reference(handle, &saved)?;
        Ok(PhotoRecord::new(filename, display_reference))
    }

    async fn persist_index(&self) -> Result<(), GalleryError> {
        let json = serde_json::to_string(&self.photos)
            .map_err(|e| GalleryError::IndexPersist(KeyValueError::Other(e.to_string())))?;
        self.preferences.set(&self.config.index_key, &json).await?;
        Ok(())
    }

    /// Loads the index and, where needed, rebuilds display references.
    ///
    /// A missing or unparsable index yields an empty gallery. With
    /// `RestorePolicy::Abort` an unreadable photo file fails the restore and
    /// leaves the current index untouched.
    pub async fn restore(&mut self) -> Result<(), GalleryError> {
        let stored = self
            .preferences
            .get(&self.config.index_key)
            .await
            .map_err(|e| GalleryError::IndexRestore(e.to_string()))?;

        let mut photos: Vec<PhotoRecord> = match stored {
            None => Vec::new(),
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable gallery index: {}", e);
                Vec::new()
            }),
        };

        if self.encoder.rehydrates_on_restore() {
            for photo in photos.iter_mut() {
                match self
                    .files
                    .read(&photo.storage_path, Some(self.config.directory))
                    .await
                {
                    Ok(data) => photo.display_reference = data_url(&photo.storage_path, &data),
                    Err(e) => match self.config.restore_policy {
                        RestorePolicy::Abort => {
                            return Err(GalleryError::IndexRestore(format!(
                                "{}: {}",
                                photo.storage_path, e
                            )));
                        }
                        RestorePolicy::SkipUnreadable => {
                            log::warn!("Skipping unreadable photo {}: {}", photo.storage_path, e);
                            photo.display_reference.clear();
                        }
                    },
                }
            }
        }

        log::info!("Restored {} photos", photos.len());
        self.photos = photos;
        Ok(())
    }
}
