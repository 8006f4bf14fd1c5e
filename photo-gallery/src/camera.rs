// Camera capability
//
// The gallery only needs "take one picture and tell me where it is". Real
// devices plug in their own implementation; `ImportCamera` stands in on the
// desktop by importing an existing image file as if it had just been shot.

use crate::clock::Clock;
use crate::filesystem::file_uri;
use crate::models::{CaptureOptions, ImageHandle};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum CameraError {
    PermissionDenied(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            CameraError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            CameraError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            CameraError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

/// Takes a single picture
#[async_trait]
pub trait Camera: Send + Sync {
    async fn capture(&self, options: &CaptureOptions) -> Result<ImageHandle, CameraError>;
}

/// Camera for platforms without any capture support
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCamera;

#[async_trait]
impl Camera for UnavailableCamera {
    async fn capture(&self, _options: &CaptureOptions) -> Result<ImageHandle, CameraError> {
        Err(CameraError::PlatformNotSupported(
            "No camera available on this platform".to_string(),
        ))
    }
}

/// Desktop camera that "captures" an existing image file.
///
/// The source is copied into the cache directory as `camera_<millis>.<ext>`,
/// mirroring how mobile cameras leave their output in a temporary file.
pub struct ImportCamera {
    source: PathBuf,
    cache_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl ImportCamera {
    pub fn new(
        source: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source: source.into(),
            cache_dir: cache_dir.into(),
            clock,
        }
    }
}

#[async_trait]
impl Camera for ImportCamera {
    async fn capture(&self, options: &CaptureOptions) -> Result<ImageHandle, CameraError> {
        let source = self.source.clone();
        let cache_dir = self.cache_dir.clone();
        let millis = self.clock.now_millis();
        log::debug!(
            "Importing {:?} as camera shot (quality {})",
            source,
            options.quality
        );

        tokio::task::spawn_blocking(move || -> Result<ImageHandle, CameraError> {
            if !source.is_file() {
                return Err(CameraError::Cancelled(format!(
                    "No image at {}",
                    source.display()
                )));
            }

            let format = image::ImageFormat::from_path(&source).map_err(|e| {
                CameraError::Other(format!("Unsupported image {}: {}", source.display(), e))
            })?;
            let ext = format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("jpeg")
                .to_string();

            std::fs::create_dir_all(&cache_dir)
                .map_err(|e| CameraError::Other(format!("Cache directory: {}", e)))?;
            let shot = cache_dir.join(format!("camera_{}.{}", millis, ext));
            std::fs::copy(&source, &shot)
                .map_err(|e| CameraError::Other(format!("Copy failed: {}", e)))?;

            let uri = file_uri(&shot);
            Ok(ImageHandle {
                native_path: Some(uri.clone()),
                web_path: Some(uri),
                format: ext,
            })
        })
        .await
        .map_err(|e| CameraError::Other(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    #[tokio::test]
    async fn test_import_copies_into_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("holiday.jpg");
        std::fs::write(&source, b"not really a jpeg").unwrap();
        let cache = dir.path().join("cache");

        let camera = ImportCamera::new(&source, &cache, Arc::new(FixedClock(42)));
        let handle = camera
            .capture(&CaptureOptions::camera_uri(100))
            .await
            .unwrap();

        assert_eq!(handle.format, "jpg");
        let native = handle.native_path.unwrap();
        assert!(native.starts_with("file://"));
        assert!(native.ends_with("camera_42.jpg"));
        assert_eq!(
            std::fs::read(cache.join("camera_42.jpg")).unwrap(),
            b"not really a jpeg"
        );
    }

    #[tokio::test]
    async fn test_missing_source_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let camera = ImportCamera::new(
            dir.path().join("missing.jpg"),
            dir.path().join("cache"),
            Arc::new(FixedClock(1)),
        );

        let result = camera.capture(&CaptureOptions::camera_uri(100)).await;
        assert!(matches!(result, Err(CameraError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, b"hello").unwrap();
        let camera =
            ImportCamera::new(&source, dir.path().join("cache"), Arc::new(FixedClock(1)));

        let result = camera.capture(&CaptureOptions::camera_uri(100)).await;
        assert!(matches!(result, Err(CameraError::Other(_))));
    }
}
