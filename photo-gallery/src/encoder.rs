//! Platform strategies for turning camera output into storable data.
//!
//! Hybrid shells hand the camera result over as a native file which the file
//! store can read as base64 directly. Browsers only give us a web path, so the
//! image is fetched as a blob and converted here. The store picks one encoder
//! at construction time and never branches on the platform again.

use crate::bridge::UriBridge;
use crate::camera::CameraError;
use crate::filesystem::{uri_to_path, FileStore};
use crate::models::{FileRef, ImageHandle};
use crate::store::GalleryError;
use async_trait::async_trait;
use base64::Engine;
use std::sync::Arc;

const FALLBACK_MIME: &str = "image/jpeg";

/// Platform-dependent part of persisting a photo
#[async_trait]
pub trait PhotoEncoder: Send + Sync {
    /// Base64 payload of the captured image
    async fn encode(&self, handle: &ImageHandle) -> Result<String, GalleryError>;

    /// Display reference for a freshly written photo
    fn display_reference(
        &self,
        handle: &ImageHandle,
        saved: &FileRef,
    ) -> Result<String, GalleryError>;

    /// Whether display references must be rebuilt from file content on restore
    fn rehydrates_on_restore(&self) -> bool;
}

/// Fetches the bytes behind a web-viewable path
#[async_trait]
pub trait BlobSource: Send + Sync {
    async fn fetch(&self, web_path: &str) -> std::io::Result<Vec<u8>>;
}

/// Blob source for `file://` URIs and plain local paths
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBlobSource;

#[async_trait]
impl BlobSource for LocalBlobSource {
    async fn fetch(&self, web_path: &str) -> std::io::Result<Vec<u8>> {
        let path = uri_to_path(web_path);
        tokio::task::spawn_blocking(move || std::fs::read(path))
            .await
            .map_err(std::io::Error::other)?
    }
}

/// Encoder for hybrid platforms: reads the camera's native file
pub struct NativeEncoder {
    files: Arc<dyn FileStore>,
    bridge: Arc<dyn UriBridge>,
}

impl NativeEncoder {
    pub fn new(files: Arc<dyn FileStore>, bridge: Arc<dyn UriBridge>) -> Self {
        Self { files, bridge }
    }
}

#[async_trait]
impl PhotoEncoder for NativeEncoder {
    async fn encode(&self, handle: &ImageHandle) -> Result<String, GalleryError> {
        let native_path = handle.native_path.as_deref().ok_or_else(|| {
            GalleryError::Capture(CameraError::Other(
                "Camera returned no native path".to_string(),
            ))
        })?;

        log::debug!("Reading native camera file {}", native_path);
        self.files
            .read(native_path, None)
            .await
            .map_err(GalleryError::StorageWrite)
    }

    fn display_reference(
        &self,
        _handle: &ImageHandle,
        saved: &FileRef,
    ) -> Result<String, GalleryError> {
        Ok(self.bridge.to_web_src(&saved.uri))
    }

    fn rehydrates_on_restore(&self) -> bool {
        false
    }
}

/// Encoder for browsers: fetches the web path and converts the blob
pub struct WebEncoder {
    blobs: Arc<dyn BlobSource>,
}

impl WebEncoder {
    pub fn new(blobs: Arc<dyn BlobSource>) -> Self {
        Self { blobs }
    }
}

fn web_path(handle: &ImageHandle) -> Result<&str, GalleryError> {
    handle.web_path.as_deref().ok_or_else(|| {
        GalleryError::Capture(CameraError::Other(
            "Camera returned no web path".to_string(),
        ))
    })
}

#[async_trait]
impl PhotoEncoder for WebEncoder {
    async fn encode(&self, handle: &ImageHandle) -> Result<String, GalleryError> {
        let web_path = web_path(handle)?;

        log::debug!("Fetching blob {}", web_path);
        let blob = self
            .blobs
            .fetch(web_path)
            .await
            .map_err(|e| GalleryError::Encoding(format!("Fetching {} failed: {}", web_path, e)))?;

        tokio::task::spawn_blocking(move || base64::engine::general_purpose::STANDARD.encode(blob))
            .await
            .map_err(|e| GalleryError::Encoding(format!("Blob conversion failed: {}", e)))
    }

    fn display_reference(
        &self,
        handle: &ImageHandle,
        _saved: &FileRef,
    ) -> Result<String, GalleryError> {
        // Already loaded by the camera; reuse it instead of re-encoding
        web_path(handle).map(str::to_string)
    }

    fn rehydrates_on_restore(&self) -> bool {
        true
    }
}

/// MIME type for a photo filename, based on its extension
pub fn mime_for_filename(filename: &str) -> &'static str {
    image::ImageFormat::from_path(filename)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// Inline data URL for base64 image content
pub fn data_url(filename: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_for_filename(filename), base64_data)
}
