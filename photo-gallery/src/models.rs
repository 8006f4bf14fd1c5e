use serde::{Deserialize, Serialize};

/// A captured photo as held in the gallery index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Filename inside the gallery directory of the file store
    pub storage_path: String,
    /// String usable directly as an image source (converted URI or data URL)
    pub display_reference: String,
}

impl PhotoRecord {
    pub fn new(storage_path: impl Into<String>, display_reference: impl Into<String>) -> Self {
        Self {
            storage_path: storage_path.into(),
            display_reference: display_reference.into(),
        }
    }

    /// False when restore could not rebuild the display reference
    pub fn is_displayable(&self) -> bool {
        !self.display_reference.is_empty()
    }
}

/// Transient output of a camera capture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageHandle {
    /// Native file path or URI of the camera output (hybrid platforms)
    pub native_path: Option<String>,
    /// Web-viewable path already loaded by the camera (e.g. a blob URL)
    pub web_path: Option<String>,
    /// Image format reported by the camera, e.g. "jpeg"
    pub format: String,
}

/// How the camera should hand back the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResultType {
    Uri,
    Base64,
    DataUrl,
}

/// Where the camera takes the image from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Prompt,
    Camera,
    Photos,
}

/// Options for a single capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// JPEG quality, 0..=100
    pub quality: u8,
}

impl CaptureOptions {
    /// Single shot from the camera, handed back as a URI
    pub fn camera_uri(quality: u8) -> Self {
        Self {
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            quality: quality.min(100),
        }
    }
}

/// Storage area of the file store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directory {
    /// Application private data
    Data,
    /// Scratch space, may be cleared by the OS
    Cache,
    /// User-visible documents
    Documents,
}

impl Directory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::Data => "data",
            Directory::Cache => "cache",
            Directory::Documents => "documents",
        }
    }
}

/// Canonical handle returned by a file store write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub uri: String,
}

/// Runtime environment the gallery runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Native shell with file system and camera bridges
    Hybrid,
    /// Browser sandbox
    Web,
}

impl Platform {
    pub fn is_hybrid(&self) -> bool {
        matches!(self, Platform::Hybrid)
    }

    /// Best guess for the current build target
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Hybrid
        }
    }
}

/// What restore does when a single photo file cannot be read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Fail the whole restore and leave the in-memory index untouched
    #[default]
    Abort,
    /// Keep the record without a display reference and continue
    SkipUnreadable,
}

/// Configuration for the gallery store
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Key under which the index is stored in the key-value store
    pub index_key: String,
    /// Suffix of generated photo filenames
    pub file_extension: String,
    /// File store area photos are written to
    pub directory: Directory,
    /// Requested capture quality
    pub quality: u8,
    pub restore_policy: RestorePolicy,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            index_key: "photos".to_string(),
            file_extension: "jpeg".to_string(),
            directory: Directory::Data,
            quality: 100,
            restore_policy: RestorePolicy::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = PhotoRecord::new("1000.jpeg", "blob:abc");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"storagePath":"1000.jpeg","displayReference":"blob:abc"}"#
        );
    }

    #[test]
    fn test_capture_options_clamp_quality() {
        let options = CaptureOptions::camera_uri(250);
        assert_eq!(options.quality, 100);
        assert_eq!(options.result_type, CameraResultType::Uri);
        assert_eq!(options.source, CameraSource::Camera);
    }

    #[test]
    fn test_displayable() {
        assert!(PhotoRecord::new("a.jpeg", "data:image/jpeg;base64,AA==").is_displayable());
        assert!(!PhotoRecord::new("a.jpeg", "").is_displayable());
    }
}
