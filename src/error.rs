use photo_gallery::{GalleryError, KeyValueError};
use std::fmt;

/// Central error types for the photo diary
#[derive(Debug)]
pub enum AppError {
    /// Gallery store error (capture, storage, index)
    Gallery(GalleryError),
    /// Preferences database could not be opened
    Preferences(KeyValueError),
    /// Config file could not be parsed
    Config(String),
    /// Filesystem error
    Filesystem(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Gallery(e) => write!(f, "{}", e),
            AppError::Preferences(e) => write!(f, "Preferences error: {}", e),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<GalleryError> for AppError {
    fn from(e: GalleryError) -> Self {
        AppError::Gallery(e)
    }
}

impl From<KeyValueError> for AppError {
    fn from(e: KeyValueError) -> Self {
        AppError::Preferences(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl AppError {
    /// Short message suitable for end users
    pub fn user_message(&self) -> String {
        match self {
            AppError::Gallery(GalleryError::Capture(e)) => format!("No photo taken: {}", e),
            AppError::Gallery(GalleryError::IndexRestore(_)) => {
                "The gallery could not be loaded.".to_string()
            }
            AppError::Gallery(_) => "The photo could not be saved.".to_string(),
            AppError::Preferences(_) => "A database error occurred. Please try again.".to_string(),
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_gallery::CameraError;

    #[test]
    fn test_user_message_for_cancelled_capture() {
        let err = AppError::from(GalleryError::Capture(CameraError::Cancelled(
            "no image".to_string(),
        )));
        assert_eq!(err.user_message(), "No photo taken: Cancelled: no image");
    }

    #[test]
    fn test_user_message_for_restore() {
        let err = AppError::from(GalleryError::IndexRestore("1.jpeg".to_string()));
        assert_eq!(err.user_message(), "The gallery could not be loaded.");
    }
}
