use crate::error::AppError;
use photo_gallery::{get_app_data_dir, Directory, GalleryConfig, Platform, RestorePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "photo-diary.toml";

/// Settings read from `photo-diary.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the photo and cache directories
    pub data_dir: PathBuf,
    /// Preferences database, relative to `data_dir`
    pub database_file: String,
    pub platform: Platform,
    pub index_key: String,
    pub restore_policy: RestorePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gallery = GalleryConfig::default();
        Self {
            data_dir: get_app_data_dir(),
            database_file: "preferences.db".to_string(),
            platform: Platform::detect(),
            index_key: gallery.index_key,
            restore_policy: gallery.restore_policy,
        }
    }
}

impl AppConfig {
    /// Loads the config file; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    #[allow(dead_code)]
    pub fn to_toml(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join(Directory::Cache.as_str())
    }

    pub fn gallery_config(&self) -> GalleryConfig {
        GalleryConfig {
            index_key: self.index_key.clone(),
            restore_policy: self.restore_policy,
            ..GalleryConfig::default()
        }
    }
}
