use crate::config::AppConfig;
use crate::error::AppError;
use photo_gallery::{
    Camera, Clock, GalleryBackends, GalleryStore, ImportCamera, LocalBlobSource, LocalFileStore,
    LocalhostBridge, SqlitePreferences, UnavailableCamera,
};
use std::path::Path;
use std::sync::Arc;

/// Wires a gallery store to the desktop adapters described by `config`.
///
/// `source` is the image the next capture imports; without one, captures
/// fail as unsupported.
pub fn build_store(
    config: &AppConfig,
    source: Option<&Path>,
    clock: Arc<dyn Clock>,
) -> Result<GalleryStore, AppError> {
    let camera: Arc<dyn Camera> = match source {
        Some(path) => Arc::new(ImportCamera::new(path, config.cache_dir(), clock.clone())),
        None => Arc::new(UnavailableCamera),
    };

    let backends = GalleryBackends {
        camera,
        files: Arc::new(LocalFileStore::new(&config.data_dir)),
        preferences: Arc::new(SqlitePreferences::open(&config.database_path())?),
        bridge: Arc::new(LocalhostBridge::default()),
        blobs: Arc::new(LocalBlobSource),
        clock,
    };

    Ok(GalleryStore::new(
        config.platform,
        backends,
        config.gallery_config(),
    ))
}

/// Shortens data URLs for terminal output
pub fn abbreviate(display_reference: &str) -> String {
    const MAX: usize = 64;
    if display_reference.len() <= MAX {
        return display_reference.to_string();
    }
    let cut = display_reference
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= MAX)
        .last()
        .unwrap_or(0);
    format!(
        "{}... ({} bytes)",
        &display_reference[..cut],
        display_reference.len()
    )
}
