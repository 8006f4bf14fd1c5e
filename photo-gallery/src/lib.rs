//! # Photo Gallery
//!
//! A reusable store for locally captured photos.
//!
//! The store captures an image through a [`Camera`], writes it to a
//! [`FileStore`], keeps an ordered index of [`PhotoRecord`]s (newest first)
//! and mirrors that index to a [`KeyValueStore`]. On restart, [`GalleryStore::restore`]
//! rebuilds the index together with image sources the UI can display.
//!
//! ## Platform Separation
//!
//! Hybrid shells read the camera's native file and show photos through a
//! converted file URI ([`NativeEncoder`]). Browsers fetch the camera's web
//! path as a blob and show restored photos as data URLs ([`WebEncoder`]).
//! The encoder is chosen once from [`Platform`] when the store is built.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::*;
//! use std::sync::Arc;
//!
//! let backends = GalleryBackends {
//!     camera: Arc::new(ImportCamera::new("shot.jpg", "./data/cache", Arc::new(SystemClock))),
//!     files: Arc::new(LocalFileStore::new("./data")),
//!     preferences: Arc::new(SqlitePreferences::open_in_memory()?),
//!     bridge: Arc::new(LocalhostBridge::default()),
//!     blobs: Arc::new(LocalBlobSource),
//!     clock: Arc::new(SystemClock),
//! };
//!
//! let mut store = GalleryStore::new(Platform::Hybrid, backends, GalleryConfig::default());
//! store.restore().await?;
//! store.capture_and_store().await?;
//! ```

pub mod bridge;
pub mod camera;
pub mod clock;
pub mod encoder;
pub mod filesystem;
pub mod models;
pub mod preferences;
pub mod schema;
pub mod store;

pub use bridge::{LocalhostBridge, UriBridge};
pub use camera::{Camera, CameraError, ImportCamera, UnavailableCamera};
pub use clock::{Clock, SystemClock};
pub use encoder::{
    data_url, mime_for_filename, BlobSource, LocalBlobSource, NativeEncoder, PhotoEncoder,
    WebEncoder,
};
pub use filesystem::{get_app_data_dir, FileStore, FileStoreError, LocalFileStore};
pub use models::{
    CameraResultType, CameraSource, CaptureOptions, Directory, FileRef, GalleryConfig,
    ImageHandle, Platform, PhotoRecord, RestorePolicy,
};
pub use preferences::{KeyValueError, KeyValueStore, SqlitePreferences};
pub use schema::init_preferences_schema;
pub use store::{GalleryBackends, GalleryError, GalleryStore};
