use crate::models::{Directory, FileRef};
use async_trait::async_trait;
use base64::Engine;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Error type for file store operations
#[derive(Debug)]
pub enum FileStoreError {
    NotFound(String),
    InvalidData(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for FileStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStoreError::NotFound(path) => write!(f, "File not found: {}", path),
            FileStoreError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            FileStoreError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FileStoreError {}

impl From<std::io::Error> for FileStoreError {
    fn from(err: std::io::Error) -> Self {
        FileStoreError::IoError(err)
    }
}

/// Durable file storage that speaks base64 on both sides
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Writes base64 `data` to `path` inside `directory`
    async fn write(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<FileRef, FileStoreError>;

    /// Reads a file as base64. Without a directory, `path` is an absolute
    /// path or a `file://` URI.
    async fn read(&self, path: &str, directory: Option<Directory>)
        -> Result<String, FileStoreError>;
}

/// `file://` URI for a local path
pub fn file_uri(path: &Path) -> String {
    format!("{}{}", FILE_SCHEME, path.display())
}

/// Local path behind a `file://` URI; plain paths pass through
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri))
}

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// File store rooted in a local directory, one subdirectory per area
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn directory_path(&self, directory: Directory) -> PathBuf {
        self.root.join(directory.as_str())
    }

    fn resolve(&self, path: &str, directory: Option<Directory>) -> PathBuf {
        match directory {
            Some(directory) => self.directory_path(directory).join(path),
            None => uri_to_path(path),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<FileRef, FileStoreError> {
        let target = self.resolve(path, Some(directory));
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FileStoreError::InvalidData(format!("{}: {}", path, e)))?;

        tokio::task::spawn_blocking(move || -> Result<FileRef, FileStoreError> {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, bytes)?;
            let canonical = std::fs::canonicalize(&target)?;
            log::debug!("Wrote {:?}", canonical);
            Ok(FileRef {
                uri: file_uri(&canonical),
            })
        })
        .await
        .map_err(|e| FileStoreError::IoError(std::io::Error::other(e)))?
    }

    async fn read(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, FileStoreError> {
        let source = self.resolve(path, directory);

        let bytes = tokio::task::spawn_blocking(move || match std::fs::read(&source) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FileStoreError::NotFound(source.display().to_string()))
            }
            Err(e) => Err(FileStoreError::IoError(e)),
        })
        .await
        .map_err(|e| FileStoreError::IoError(std::io::Error::other(e)))??;

        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_round_trip() {
        let uri = file_uri(Path::new("/tmp/photos/1.jpeg"));
        assert_eq!(uri, "file:///tmp/photos/1.jpeg");
        assert_eq!(uri_to_path(&uri), PathBuf::from("/tmp/photos/1.jpeg"));
        assert_eq!(uri_to_path("/plain/path"), PathBuf::from("/plain/path"));
    }

    #[tokio::test]
    async fn test_write_then_read_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        // "hello" in base64
        let saved = store.write("1000.jpeg", "aGVsbG8=", Directory::Data).await.unwrap();
        assert!(saved.uri.starts_with("file://"));
        assert!(saved.uri.ends_with("data/1000.jpeg"));
        assert_eq!(
            std::fs::read(dir.path().join("data").join("1000.jpeg")).unwrap(),
            b"hello"
        );

        let data = store.read("1000.jpeg", Some(Directory::Data)).await.unwrap();
        assert_eq!(data, "aGVsbG8=");

        // Same file through its URI
        let data = store.read(&saved.uri, None).await.unwrap();
        assert_eq!(data, "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let result = store.read("nope.jpeg", Some(Directory::Data)).await;
        assert!(matches!(result, Err(FileStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_write_rejects_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let result = store.write("x.jpeg", "***", Directory::Data).await;
        assert!(matches!(result, Err(FileStoreError::InvalidData(_))));
    }
}
