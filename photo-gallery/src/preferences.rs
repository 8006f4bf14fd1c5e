use crate::schema::init_preferences_schema;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Error type for key-value store operations
#[derive(Debug)]
pub enum KeyValueError {
    DatabaseError(rusqlite::Error),
    Other(String),
}

impl std::fmt::Display for KeyValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyValueError::DatabaseError(e) => write!(f, "Database error: {}", e),
            KeyValueError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for KeyValueError {}

impl From<rusqlite::Error> for KeyValueError {
    fn from(err: rusqlite::Error) -> Self {
        KeyValueError::DatabaseError(err)
    }
}

/// String key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError>;
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;
}

/// Key-value store backed by a SQLite `preferences` table
pub struct SqlitePreferences {
    conn: Mutex<Connection>,
}

impl SqlitePreferences {
    /// Opens (and creates if needed) the database at `path`
    pub fn open(path: &Path) -> Result<Self, KeyValueError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| KeyValueError::Other(format!("Database directory: {}", e)))?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, KeyValueError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, KeyValueError> {
        init_preferences_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, KeyValueError> {
        self.conn
            .lock()
            .map_err(|_| KeyValueError::Other("Preferences connection poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqlitePreferences {
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let prefs = SqlitePreferences::open_in_memory().unwrap();
        assert_eq!(prefs.get("photos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let prefs = SqlitePreferences::open_in_memory().unwrap();
        prefs.set("photos", "[]").await.unwrap();
        prefs.set("photos", "[1]").await.unwrap();
        assert_eq!(prefs.get("photos").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("prefs.db");

        {
            let prefs = SqlitePreferences::open(&db).unwrap();
            prefs.set("photos", "[\"a\"]").await.unwrap();
        }

        let prefs = SqlitePreferences::open(&db).unwrap();
        assert_eq!(
            prefs.get("photos").await.unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }
}
