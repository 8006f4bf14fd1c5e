/// Prefix the native shell serves local files under
const FILE_ROUTE: &str = "/_capacitor_file_";

/// Converts native file URIs into sources the web view can render
pub trait UriBridge: Send + Sync {
    fn to_web_src(&self, native_uri: &str) -> String;
}

/// Serves local files from a fixed origin, the way embedded web views do
#[derive(Debug, Clone)]
pub struct LocalhostBridge {
    origin: String,
}

impl LocalhostBridge {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for LocalhostBridge {
    fn default() -> Self {
        Self::new("http://localhost")
    }
}

impl UriBridge for LocalhostBridge {
    fn to_web_src(&self, native_uri: &str) -> String {
        if let Some(path) = native_uri.strip_prefix("file://") {
            format!("{}{}{}", self.origin, FILE_ROUTE, path)
        } else if native_uri.starts_with('/') {
            format!("{}{}{}", self.origin, FILE_ROUTE, native_uri)
        } else {
            native_uri.to_string()
        }
    }
}
