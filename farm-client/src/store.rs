use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::ClientError;

/// Key the session token is persisted under.
pub const TOKEN_KEY: &str = "jwtToken";

/// Durable storage for the session token.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Stored token, if any. Empty values read as absent.
    async fn load(&self) -> Result<Option<String>, ClientError>;

    async fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Remove the token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), ClientError>;
}

/// JSON file holding `{"jwtToken": "<token>"}`.
///
/// Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, ClientError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(store_error("read", &self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            ClientError::TokenStore(format!("parse {}: {}", self.path.display(), e))
        })
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| store_error("mkdir", parent, e))?;
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::TokenStore(e.to_string()))?;
        fs::write(&self.path, raw)
            .await
            .map_err(|e| store_error("write", &self.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| store_error("chmod", &self.path, e))?;
        }

        Ok(())
    }
}

fn store_error(action: &str, path: &Path, e: std::io::Error) -> ClientError {
    ClientError::TokenStore(format!("{} {}: {}", action, path.display(), e))
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .read_entries()
            .await?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
            .map(str::to_string))
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        let mut entries = self.read_entries().await?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries).await
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let mut entries = self.read_entries().await?;
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            return fs::remove_file(&self.path)
                .await
                .or_else(|e| match e.kind() {
                    ErrorKind::NotFound => Ok(()),
                    _ => Err(store_error("delete", &self.path, e)),
                });
        }

        self.write_entries(&entries).await
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .token
            .read()
            .await
            .clone()
            .filter(|token| !token.trim().is_empty()))
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.token.write().await = None;
        Ok(())
    }
}
