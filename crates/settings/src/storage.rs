//! Persistence resource for the encoded settings payload

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// A single named byte-stream resource.
///
/// Implementations acquire and release any handle within each call.
#[async_trait]
pub trait SettingsStorage: Debug + Send + Sync {
    /// Whether the resource exists
    async fn exists(&self) -> bool;

    /// Read the entire resource
    async fn read_all(&self) -> io::Result<Vec<u8>>;

    /// Replace the resource contents
    async fn write_all(&self, data: &[u8]) -> io::Result<()>;

    /// Human-readable location for log lines
    fn location(&self) -> String;
}

/// Settings file on the local file system
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStorage for FileStorage {
    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    async fn write_all(&self, data: &[u8]) -> io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, data).await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory resource. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource that already holds `data`
    pub fn with_contents(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Snapshot of the current contents
    pub async fn contents(&self) -> Option<Vec<u8>> {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl SettingsStorage for MemoryStorage {
    async fn exists(&self) -> bool {
        self.data.lock().await.is_some()
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        self.data
            .lock()
            .await
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "memory resource is empty"))
    }

    async fn write_all(&self, data: &[u8]) -> io::Result<()> {
        *self.data.lock().await = Some(data.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
