//! Local filesystem backend.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::ImageStore;

/// Configuration for [`LocalStore`].
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    /// Directory objects are written to.
    pub root: PathBuf,
    /// URL prefix objects are served from.
    pub public_prefix: String,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
        }
    }
}

impl LocalStoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            public_prefix: std::env::var("UPLOADS_URL_PREFIX")
                .unwrap_or_else(|_| "/uploads".to_string()),
        }
    }
}

/// Stores objects as files under a configured directory, served from
/// a stable URL prefix by the web tier.
pub struct LocalStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalStore {
    /// Create the store, creating the uploads directory if needed.
    pub fn new(config: LocalStoreConfig) -> StorageResult<Self> {
        std::fs::create_dir_all(&config.root).map_err(|e| {
            StorageError::config_error(format!(
                "cannot create uploads dir {}: {}",
                config.root.display(),
                e
            ))
        })?;

        info!("Local store ready at {}", config.root.display());

        Ok(Self {
            root: config.root,
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::new(LocalStoreConfig::from_env())
    }

    fn object_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait::async_trait]
impl ImageStore for LocalStore {
    async fn upload(&self, bytes: Vec<u8>, name: &str) -> StorageResult<String> {
        let path = self.object_path(name);
        debug!("Writing {} bytes to {}", bytes.len(), path.display());

        // Write to a side file and rename so a failed write never
        // leaves a partial object at the public name.
        let tmp = path.with_extension("part");
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(StorageError::upload_failed(format!(
                "{}: {}",
                path.display(),
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(StorageError::upload_failed(format!(
                "{}: {}",
                path.display(),
                e
            )));
        }

        Ok(self.url_for(name))
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.object_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::delete_failed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix, name)
    }
}
