//! Storage provider selection.
//!
//! A single configured string picks the backend for the process.
//! Unknown values are a startup-time configuration error, never a
//! per-request one.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::local::LocalStore;
use crate::s3::S3Store;
use crate::store::ImageStore;

/// Supported storage providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Local,
    S3,
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::Local => "local",
            StorageProvider::S3 => "s3",
        }
    }
}

impl FromStr for StorageProvider {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageProvider::Local),
            "s3" => Ok(StorageProvider::S3),
            other => Err(StorageError::unknown_provider(other)),
        }
    }
}

/// Resolve the configured backend.
///
/// `provider` comes from configuration (`STORAGE_PROVIDER`); callers
/// run this once at bootstrap and treat an error as fatal.
pub fn make_store(provider: &str) -> StorageResult<Arc<dyn ImageStore>> {
    let provider = StorageProvider::from_str(provider)?;
    info!("Using {} storage backend", provider.as_str());

    match provider {
        StorageProvider::Local => Ok(Arc::new(LocalStore::from_env()?)),
        StorageProvider::S3 => Ok(Arc::new(S3Store::from_env()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_parse() {
        assert_eq!("local".parse::<StorageProvider>().unwrap(), StorageProvider::Local);
        assert_eq!("S3".parse::<StorageProvider>().unwrap(), StorageProvider::S3);
    }

    #[test]
    fn unknown_provider_is_a_config_error() {
        let err = "ftp".parse::<StorageProvider>().unwrap_err();
        assert!(matches!(err, StorageError::UnknownProvider(_)));
    }

    #[test]
    fn make_store_rejects_unknown_provider() {
        assert!(make_store("carrier-pigeon").is_err());
    }
}
