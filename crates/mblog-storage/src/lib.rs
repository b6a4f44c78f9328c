//! Pluggable image storage backends.
//!
//! This crate provides:
//! - The [`ImageStore`] capability (upload/delete plus deterministic
//!   URL mapping)
//! - Local filesystem backend
//! - S3-compatible object storage backend
//! - Provider selection from configuration

pub mod error;
pub mod local;
pub mod provider;
pub mod s3;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use local::{LocalStore, LocalStoreConfig};
pub use provider::{make_store, StorageProvider};
pub use s3::{S3Config, S3Store};
pub use store::ImageStore;
