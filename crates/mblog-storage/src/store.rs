//! The storage backend capability.

use async_trait::async_trait;

use crate::error::StorageResult;

/// A storage backend for image objects.
///
/// Backends are selected once at startup (see [`crate::make_store`])
/// and shared behind `Arc<dyn ImageStore>`. Uploads have overwrite
/// semantics: re-uploading to an existing name replaces the prior
/// content. A failed upload must leave no partial object visible at
/// the target name.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `name`, returning the public URL.
    async fn upload(&self, bytes: Vec<u8>, name: &str) -> StorageResult<String>;

    /// Remove the object stored under `name`. Deleting a missing
    /// object is not an error.
    async fn delete(&self, name: &str) -> StorageResult<()>;

    /// The URL an object stored under `name` is (or will be) served
    /// from. Pure string mapping, independent of whether the object
    /// exists yet; `upload` returns this same URL on success.
    fn url_for(&self, name: &str) -> String;
}

/// MIME type for an object name, keyed on its extension.
pub(crate) fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("webp") => "image/webp",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
