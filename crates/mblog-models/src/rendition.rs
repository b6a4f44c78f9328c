//! Rendition configuration and object naming.
//!
//! The object names produced here are the wire contract with the
//! frontend: `{id}-original.{ext}` for the canonical upload and
//! `{id}-{width}w.{ext}` for each resized rendition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::MediaId;

/// Label used for the original (non-resized) object.
pub const ORIGINAL_LABEL: &str = "original";

/// Fixed set of target rendition widths for a process lifetime.
///
/// Widths are kept sorted ascending and deduplicated; the worker
/// produces renditions in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionSpec {
    widths: Vec<u32>,
    extension: String,
}

impl Default for RenditionSpec {
    fn default() -> Self {
        Self::new(vec![400, 800, 1200])
    }
}

impl RenditionSpec {
    /// Create a spec with the given target widths and the canonical
    /// WebP output extension.
    pub fn new(mut widths: Vec<u32>) -> Self {
        widths.sort_unstable();
        widths.dedup();
        Self {
            widths,
            extension: "webp".to_string(),
        }
    }

    /// Target widths, ascending.
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Output file extension (without the dot).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Object name for the original upload.
    pub fn original_name(&self, id: &MediaId) -> String {
        format!("{}-original.{}", id, self.extension)
    }

    /// Object name for a rendition at the given width.
    pub fn rendition_name(&self, id: &MediaId, width: u32) -> String {
        format!("{}-{}w.{}", id, width, self.extension)
    }

    /// Label for a rendition at the given width, e.g. `"400w"`.
    pub fn label(width: u32) -> String {
        format!("{}w", width)
    }
}

/// Mapping from rendition label to URL.
///
/// Computed from a [`MediaId`] and a [`RenditionSpec`], never stored.
/// The URLs are deterministic and valid as names before the bytes
/// behind them exist; clients retry image loads until the worker has
/// caught up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewUrlSet(BTreeMap<String, String>);

impl PreviewUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, url: impl Into<String>) {
        self.0.insert(label.into(), url.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
