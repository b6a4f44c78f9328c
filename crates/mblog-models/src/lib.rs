//! Shared data models for the microblog media pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Media identifiers
//! - Rendition configuration and object naming
//! - Preview URL sets

pub mod media;
pub mod rendition;

pub use media::MediaId;
pub use rendition::{PreviewUrlSet, RenditionSpec, ORIGINAL_LABEL};
