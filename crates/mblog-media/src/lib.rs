//! Image validation, decoding and resizing.
//!
//! This crate provides:
//! - Advisory upload validation (declared size and content type)
//! - Decode from raw bytes
//! - Canonical WebP re-encode
//! - Proportional resize to a target width

pub mod error;
pub mod ops;
pub mod validate;

pub use error::{MediaError, MediaResult};
pub use ops::{decode, encode_webp, resize_to_width};
pub use validate::{validate_upload, ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES};
