//! Asynchronous image derivation pipeline.
//!
//! This crate provides:
//! - Synchronous submission: decode, canonical re-encode, blocking
//!   original upload
//! - An unbounded in-memory derivation queue
//! - A single background worker producing resized renditions
//! - Deterministic preview URL resolution, available before the
//!   renditions exist

pub mod config;
pub mod error;
pub mod guard;
pub mod pipeline;
pub mod queue;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use guard::ProcessingGuard;
pub use pipeline::{ImagePipeline, Submission};
pub use queue::{DerivationQueue, WorkItem};

// Validation is part of the pipeline's public contract; callers gate
// uploads with it before submitting.
pub use mblog_media::validate_upload;
