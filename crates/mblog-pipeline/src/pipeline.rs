//! The derivation pipeline.
//!
//! One `ImagePipeline` is constructed at bootstrap and owns the queue
//! and guard; `start()` launches the single worker task. Submissions
//! come in concurrently from request handlers, derivations run
//! sequentially in the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use mblog_media as media;
use mblog_models::{MediaId, PreviewUrlSet, RenditionSpec, ORIGINAL_LABEL};
use mblog_storage::ImageStore;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::guard::ProcessingGuard;
use crate::queue::{DerivationQueue, WorkItem};

/// Outcome of a successful submission.
///
/// The original is durably stored by the time this is returned;
/// renditions follow asynchronously at their deterministic URLs.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: MediaId,
    pub original_url: String,
}

/// Image derivation pipeline.
pub struct ImagePipeline {
    store: Arc<dyn ImageStore>,
    renditions: RenditionSpec,
    poll_interval: std::time::Duration,
    queue: DerivationQueue,
    guard: ProcessingGuard,
    started: AtomicBool,
}

impl ImagePipeline {
    /// Create a new pipeline over the given storage backend.
    pub fn new(store: Arc<dyn ImageStore>, config: PipelineConfig) -> Self {
        Self {
            store,
            renditions: config.renditions,
            poll_interval: config.poll_interval,
            queue: DerivationQueue::new(),
            guard: ProcessingGuard::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Accept an uploaded image.
    ///
    /// Validates the declared content type and actual length, decodes
    /// the bytes (failure fails the submission with nothing stored),
    /// re-encodes to WebP and uploads the original synchronously, then
    /// enqueues the raw bytes for background rendition generation.
    pub async fn submit_original(
        &self,
        bytes: Vec<u8>,
        declared_type: &str,
    ) -> PipelineResult<Submission> {
        if !media::validate_upload(bytes.len() as u64, declared_type) {
            return Err(PipelineError::validation(format!(
                "{} bytes of {} not accepted",
                bytes.len(),
                declared_type
            )));
        }

        let id = MediaId::new();

        let img = media::decode(&bytes)?;
        let encoded = media::encode_webp(&img)?;

        let name = self.renditions.original_name(&id);
        let original_url = self.store.upload(encoded, &name).await?;
        info!(media_id = %id, url = %original_url, "Stored original");

        self.queue.push(WorkItem { id: id.clone(), raw: bytes });

        Ok(Submission { id, original_url })
    }

    /// Deterministic URLs for the original and every configured
    /// rendition width.
    ///
    /// Pure resolution over the identifier and rendition spec; it does
    /// not consult the queue or guard, so the result is identical
    /// before, during and after derivation. Clients poll these URLs
    /// until the worker has filled them in.
    pub fn preview_urls(&self, id: &MediaId) -> PreviewUrlSet {
        let mut urls = PreviewUrlSet::new();
        urls.insert(
            ORIGINAL_LABEL,
            self.store.url_for(&self.renditions.original_name(id)),
        );
        for &width in self.renditions.widths() {
            urls.insert(
                RenditionSpec::label(width),
                self.store.url_for(&self.renditions.rendition_name(id, width)),
            );
        }
        urls
    }

    /// Remove the original and all renditions for an identifier.
    ///
    /// Best-effort per object: a failed delete is logged and the rest
    /// are still attempted.
    pub async fn delete_media(&self, id: &MediaId) {
        let mut names = vec![self.renditions.original_name(id)];
        names.extend(
            self.renditions
                .widths()
                .iter()
                .map(|&w| self.renditions.rendition_name(id, w)),
        );

        for name in names {
            if let Err(e) = self.store.delete(&name).await {
                warn!(media_id = %id, object = %name, "Delete failed: {}", e);
            }
        }
    }

    /// Launch the worker loop. Returns `false` if it was already
    /// started; the pipeline runs exactly one worker per process.
    pub fn start(self: &Arc<Self>) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Pipeline worker already started, ignoring");
            return false;
        }

        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            info!("Derivation worker started");
            pipeline.run().await;
        });
        true
    }

    /// Number of items waiting for derivation.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether an identifier is currently mid-derivation.
    pub fn is_processing(&self, id: &MediaId) -> bool {
        self.guard.is_processing(id)
    }

    async fn run(&self) {
        loop {
            match self.queue.pop() {
                Some(item) => self.process(item).await,
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }

    async fn process(&self, item: WorkItem) {
        // Token drop releases the guard on every path out of derive.
        let _token = match self.guard.begin(&item.id) {
            Some(token) => token,
            None => {
                debug!(media_id = %item.id, "Already mid-derivation, dropping item");
                return;
            }
        };

        self.derive(&item).await;
    }

    async fn derive(&self, item: &WorkItem) {
        let img = match media::decode(&item.raw) {
            Ok(img) => img,
            Err(e) => {
                error!(media_id = %item.id, "Decode failed, abandoning item: {}", e);
                return;
            }
        };

        // Each width independent: one failure does not stop siblings.
        for &width in self.renditions.widths() {
            let resized = media::resize_to_width(&img, width);
            let encoded = match media::encode_webp(&resized) {
                Ok(encoded) => encoded,
                Err(e) => {
                    error!(media_id = %item.id, width, "Encode failed: {}", e);
                    continue;
                }
            };

            let name = self.renditions.rendition_name(&item.id, width);
            match self.store.upload(encoded, &name).await {
                Ok(url) => debug!(media_id = %item.id, width, url = %url, "Stored rendition"),
                Err(e) => error!(media_id = %item.id, width, "Rendition upload failed: {}", e),
            }
        }
    }
}
