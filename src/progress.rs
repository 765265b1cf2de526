//! Progress-callback trait for conversion lifecycle events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages. This is the library's
//! structured replacement for ad hoc console tracing: the core announces
//! well-defined lifecycle points and stays ignorant of where the events go —
//! a terminal spinner, a log file, a UI notification, or nowhere.
//!
//! Implementations must be `Send + Sync` so a callback can be shared across
//! concurrently running conversions. All methods have default no-op
//! implementations; override only what you care about.

use std::fmt;
use std::sync::Arc;

/// The pipeline stages a conversion passes through, in order.
///
/// The word path visits all three; the image path skips `Layout` (the
/// single scaled placement needs no line breaking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum PipelineStage {
    /// Source bytes → structured content (text blocks or decoded image).
    Extract,
    /// Text blocks → positioned, paginated lines.
    Layout,
    /// Page model → serialized PDF bytes.
    Render,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Extract => write!(f, "extract"),
            PipelineStage::Layout => write!(f, "layout"),
            PipelineStage::Render => write!(f, "render"),
        }
    }
}

/// Called by the conversion pipeline at lifecycle points.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once when a conversion begins.
    ///
    /// # Arguments
    /// * `filename` — the declared name of the file being converted
    fn on_conversion_start(&self, filename: &str) {
        let _ = filename;
    }

    /// Called after each pipeline stage completes successfully.
    ///
    /// # Arguments
    /// * `stage`       — the stage that finished
    /// * `duration_ms` — wall-clock time the stage took
    fn on_stage_complete(&self, stage: PipelineStage, duration_ms: u64) {
        let _ = (stage, duration_ms);
    }

    /// Called once when the whole conversion succeeds.
    ///
    /// # Arguments
    /// * `page_count` — number of pages in the produced PDF
    /// * `pdf_len`    — byte length of the output buffer
    fn on_conversion_complete(&self, page_count: usize, pdf_len: usize) {
        let _ = (page_count, pdf_len);
    }

    /// Called once if any stage fails. No further events follow.
    ///
    /// # Arguments
    /// * `error` — human-readable error description
    fn on_conversion_error(&self, error: &str) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
