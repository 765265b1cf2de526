//! Error types for the doc2pdf library.
//!
//! Three distinct error types reflect the three stages of the pipeline:
//!
//! * [`ExtractError`] — the source document could not be turned into
//!   structured content (corrupt archive, undecodable image bytes, a
//!   format we do not accept).
//!
//! * [`RenderError`] — the laid-out document could not be serialized to a
//!   PDF byte buffer.
//!
//! * [`ConvertError`] — the single user-facing surface returned by the
//!   top-level `convert*` functions. It wraps the two stage errors plus the
//!   few failures that belong to dispatching itself.
//!
//! Every stage fails fast and propagates upward unchanged; there is no
//! retry and no partial output. A failed conversion produces no bytes.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while extracting structured content from the source document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The byte buffer could not be parsed as the claimed format.
    ///
    /// Covers corrupt ZIP containers, broken `word/document.xml` markup,
    /// and image buffers the codec rejects. Extraction is all-or-nothing:
    /// a malformed document yields this error, never partial content.
    #[error("malformed {kind} input: {detail}")]
    Malformed { kind: &'static str, detail: String },

    /// The image bytes were recognised, but the format is not one we embed.
    ///
    /// Only PNG and JPEG are accepted. The format is sniffed from the
    /// content, not taken from the declared MIME type, so a mislabelled
    /// upload fails here with the real format named.
    #[error("unsupported image format '{sniffed}': only PNG and JPEG are accepted")]
    UnsupportedImageFormat { sniffed: String },
}

/// Failures while serializing the page model to PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF serialization could not complete.
    ///
    /// Raised when embedded image data cannot be converted to a PDF image
    /// stream. Propagated to the caller; output is never silently truncated.
    #[error("PDF encoding failed: {0}")]
    EncodingFailure(String),
}

/// All errors returned by the top-level `convert*` functions.
///
/// The dispatcher is the single point that converts any stage failure into
/// a caller-facing error; downstream code can match on the wrapped variant
/// when it needs the stage detail.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Content extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// PDF serialization failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// `ConversionSession::convert` was called with no file selected.
    #[error("no file selected")]
    NoFileSelected,

    /// Could not create or write the output PDF file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
