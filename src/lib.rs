//! # doc2pdf
//!
//! Convert Word documents and raster images to clean, single-column PDFs.
//!
//! ## Why this crate?
//!
//! "Turn this upload into a PDF" needs two very different pipelines: a
//! `.docx` must be parsed, restyled, wrapped, and paginated, while a PNG or
//! JPEG just needs to be validated, scaled to the page, and embedded. This
//! crate does both behind one dispatcher, chooses the path from the
//! declared type, and validates the bytes on the path that receives them —
//! a mislabelled upload fails with a precise error, not a broken PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! SourceDocument
//!  │
//!  ├─ word path (MIME contains "word", or .docx/.doc)
//!  │   ├─ 1. Extract  unzip word/document.xml, stream-parse paragraphs
//!  │   ├─ 2. Layout   measure with Helvetica metrics, wrap, paginate
//!  │   └─ 3. Render   Flate-compressed text pages via pdf-writer
//!  │
//!  └─ image path (everything else)
//!      ├─ 1. Decode   sniff the real format, full pixel decode
//!      └─ 2. Render   scale to fit A4, center, embed (DCT or Flate)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2pdf::{convert, ConversionConfig, SourceDocument};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("report.docx")?;
//!     let doc = SourceDocument::new(
//!         bytes,
//!         "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
//!         "report.docx",
//!     );
//!     let output = convert(&doc, &ConversionConfig::default()).await?;
//!     std::fs::write(&output.filename, &output.pdf)?;
//!     eprintln!("{} page(s) in {} ms",
//!         output.stats.page_count,
//!         output.stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! doc2pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod fonts;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_sync, convert_to_file};
pub use error::{ConvertError, ExtractError, RenderError};
pub use output::{download_filename, ConversionOutput, ConversionStats};
pub use pipeline::extract::{StyledTextBlock, TextRole};
pub use pipeline::input::{InputKind, SourceDocument};
pub use pipeline::layout::LayoutLine;
pub use progress::{
    ConversionProgressCallback, NoopProgressCallback, PipelineStage, ProgressCallback,
};
pub use session::{ConversionSession, DownloadFile};
