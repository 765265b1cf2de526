//! The conversion dispatcher: entry points that run the whole pipeline.
//!
//! [`convert`] routes a [`SourceDocument`] down the word or image path,
//! times each stage, reports progress through the configured callback, and
//! returns the finished PDF with its statistics. CPU-bound stages run on
//! the blocking thread pool so a conversion never stalls the async runtime.
//!
//! Failure is all-or-nothing: the first stage error aborts the run, the
//! callback sees `on_conversion_error`, and no bytes are produced.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{download_filename, ConversionOutput, ConversionStats};
use crate::pipeline::input::{InputKind, SourceDocument};
use crate::pipeline::{extract, image, layout, render};
use crate::progress::PipelineStage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Convert a source document to PDF.
///
/// Dispatches on [`SourceDocument::kind`]: Word-processing documents take
/// the extract → layout → render path, everything else is treated as an
/// image and validated by content sniffing.
///
/// # Errors
/// Any stage failure, wrapped in [`ConvertError`].
pub async fn convert(
    doc: &SourceDocument,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let started = Instant::now();
    let callback = config.progress_callback.clone();

    info!(
        "Starting conversion of '{}' ({} bytes, declared '{}')",
        doc.filename,
        doc.bytes.len(),
        doc.mime
    );
    if let Some(cb) = &callback {
        cb.on_conversion_start(&doc.filename);
    }

    let result = match doc.kind() {
        InputKind::Word => convert_word(doc, config).await,
        InputKind::Image => convert_image(doc, config).await,
    };

    match result {
        Ok(mut output) => {
            output.stats.total_duration_ms = started.elapsed().as_millis() as u64;
            info!(
                "Conversion complete: {} page(s), {} bytes in {} ms",
                output.stats.page_count,
                output.pdf.len(),
                output.stats.total_duration_ms
            );
            if let Some(cb) = &callback {
                cb.on_conversion_complete(output.stats.page_count, output.pdf.len());
            }
            Ok(output)
        }
        Err(e) => {
            error!("Conversion of '{}' failed: {e}", doc.filename);
            if let Some(cb) = &callback {
                cb.on_conversion_error(&e.to_string());
            }
            Err(e)
        }
    }
}

/// Blocking wrapper around [`convert`] for callers without a runtime.
pub fn convert_sync(
    doc: &SourceDocument,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("failed to create runtime: {e}")))?;
    runtime.block_on(convert(doc, config))
}

/// Convert and write the PDF to `path`.
///
/// Writes to a temporary sibling first and renames into place, so a crash
/// mid-write never leaves a truncated PDF at the target path. Parent
/// directories are created as needed.
pub async fn convert_to_file(
    doc: &SourceDocument,
    config: &ConversionConfig,
    path: &Path,
) -> Result<ConversionOutput, ConvertError> {
    let output = convert(doc, config).await?;

    let write_failed = |source: std::io::Error| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }
    }

    let tmp = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp, &output.pdf).await.map_err(write_failed)?;
    tokio::fs::rename(&tmp, path).await.map_err(write_failed)?;

    info!("Wrote {} bytes to {}", output.pdf.len(), path.display());
    Ok(output)
}

/// Word path: extract text blocks, lay them out, render pages.
async fn convert_word(
    doc: &SourceDocument,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let callback = config.progress_callback.clone();
    let mut stats = ConversionStats::default();

    // Step 1/3: extraction (blocking: ZIP inflate + XML parse).
    let stage_start = Instant::now();
    let bytes = doc.bytes.clone();
    let blocks = tokio::task::spawn_blocking(move || extract::extract_blocks(&bytes))
        .await
        .map_err(join_error)??;
    stats.extract_duration_ms = stage_start.elapsed().as_millis() as u64;
    stats.extracted_blocks = blocks.len();
    debug!(
        "Extracted {} blocks in {} ms",
        blocks.len(),
        stats.extract_duration_ms
    );
    if let Some(cb) = &callback {
        cb.on_stage_complete(PipelineStage::Extract, stats.extract_duration_ms);
    }

    // Step 2/3: layout (pure geometry, cheap enough to run inline).
    let stage_start = Instant::now();
    let lines = layout::layout_blocks(&blocks, config);
    stats.layout_duration_ms = stage_start.elapsed().as_millis() as u64;
    stats.layout_lines = lines.len();
    if let Some(cb) = &callback {
        cb.on_stage_complete(PipelineStage::Layout, stats.layout_duration_ms);
    }

    // Step 3/3: render (blocking: stream compression).
    let stage_start = Instant::now();
    let render_config = config.clone();
    let (page_count, pdf) = tokio::task::spawn_blocking(move || {
        let pages = render::render_text(&lines, &render_config);
        let count = pages.page_count();
        pages.to_bytes().map(|bytes| (count, bytes))
    })
    .await
    .map_err(join_error)??;
    stats.render_duration_ms = stage_start.elapsed().as_millis() as u64;
    if let Some(cb) = &callback {
        cb.on_stage_complete(PipelineStage::Render, stats.render_duration_ms);
    }

    stats.page_count = page_count;
    Ok(ConversionOutput {
        pdf,
        filename: download_filename(&doc.filename),
        stats,
    })
}

/// Image path: decode, then render the single scaled placement.
async fn convert_image(
    doc: &SourceDocument,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let callback = config.progress_callback.clone();
    let mut stats = ConversionStats::default();

    // Step 1/2: decode (blocking: full pixel decode).
    let stage_start = Instant::now();
    let bytes = doc.bytes.clone();
    let decoded = tokio::task::spawn_blocking(move || image::decode_image(&bytes))
        .await
        .map_err(join_error)??;
    stats.extract_duration_ms = stage_start.elapsed().as_millis() as u64;
    if let Some(cb) = &callback {
        cb.on_stage_complete(PipelineStage::Extract, stats.extract_duration_ms);
    }

    // Step 2/2: render (blocking: pixel re-pack + compression).
    let stage_start = Instant::now();
    let render_config = config.clone();
    let pdf = tokio::task::spawn_blocking(move || {
        render::render_image(decoded, &render_config).to_bytes()
    })
    .await
    .map_err(join_error)??;
    stats.render_duration_ms = stage_start.elapsed().as_millis() as u64;
    if let Some(cb) = &callback {
        cb.on_stage_complete(PipelineStage::Render, stats.render_duration_ms);
    }

    stats.page_count = 1;
    Ok(ConversionOutput {
        pdf,
        filename: download_filename(&doc.filename),
        stats,
    })
}

fn join_error(e: tokio::task::JoinError) -> ConvertError {
    ConvertError::Internal(format!("worker task failed: {e}"))
}
