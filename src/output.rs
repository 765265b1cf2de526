//! Output types returned by the conversion entry points.

use serde::Serialize;

/// The result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The finished PDF byte buffer.
    pub pdf: Vec<u8>,

    /// Suggested download filename: `converted-<original-basename>.pdf`.
    pub filename: String,

    /// Pipeline statistics for this conversion.
    pub stats: ConversionStats,
}

/// Statistics about one conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Pages in the produced PDF. Always at least 1.
    pub page_count: usize,

    /// Text blocks extracted from the source (0 for image input).
    pub extracted_blocks: usize,

    /// Wrapped lines placed by the layout engine (0 for image input).
    pub layout_lines: usize,

    /// Wall-clock time spent extracting content.
    pub extract_duration_ms: u64,

    /// Wall-clock time spent wrapping and paginating.
    pub layout_duration_ms: u64,

    /// Wall-clock time spent serializing the PDF.
    pub render_duration_ms: u64,

    /// Total conversion time, including dispatch overhead.
    pub total_duration_ms: u64,
}

/// Derive the download filename for a converted document.
///
/// The original extension is stripped and replaced with `.pdf`; the name is
/// prefixed so a converted file never collides with its source when both
/// land in the same directory.
pub fn download_filename(original: &str) -> String {
    let basename = match original.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => original,
    };
    format!("converted-{basename}.pdf")
}
