//! End-to-end integration tests for doc2pdf.
//!
//! All fixtures are built in memory: `.docx` containers with `zip`, raster
//! images with the `image` encoders. No test touches the network or needs
//! files on disk beyond a tempdir for the file-writing entry point.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use doc2pdf::{
    convert, convert_to_file, ConversionConfig, ConversionProgressCallback, ConversionSession,
    ConvertError, ExtractError, PipelineStage, ProgressCallback, SourceDocument,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Build a `.docx` byte buffer with the given (style, text) paragraphs.
fn docx_bytes(paragraphs: &[(Option<&str>, &str)]) -> Vec<u8> {
    let mut body = String::new();
    for (style, text) in paragraphs {
        body.push_str("<w:p>");
        if let Some(s) = style {
            body.push_str(&format!("<w:pPr><w:pStyle w:val=\"{s}\"/></w:pPr>"));
        }
        body.push_str(&format!("<w:r><w:t>{text}</w:t></w:r></w:p>"));
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        let opts = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", opts).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file("word/document.xml", opts).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

fn docx_doc(paragraphs: &[(Option<&str>, &str)], filename: &str) -> SourceDocument {
    SourceDocument::new(docx_bytes(paragraphs), DOCX_MIME, filename)
}

fn png_doc(w: u32, h: u32, filename: &str) -> SourceDocument {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([40, 90, 160, 255])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    SourceDocument::new(buf, "image/png", filename)
}

fn jpeg_doc(w: u32, h: u32, filename: &str) -> SourceDocument {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([220, 180, 40])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .unwrap();
    SourceDocument::new(buf, "image/jpeg", filename)
}

/// Basic shape checks every produced PDF must pass.
fn assert_pdf_quality(pdf: &[u8], context: &str) {
    assert!(
        pdf.starts_with(b"%PDF-"),
        "[{context}] output does not start with a PDF header"
    );
    assert!(
        pdf.len() > 200,
        "[{context}] output suspiciously short: {} bytes",
        pdf.len()
    );
    let tail = &pdf[pdf.len().saturating_sub(16)..];
    assert!(
        tail.windows(5).any(|w| w == b"%%EOF"),
        "[{context}] output does not end with %%EOF"
    );
}

// ── Word path ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn docx_converts_to_pdf_with_stats() {
    let doc = docx_doc(
        &[
            (Some("Heading1"), "Quarterly Report"),
            (None, "Revenue grew modestly this quarter."),
            (Some("Heading2"), "Details"),
            (None, "See the appendix for the full numbers."),
        ],
        "report.docx",
    );
    let out = convert(&doc, &ConversionConfig::default()).await.unwrap();

    assert_pdf_quality(&out.pdf, "docx");
    assert_eq!(out.filename, "converted-report.pdf");
    assert_eq!(out.stats.extracted_blocks, 4);
    assert_eq!(out.stats.layout_lines, 4);
    assert_eq!(out.stats.page_count, 1);
}

#[tokio::test]
async fn empty_docx_still_produces_one_blank_page() {
    let doc = docx_doc(&[(None, "   ")], "blank.docx");
    let out = convert(&doc, &ConversionConfig::default()).await.unwrap();
    assert_pdf_quality(&out.pdf, "blank docx");
    assert_eq!(out.stats.extracted_blocks, 0);
    assert_eq!(out.stats.layout_lines, 0);
    assert_eq!(out.stats.page_count, 1);
}

#[tokio::test]
async fn long_document_spills_onto_multiple_pages() {
    let paragraphs: Vec<(Option<&str>, String)> = (0..80)
        .map(|i| (None, format!("Paragraph {i} with enough words to occupy a line.")))
        .collect();
    let borrowed: Vec<(Option<&str>, &str)> = paragraphs
        .iter()
        .map(|(s, t)| (*s, t.as_str()))
        .collect();
    let doc = docx_doc(&borrowed, "long.docx");

    let out = convert(&doc, &ConversionConfig::default()).await.unwrap();
    assert_pdf_quality(&out.pdf, "long docx");
    assert!(
        out.stats.page_count >= 2,
        "expected pagination, got {} page(s)",
        out.stats.page_count
    );
    assert_eq!(out.stats.extracted_blocks, 80);
}

#[tokio::test]
async fn doc_extension_routes_to_word_path() {
    // Legacy .doc is not OOXML; the word path must reject it as malformed
    // rather than the image sniffer reporting nonsense.
    let doc = SourceDocument::new(
        vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
        "application/msword",
        "legacy.doc",
    );
    let err = convert(&doc, &ConversionConfig::default()).await.unwrap_err();
    match err {
        ConvertError::Extract(ExtractError::Malformed { kind, .. }) => assert_eq!(kind, "docx"),
        other => panic!("expected malformed docx, got {other:?}"),
    }
}

// ── Image path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn png_converts_to_single_page_pdf() {
    let out = convert(&png_doc(800, 600, "shot.png"), &ConversionConfig::default())
        .await
        .unwrap();
    assert_pdf_quality(&out.pdf, "png");
    assert_eq!(out.filename, "converted-shot.pdf");
    assert_eq!(out.stats.page_count, 1);
    assert_eq!(out.stats.extracted_blocks, 0);
    assert_eq!(out.stats.layout_lines, 0);
}

#[tokio::test]
async fn jpeg_converts_to_single_page_pdf() {
    let out = convert(
        &jpeg_doc(1024, 768, "photo.jpg"),
        &ConversionConfig::default(),
    )
    .await
    .unwrap();
    assert_pdf_quality(&out.pdf, "jpeg");
    assert_eq!(out.stats.page_count, 1);
}

#[tokio::test]
async fn mislabelled_image_fails_with_sniffed_format() {
    // A BMP wearing a PNG name and MIME type.
    let bmp = b"BM\x00\x00\x00\x00\x00\x00\x00\x00\x36\x00\x00\x00".to_vec();
    let doc = SourceDocument::new(bmp, "image/png", "fake.png");
    let err = convert(&doc, &ConversionConfig::default()).await.unwrap_err();
    match err {
        ConvertError::Extract(ExtractError::UnsupportedImageFormat { sniffed }) => {
            assert!(sniffed.contains("Bmp"), "sniffed: {sniffed}");
        }
        other => panic!("expected unsupported format, got {other:?}"),
    }
}

#[tokio::test]
async fn pdf_input_is_rejected_not_passed_through() {
    let doc = SourceDocument::new(
        b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n".to_vec(),
        "application/pdf",
        "already.pdf",
    );
    let err = convert(&doc, &ConversionConfig::default()).await.unwrap_err();
    assert!(matches!(err, ConvertError::Extract(_)), "got {err:?}");
}

#[tokio::test]
async fn truncated_image_is_malformed() {
    let mut doc = png_doc(64, 64, "cut.png");
    doc.bytes.truncate(doc.bytes.len() / 2);
    let err = convert(&doc, &ConversionConfig::default()).await.unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Extract(ExtractError::Malformed { .. })
    ));
}

// ── File output ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn convert_to_file_writes_the_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report.pdf");

    let doc = docx_doc(&[(None, "File output test.")], "report.docx");
    let out = convert_to_file(&doc, &ConversionConfig::default(), &path)
        .await
        .unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, out.pdf);
    assert_pdf_quality(&written, "file output");
    // No temp file left behind.
    assert!(!path.with_extension("pdf.tmp").exists());
}

#[tokio::test]
async fn convert_to_file_fails_cleanly_on_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.pdf");

    let doc = SourceDocument::new(b"junk".to_vec(), DOCX_MIME, "junk.docx");
    let err = convert_to_file(&doc, &ConversionConfig::default(), &path)
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::Extract(_)));
    assert!(!path.exists(), "no output file should exist after failure");
}

// ── Session lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn session_select_convert_download_remove() {
    let mut session = ConversionSession::new();
    session.select_file(docx_doc(&[(None, "Session test.")], "s.docx"));

    session.convert().await.unwrap();
    let dl = session.download().unwrap();
    assert_eq!(dl.filename, "converted-s.pdf");
    assert_pdf_quality(&dl.bytes, "session download");

    session.remove_file();
    assert!(session.download().is_none());

    let err = session.convert().await.unwrap_err();
    assert!(matches!(err, ConvertError::NoFileSelected));
}

// ── Progress callback ────────────────────────────────────────────────────────

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for EventLog {
    fn on_conversion_start(&self, filename: &str) {
        self.events.lock().unwrap().push(format!("start:{filename}"));
    }
    fn on_stage_complete(&self, stage: PipelineStage, _duration_ms: u64) {
        self.events.lock().unwrap().push(format!("stage:{stage}"));
    }
    fn on_conversion_complete(&self, page_count: usize, _pdf_len: usize) {
        self.events.lock().unwrap().push(format!("done:{page_count}"));
    }
    fn on_conversion_error(&self, _error: &str) {
        self.events.lock().unwrap().push("error".to_string());
    }
}

#[tokio::test]
async fn word_path_reports_all_three_stages_in_order() {
    let log = Arc::new(EventLog::default());
    let callback: ProgressCallback = log.clone();
    let config = ConversionConfig::builder()
        .progress_callback(callback)
        .build()
        .unwrap();

    convert(&docx_doc(&[(None, "Progress.")], "p.docx"), &config)
        .await
        .unwrap();

    let events = log.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["start:p.docx", "stage:extract", "stage:layout", "stage:render", "done:1"]
    );
}

#[tokio::test]
async fn image_path_skips_the_layout_stage() {
    let log = Arc::new(EventLog::default());
    let callback: ProgressCallback = log.clone();
    let config = ConversionConfig::builder()
        .progress_callback(callback)
        .build()
        .unwrap();

    convert(&png_doc(32, 32, "i.png"), &config).await.unwrap();

    let events = log.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["start:i.png", "stage:extract", "stage:render", "done:1"]
    );
}

#[tokio::test]
async fn failure_emits_error_event_and_nothing_after() {
    let log = Arc::new(EventLog::default());
    let callback: ProgressCallback = log.clone();
    let config = ConversionConfig::builder()
        .progress_callback(callback)
        .build()
        .unwrap();

    let doc = SourceDocument::new(b"nope".to_vec(), DOCX_MIME, "bad.docx");
    assert!(convert(&doc, &config).await.is_err());

    let events = log.events.lock().unwrap().clone();
    assert_eq!(events, vec!["start:bad.docx", "error"]);
}

// ── Output shape ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_are_json_serialisable() {
    let out = convert(
        &docx_doc(&[(None, "Stats.")], "stats.docx"),
        &ConversionConfig::default(),
    )
    .await
    .unwrap();
    let json = serde_json::to_string(&out.stats).unwrap();
    assert!(json.contains("\"page_count\":1"), "json: {json}");
}

#[test]
fn callbacks_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EventLog>();
    assert_send_sync::<doc2pdf::NoopProgressCallback>();
}
