//! Input classification: decide which pipeline path a source document takes.
//!
//! Routing is deliberately cheap and happens before any parsing: the
//! declared MIME type and filename pick the path, and each path then
//! validates the bytes it actually receives (the docx extractor fails on a
//! bad archive, the image decoder sniffs the real format). A mislabelled
//! upload therefore fails with a precise error from the stage that knows,
//! not a guess made here.

use serde::Serialize;

/// One document handed to the pipeline for conversion.
///
/// Owned by the caller and borrowed for the duration of one conversion;
/// the pipeline never mutates it and keeps no reference afterwards.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Declared MIME type, e.g. `application/vnd.openxmlformats-officedocument.wordprocessingml.document`.
    pub mime: String,
    /// Original filename, used for routing and for the download name.
    pub filename: String,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            filename: filename.into(),
        }
    }

    /// The pipeline path this document routes to.
    pub fn kind(&self) -> InputKind {
        classify(&self.mime, &self.filename)
    }
}

/// The two conversion paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    /// Word-processing document: extract → layout → render text.
    Word,
    /// Raster image: decode → scale-and-place → render image.
    Image,
}

/// Classify a document by declared type and extension.
///
/// A document is a Word document when the MIME type contains `word` or the
/// filename ends in `.docx`/`.doc`; everything else takes the image path,
/// where content sniffing does the real validation. There is no PDF
/// pass-through: a PDF upload reaches the image decoder and is rejected
/// there with the sniffed format named.
pub fn classify(mime: &str, filename: &str) -> InputKind {
    let lower_name = filename.to_ascii_lowercase();
    if mime.to_ascii_lowercase().contains("word")
        || lower_name.ends_with(".docx")
        || lower_name.ends_with(".doc")
    {
        InputKind::Word
    } else {
        InputKind::Image
    }
}
