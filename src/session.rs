//! A stateful select/convert/download session over the pipeline.
//!
//! [`ConversionSession`] models the lifecycle a caller walks a file
//! through: select it, convert it, download the result, remove it. One
//! file is held at a time; selecting a new file replaces the old one and
//! discards any previous result, so a download can never hand back the
//! output of a different file than the one currently selected.

use crate::config::ConversionConfig;
use crate::convert;
use crate::error::ConvertError;
use crate::output::ConversionOutput;
use crate::pipeline::input::SourceDocument;
use tracing::info;

/// The payload handed out by [`ConversionSession::download`].
#[derive(Debug, Clone)]
pub struct DownloadFile {
    /// Suggested filename, `converted-<original-basename>.pdf`.
    pub filename: String,
    /// The PDF bytes.
    pub bytes: Vec<u8>,
}

/// Holds at most one selected file and at most one conversion result.
#[derive(Debug, Default)]
pub struct ConversionSession {
    config: ConversionConfig,
    file: Option<SourceDocument>,
    result: Option<ConversionOutput>,
}

impl ConversionSession {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::with_config(ConversionConfig::default())
    }

    /// Create a session converting with the given configuration.
    pub fn with_config(config: ConversionConfig) -> Self {
        Self {
            config,
            file: None,
            result: None,
        }
    }

    /// Select a file, replacing any previous selection.
    ///
    /// Any earlier conversion result is discarded: the result always
    /// corresponds to the currently selected file or does not exist.
    pub fn select_file(&mut self, doc: SourceDocument) {
        info!("Selected '{}' ({} bytes)", doc.filename, doc.bytes.len());
        self.file = Some(doc);
        self.result = None;
    }

    /// The currently selected file, if any.
    pub fn selected_file(&self) -> Option<&SourceDocument> {
        self.file.as_ref()
    }

    /// Convert the selected file, storing and returning the result.
    ///
    /// On failure the selection is kept (the caller may retry or replace
    /// it) but any stale result is cleared.
    ///
    /// # Errors
    /// [`ConvertError::NoFileSelected`] without a selection, otherwise any
    /// pipeline error.
    pub async fn convert(&mut self) -> Result<&ConversionOutput, ConvertError> {
        let doc = self.file.as_ref().ok_or(ConvertError::NoFileSelected)?;
        match convert::convert(doc, &self.config).await {
            Ok(output) => Ok(self.result.insert(output)),
            Err(e) => {
                self.result = None;
                Err(e)
            }
        }
    }

    /// The converted PDF, if a conversion has succeeded for the current
    /// selection.
    pub fn download(&self) -> Option<DownloadFile> {
        self.result.as_ref().map(|r| DownloadFile {
            filename: r.filename.clone(),
            bytes: r.pdf.clone(),
        })
    }

    /// Clear the selection and any result.
    pub fn remove_file(&mut self) {
        self.file = None;
        self.result = None;
    }
}
