//! Configuration types for document-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads and to see at a glance which
//! geometry a PDF was produced with.
//!
//! The defaults reproduce the classic single-column A4 setting: 595×842 pt
//! pages, 50 pt margins, 11 pt body text on 14 pt leading.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Configuration for one conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .margin(36.0)
///     .body_font_size(10.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Page width in PDF points. Default: 595.0 (A4).
    pub page_width: f32,

    /// Page height in PDF points. Default: 842.0 (A4).
    pub page_height: f32,

    /// Uniform page margin in points. Default: 50.0.
    ///
    /// The text column spans `page_width - 2 * margin`; the cursor starts at
    /// `page_height - margin` and a new page begins whenever the next
    /// baseline would fall below `margin`.
    pub margin: f32,

    /// Body text size in points. Default: 11.0.
    pub body_font_size: f32,

    /// Top-level heading size in points. Default: 18.0.
    pub heading1_font_size: f32,

    /// Second-level heading size in points. Default: 14.0.
    pub heading2_font_size: f32,

    /// Leading as a multiple of the font size. Default: 14/11 ≈ 1.273,
    /// the 11pt-on-14pt body setting. Applies to headings too, so larger
    /// type gets proportionally larger line height.
    pub line_spacing: f32,

    /// Extra advance after the last line of a paragraph, as a fraction of
    /// that paragraph's line height. Default: 0.5 (a paragraph therefore
    /// ends with 1.5× line height of total advance).
    pub paragraph_spacing: f32,

    /// Optional observer for pipeline lifecycle events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            body_font_size: 11.0,
            heading1_font_size: 18.0,
            heading2_font_size: 14.0,
            line_spacing: 14.0 / 11.0,
            paragraph_spacing: 0.5,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("page_width", &self.page_width)
            .field("page_height", &self.page_height)
            .field("margin", &self.margin)
            .field("body_font_size", &self.body_font_size)
            .field("heading1_font_size", &self.heading1_font_size)
            .field("heading2_font_size", &self.heading2_font_size)
            .field("line_spacing", &self.line_spacing)
            .field("paragraph_spacing", &self.paragraph_spacing)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Maximum rendered width of one line of text, in points.
    pub fn max_line_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline position for the first line on a fresh page.
    pub fn top_y(&self) -> f32 {
        self.page_height - self.margin
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Set the page size in points. Values below 72 pt are clamped up.
    pub fn page_size(mut self, width: f32, height: f32) -> Self {
        self.config.page_width = width.max(72.0);
        self.config.page_height = height.max(72.0);
        self
    }

    pub fn margin(mut self, pts: f32) -> Self {
        self.config.margin = pts.max(0.0);
        self
    }

    pub fn body_font_size(mut self, pts: f32) -> Self {
        self.config.body_font_size = pts.max(1.0);
        self
    }

    pub fn heading1_font_size(mut self, pts: f32) -> Self {
        self.config.heading1_font_size = pts.max(1.0);
        self
    }

    pub fn heading2_font_size(mut self, pts: f32) -> Self {
        self.config.heading2_font_size = pts.max(1.0);
        self
    }

    pub fn line_spacing(mut self, factor: f32) -> Self {
        self.config.line_spacing = factor.max(1.0);
        self
    }

    pub fn paragraph_spacing(mut self, factor: f32) -> Self {
        self.config.paragraph_spacing = factor.max(0.0);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if 2.0 * c.margin >= c.page_width || 2.0 * c.margin >= c.page_height {
            return Err(ConvertError::InvalidConfig(format!(
                "margin {} leaves no printable area on a {}x{} page",
                c.margin, c.page_width, c.page_height
            )));
        }
        if c.heading1_font_size < c.body_font_size {
            return Err(ConvertError::InvalidConfig(
                "heading1_font_size must be >= body_font_size".into(),
            ));
        }
        Ok(self.config)
    }
}
