//! Image decoding: raster bytes → a validated [`DecodedImage`].
//!
//! The format is sniffed from the content, never taken from the declared
//! MIME type. A file that claims to be a PNG but is really a BMP — or a PDF
//! dropped onto the image path — fails here with the sniffed format named,
//! instead of being handed to the wrong codec.
//!
//! The original source bytes are kept alongside the decoded pixels: JPEG
//! data goes into the PDF verbatim (DCTDecode), so re-encoding would only
//! lose quality, while PNG pixels are re-packed into a Flate image stream
//! at embed time.

use crate::error::ExtractError;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

/// Sniffed format of an accepted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Png,
    Jpeg,
}

/// A decoded raster image ready for placement on a page.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Pixel width of the source image.
    pub width: u32,
    /// Pixel height of the source image.
    pub height: u32,
    /// Content-sniffed format.
    pub format: SniffedFormat,
    /// The original encoded bytes (embedded verbatim for JPEG).
    pub bytes: Vec<u8>,
    /// Decoded pixels (used to build the PDF image stream for PNG).
    pub pixels: DynamicImage,
}

impl DecodedImage {
    /// Width / height of the source image.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Sniff, validate, and decode an image byte buffer.
///
/// # Errors
/// * [`ExtractError::Malformed`] — bytes no codec recognises, or a
///   recognised header followed by undecodable data (truncated file).
/// * [`ExtractError::UnsupportedImageFormat`] — a real image in a format
///   other than PNG or JPEG.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, ExtractError> {
    let sniffed = image::guess_format(bytes).map_err(|e| ExtractError::Malformed {
        kind: "image",
        detail: format!("unrecognised image data: {e}"),
    })?;

    let format = match sniffed {
        ImageFormat::Png => SniffedFormat::Png,
        ImageFormat::Jpeg => SniffedFormat::Jpeg,
        other => {
            return Err(ExtractError::UnsupportedImageFormat {
                sniffed: format!("{other:?}"),
            })
        }
    };

    // Full decode, not just a header probe: a truncated body must fail the
    // extraction, not the later render.
    let pixels =
        image::load_from_memory_with_format(bytes, sniffed).map_err(|e| ExtractError::Malformed {
            kind: "image",
            detail: format!("decode failed: {e}"),
        })?;

    debug!(
        "Decoded {:?} image: {}x{} px",
        format,
        pixels.width(),
        pixels.height()
    );

    Ok(DecodedImage {
        width: pixels.width(),
        height: pixels.height(),
        format,
        bytes: bytes.to_vec(),
        pixels,
    })
}
