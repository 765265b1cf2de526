//! PDF rendering: the page model and its serialization to bytes.
//!
//! Rendering happens in two steps. First the layout output (or the single
//! scaled image placement) is turned into a [`PdfDocument`] — an ordered
//! list of [`PageCanvas`] accumulators holding plain draw commands. Then
//! [`PdfDocument::to_bytes`] serializes that model with `pdf-writer`:
//! base-14 Helvetica fonts with WinAnsiEncoding, Flate-compressed content
//! streams, JPEG embedded verbatim behind DCTDecode, PNG re-packed as a
//! Flate RGB stream with an alpha soft mask when the source has
//! transparency.
//!
//! The split keeps the drawing decisions inspectable in tests without
//! parsing PDF syntax back out of the byte buffer.

use crate::config::ConversionConfig;
use crate::error::RenderError;
use crate::fonts::{self, FontKind};
use crate::pipeline::image::{DecodedImage, SniffedFormat};
use crate::pipeline::layout::LayoutLine;
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};
use tracing::debug;

/// Zlib compression level for content and image streams.
const COMPRESSION_LEVEL: u8 = 6;

/// One drawing operation committed to a page.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A run of text at a baseline position.
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        bold: bool,
    },
    /// A scaled image placement. At most one per page.
    Image {
        image: DecodedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Accumulator for one output page.
///
/// Owned exclusively by the renderer while commands are committed; once the
/// containing [`PdfDocument`] is built the canvas is never mutated again.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl PageCanvas {
    fn new(config: &ConversionConfig) -> Self {
        Self {
            width: config.page_width,
            height: config.page_height,
            commands: Vec::new(),
        }
    }
}

/// The finished page model, ready to serialize. Always has at least one
/// page, even for empty input.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<PageCanvas>,
}

impl PdfDocument {
    pub fn pages(&self) -> &[PageCanvas] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize to a PDF byte buffer.
    ///
    /// # Errors
    /// [`RenderError::EncodingFailure`] when embedded image data cannot be
    /// converted to a PDF image stream.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();

        for (font_id, font) in [(regular_id, FontKind::Regular), (bold_id, FontKind::Bold)] {
            pdf.type1_font(font_id)
                .base_font(Name(font.base_name().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let page_ids: Vec<Ref> = (0..self.pages.len()).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..self.pages.len()).map(|_| alloc()).collect();

        // One optional image XObject per page.
        let mut image_refs: Vec<Option<Ref>> = vec![None; self.pages.len()];
        for (i, page) in self.pages.iter().enumerate() {
            for cmd in &page.commands {
                if let DrawCommand::Image { image, .. } = cmd {
                    let id = alloc();
                    embed_image(&mut pdf, id, &mut alloc, image)?;
                    image_refs[i] = Some(id);
                }
            }
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(self.pages.len() as i32);

        for (i, page) in self.pages.iter().enumerate() {
            let raw = build_content(page).finish();
            let compressed = compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let mut page_writer = pdf.page(page_ids[i]);
            page_writer
                .media_box(Rect::new(0.0, 0.0, page.width, page.height))
                .parent(pages_id)
                .contents(content_ids[i]);

            let mut resources = page_writer.resources();
            {
                let mut font_dict = resources.fonts();
                font_dict.pair(Name(FontKind::Regular.resource_name().as_bytes()), regular_id);
                font_dict.pair(Name(FontKind::Bold.resource_name().as_bytes()), bold_id);
            }
            if let Some(img_ref) = image_refs[i] {
                resources.x_objects().pair(Name(b"Im1"), img_ref);
            }
        }

        let bytes = pdf.finish();
        debug!("Serialized {} page(s), {} bytes", self.pages.len(), bytes.len());
        Ok(bytes)
    }
}

/// Build the content stream operations for one page.
fn build_content(page: &PageCanvas) -> Content {
    let mut content = Content::new();
    for cmd in &page.commands {
        match cmd {
            DrawCommand::Text {
                text,
                x,
                y,
                font_size,
                bold,
            } => {
                let font = if *bold { FontKind::Bold } else { FontKind::Regular };
                content
                    .begin_text()
                    .set_font(Name(font.resource_name().as_bytes()), *font_size)
                    .next_line(*x, *y)
                    .show(pdf_writer::Str(&fonts::to_winansi_bytes(text)))
                    .end_text();
            }
            DrawCommand::Image {
                x, y, width, height, ..
            } => {
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(b"Im1"));
                content.restore_state();
            }
        }
    }
    content
}

/// Write one image XObject, choosing the embedding by sniffed format.
fn embed_image(
    pdf: &mut Pdf,
    id: Ref,
    alloc: &mut dyn FnMut() -> Ref,
    img: &DecodedImage,
) -> Result<(), RenderError> {
    let width = i32::try_from(img.width)
        .map_err(|_| RenderError::EncodingFailure(format!("image width {} overflows", img.width)))?;
    let height = i32::try_from(img.height).map_err(|_| {
        RenderError::EncodingFailure(format!("image height {} overflows", img.height))
    })?;

    match img.format {
        // JPEG scan data is already DCT-encoded; embed it verbatim.
        SniffedFormat::Jpeg => {
            let grayscale = img.pixels.color().channel_count() < 3;
            let mut xobj = pdf.image_xobject(id, &img.bytes);
            xobj.filter(Filter::DctDecode);
            xobj.width(width);
            xobj.height(height);
            if grayscale {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        // PNG is re-packed: RGB into a Flate stream, alpha (if any) into a
        // separate soft-mask stream.
        SniffedFormat::Png => {
            let rgba = img.pixels.to_rgba8();
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let smask_ref = if has_alpha {
                let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed = compress_to_vec_zlib(&alpha, COMPRESSION_LEVEL);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(width);
                mask.height(height);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let rgb: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
            let compressed = compress_to_vec_zlib(&rgb, COMPRESSION_LEVEL);
            let mut xobj = pdf.image_xobject(id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(width);
            xobj.height(height);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }
    Ok(())
}

/// Build the page model for laid-out text.
///
/// Groups lines by `page_index` and commits them in order. Guarantees at
/// least one page, so an empty layout still produces a single blank page.
pub fn render_text(lines: &[LayoutLine], config: &ConversionConfig) -> PdfDocument {
    let page_count = lines
        .iter()
        .map(|l| l.page_index + 1)
        .max()
        .unwrap_or(1);

    let mut pages: Vec<PageCanvas> = (0..page_count).map(|_| PageCanvas::new(config)).collect();
    for line in lines {
        pages[line.page_index].commands.push(DrawCommand::Text {
            text: line.text.clone(),
            x: line.x,
            y: line.y,
            font_size: line.font_size,
            bold: line.bold,
        });
    }

    PdfDocument { pages }
}

/// Build the page model for a single image: scale uniformly to fit the
/// page, preserve aspect ratio, and center it.
pub fn render_image(image: DecodedImage, config: &ConversionConfig) -> PdfDocument {
    let scale = f32::min(
        config.page_width / image.width as f32,
        config.page_height / image.height as f32,
    );
    let scaled_width = image.width as f32 * scale;
    let scaled_height = image.height as f32 * scale;

    let mut page = PageCanvas::new(config);
    page.commands.push(DrawCommand::Image {
        x: (config.page_width - scaled_width) / 2.0,
        y: (config.page_height - scaled_height) / 2.0,
        width: scaled_width,
        height: scaled_height,
        image,
    });

    PdfDocument { pages: vec![page] }
}
