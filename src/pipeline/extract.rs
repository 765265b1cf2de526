//! Content extraction: `.docx` bytes → ordered styled text blocks.
//!
//! A `.docx` file is a ZIP container whose main body lives in
//! `word/document.xml`. The extractor streams that part with `quick-xml`
//! rather than building a DOM: for flat paragraph extraction the only state
//! needed is "which paragraph am I in and what style did it declare". Runs
//! are concatenated per paragraph, paragraph styles map onto the three
//! [`TextRole`]s, and whitespace-only paragraphs are dropped.
//!
//! Legacy binary `.doc` files are not OOXML; they fail the ZIP open and
//! surface as [`ExtractError::Malformed`], which is the honest answer —
//! this crate is not a full document-format parser.

use crate::error::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Cursor, Read};
use tracing::debug;

/// Semantic role of one extracted block, driving font size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextRole {
    /// Top-level heading: large bold.
    Heading1,
    /// Second-level heading: medium bold.
    Heading2,
    /// Everything else: base regular.
    Body,
}

/// One semantic unit of extracted text, in source document order.
///
/// Blocks are immutable once created; the layout engine consumes them in
/// sequence and never reorders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledTextBlock {
    pub text: String,
    pub role: TextRole,
}

/// Extract the styled text blocks from a `.docx` byte buffer.
///
/// Preserves paragraph order; discards paragraphs whose text is empty after
/// trimming. Either the whole document extracts or none of it does.
///
/// # Errors
/// [`ExtractError::Malformed`] when the bytes are not a readable OOXML
/// container or the document part is not well-formed XML.
pub fn extract_blocks(bytes: &[u8]) -> Result<Vec<StyledTextBlock>, ExtractError> {
    let malformed = |detail: String| ExtractError::Malformed {
        kind: "docx",
        detail,
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| malformed(format!("not a ZIP archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| malformed(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| malformed(format!("unreadable word/document.xml: {e}")))?;

    let blocks = parse_document_xml(&xml)?;
    debug!("Extracted {} non-empty blocks", blocks.len());
    Ok(blocks)
}

/// Stream `word/document.xml`, accumulating one block per `<w:p>`.
fn parse_document_xml(xml: &str) -> Result<Vec<StyledTextBlock>, ExtractError> {
    let malformed = |detail: String| ExtractError::Malformed {
        kind: "docx",
        detail,
    };

    let mut reader = Reader::from_str(xml);
    let mut blocks = Vec::new();

    let mut in_paragraph = false;
    let mut in_text = false;
    let mut role = TextRole::Body;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    role = TextRole::Body;
                    text.clear();
                }
                b"t" => in_text = in_paragraph,
                b"pStyle" => role = style_attribute_role(&e)?,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"pStyle" => role = style_attribute_role(&e)?,
                // Line breaks and tabs inside a paragraph separate words but
                // do not start a new block.
                b"br" | b"cr" | b"tab" if in_paragraph => text.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_text {
                    let piece = t
                        .unescape()
                        .map_err(|e| malformed(format!("bad text entity: {e}")))?;
                    text.push_str(&piece);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    in_paragraph = false;
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        blocks.push(StyledTextBlock {
                            text: trimmed.to_string(),
                            role,
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(format!("invalid XML: {e}"))),
        }
    }

    Ok(blocks)
}

/// Read the `w:val` of a `<w:pStyle>` element and map it to a role.
fn style_attribute_role(e: &quick_xml::events::BytesStart) -> Result<TextRole, ExtractError> {
    let attr = e.try_get_attribute("w:val").map_err(|err| ExtractError::Malformed {
        kind: "docx",
        detail: format!("bad pStyle attribute: {err}"),
    })?;
    Ok(match attr {
        Some(a) => role_for_style(&String::from_utf8_lossy(&a.value)),
        None => TextRole::Body,
    })
}

/// Map an OOXML paragraph style id onto the three roles.
///
/// `Heading1` and `Title` are top-level; `Heading2` through `Heading9` and
/// `Subtitle` all flatten to the second level — the output has only two
/// heading sizes. Unknown styles are body text.
fn role_for_style(style: &str) -> TextRole {
    let lower = style.trim().to_ascii_lowercase();
    match lower.as_str() {
        "title" => return TextRole::Heading1,
        "subtitle" => return TextRole::Heading2,
        _ => {}
    }
    if let Some(rest) = lower.strip_prefix("heading") {
        let level = rest.trim_start_matches([' ', '-', '_']);
        return if level.is_empty() || level == "1" {
            TextRole::Heading1
        } else if level.chars().all(|c| c.is_ascii_digit()) {
            TextRole::Heading2
        } else {
            TextRole::Body
        };
    }
    TextRole::Body
}
