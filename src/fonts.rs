//! Metrics and encoding for the two base-14 fonts the renderer uses.
//!
//! Body text is set in Helvetica, headings in Helvetica-Bold. Both are
//! base-14 fonts every PDF viewer ships, so nothing is embedded — the
//! output references them by name with WinAnsiEncoding. That keeps the
//! generated files small and makes line measurement a table lookup: the
//! advance widths below are the AFM values (thousandths of an em) for the
//! printable ASCII range, which is exact for the text we measure during
//! word wrap.

/// The two faces the renderer can set text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Helvetica — body text.
    Regular,
    /// Helvetica-Bold — headings.
    Bold,
}

impl FontKind {
    /// PostScript base font name as it appears in the PDF font dictionary.
    pub fn base_name(self) -> &'static str {
        match self {
            FontKind::Regular => "Helvetica",
            FontKind::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name the content streams use (`/F1`, `/F2`).
    pub fn resource_name(self) -> &'static str {
        match self {
            FontKind::Regular => "F1",
            FontKind::Bold => "F2",
        }
    }
}

/// Glyphs outside the tables below measure as this width (the width of most
/// Helvetica lowercase letters and all digits). An estimate is acceptable:
/// it only affects where rare non-ASCII text wraps, never whether it renders.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for `0x20..=0x7E`, thousandths of an em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for `0x20..=0x7E`, thousandths of an em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance width of one character at 1000 units/em.
fn char_units(c: char, font: FontKind) -> u16 {
    let table = match font {
        FontKind::Regular => &HELVETICA_WIDTHS,
        FontKind::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c as u32 {
        u @ 0x20..=0x7E => table[(u - 0x20) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Measure the rendered width of `text` at `size` points.
///
/// This is the measurement the layout engine wraps against; because the
/// renderer draws with the same fonts, a line that measures within the
/// limit here renders within it too.
pub fn text_width(text: &str, font: FontKind, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_units(c, font))).sum();
    units as f32 * size / 1000.0
}

/// Encode text as WinAnsi (CP-1252) bytes for a `Tj` show operation.
///
/// WinAnsi matches Latin-1 outside `0x80..0x9F`; the characters in that
/// gap that documents actually contain (curly quotes, dashes, ellipsis,
/// euro) are mapped explicitly. Anything unrepresentable becomes `?` so
/// the byte count always matches the character count the viewer draws.
pub fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u8,
            _ => match c {
                '\u{20AC}' => 0x80, // €
                '\u{2018}' => 0x91, // '
                '\u{2019}' => 0x92, // '
                '\u{201C}' => 0x93, // "
                '\u{201D}' => 0x94, // "
                '\u{2022}' => 0x95, // •
                '\u{2013}' => 0x96, // –
                '\u{2014}' => 0x97, // —
                '\u{2026}' => 0x85, // …
                _ => b'?',
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_width_matches_afm() {
        // Helvetica space is 278/1000 em.
        let w = text_width(" ", FontKind::Regular, 1000.0);
        assert!((w - 278.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bold_is_at_least_as_wide_as_regular() {
        let s = "Heading Text 123";
        assert!(
            text_width(s, FontKind::Bold, 12.0) >= text_width(s, FontKind::Regular, 12.0)
        );
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let at_10 = text_width("hello world", FontKind::Regular, 10.0);
        let at_20 = text_width("hello world", FontKind::Regular, 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn winansi_passes_ascii_through() {
        assert_eq!(to_winansi_bytes("Hello!"), b"Hello!");
    }

    #[test]
    fn winansi_maps_typographic_punctuation() {
        assert_eq!(to_winansi_bytes("\u{2014}"), vec![0x97]);
        assert_eq!(to_winansi_bytes("\u{201C}a\u{201D}"), vec![0x93, b'a', 0x94]);
    }

    #[test]
    fn winansi_replaces_unmappable_with_question_mark() {
        assert_eq!(to_winansi_bytes("漢"), vec![b'?']);
    }
}
