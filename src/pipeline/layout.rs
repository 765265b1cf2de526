//! Page layout: styled text blocks → positioned, paginated lines.
//!
//! Layout is a pure function from blocks and page geometry to a flat list
//! of [`LayoutLine`]s, each tagged with the page it belongs on. The
//! renderer never paginates; by the time it runs, every line already knows
//! its page, position, and type setting. That keeps the wrap/paginate
//! logic testable without producing a single PDF byte.
//!
//! Per block, in source order:
//! 1. resolve the role's font, size, and line height;
//! 2. greedily pack words into a line, measuring the candidate with real
//!    font metrics, committing when the next word would overflow;
//! 3. after the block's last line, advance the cursor an extra fraction of
//!    a line height to separate paragraphs;
//! 4. whenever the next baseline would fall below the bottom margin, start
//!    a new page and reset the cursor to the top.
//!
//! A single word wider than the line limit is placed on a line of its own;
//! there is no hyphenation.

use crate::config::ConversionConfig;
use crate::fonts::{self, FontKind};
use crate::pipeline::extract::{StyledTextBlock, TextRole};
use tracing::debug;

/// One wrapped line, positioned and paginated, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    /// Left edge of the text, in points from the page's left side.
    pub x: f32,
    /// Baseline height, in points from the page's bottom edge.
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    /// 0-based index of the page this line lands on.
    pub page_index: usize,
}

/// Resolved type setting for one role.
struct RoleStyle {
    font: FontKind,
    size: f32,
    line_height: f32,
}

impl RoleStyle {
    fn resolve(role: TextRole, config: &ConversionConfig) -> Self {
        let (font, size) = match role {
            TextRole::Heading1 => (FontKind::Bold, config.heading1_font_size),
            TextRole::Heading2 => (FontKind::Bold, config.heading2_font_size),
            TextRole::Body => (FontKind::Regular, config.body_font_size),
        };
        Self {
            font,
            size,
            line_height: size * config.line_spacing,
        }
    }
}

/// Cursor over the page column being filled.
struct PageCursor {
    page_index: usize,
    y: f32,
}

impl PageCursor {
    /// Move to a fresh page if the current baseline has dropped below the
    /// bottom margin.
    fn carry_over(&mut self, config: &ConversionConfig) {
        if self.y < config.margin {
            self.page_index += 1;
            self.y = config.top_y();
        }
    }
}

/// Wrap and paginate `blocks` against the configured page geometry.
///
/// Returns the lines in drawing order. An empty block list produces an
/// empty layout; the renderer still emits one blank page.
pub fn layout_blocks(blocks: &[StyledTextBlock], config: &ConversionConfig) -> Vec<LayoutLine> {
    let max_width = config.max_line_width();
    let mut lines = Vec::new();
    let mut cursor = PageCursor {
        page_index: 0,
        y: config.top_y(),
    };

    for block in blocks {
        let style = RoleStyle::resolve(block.role, config);

        for text in wrap_words(&block.text, style.font, style.size, max_width) {
            cursor.carry_over(config);
            lines.push(LayoutLine {
                text,
                x: config.margin,
                y: cursor.y,
                font_size: style.size,
                bold: style.font == FontKind::Bold,
                page_index: cursor.page_index,
            });
            cursor.y -= style.line_height;
        }

        // Paragraph gap: the last line already advanced one line height,
        // the configured fraction tops it up.
        cursor.y -= style.line_height * config.paragraph_spacing;
    }

    debug!(
        "Laid out {} lines across {} page(s)",
        lines.len(),
        lines.last().map(|l| l.page_index + 1).unwrap_or(0)
    );
    lines
}

/// Greedy word wrap: pack words until the measured candidate would exceed
/// `max_width`, then commit.
///
/// A word that alone exceeds the limit is emitted as its own line without
/// splitting. Returns no lines for whitespace-only input.
fn wrap_words(text: &str, font: FontKind, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
            continue;
        }
        let candidate_width =
            fonts::text_width(&current, font, size) + fonts::text_width(" ", font, size)
                + fonts::text_width(word, font, size);
        if candidate_width > max_width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, role: TextRole) -> StyledTextBlock {
        StyledTextBlock {
            text: text.to_string(),
            role,
        }
    }

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        assert!(layout_blocks(&[], &config()).is_empty());
    }

    #[test]
    fn short_paragraph_is_one_line_at_the_top_margin() {
        let cfg = config();
        let lines = layout_blocks(&[block("Hello world", TextRole::Body)], &cfg);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].x, cfg.margin);
        assert_eq!(lines[0].y, cfg.top_y());
        assert_eq!(lines[0].page_index, 0);
        assert!(!lines[0].bold);
    }

    #[test]
    fn every_line_measures_within_the_limit() {
        let cfg = config();
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do \
                    eiusmod tempor incididunt ut labore et dolore magna aliqua ut \
                    enim ad minim veniam quis nostrud exercitation ullamco";
        let lines = layout_blocks(&[block(text, TextRole::Body)], &cfg);
        assert!(lines.len() > 1, "text should have wrapped");
        for line in &lines {
            let font = if line.bold { FontKind::Bold } else { FontKind::Regular };
            let w = fonts::text_width(&line.text, font, line.font_size);
            assert!(
                w <= cfg.max_line_width() + 1e-3,
                "line '{}' measures {w} > {}",
                line.text,
                cfg.max_line_width()
            );
        }
    }

    #[test]
    fn wrapping_preserves_concatenated_text() {
        let cfg = config();
        let text = "the quick brown fox jumps over the lazy dog again and again \
                    until the paragraph is long enough to wrap onto several lines";
        let lines = layout_blocks(&[block(text, TextRole::Body)], &cfg);
        let rejoined = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn overlong_single_word_gets_its_own_line() {
        let cfg = config();
        let giant = "w".repeat(400);
        let text = format!("before {giant} after");
        let lines = layout_blocks(&[block(&text, TextRole::Body)], &cfg);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "before");
        assert_eq!(lines[1].text, giant);
        assert_eq!(lines[2].text, "after");
        // The giant word is the allowed exception to the width invariant.
        assert!(
            fonts::text_width(&lines[1].text, FontKind::Regular, lines[1].font_size)
                > cfg.max_line_width()
        );
    }

    #[test]
    fn headings_are_bold_and_larger() {
        let cfg = config();
        let lines = layout_blocks(
            &[
                block("Chapter", TextRole::Heading1),
                block("Section", TextRole::Heading2),
                block("Prose", TextRole::Body),
            ],
            &cfg,
        );
        assert!(lines[0].bold);
        assert_eq!(lines[0].font_size, cfg.heading1_font_size);
        assert!(lines[1].bold);
        assert_eq!(lines[1].font_size, cfg.heading2_font_size);
        assert!(!lines[2].bold);
        assert_eq!(lines[2].font_size, cfg.body_font_size);
    }

    #[test]
    fn paragraph_gap_is_one_and_a_half_line_heights() {
        let cfg = config();
        let lines = layout_blocks(
            &[block("One", TextRole::Body), block("Two", TextRole::Body)],
            &cfg,
        );
        let lh = cfg.body_font_size * cfg.line_spacing;
        let gap = lines[0].y - lines[1].y;
        assert!((gap - 1.5 * lh).abs() < 1e-3, "gap was {gap}");
    }

    #[test]
    fn long_text_paginates_within_margins() {
        let cfg = config();
        // Enough identical paragraphs to guarantee spilling onto page 2.
        let blocks: Vec<StyledTextBlock> = (0..60)
            .map(|i| block(&format!("Paragraph number {i} with a little text"), TextRole::Body))
            .collect();
        let lines = layout_blocks(&blocks, &cfg);

        let max_page = lines.iter().map(|l| l.page_index).max().unwrap();
        assert!(max_page >= 1, "expected at least two pages");
        assert!(lines.iter().any(|l| l.page_index == 0));
        assert!(lines.iter().any(|l| l.page_index == 1));

        for line in &lines {
            assert!(
                line.y >= cfg.margin && line.y <= cfg.page_height - cfg.margin,
                "line on page {} at y={} escapes the margins",
                line.page_index,
                line.y
            );
        }
    }

    #[test]
    fn page_indices_are_monotonic() {
        let cfg = config();
        let blocks: Vec<StyledTextBlock> = (0..120)
            .map(|_| block("padding paragraph to force many pages", TextRole::Body))
            .collect();
        let lines = layout_blocks(&blocks, &cfg);
        for pair in lines.windows(2) {
            assert!(pair[0].page_index <= pair[1].page_index);
        }
    }
}
