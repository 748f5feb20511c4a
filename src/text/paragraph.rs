//! Paragraph blocks: line count, block height, and per-line segments.

use serde::Serialize;

use super::{break_lines, effective_width, LineBreakSet};
use crate::error::{check_dimensions, LayoutError};
use crate::font::measure_width;
use crate::model::HwpUnit;
use crate::style::StyleBinding;

/// A laid-out paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphBlock {
    pub line_count: usize,
    pub block_height: HwpUnit,
    pub breaks: LineBreakSet,
    pub line_height: HwpUnit,
    pub line_spacing: HwpUnit,
}

/// Geometry of one visual line, as the serializer writes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    /// Char offset of the first character on the line.
    pub text_pos: usize,
    pub vert_pos: HwpUnit,
    pub vert_size: HwpUnit,
    pub text_height: HwpUnit,
    pub baseline: HwpUnit,
    pub spacing: HwpUnit,
    pub horz_pos: HwpUnit,
    pub horz_size: HwpUnit,
}

/// Height of `line_count` lines: every line plus the gaps between them.
///
/// Saturates at `HwpUnit::MAX` instead of overflowing.
pub fn block_height(line_count: usize, line_height: HwpUnit, line_spacing: HwpUnit) -> HwpUnit {
    let n = HwpUnit::try_from(line_count.max(1)).unwrap_or(HwpUnit::MAX);
    n.saturating_mul(line_height)
        .saturating_add((n - 1).saturating_mul(line_spacing))
}

/// Lay out one paragraph in a box of `box_width`.
///
/// Text that fits on one line skips the breaker entirely.
pub fn layout_paragraph(
    text: &str,
    binding: &StyleBinding,
    box_width: HwpUnit,
) -> Result<ParagraphBlock, LayoutError> {
    check_dimensions(binding.text_height, box_width)?;

    let breaks = if measure_width(text, binding.text_height) <= effective_width(box_width) {
        LineBreakSet::single()
    } else {
        break_lines(text, binding.text_height, box_width)?
    };

    let line_count = breaks.line_count();
    Ok(ParagraphBlock {
        line_count,
        block_height: block_height(line_count, binding.line_height, binding.line_spacing),
        breaks,
        line_height: binding.line_height,
        line_spacing: binding.line_spacing,
    })
}

impl ParagraphBlock {
    /// Distance from the top of one line to the top of the next.
    pub fn line_pitch(&self) -> HwpUnit {
        self.line_height.saturating_add(self.line_spacing)
    }

    /// One segment per line, the first line's top at `origin`.
    pub fn line_segments(
        &self,
        origin: HwpUnit,
        binding: &StyleBinding,
        box_width: HwpUnit,
    ) -> Vec<LineSegment> {
        self.breaks
            .offsets()
            .iter()
            .enumerate()
            .map(|(k, &text_pos)| LineSegment {
                text_pos,
                vert_pos: origin.saturating_add((k as HwpUnit).saturating_mul(self.line_pitch())),
                vert_size: binding.line_height,
                text_height: binding.text_height,
                baseline: binding.baseline,
                spacing: binding.line_spacing,
                horz_pos: 0,
                horz_size: box_width,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BODY_BOX_WIDTH;
    use crate::style::{StyleRole, StyleSheet};

    fn body() -> StyleBinding {
        StyleSheet::defaults().get(StyleRole::Body)
    }

    #[test]
    fn test_single_line_height() {
        let block = layout_paragraph("짧은 문장", &body(), BODY_BOX_WIDTH).unwrap();
        assert_eq!(block.line_count, 1);
        assert_eq!(block.block_height, 1500);
        assert_eq!(block.breaks.offsets(), &[0]);
    }

    #[test]
    fn test_empty_paragraph() {
        let block = layout_paragraph("", &body(), BODY_BOX_WIDTH).unwrap();
        assert_eq!(block.line_count, 1);
        assert_eq!(block.block_height, 1500);
    }

    #[test]
    fn test_multi_line_height_formula() {
        // 60 Hangul syllables at 1500 = 90000; effective 43851 → 29 per line
        let text: String = std::iter::repeat('한').take(60).collect();
        let block = layout_paragraph(&text, &body(), BODY_BOX_WIDTH).unwrap();
        assert_eq!(block.breaks.offsets(), &[0, 29, 58]);
        assert_eq!(block.line_count, 3);
        assert_eq!(block.block_height, 3 * 1500 + 2 * 900);
    }

    #[test]
    fn test_block_height_formula() {
        assert_eq!(block_height(1, 1500, 900), 1500);
        assert_eq!(block_height(2, 1500, 900), 3900);
        assert_eq!(block_height(5, 1300, 780), 5 * 1300 + 4 * 780);
        assert_eq!(block_height(0, 1500, 900), 1500);
    }

    #[test]
    fn test_heights_saturate() {
        assert_eq!(block_height(usize::MAX, 1500, 900), HwpUnit::MAX);

        // 3000 one-char lines of a 1,000,000-high binding in a zero-width box
        let tall = StyleBinding::new(0, 0, 0, 1_000_000, 850_000, 0);
        let text = "x".repeat(3000);
        let block = layout_paragraph(&text, &tall, 0).unwrap();
        assert_eq!(block.line_count, 3000);
        assert_eq!(block.block_height, HwpUnit::MAX);
        let segs = block.line_segments(0, &tall, 0);
        assert_eq!(segs[2999].vert_pos, HwpUnit::MAX);
    }

    #[test]
    fn test_fast_path_agrees_with_breaker() {
        let text = "A line that comfortably fits the body box.";
        let block = layout_paragraph(text, &body(), BODY_BOX_WIDTH).unwrap();
        let full = break_lines(text, 1500, BODY_BOX_WIDTH).unwrap();
        assert_eq!(block.breaks, full);
    }

    #[test]
    fn test_line_segments() {
        let text: String = std::iter::repeat('한').take(60).collect();
        let binding = body();
        let block = layout_paragraph(&text, &binding, BODY_BOX_WIDTH).unwrap();
        let segs = block.line_segments(1000, &binding, BODY_BOX_WIDTH);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text_pos, 0);
        assert_eq!(segs[0].vert_pos, 1000);
        assert_eq!(segs[1].text_pos, 29);
        assert_eq!(segs[1].vert_pos, 1000 + 2400);
        assert_eq!(segs[2].vert_pos, 1000 + 4800);
        assert!(segs.iter().all(|s| s.baseline == 1275 && s.horz_size == BODY_BOX_WIDTH));
    }

    #[test]
    fn test_invalid_binding_rejected() {
        let mut binding = body();
        binding.text_height = 0;
        assert_eq!(
            layout_paragraph("x", &binding, BODY_BOX_WIDTH),
            Err(LayoutError::InvalidFontHeight(0))
        );
        assert_eq!(
            layout_paragraph("x", &body(), -10),
            Err(LayoutError::InvalidBoxWidth(-10))
        );
    }
}
