//! # Line Breaking
//!
//! Greedy word wrap over estimated glyph widths.
//!
//! The target renderer wraps a little earlier than the nominal box width
//! would suggest, so lines are filled only up to [`EFFECTIVE_WIDTH_PERMILLE`]
//! of the box. Break offsets are char indices into the text, which is what
//! the `textpos` attribute of a line segment counts.

pub mod paragraph;

use serde::Serialize;

use crate::error::{check_dimensions, LayoutError};
use crate::font::glyph_width;
use crate::model::HwpUnit;

/// Fraction of the box width usable before a line wraps, per mille.
pub const EFFECTIVE_WIDTH_PERMILLE: i64 = 910;

/// Usable line width for a nominal box width.
pub fn effective_width(box_width: HwpUnit) -> i64 {
    box_width.max(0) as i64 * EFFECTIVE_WIDTH_PERMILLE / 1000
}

/// Char offsets at which visual lines begin.
///
/// Always non-empty, starts at 0, strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineBreakSet(Vec<usize>);

impl LineBreakSet {
    /// The set for text that fits on one line.
    pub fn single() -> Self {
        Self(vec![0])
    }

    pub fn offsets(&self) -> &[usize] {
        &self.0
    }

    /// Number of visual lines.
    pub fn line_count(&self) -> usize {
        self.0.len()
    }

    /// Char ranges of each line, given the total char count of the text.
    pub fn line_ranges(&self, char_count: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().map(move |(i, &start)| {
            let end = self.0.get(i + 1).copied().unwrap_or(char_count);
            (start, end.max(start))
        })
    }
}

/// Break `text` into lines that fit in `box_width` at `font_height`.
///
/// Walks the text once, accumulating widths. On overflow it breaks after the
/// most recent space on the current line; when there is none the current
/// character starts a new line. A space that overflows hangs at the end of
/// its line. Every offset is below the text's char count.
pub fn break_lines(
    text: &str,
    font_height: HwpUnit,
    box_width: HwpUnit,
) -> Result<LineBreakSet, LayoutError> {
    check_dimensions(font_height, box_width)?;

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(LineBreakSet::single());
    }

    let max_width = effective_width(box_width);
    let widths: Vec<i64> = chars
        .iter()
        .map(|&ch| glyph_width(ch, font_height) as i64)
        .collect();

    let mut breaks = vec![0];
    let mut line_start = 0;
    let mut line_width: i64 = 0;
    // Offset just past the most recent space on the current line.
    let mut last_space: Option<usize> = None;

    for (i, &ch) in chars.iter().enumerate() {
        let char_width = widths[i];

        if ch == ' ' {
            last_space = Some(i + 1);
        }

        if line_width + char_width > max_width && line_start < i {
            match last_space {
                // A final space hangs; a break at the end would open an empty line
                Some(sp) if sp >= chars.len() => {
                    line_width = 0;
                }
                Some(sp) if sp > line_start => {
                    breaks.push(sp);
                    line_start = sp;
                    // sp is i + 1 when the overflowing char is the space itself
                    line_width = if sp > i { 0 } else { widths[sp..=i].iter().sum() };
                    // The carried-over word may not fit on its own either
                    if line_width > max_width && sp < i {
                        breaks.push(i);
                        line_start = i;
                        line_width = char_width;
                    }
                }
                _ => {
                    breaks.push(i);
                    line_start = i;
                    line_width = char_width;
                }
            }
            last_space = None;
            continue;
        }

        line_width += char_width;
    }

    Ok(LineBreakSet(breaks))
}
