//! Vertical flow within one section.

use crate::model::HwpUnit;

/// Hands out the vertical offset of each block in a section.
///
/// Each block starts where the previous one ended plus the previous block's
/// trailing spacing. One cursor per section; reset it only between
/// independent sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalCursor {
    position: HwpUnit,
    last_block_height: HwpUnit,
    last_spacing: HwpUnit,
    is_first: bool,
}

impl Default for VerticalCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalCursor {
    pub fn new() -> Self {
        Self {
            position: 0,
            last_block_height: 0,
            last_spacing: 0,
            is_first: true,
        }
    }

    /// Place a block and return its start offset.
    ///
    /// The first block of a section always starts at 0. Zero or negative
    /// heights are accepted (an empty spacer, for one). Offsets saturate at
    /// `HwpUnit::MAX`.
    pub fn advance(&mut self, block_height: HwpUnit, trailing_spacing: HwpUnit) -> HwpUnit {
        self.position = self.next_position();
        self.is_first = false;
        self.last_block_height = block_height;
        self.last_spacing = trailing_spacing;
        self.position
    }

    /// Back to the state of a fresh cursor.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start offset of the most recently placed block.
    pub fn position(&self) -> HwpUnit {
        self.position
    }

    /// Where the next block would start.
    pub fn next_position(&self) -> HwpUnit {
        if self.is_first {
            0
        } else {
            self.position
                .saturating_add(self.last_block_height)
                .saturating_add(self.last_spacing)
        }
    }
}
