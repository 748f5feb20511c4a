//! Data table layout: column widths, row heights, total height.
//!
//! The first row is the header row. Cells are laid out as paragraphs in the
//! column width minus the cell margins, so a wrapping cell can grow its row.

use serde::Serialize;

use crate::error::LayoutError;
use crate::model::{
    Edges, HwpUnit, DATA_TABLE_CELL_MARGIN, DATA_TABLE_ROW_HEIGHT, DATA_TABLE_WIDTH,
};
use crate::style::StyleBinding;
use crate::text::paragraph::{layout_paragraph, ParagraphBlock};

/// How row heights react to cell content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowSizing {
    /// Rows grow to fit their tallest cell, never below the base height.
    #[default]
    Grow,
    /// Every row has the base height regardless of content.
    Fixed,
}

/// Table geometry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub table_width: HwpUnit,
    pub cell_margin: Edges,
    /// Base height of every row.
    pub row_height: HwpUnit,
    pub sizing: RowSizing,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            table_width: DATA_TABLE_WIDTH,
            cell_margin: DATA_TABLE_CELL_MARGIN,
            row_height: DATA_TABLE_ROW_HEIGHT,
            sizing: RowSizing::Grow,
        }
    }
}

/// A laid-out table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDimensions {
    pub column_widths: Vec<HwpUnit>,
    /// Base row height.
    pub row_height: HwpUnit,
    /// Actual height of each row, header first.
    pub row_heights: Vec<HwpUnit>,
    pub total_height: HwpUnit,
    /// Paragraph layout of every cell, row-major.
    pub cells: Vec<Vec<ParagraphBlock>>,
}

impl TableDimensions {
    /// Height the table occupies in the section flow.
    pub fn block_height(&self, outer_margin: &Edges) -> HwpUnit {
        self.total_height.saturating_add(outer_margin.vertical())
    }
}

/// Split `total` evenly across `count` columns; the last column takes the
/// remainder of the division.
pub fn column_widths(total: HwpUnit, count: usize) -> Vec<HwpUnit> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as HwpUnit;
    let base = total / n;
    let mut widths = vec![base; count];
    widths[count - 1] += total - base * n;
    widths
}

impl TableLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizing(mut self, sizing: RowSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Lay out `rows` (header row first) across `column_count` columns.
    ///
    /// Missing cells are laid out empty; cells past `column_count` are
    /// ignored.
    pub fn layout(
        &self,
        column_count: usize,
        rows: &[Vec<String>],
        header: &StyleBinding,
        body: &StyleBinding,
    ) -> Result<TableDimensions, LayoutError> {
        if column_count == 0 {
            return Err(LayoutError::EmptyTable);
        }

        let widths = column_widths(self.table_width, column_count);
        let mut cells = Vec::with_capacity(rows.len());
        let mut row_heights = Vec::with_capacity(rows.len());

        for (r, row) in rows.iter().enumerate() {
            let binding = if r == 0 { header } else { body };
            let mut blocks = Vec::with_capacity(column_count);
            for (c, &width) in widths.iter().enumerate() {
                let text = row.get(c).map(String::as_str).unwrap_or("");
                let inner = (width - self.cell_margin.horizontal()).max(0);
                blocks.push(layout_paragraph(text, binding, inner)?);
            }

            let height = match self.sizing {
                RowSizing::Fixed => self.row_height,
                RowSizing::Grow => blocks
                    .iter()
                    .map(|b| b.block_height.saturating_add(self.cell_margin.vertical()))
                    .fold(self.row_height, HwpUnit::max),
            };
            row_heights.push(height);
            cells.push(blocks);
        }

        Ok(TableDimensions {
            column_widths: widths,
            row_height: self.row_height,
            total_height: row_heights.iter().fold(0, |acc: HwpUnit, &h| acc.saturating_add(h)),
            row_heights,
            cells,
        })
    }
}
