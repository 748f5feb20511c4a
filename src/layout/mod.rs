//! # Section Layout
//!
//! Turns a section's content items into a column of placed blocks.
//!
//! For every item, in document order:
//!
//! 1. resolve the item's role to a [`StyleBinding`]
//! 2. lay it out as a paragraph (or a table)
//! 3. advance the section's [`VerticalCursor`] by the block height
//! 4. record text, line segments and vertical offset
//!
//! The recorded blocks are final: the serializer writes their offsets and
//! line segments into the section markup without recomputing anything.
//!
//! Each section gets a fresh cursor. The title bars at the top of a section
//! are tables in the template with a fixed height, so they enter the flow
//! as fixed blocks of their anchor paragraph's height.

pub mod cursor;
pub mod table;

use serde::Serialize;

use crate::error::LayoutError;
use crate::model::*;
use crate::style::{StyleBinding, StyleResolver, StyleRole};
use crate::text::paragraph::{layout_paragraph, LineSegment};

pub use cursor::VerticalCursor;
pub use table::{RowSizing, TableDimensions, TableLayout};

/// Default title bar text of a body section.
const DEFAULT_BODY_TITLE: &str = "보고서 제목";
/// Title bar of the section composed for an empty, cover-less document.
const FALLBACK_TITLE: &str = "보고서";
/// Default tab label of an appendix section.
const DEFAULT_APPENDIX_TAB: &str = "참고1";

/// One block placed in a section's column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBlock {
    pub role: StyleRole,
    pub text: String,
    /// Offset of the block's top from the top of the section.
    pub vert_pos: HwpUnit,
    pub height: HwpUnit,
    /// Gap below the block.
    pub spacing: HwpUnit,
    pub segments: Vec<LineSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableDimensions>,
}

impl PlacedBlock {
    pub fn line_count(&self) -> usize {
        self.segments.len()
    }
}

/// All blocks of one section, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    /// Index of the section file in the package (`section{n}.xml`).
    pub index: usize,
    pub kind: SectionKind,
    pub blocks: Vec<PlacedBlock>,
    /// Offset just below the last block and its spacing.
    pub height: HwpUnit,
}

/// Layout of a whole report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub title: String,
    pub creator: String,
    /// Number of section files, counting the copied cover.
    pub section_count: usize,
    pub has_cover: bool,
    pub sections: Vec<SectionLayout>,
}

/// Lays out sections against one resolved style set.
pub struct SectionComposer<'a> {
    resolver: &'a StyleResolver,
    table: TableLayout,
    box_width: HwpUnit,
}

impl<'a> SectionComposer<'a> {
    pub fn new(resolver: &'a StyleResolver) -> Self {
        Self {
            resolver,
            table: TableLayout::default(),
            box_width: BODY_BOX_WIDTH,
        }
    }

    pub fn with_table_layout(mut self, table: TableLayout) -> Self {
        self.table = table;
        self
    }

    /// Lay out every section of `doc`.
    ///
    /// Body sections inherit the document's date and department when they
    /// don't set their own; appendix and unknown sections don't. A document
    /// with neither a cover nor sections gets one fallback body section, so
    /// the package is never empty.
    pub fn compose_document(&self, doc: &DocumentConfig) -> Result<LayoutReport, LayoutError> {
        let first_index = usize::from(doc.include_cover);
        let mut sections = Vec::with_capacity(doc.sections.len().max(1));

        for (i, section) in doc.sections.iter().enumerate() {
            let mut section = section.clone();
            if section.kind == SectionKind::Body {
                section.date.get_or_insert_with(|| doc.date.clone());
                section.department.get_or_insert_with(|| doc.department.clone());
            }
            sections.push(self.compose(&section, first_index + i)?);
        }

        if sections.is_empty() && !doc.include_cover {
            let fallback = SectionConfig {
                title_bar: Some(FALLBACK_TITLE.to_string()),
                ..Default::default()
            };
            sections.push(self.compose(&fallback, 0)?);
        }

        Ok(LayoutReport {
            title: doc.title.clone(),
            creator: doc.creator.clone(),
            section_count: sections.len() + usize::from(doc.include_cover),
            has_cover: doc.include_cover,
            sections,
        })
    }

    /// Lay out one section with a fresh cursor.
    pub fn compose(&self, section: &SectionConfig, index: usize) -> Result<SectionLayout, LayoutError> {
        let mut cursor = VerticalCursor::new();
        let mut blocks = Vec::new();

        match section.kind {
            SectionKind::Appendix => {
                let tab = section.title_bar.as_deref().unwrap_or(DEFAULT_APPENDIX_TAB);
                let text = format!("{tab} {}", section.appendix_title);
                self.place_fixed(&mut cursor, &mut blocks, StyleRole::AppendixBar, text, None);
                self.place_text(&mut cursor, &mut blocks, StyleRole::AppendixSpacer, String::new())?;
            }
            SectionKind::Body | SectionKind::Unknown => {
                let title = section.title_bar.as_deref().unwrap_or(DEFAULT_BODY_TITLE);
                self.place_fixed(&mut cursor, &mut blocks, StyleRole::TitleBar, title.to_string(), None);

                let date = section.date.as_deref().unwrap_or("");
                let department = section.department.as_deref().unwrap_or("");
                if !date.is_empty() && !department.is_empty() {
                    let text = format!("('{date}, {department})");
                    self.place_text(&mut cursor, &mut blocks, StyleRole::DateLine, text)?;
                }
                self.place_text(&mut cursor, &mut blocks, StyleRole::Spacer, String::new())?;
            }
        }

        for item in &section.content {
            self.place_item(&mut cursor, &mut blocks, item)?;
        }

        log::debug!("section {index}: {} blocks, height {}", blocks.len(), cursor.next_position());

        Ok(SectionLayout {
            index,
            kind: section.kind,
            height: cursor.next_position(),
            blocks,
        })
    }

    fn place_item(
        &self,
        cursor: &mut VerticalCursor,
        blocks: &mut Vec<PlacedBlock>,
        item: &ContentItem,
    ) -> Result<(), LayoutError> {
        let text = &item.text;
        let (role, content) = match item.kind {
            ItemKind::Heading => {
                self.place_text(cursor, blocks, StyleRole::HeadingGap, String::new())?;
                (StyleRole::Heading, format!("□ {text} "))
            }
            ItemKind::Paragraph => (StyleRole::Body, format!(" {text}")),
            ItemKind::Bullet => (StyleRole::Bullet, format!(" ㅇ {text}")),
            ItemKind::Dash => (StyleRole::Dash, format!("   - {text}")),
            ItemKind::Star => (StyleRole::Star, format!("     * {text}")),
            ItemKind::Note => (StyleRole::Note, format!("▷ {text}")),
            ItemKind::Empty => (StyleRole::Empty, String::new()),
            ItemKind::Plain => (StyleRole::Body, text.clone()),
            ItemKind::Table => return self.place_table(cursor, blocks, item),
        };
        self.place_text(cursor, blocks, role, content)
    }

    fn place_table(
        &self,
        cursor: &mut VerticalCursor,
        blocks: &mut Vec<PlacedBlock>,
        item: &ContentItem,
    ) -> Result<(), LayoutError> {
        if !item.caption.is_empty() {
            let caption = format!("< {} >", item.caption);
            self.place_text(cursor, blocks, StyleRole::Caption, caption)?;
        }

        let mut rows = Vec::with_capacity(item.rows.len() + 1);
        rows.push(item.headers.clone());
        rows.extend(item.row_texts());

        let dims = self.table.layout(
            item.headers.len(),
            &rows,
            &self.resolver.resolve(StyleRole::TableHeaderCell),
            &self.resolver.resolve(StyleRole::TableBodyCell),
        )?;
        let height = dims.block_height(&DATA_TABLE_OUTER_MARGIN);
        self.place_fixed(cursor, blocks, StyleRole::TableAnchor, String::new(), Some((height, dims)));
        Ok(())
    }

    /// Place a paragraph laid out from `text`.
    fn place_text(
        &self,
        cursor: &mut VerticalCursor,
        blocks: &mut Vec<PlacedBlock>,
        role: StyleRole,
        text: String,
    ) -> Result<(), LayoutError> {
        let binding = self.resolver.resolve(role);
        let paragraph = layout_paragraph(&text, &binding, self.box_width)?;
        let vert_pos = cursor.advance(paragraph.block_height, binding.line_spacing);
        blocks.push(PlacedBlock {
            role,
            vert_pos,
            height: paragraph.block_height,
            spacing: binding.line_spacing,
            segments: paragraph.line_segments(vert_pos, &binding, self.box_width),
            text,
            table: None,
        });
        Ok(())
    }

    /// Place a single-line anchor paragraph whose height is given by an
    /// embedded object (a bar or a table) rather than by its text.
    fn place_fixed(
        &self,
        cursor: &mut VerticalCursor,
        blocks: &mut Vec<PlacedBlock>,
        role: StyleRole,
        text: String,
        table: Option<(HwpUnit, TableDimensions)>,
    ) {
        let binding = self.resolver.resolve(role);
        let (height, table) = match table {
            Some((height, dims)) => (height, Some(dims)),
            None => (binding.line_height, None),
        };
        let vert_pos = cursor.advance(height, binding.line_spacing);
        blocks.push(PlacedBlock {
            role,
            text,
            vert_pos,
            height,
            spacing: binding.line_spacing,
            segments: vec![anchor_segment(vert_pos, height, &binding, self.box_width)],
            table,
        });
    }
}

/// The one line segment of an anchor paragraph.
fn anchor_segment(
    vert_pos: HwpUnit,
    height: HwpUnit,
    binding: &StyleBinding,
    box_width: HwpUnit,
) -> LineSegment {
    let baseline = if height == binding.line_height {
        binding.baseline
    } else {
        height * 85 / 100
    };
    LineSegment {
        text_pos: 0,
        vert_pos,
        vert_size: height,
        text_height: height,
        baseline,
        spacing: binding.line_spacing,
        horz_pos: 0,
        horz_size: box_width,
    }
}
