//! # Document Model
//!
//! The generation config a caller hands to the engine: document metadata and
//! an ordered list of sections, each holding content items. The JSON shape is
//! the one the report generator has always accepted, so existing config files
//! keep working.
//!
//! Also home to the page geometry of the bundled template. All lengths are
//! HWPUNIT (1/7200 inch).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A length in HWPUNIT.
pub type HwpUnit = i32;

// ── Page geometry of the bundled template ──────────────────────

pub const PAGE_WIDTH: HwpUnit = 59528;
pub const PAGE_HEIGHT: HwpUnit = 84188;
pub const MARGIN_LEFT: HwpUnit = 5669;
pub const MARGIN_RIGHT: HwpUnit = 5669;
pub const MARGIN_TOP: HwpUnit = 2834;
pub const MARGIN_BOTTOM: HwpUnit = 4251;
pub const CONTENT_WIDTH: HwpUnit = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// Width of the line box body paragraphs are laid out in.
pub const BODY_BOX_WIDTH: HwpUnit = 48188;
/// Width of a data table.
pub const DATA_TABLE_WIDTH: HwpUnit = 47622;
/// Base height of one data-table row.
pub const DATA_TABLE_ROW_HEIGHT: HwpUnit = 2048;
/// Inner margins of a data-table cell.
pub const DATA_TABLE_CELL_MARGIN: Edges = Edges {
    top: 141,
    right: 510,
    bottom: 141,
    left: 510,
};
/// Outer margins around a data table.
pub const DATA_TABLE_OUTER_MARGIN: Edges = Edges::uniform(283);

/// Edge values (top, right, bottom, left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub top: HwpUnit,
    pub right: HwpUnit,
    pub bottom: HwpUnit,
    pub left: HwpUnit,
}

impl Edges {
    pub const fn uniform(v: HwpUnit) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> HwpUnit {
        self.left + self.right
    }

    pub fn vertical(&self) -> HwpUnit {
        self.top + self.bottom
    }
}

// ── Generation config ───────────────────────────────────────────

/// A complete report to lay out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_creator")]
    pub creator: String,

    /// Report date, shown in the date line of body sections.
    #[serde(default)]
    pub date: String,

    /// Issuing department, shown next to the date.
    #[serde(default)]
    pub department: String,

    /// Whether the template's cover page is kept as the first section.
    /// The cover is copied verbatim by the packager and is never laid out.
    #[serde(default = "default_true")]
    pub include_cover: bool,

    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            creator: default_creator(),
            date: String::new(),
            department: String::new(),
            include_cover: true,
            sections: Vec::new(),
        }
    }
}

fn default_title() -> String {
    "보고서".to_string()
}

fn default_creator() -> String {
    "이노베이션아카데미".to_string()
}

fn default_true() -> bool {
    true
}

/// The two section layouts the template offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Gradient title bar followed by the date line.
    #[default]
    Body,
    /// Tab-style bar ("참고1 | title").
    Appendix,
    /// Anything else is laid out as a body section.
    #[serde(other)]
    Unknown,
}

/// One section of the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionConfig {
    #[serde(rename = "type", default)]
    pub kind: SectionKind,

    /// Title bar text for body sections, tab label for appendices.
    #[serde(default)]
    pub title_bar: Option<String>,

    /// Title next to the tab label of an appendix.
    #[serde(default)]
    pub appendix_title: String,

    /// Inherited from the document when not set.
    #[serde(default)]
    pub date: Option<String>,

    /// Inherited from the document when not set.
    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// Content item types. Unknown types are laid out as plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Heading,
    #[default]
    Paragraph,
    Bullet,
    Dash,
    Star,
    Table,
    Note,
    Empty,
    #[serde(other)]
    Plain,
}

/// One content item inside a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type", default)]
    pub kind: ItemKind,

    #[serde(default)]
    pub text: String,

    /// Table header cells.
    #[serde(default)]
    pub headers: Vec<String>,

    /// Table body rows. Cells may be any JSON scalar.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,

    /// Table caption, rendered as `< caption >` above the table.
    #[serde(default)]
    pub caption: String,
}

impl ContentItem {
    pub fn new(kind: ItemKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Body rows with every cell rendered as display text.
    pub fn row_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}

/// Render a JSON cell value as the text a reader would expect to see.
///
/// Cells keep their JSON spelling: `null` is an empty cell and booleans
/// stay `true`/`false`.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_width() {
        assert_eq!(CONTENT_WIDTH, 48190);
    }

    #[test]
    fn test_document_defaults() {
        let doc: DocumentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.title, "보고서");
        assert_eq!(doc.creator, "이노베이션아카데미");
        assert!(doc.include_cover);
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_unknown_kinds_fall_back() {
        let json = r#"{
            "sections": [{
                "type": "sidebar",
                "content": [{ "type": "quote", "text": "hi" }, { "text": "plain" }]
            }]
        }"#;
        let doc: DocumentConfig = serde_json::from_str(json).unwrap();
        let section = &doc.sections[0];
        assert_eq!(section.kind, SectionKind::Unknown);
        assert_eq!(section.content[0].kind, ItemKind::Plain);
        assert_eq!(section.content[1].kind, ItemKind::Paragraph);
    }

    #[test]
    fn test_table_cells_stringified() {
        let json = r#"{ "type": "table", "headers": ["a", "b"], "rows": [["x", 42, 1.5, null, true]] }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::Table);
        assert_eq!(item.row_texts(), vec![vec!["x", "42", "1.5", "", "true"]]);
    }

    #[test]
    fn test_edges() {
        assert_eq!(DATA_TABLE_CELL_MARGIN.horizontal(), 1020);
        assert_eq!(DATA_TABLE_CELL_MARGIN.vertical(), 282);
        assert_eq!(DATA_TABLE_OUTER_MARGIN.vertical(), 566);
    }
}
