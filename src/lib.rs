//! # hwpx-layout
//!
//! Layout estimation for HWPX reports built from a fixed template.
//!
//! Every HWPX paragraph carries a `linesegarray`: where each visual line
//! starts in the text, how tall it is, and where it sits vertically. Hancom
//! Office trusts those values on open, so a generator that writes nonsense
//! there gets overlapping or clipped text. This crate estimates them without
//! a font engine: it classifies characters into coarse width classes,
//! word-wraps greedily against a calibrated share of the box width, and
//! stacks the resulting blocks in a running vertical cursor.
//!
//! ## Architecture
//!
//! ```text
//! Config (JSON)          Template header (optional)
//!       ↓                        ↓
//!   [model]                [style::catalog]  nearest-match discovery
//!       ↓                        ↓
//!   [layout]  ←──────────  [style]    role → binding
//!       ↓
//!   [text]      line breaks, paragraph blocks   ← [font] glyph widths
//!       ↓
//!   LayoutReport → serializer / packager (not part of this crate)
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod style;
pub mod text;

pub use error::{DiscoveryError, HwpxError, LayoutError};
pub use layout::{
    LayoutReport, PlacedBlock, SectionComposer, SectionLayout, TableDimensions, TableLayout,
    VerticalCursor,
};
pub use model::{DocumentConfig, HwpUnit};
pub use style::{discover_styles, StyleBinding, StyleResolver, StyleRole, StyleSheet};
pub use text::paragraph::{layout_paragraph, ParagraphBlock};
pub use text::{break_lines, LineBreakSet};

/// The default binding of `role`.
pub fn resolve_style(role: StyleRole) -> StyleBinding {
    StyleSheet::defaults().get(role)
}

/// Lay out a table of `column_count` columns in `table_width`.
///
/// `rows` holds the header row first. Rows grow to fit wrapping cells.
pub fn layout_table(
    column_count: usize,
    rows: &[Vec<String>],
    header: &StyleBinding,
    body: &StyleBinding,
    table_width: HwpUnit,
) -> Result<TableDimensions, LayoutError> {
    let table = TableLayout {
        table_width,
        ..TableLayout::default()
    };
    table.layout(column_count, rows, header, body)
}

/// Lay out a whole report.
///
/// When a template header is given, its character properties are matched
/// against the style roles; any discovery failure is logged and the default
/// styles are used instead.
pub fn layout_document(
    config: &DocumentConfig,
    catalog: Option<&str>,
) -> Result<LayoutReport, LayoutError> {
    let resolver = match catalog {
        Some(source) => StyleResolver::with_discovery(StyleSheet::defaults(), discover_styles(source)),
        None => StyleResolver::default(),
    };
    SectionComposer::new(&resolver).compose_document(config)
}

/// Lay out a report described as JSON.
pub fn layout_json(json: &str, catalog: Option<&str>) -> Result<LayoutReport, HwpxError> {
    let config: DocumentConfig = serde_json::from_str(json)?;
    Ok(layout_document(&config, catalog)?)
}
