//! Structured error types.
//!
//! The layout core itself has one error source: invalid dimensions, which are
//! rejected up front instead of being clamped into a layout nobody asked for.
//! Style discovery has its own error type, but it never escapes
//! [`StyleResolver::with_discovery`](crate::style::StyleResolver::with_discovery).

use thiserror::Error;

use crate::model::HwpUnit;

/// Invalid input to the layout core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Font heights must be positive.
    #[error("font height must be positive, got {0}")]
    InvalidFontHeight(HwpUnit),
    /// Box widths must not be negative.
    #[error("box width must not be negative, got {0}")]
    InvalidBoxWidth(HwpUnit),
    /// A table needs at least one column.
    #[error("table has no columns")]
    EmptyTable,
}

/// Reject dimensions the width model cannot work with.
pub(crate) fn check_dimensions(font_height: HwpUnit, box_width: HwpUnit) -> Result<(), LayoutError> {
    if font_height <= 0 {
        return Err(LayoutError::InvalidFontHeight(font_height));
    }
    if box_width < 0 {
        return Err(LayoutError::InvalidBoxWidth(box_width));
    }
    Ok(())
}

/// Why a style catalog could not be used.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The catalog source is not well-formed XML.
    #[error("malformed style catalog: {0}")]
    Malformed(#[from] quick_xml::Error),
    /// An element the catalog needs carries a bad or missing attribute.
    #[error("invalid attribute `{attribute}` on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    /// The catalog contains no Hangul font faces.
    #[error("style catalog has no Hangul font faces")]
    NoFontFaces,
    /// The catalog contains no character properties.
    #[error("style catalog has no character properties")]
    NoCharProperties,
}

/// The unified error type of the crate's one-call entry points.
#[derive(Debug, Error)]
pub enum HwpxError {
    /// Config JSON failed to parse.
    #[error("failed to parse config: {source}{}", format_hint(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for HwpxError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report config schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        HwpxError::ParseError { source: e, hint }
    }
}
