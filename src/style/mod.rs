//! # Style Roles
//!
//! Content is authored against semantic roles ("heading", "bullet", "table
//! header cell") rather than the numeric property ids of a particular
//! template. A [`StyleSheet`] maps every role to a concrete [`StyleBinding`];
//! the [`StyleResolver`] owns one sheet for the whole generation run.
//!
//! The shipped sheet matches the bundled report template. When a different
//! template header is available, [`catalog`] can discover better-fitting
//! character properties and overlay them on the defaults.

pub mod catalog;

use serde::Serialize;

use crate::error::DiscoveryError;
use crate::model::HwpUnit;

pub use catalog::{discover_styles, DiscoveredStyles, StyleCatalog};

/// A semantic formatting role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleRole {
    /// Paragraph anchoring the gradient title bar of a body section.
    TitleBar,
    DateLine,
    /// Spacer below the title bar / date line.
    Spacer,
    /// Empty line inserted before every heading.
    HeadingGap,
    Heading,
    Body,
    Bullet,
    Dash,
    Star,
    Note,
    Empty,
    Caption,
    /// Paragraph anchoring a data table.
    TableAnchor,
    TableHeaderCell,
    TableBodyCell,
    /// Paragraph anchoring the tab-style appendix bar.
    AppendixBar,
    /// Spacer below the appendix bar.
    AppendixSpacer,
}

impl StyleRole {
    pub const COUNT: usize = 17;

    pub const ALL: [StyleRole; Self::COUNT] = [
        StyleRole::TitleBar,
        StyleRole::DateLine,
        StyleRole::Spacer,
        StyleRole::HeadingGap,
        StyleRole::Heading,
        StyleRole::Body,
        StyleRole::Bullet,
        StyleRole::Dash,
        StyleRole::Star,
        StyleRole::Note,
        StyleRole::Empty,
        StyleRole::Caption,
        StyleRole::TableAnchor,
        StyleRole::TableHeaderCell,
        StyleRole::TableBodyCell,
        StyleRole::AppendixBar,
        StyleRole::AppendixSpacer,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Concrete formatting for one role.
///
/// `font_ref_id` is the character property id (`charPrIDRef`), `box_ref_id`
/// the paragraph property id (`paraPrIDRef`), `style_ref_id` the style id.
/// Heights are per line; `line_spacing` is the gap below each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBinding {
    pub font_ref_id: u32,
    pub box_ref_id: u32,
    pub style_ref_id: u32,
    pub line_height: HwpUnit,
    pub text_height: HwpUnit,
    pub baseline: HwpUnit,
    pub line_spacing: HwpUnit,
}

impl StyleBinding {
    /// A binding whose line box equals its text height.
    pub const fn new(
        font_ref_id: u32,
        box_ref_id: u32,
        style_ref_id: u32,
        height: HwpUnit,
        baseline: HwpUnit,
        line_spacing: HwpUnit,
    ) -> Self {
        Self {
            font_ref_id,
            box_ref_id,
            style_ref_id,
            line_height: height,
            text_height: height,
            baseline,
            line_spacing,
        }
    }

    /// Re-derive the line metrics for a different character height,
    /// keeping this binding's spacing-to-height proportion.
    pub fn rescaled(&self, font_ref_id: u32, height: HwpUnit) -> Self {
        let line_spacing = if self.line_height > 0 {
            (self.line_spacing as i64 * height as i64 / self.line_height as i64) as HwpUnit
        } else {
            self.line_spacing
        };
        Self {
            font_ref_id,
            line_height: height,
            text_height: height,
            baseline: height * 85 / 100,
            line_spacing,
            ..*self
        }
    }
}

/// Bindings of the bundled report template.
fn default_binding(role: StyleRole) -> StyleBinding {
    match role {
        StyleRole::TitleBar => StyleBinding::new(10, 17, 0, 3603, 3063, 900),
        StyleRole::DateLine => StyleBinding::new(50, 17, 0, 1200, 1020, 720),
        StyleRole::Spacer => StyleBinding::new(39, 3, 0, 800, 680, 480),
        StyleRole::HeadingGap => StyleBinding::new(41, 19, 0, 600, 510, 360),
        StyleRole::Heading => StyleBinding::new(2, 28, 15, 1500, 1275, 900),
        StyleRole::Body => StyleBinding::new(36, 19, 0, 1500, 1275, 900),
        StyleRole::Bullet => StyleBinding::new(36, 19, 0, 1500, 1275, 900),
        StyleRole::Dash => StyleBinding::new(36, 20, 0, 1500, 1275, 900),
        StyleRole::Star => StyleBinding::new(57, 21, 0, 1300, 1105, 780),
        StyleRole::Note => StyleBinding::new(47, 24, 0, 1400, 1190, 840),
        StyleRole::Empty => StyleBinding::new(41, 19, 0, 600, 510, 360),
        StyleRole::Caption => StyleBinding::new(17, 22, 0, 1300, 1105, 780),
        StyleRole::TableAnchor => StyleBinding::new(9, 22, 0, 6710, 5704, 600),
        StyleRole::TableHeaderCell => StyleBinding::new(28, 25, 0, 1200, 1020, 360),
        StyleRole::TableBodyCell => StyleBinding::new(33, 25, 0, 1200, 1020, 360),
        StyleRole::AppendixBar => StyleBinding::new(10, 17, 0, 2831, 2406, 300),
        StyleRole::AppendixSpacer => StyleBinding::new(40, 28, 15, 1500, 1275, 900),
    }
}

/// A complete role → binding table.
///
/// Complete by construction: there is no way to build a sheet with a
/// missing role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    bindings: [StyleBinding; StyleRole::COUNT],
}

impl StyleSheet {
    /// The bindings of the bundled template.
    pub fn defaults() -> Self {
        Self {
            bindings: std::array::from_fn(|i| default_binding(StyleRole::ALL[i])),
        }
    }

    pub fn get(&self, role: StyleRole) -> StyleBinding {
        self.bindings[role.index()]
    }

    /// Replace the binding of one role.
    pub fn with(mut self, role: StyleRole, binding: StyleBinding) -> Self {
        self.bindings[role.index()] = binding;
        self
    }

    /// Every role with its binding, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleRole, StyleBinding)> + '_ {
        StyleRole::ALL.iter().map(move |&role| (role, self.get(role)))
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Resolves roles to bindings for one generation run.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    sheet: StyleSheet,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(StyleSheet::defaults())
    }
}

impl StyleResolver {
    pub fn new(sheet: StyleSheet) -> Self {
        Self { sheet }
    }

    /// Build a resolver from the outcome of style discovery.
    ///
    /// A failed discovery is logged and the whole `defaults` sheet is used.
    /// A successful one overlays the roles it matched; unmatched roles keep
    /// their default binding.
    pub fn with_discovery(
        defaults: StyleSheet,
        discovered: Result<DiscoveredStyles, DiscoveryError>,
    ) -> Self {
        match discovered {
            Ok(found) => {
                log::debug!(
                    "style discovery matched {} of {} roles",
                    found.len(),
                    StyleRole::COUNT
                );
                let sheet = found
                    .iter()
                    .fold(defaults, |sheet, (role, binding)| sheet.with(role, binding));
                Self::new(sheet)
            }
            Err(e) => {
                log::warn!("style discovery failed, using default styles: {e}");
                Self::new(defaults)
            }
        }
    }

    /// The binding for `role`. Always succeeds.
    pub fn resolve(&self, role: StyleRole) -> StyleBinding {
        self.sheet.get(role)
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }
}
