//! Style discovery from a template header.
//!
//! A template's `Contents/header.xml` lists font faces per script and the
//! character properties (`hh:charPr`) that reference them. For a fixed set
//! of roles we look for the character property whose Hangul face contains a
//! marker substring, whose boldness matches, and whose height is closest to
//! the role's target. Ties go to the lowest numeric property id.

use std::collections::{BTreeMap, HashMap};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{StyleBinding, StyleRole, StyleSheet};
use crate::error::DiscoveryError;
use crate::model::HwpUnit;

/// One character property of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStyle {
    pub id: u32,
    /// Hangul font face name.
    pub face: String,
    pub height: HwpUnit,
    pub bold: bool,
}

/// What a role looks for in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryRule {
    pub roles: &'static [StyleRole],
    /// Substring the Hangul face name must contain.
    pub face: &'static str,
    /// Required boldness; `None` accepts either.
    pub bold: Option<bool>,
    pub target_height: HwpUnit,
}

/// Roles that can be discovered. Everything else always uses its default.
pub const DISCOVERY_RULES: &[DiscoveryRule] = &[
    DiscoveryRule {
        roles: &[StyleRole::Heading],
        face: "헤드라인",
        bold: Some(true),
        target_height: 1500,
    },
    DiscoveryRule {
        roles: &[StyleRole::Body, StyleRole::Bullet, StyleRole::Dash],
        face: "명조",
        bold: Some(false),
        target_height: 1500,
    },
    DiscoveryRule {
        roles: &[StyleRole::Note],
        face: "명조",
        bold: None,
        target_height: 1400,
    },
    DiscoveryRule {
        roles: &[StyleRole::Star],
        face: "고딕",
        bold: Some(false),
        target_height: 1300,
    },
    DiscoveryRule {
        roles: &[StyleRole::Caption],
        face: "명조",
        bold: None,
        target_height: 1300,
    },
    DiscoveryRule {
        roles: &[StyleRole::TableHeaderCell],
        face: "고딕",
        bold: Some(true),
        target_height: 1200,
    },
    DiscoveryRule {
        roles: &[StyleRole::TableBodyCell],
        face: "고딕",
        bold: Some(false),
        target_height: 1200,
    },
];

/// Bindings found by discovery, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredStyles {
    bindings: BTreeMap<StyleRole, StyleBinding>,
}

impl DiscoveredStyles {
    pub fn get(&self, role: StyleRole) -> Option<StyleBinding> {
        self.bindings.get(&role).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleRole, StyleBinding)> + '_ {
        self.bindings.iter().map(|(r, b)| (*r, *b))
    }
}

impl FromIterator<(StyleRole, StyleBinding)> for DiscoveredStyles {
    fn from_iter<I: IntoIterator<Item = (StyleRole, StyleBinding)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// The character properties of a template header.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    pub styles: Vec<CharStyle>,
}

impl StyleCatalog {
    /// Parse a template header.
    pub fn parse(source: &str) -> Result<Self, DiscoveryError> {
        let mut reader = Reader::from_str(source);
        let mut buf = Vec::new();

        let mut in_hangul_faces = false;
        let mut faces: HashMap<u32, String> = HashMap::new();
        // (id, height, hangul font ref, bold) of the open charPr
        let mut pending: Option<(u32, HwpUnit, Option<u32>, bool)> = None;
        let mut raw: Vec<(u32, HwpUnit, Option<u32>, bool)> = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf)?;
            match &event {
                Event::Start(e) | Event::Empty(e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    match local_name(e).as_str() {
                        "fontface" => {
                            in_hangul_faces =
                                !is_empty && get_attr(e, "lang").as_deref() == Some("HANGUL");
                        }
                        "font" if in_hangul_faces => {
                            let id = required_u32(e, "font", "id")?;
                            let face = get_attr(e, "face").ok_or(DiscoveryError::InvalidAttribute {
                                element: "font",
                                attribute: "face",
                            })?;
                            faces.insert(id, face);
                        }
                        "charPr" => {
                            let id = required_u32(e, "charPr", "id")?;
                            let height = get_attr(e, "height")
                                .and_then(|h| h.parse::<HwpUnit>().ok())
                                .ok_or(DiscoveryError::InvalidAttribute {
                                    element: "charPr",
                                    attribute: "height",
                                })?;
                            if is_empty {
                                raw.push((id, height, None, false));
                            } else {
                                pending = Some((id, height, None, false));
                            }
                        }
                        "fontRef" => {
                            if let Some(p) = pending.as_mut() {
                                p.2 = get_attr(e, "hangul").and_then(|v| v.parse().ok());
                            }
                        }
                        "bold" => {
                            if let Some(p) = pending.as_mut() {
                                p.3 = true;
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(e) => match String::from_utf8_lossy(e.local_name().as_ref()).as_ref() {
                    "fontface" => in_hangul_faces = false,
                    "charPr" => {
                        if let Some(p) = pending.take() {
                            raw.push(p);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if faces.is_empty() {
            return Err(DiscoveryError::NoFontFaces);
        }
        if raw.is_empty() {
            return Err(DiscoveryError::NoCharProperties);
        }

        let styles = raw
            .into_iter()
            .filter_map(|(id, height, font_ref, bold)| {
                let face = font_ref.and_then(|r| faces.get(&r));
                if face.is_none() {
                    log::debug!("charPr {id} has no resolvable Hangul face, skipping");
                }
                face.map(|face| CharStyle {
                    id,
                    face: face.clone(),
                    height,
                    bold,
                })
            })
            .collect();

        Ok(Self { styles })
    }

    /// The closest matching style for `rule`, if any style qualifies.
    pub fn nearest(&self, rule: &DiscoveryRule) -> Option<&CharStyle> {
        self.styles
            .iter()
            .filter(|s| s.face.contains(rule.face))
            .filter(|s| rule.bold.map_or(true, |bold| s.bold == bold))
            .min_by_key(|s| ((s.height - rule.target_height).abs(), s.id))
    }

    /// Match every rule against the catalog, rescaling the default bindings
    /// of matched roles to the found height.
    pub fn discover(&self, defaults: &StyleSheet) -> DiscoveredStyles {
        let mut found = DiscoveredStyles::default();
        for rule in DISCOVERY_RULES {
            let Some(style) = self.nearest(rule) else {
                log::debug!("no catalog match for {:?}, keeping default", rule.roles);
                continue;
            };
            for &role in rule.roles {
                let binding = defaults.get(role).rescaled(style.id, style.height);
                found.bindings.insert(role, binding);
            }
        }
        found
    }
}

/// Parse a template header and discover bindings against the default sheet.
pub fn discover_styles(source: &str) -> Result<DiscoveredStyles, DiscoveryError> {
    let catalog = StyleCatalog::parse(source)?;
    Ok(catalog.discover(&StyleSheet::defaults()))
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

/// Helper to get an unescaped attribute value from a quick-xml BytesStart.
fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

fn required_u32(
    e: &BytesStart,
    element: &'static str,
    attribute: &'static str,
) -> Result<u32, DiscoveryError> {
    get_attr(e, attribute)
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or(DiscoveryError::InvalidAttribute { element, attribute })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hh:head xmlns:hh="http://www.hancom.co.kr/hwpml/2011/head" secCnt="2">
  <hh:refList>
    <hh:fontfaces itemCnt="2">
      <hh:fontface lang="HANGUL" fontCnt="3">
        <hh:font id="0" face="HY헤드라인M" type="TTF" isEmbedded="0"/>
        <hh:font id="1" face="휴먼명조" type="TTF" isEmbedded="0"/>
        <hh:font id="2" face="맑은 고딕" type="TTF" isEmbedded="0"/>
      </hh:fontface>
      <hh:fontface lang="LATIN" fontCnt="1">
        <hh:font id="0" face="Times New Roman" type="TTF" isEmbedded="0"/>
      </hh:fontface>
    </hh:fontfaces>
    <hh:charProperties itemCnt="7">
      <hh:charPr id="2" height="1500"><hh:fontRef hangul="0" latin="0"/><hh:bold/></hh:charPr>
      <hh:charPr id="10" height="2000"><hh:fontRef hangul="0" latin="0"/></hh:charPr>
      <hh:charPr id="36" height="1500"><hh:fontRef hangul="1" latin="0"/></hh:charPr>
      <hh:charPr id="9" height="1500"><hh:fontRef hangul="1" latin="0"/></hh:charPr>
      <hh:charPr id="28" height="1200"><hh:fontRef hangul="2" latin="0"/><hh:bold/></hh:charPr>
      <hh:charPr id="33" height="1100"><hh:fontRef hangul="2" latin="0"/></hh:charPr>
      <hh:charPr id="40" height="1000"><hh:fontRef hangul="7" latin="0"/></hh:charPr>
    </hh:charProperties>
  </hh:refList>
</hh:head>"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = StyleCatalog::parse(HEADER).unwrap();
        // charPr 40 references an unknown face and is skipped
        assert_eq!(catalog.styles.len(), 6);
        let heading = catalog.styles.iter().find(|s| s.id == 2).unwrap();
        assert_eq!(heading.face, "HY헤드라인M");
        assert!(heading.bold);
        assert_eq!(heading.height, 1500);
        let body = catalog.styles.iter().find(|s| s.id == 36).unwrap();
        assert_eq!(body.face, "휴먼명조");
        assert!(!body.bold);
    }

    #[test]
    fn test_latin_faces_ignored() {
        let catalog = StyleCatalog::parse(HEADER).unwrap();
        assert!(catalog.styles.iter().all(|s| s.face != "Times New Roman"));
    }

    #[test]
    fn test_tie_break_lowest_numeric_id() {
        // ids 36 and 9 tie on face, boldness and height. As strings "36" < "9",
        // numerically 9 < 36: the numeric rule must win.
        let catalog = StyleCatalog::parse(HEADER).unwrap();
        let rule = DISCOVERY_RULES
            .iter()
            .find(|r| r.roles.contains(&StyleRole::Body))
            .unwrap();
        assert_eq!(catalog.nearest(rule).unwrap().id, 9);
    }

    #[test]
    fn test_nearest_height_wins() {
        let catalog = StyleCatalog {
            styles: vec![
                CharStyle { id: 1, face: "맑은 고딕".into(), height: 900, bold: false },
                CharStyle { id: 2, face: "맑은 고딕".into(), height: 1250, bold: false },
                CharStyle { id: 3, face: "맑은 고딕".into(), height: 1600, bold: false },
            ],
        };
        let rule = DiscoveryRule {
            roles: &[StyleRole::Star],
            face: "고딕",
            bold: None,
            target_height: 1300,
        };
        assert_eq!(catalog.nearest(&rule).unwrap().id, 2);
    }

    #[test]
    fn test_discover_rescales_defaults() {
        let found = discover_styles(HEADER).unwrap();

        let heading = found.get(StyleRole::Heading).unwrap();
        assert_eq!(heading.font_ref_id, 2);
        assert_eq!(heading.line_height, 1500);
        assert_eq!(heading.line_spacing, 900);

        // Bars and spacers are template-structural, never discovered
        assert!(found.get(StyleRole::TitleBar).is_none());

        for role in [StyleRole::Body, StyleRole::Bullet, StyleRole::Dash] {
            assert_eq!(found.get(role).unwrap().font_ref_id, 9);
        }

        let header_cell = found.get(StyleRole::TableHeaderCell).unwrap();
        assert_eq!(header_cell.font_ref_id, 28);

        let body_cell = found.get(StyleRole::TableBodyCell).unwrap();
        assert_eq!(body_cell.font_ref_id, 33);
        assert_eq!(body_cell.line_height, 1100);
        assert_eq!(body_cell.baseline, 935);
        assert_eq!(body_cell.line_spacing, 330);
        // paragraph property is template-structural and stays
        assert_eq!(body_cell.box_ref_id, 25);
    }

    #[test]
    fn test_partial_discovery_leaves_gaps() {
        let found = discover_styles(HEADER).unwrap();
        // Star needs a non-bold Gothic face: only id 33 qualifies
        assert_eq!(found.get(StyleRole::Star).unwrap().font_ref_id, 33);
        // Never discoverable
        assert!(found.get(StyleRole::Spacer).is_none());
    }

    #[test]
    fn test_face_names_are_unescaped() {
        let source = r#"<head><fontfaces><fontface lang="HANGUL">
            <font id="0" face="R&amp;D 명조"/>
          </fontface></fontfaces>
          <charProperties>
            <charPr id="4" height="1500"><fontRef hangul="0"/></charPr>
          </charProperties></head>"#;
        let catalog = StyleCatalog::parse(source).unwrap();
        assert_eq!(catalog.styles[0].face, "R&D 명조");
        let found = catalog.discover(&StyleSheet::defaults());
        assert_eq!(found.get(StyleRole::Body).unwrap().font_ref_id, 4);
    }

    #[test]
    fn test_malformed_catalog() {
        let err = discover_styles("<hh:head><hh:fontfaces></hh:head>").unwrap_err();
        assert!(matches!(err, DiscoveryError::Malformed(_)), "{err:?}");
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            discover_styles(""),
            Err(DiscoveryError::NoFontFaces)
        ));
        let only_faces = r#"<head><fontfaces><fontface lang="HANGUL"><font id="0" face="휴먼명조"/></fontface></fontfaces></head>"#;
        assert!(matches!(
            discover_styles(only_faces),
            Err(DiscoveryError::NoCharProperties)
        ));
    }

    #[test]
    fn test_bad_attribute() {
        let source = r#"<head><fontfaces><fontface lang="HANGUL"><font id="x" face="a"/></fontface></fontfaces></head>"#;
        assert!(matches!(
            discover_styles(source),
            Err(DiscoveryError::InvalidAttribute { element: "font", attribute: "id" })
        ));
    }
}
