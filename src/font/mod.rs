//! # Glyph Width Estimation
//!
//! There is no font engine here. Every character is sorted into a coarse
//! [`GlyphClass`] and given a width proportional to the font height. The
//! ratios were calibrated against documents rendered by Hancom Office with
//! the bundled template fonts (HY헤드라인M, 휴먼명조, 맑은 고딕), which are all
//! full-square for Hangul and roughly half-square for Latin.

use crate::model::HwpUnit;

/// Code points at or above this value are treated as wide script.
///
/// U+2E80 is the start of the CJK radicals block; everything after it up to
/// the end of the BMP is either CJK, Hangul, kana, fullwidth forms or
/// symbols that the target fonts render full-square.
pub const WIDE_SCRIPT_THRESHOLD: u32 = 0x2E80;

/// Width of a wide-script glyph, per mille of the font height.
pub const WIDE_RATIO_PERMILLE: i64 = 1000;
/// Width of a space, per mille of the font height.
pub const SPACE_RATIO_PERMILLE: i64 = 250;
/// Width of an ASCII letter or digit, per mille of the font height.
pub const ALNUM_RATIO_PERMILLE: i64 = 500;
/// Width of punctuation and anything else, per mille of the font height.
///
/// Slightly wider than alphanumerics because the Hangul fonts ship
/// full-width-leaning punctuation.
pub const OTHER_RATIO_PERMILLE: i64 = 550;

/// Coarse glyph category used for width estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphClass {
    /// Hangul, CJK, fullwidth forms, box drawing and similar symbols.
    WideScript,
    Space,
    AsciiAlphanumeric,
    /// Punctuation, Latin-1 letters, and everything else.
    Other,
}

impl GlyphClass {
    /// Classify a single character by code point.
    pub fn of(ch: char) -> Self {
        let cp = ch as u32;
        match ch {
            ' ' | '\u{00A0}' => GlyphClass::Space,
            c if c.is_ascii_alphanumeric() => GlyphClass::AsciiAlphanumeric,
            _ if is_wide_below_threshold(cp) || cp >= WIDE_SCRIPT_THRESHOLD => {
                GlyphClass::WideScript
            }
            _ => GlyphClass::Other,
        }
    }

    /// Width ratio for this class, per mille of the font height.
    pub fn ratio_permille(self) -> i64 {
        match self {
            GlyphClass::WideScript => WIDE_RATIO_PERMILLE,
            GlyphClass::Space => SPACE_RATIO_PERMILLE,
            GlyphClass::AsciiAlphanumeric => ALNUM_RATIO_PERMILLE,
            GlyphClass::Other => OTHER_RATIO_PERMILLE,
        }
    }
}

/// Wide blocks that sit below [`WIDE_SCRIPT_THRESHOLD`].
fn is_wide_below_threshold(cp: u32) -> bool {
    matches!(
        cp,
        // Hangul Jamo
        0x1100..=0x11FF
        // Enclosed alphanumerics (①, ⓐ)
        | 0x2460..=0x24FF
        // Box drawing, block elements, geometric shapes, misc symbols, dingbats
        | 0x2500..=0x27BF
    )
}

/// Estimated advance width of `ch` at `font_height`.
///
/// Total: a non-positive height yields 0.
pub fn glyph_width(ch: char, font_height: HwpUnit) -> HwpUnit {
    if font_height <= 0 {
        return 0;
    }
    (font_height as i64 * GlyphClass::of(ch).ratio_permille() / 1000) as HwpUnit
}

/// Estimated width of a whole string on a single line.
pub fn measure_width(text: &str, font_height: HwpUnit) -> i64 {
    text.chars()
        .map(|ch| glyph_width(ch, font_height) as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hangul_and_cjk() {
        assert_eq!(GlyphClass::of('한'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('ㅇ'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('\u{1100}'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('漢'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('Ａ'), GlyphClass::WideScript);
    }

    #[test]
    fn test_classify_symbols() {
        assert_eq!(GlyphClass::of('□'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('▷'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('─'), GlyphClass::WideScript);
        assert_eq!(GlyphClass::of('①'), GlyphClass::WideScript);
    }

    #[test]
    fn test_classify_ascii() {
        assert_eq!(GlyphClass::of(' '), GlyphClass::Space);
        assert_eq!(GlyphClass::of('\u{00A0}'), GlyphClass::Space);
        assert_eq!(GlyphClass::of('a'), GlyphClass::AsciiAlphanumeric);
        assert_eq!(GlyphClass::of('Z'), GlyphClass::AsciiAlphanumeric);
        assert_eq!(GlyphClass::of('7'), GlyphClass::AsciiAlphanumeric);
        assert_eq!(GlyphClass::of('-'), GlyphClass::Other);
        assert_eq!(GlyphClass::of('('), GlyphClass::Other);
        assert_eq!(GlyphClass::of('é'), GlyphClass::Other);
    }

    #[test]
    fn test_widths_at_1500() {
        assert_eq!(glyph_width('A', 1500), 750);
        assert_eq!(glyph_width(' ', 1500), 375);
        assert_eq!(glyph_width('가', 1500), 1500);
        assert_eq!(glyph_width('.', 1500), 825);
    }

    #[test]
    fn test_non_positive_height_is_zero_width() {
        assert_eq!(glyph_width('가', 0), 0);
        assert_eq!(glyph_width('A', -100), 0);
    }

    #[test]
    fn test_measure_width_sums_classes() {
        // 2 Hangul + space + 2 ASCII at 1000
        assert_eq!(measure_width("한글 ab", 1000), 2000 + 250 + 1000);
        assert_eq!(measure_width("", 1000), 0);
    }
}
