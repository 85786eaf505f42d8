//! Static font-metric tables for the PDF standard fonts used on the cards.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core font metrics (AFM widths / 1000). Because the cards are drawn with
//! the non-embedded base-14 fonts in WinAnsiEncoding, these tables are exactly
//! what a PDF viewer uses to lay the glyphs out.
//!
//! Tables are indexed by WinAnsi code: ASCII 0x20..=0x7E plus the high half
//! 0x80..=0xFF. Characters without a WinAnsi code are drawn and measured as `?`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard Type1 fonts a card can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    /// Regular sans-serif, used for titles.
    Helvetica,
    /// Bold sans-serif, used for artists and years.
    HelveticaBold,
    /// Monospace. Every glyph is 0.6em wide.
    Courier,
}

impl StandardFont {
    /// PostScript name written into the PDF font dictionary.
    pub fn postscript_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
        }
    }

    pub fn all() -> [StandardFont; 3] {
        [
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::Courier,
        ]
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement contract
// ────────────────────────────────────────────────────────────────────────────

/// Text measurement capability supplied by a rendering surface.
///
/// Implementations must be deterministic and side-effect free: the fitters call
/// them many times per field and expect identical answers for identical input.
/// A width of zero is reserved for genuinely zero-width input.
pub trait TextMeasure {
    /// Rendered width of `text` on a single line, in points.
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32;

    /// Height of one single-spaced line. Equal to the font size.
    fn line_height(&self, _font: StandardFont, size: f32) -> f32 {
        size
    }
}

/// Measures text with the static standard-font tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl TextMeasure for StandardMetrics {
    fn text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        get_metrics(font).measure_str(text) * size
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font, indexed by WinAnsi code.
///
/// All widths are in em units. `ascii[i]` = width of code `(i + 32)`,
/// covering 0x20 (space) through 0x7E (~); `high[i]` = width of code
/// `(i + 0x80)`. Codes WinAnsi leaves undefined hold 0 and are never looked up.
///
/// ASCII slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    ascii: [f32; 95],
    high: [f32; 128],
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Characters outside WinAnsi are drawn as `?` and measured as `?`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| self.code_width(win_ansi_code(c).unwrap_or(b'?')))
            .sum()
    }

    fn code_width(&self, code: u8) -> f32 {
        match code {
            0x20..=0x7E => self.ascii[usize::from(code - 0x20)],
            0x80..=0xFF => self.high[usize::from(code - 0x80)],
            _ => self.ascii[usize::from(b'?' - 0x20)],
        }
    }
}

/// WinAnsi code of `c`, or `None` when the encoding has no glyph for it.
pub fn win_ansi_code(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u32 as u8),
        _ => win_ansi_extra(c),
    }
}

/// The 0x80..=0x9F block, where WinAnsi departs from Latin-1.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII + 128 high WinAnsi codes each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    high: [
        // €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.000, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.000, 0.611, 0.000,
        // -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.000, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.000, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    #[rustfmt::skip]
    high: [
        // €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.000, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.000, 0.611, 0.000,
        // -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.000, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.000, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    ascii: [0.6; 95],
    high: [0.6; 128],
};

/// Returns the static metric table for a given font.
pub fn get_metrics(font: StandardFont) -> &'static FontMetricTable {
    match font {
        StandardFont::Helvetica => &HELVETICA_TABLE,
        StandardFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
        StandardFont::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(StandardFont::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(StandardFont::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_win_ansi_characters() {
        let regular = get_metrics(StandardFont::Helvetica);
        // Ö(0.778) + Ü(0.722) + —(1.000)
        let width = regular.measure_str("ÖÜ—");
        assert!((width - 2.5).abs() < 1e-3, "ÖÜ— should be 2.5em, got {width}");

        let bold = get_metrics(StandardFont::HelveticaBold);
        // é(0.556) + ñ(0.611) + “(0.500)
        let width = bold.measure_str("éñ“");
        assert!((width - 1.667).abs() < 1e-3, "éñ“ should be 1.667em, got {width}");
    }

    #[test]
    fn test_unencodable_characters_measure_as_question_mark() {
        let metrics = get_metrics(StandardFont::HelveticaBold);
        assert_eq!(metrics.measure_str("坂"), metrics.measure_str("?"));
        assert_eq!(metrics.measure_str("\t"), metrics.measure_str("?"));
    }

    #[test]
    fn test_win_ansi_code() {
        assert_eq!(win_ansi_code('A'), Some(b'A'));
        assert_eq!(win_ansi_code('é'), Some(0xE9));
        assert_eq!(win_ansi_code('’'), Some(0x92));
        assert_eq!(win_ansi_code('\u{81}'), None);
        assert_eq!(win_ansi_code('坂'), None);
    }

    #[test]
    fn test_every_encodable_character_has_a_width() {
        for font in StandardFont::all() {
            let metrics = get_metrics(font);
            for code in (0x20u32..=0x7E).chain(0xA0..=0xFF) {
                let c = char::from_u32(code).unwrap();
                assert!(metrics.measure_str(&c.to_string()) > 0.0, "{font} U+{code:04X}");
            }
            for c in "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".chars() {
                assert!(metrics.measure_str(&c.to_string()) > 0.0, "{font} {c}");
            }
        }
    }

    #[test]
    fn test_bold_is_at_least_as_wide_as_regular() {
        let regular = get_metrics(StandardFont::Helvetica);
        let bold = get_metrics(StandardFont::HelveticaBold);
        let text = "Bohemian Rhapsody";
        assert!(
            bold.measure_str(text) > regular.measure_str(text),
            "bold should measure wider than regular"
        );
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(StandardFont::Courier);
        assert!((metrics.measure_str("iiii") - metrics.measure_str("MMMM")).abs() < 1e-6);
    }

    #[test]
    fn test_standard_metrics_scales_with_size() {
        let w10 = StandardMetrics.text_width("M", StandardFont::Helvetica, 10.0);
        let w20 = StandardMetrics.text_width("M", StandardFont::Helvetica, 20.0);
        assert!((w10 - 8.33).abs() < 1e-3, "M at 10pt should be 8.33, got {w10}");
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
    }

    #[test]
    fn test_line_height_equals_font_size() {
        assert_eq!(StandardMetrics.line_height(StandardFont::Courier, 12.0), 12.0);
    }
}
