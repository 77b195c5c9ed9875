use serde::{Deserialize, Serialize};

use crate::{common::GlyphId, glyph::GlyphMetrics, Font};

/// Type of font metric
#[derive(Debug, Clone, PartialEq, Hash, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricType {
    /// X height
    XHeight,
    /// Cap height
    CapHeight,
    /// Ascender (design-time ascender)
    Ascender,
    /// Descender (design-time descender)
    Descender,
    /// Ascender (from the `hhea` table)
    HheaAscender,
    /// Descender (from the `hhea` table)
    HheaDescender,
    /// Line gap (from the `hhea` table)
    HheaLineGap,
    /// Typographic Ascender (from the `OS/2` table)
    TypoAscender,
    /// Typographic Descender (from the `OS/2` table)
    TypoDescender,
    /// Typographic Line Gap (from the `OS/2` table)
    TypoLineGap,
    /// Custom metric type
    Custom(String),
}

impl From<&str> for MetricType {
    fn from(s: &str) -> Self {
        match s {
            "xHeight" => MetricType::XHeight,
            "capHeight" => MetricType::CapHeight,
            "ascender" => MetricType::Ascender,
            "descender" => MetricType::Descender,
            "hheaAscender" => MetricType::HheaAscender,
            "hheaDescender" => MetricType::HheaDescender,
            "hheaLineGap" => MetricType::HheaLineGap,
            "typoAscender" => MetricType::TypoAscender,
            "typoDescender" => MetricType::TypoDescender,
            "typoLineGap" => MetricType::TypoLineGap,
            custom => MetricType::Custom(custom.to_string()),
        }
    }
}

impl From<String> for MetricType {
    fn from(s: String) -> Self {
        MetricType::from(s.as_str())
    }
}

impl From<MetricType> for String {
    fn from(metric: MetricType) -> Self {
        metric.as_str().to_string()
    }
}

impl MetricType {
    /// Get the name of the MetricType
    pub fn as_str(&self) -> &str {
        match self {
            MetricType::XHeight => "xHeight",
            MetricType::CapHeight => "capHeight",
            MetricType::Ascender => "ascender",
            MetricType::Descender => "descender",
            MetricType::HheaAscender => "hheaAscender",
            MetricType::HheaDescender => "hheaDescender",
            MetricType::HheaLineGap => "hheaLineGap",
            MetricType::TypoAscender => "typoAscender",
            MetricType::TypoDescender => "typoDescender",
            MetricType::TypoLineGap => "typoLineGap",
            MetricType::Custom(s) => s,
        }
    }
}

/// Glyph side bearings and advance, as fractions of the em.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct NormalizedMetrics {
    pub left: f64,
    pub right: f64,
    pub width: f64,
}

impl NormalizedMetrics {
    pub fn new(metrics: &GlyphMetrics, units_per_em: f64) -> Self {
        NormalizedMetrics {
            left: f64::from(metrics.left_side_bearing) / units_per_em,
            right: f64::from(metrics.right_side_bearing) / units_per_em,
            width: f64::from(metrics.advance_width) / units_per_em,
        }
    }
}

/// Font-wide vertical metrics, as fractions of the em.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct DisplayMetrics {
    pub ascender: f64,
    pub descender: f64,
    pub cap_height: f64,
    pub x_height: f64,
    pub line_gap: f64,
    /// Offset of the baseline from the top of a `line-height: normal` line box
    pub baseline: f64,
}

impl DisplayMetrics {
    /// Gather the font's vertical metrics. `None` when the font carries neither
    /// an ascender nor a descender.
    pub fn new(font: &Font) -> Option<Self> {
        let ascender = font.metric_with_fallback(&[
            MetricType::Ascender,
            MetricType::TypoAscender,
            MetricType::HheaAscender,
        ]);
        let descender = font.metric_with_fallback(&[
            MetricType::Descender,
            MetricType::TypoDescender,
            MetricType::HheaDescender,
        ]);
        if ascender.is_none() && descender.is_none() {
            return None;
        }
        let ascender = f64::from(ascender.unwrap_or(0));
        let line_gap = f64::from(
            font.metric_with_fallback(&[MetricType::HheaLineGap, MetricType::TypoLineGap])
                .unwrap_or(0),
        );
        let upem = font.upem();
        Some(DisplayMetrics {
            ascender: ascender / upem,
            descender: f64::from(descender.unwrap_or(0)) / upem,
            cap_height: f64::from(font.metric(&MetricType::CapHeight).unwrap_or(0)) / upem,
            x_height: f64::from(font.metric(&MetricType::XHeight).unwrap_or(0)) / upem,
            line_gap: line_gap / upem,
            baseline: (ascender + line_gap / 2.0) / upem,
        })
    }
}

/// A character in the font's cmap, with the glyph it maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct CharacterInfo {
    pub codepoint: u32,
    pub character: char,
    pub glyph: GlyphId,
    pub metrics: NormalizedMetrics,
}

/// Every printable character in the font, for laying out a glyph grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct GlyphInventory {
    pub characters: Vec<CharacterInfo>,
    /// The widest normalized advance among `characters`
    pub max_advance: f64,
}

impl GlyphInventory {
    pub fn new(font: &Font) -> Self {
        let upem = font.upem();
        let characters: Vec<CharacterInfo> = font
            .cmap
            .range(32..)
            .filter_map(|(&codepoint, &glyph)| {
                let character = char::from_u32(codepoint)?;
                let Some(g) = font.glyphs.get(glyph) else {
                    log::warn!(
                        "U+{:04X} maps to nonexistent glyph {}",
                        codepoint,
                        glyph
                    );
                    return None;
                };
                Some(CharacterInfo {
                    codepoint,
                    character,
                    glyph,
                    metrics: NormalizedMetrics::new(&g.metrics, upem),
                })
            })
            .collect();
        let max_advance = characters
            .iter()
            .map(|c| c.metrics.width)
            .fold(0.0, f64::max);
        GlyphInventory {
            characters,
            max_advance,
        }
    }
}
