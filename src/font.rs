use crate::{
    alternates::AlternatesMap,
    common::GlyphId,
    features::{font_features, FontFeature},
    glyph::{Glyph, GlyphList},
    layout::Gsub,
    metrics::{DisplayMetrics, GlyphInventory},
    AlternatesError, MetricType,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

const FALLBACK_UPEM: f64 = 1000.0;

/// The parsed font tables this crate works from.
///
/// Decoding a font binary into this model is left to a font table reader;
/// the model is plain data and is never mutated by the alternates pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub units_per_em: u16,
    #[serde(default)]
    pub glyphs: GlyphList,
    /// Unicode codepoint to glyph ID
    #[serde(default)]
    pub cmap: BTreeMap<u32, GlyphId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gsub: Option<Gsub>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metrics: IndexMap<MetricType, i32>,
    /// Where the font was loaded from; identifies it to an [`crate::AlternatesCache`]
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Font {
    pub fn new(units_per_em: u16) -> Self {
        Font {
            units_per_em,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, AlternatesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(id)
    }

    /// Units per em as a divisor. A zero value is malformed; fall back to 1000.
    pub fn upem(&self) -> f64 {
        if self.units_per_em == 0 {
            log::warn!("Font has unitsPerEm of 0, assuming {}", FALLBACK_UPEM);
            FALLBACK_UPEM
        } else {
            f64::from(self.units_per_em)
        }
    }

    pub fn metric(&self, metric: &MetricType) -> Option<i32> {
        self.metrics.get(metric).copied()
    }

    /// The first of `metrics` the font defines.
    pub fn metric_with_fallback(&self, metrics: &[MetricType]) -> Option<i32> {
        metrics.iter().find_map(|m| self.metric(m))
    }

    /// Every glyph alternate reachable through this font's GSUB table.
    pub fn alternates(&self) -> AlternatesMap {
        crate::alternates::build_alternates(self)
    }

    /// The registered GSUB features this font offers, each listed once.
    pub fn features(&self) -> Vec<FontFeature> {
        self.gsub.as_ref().map(font_features).unwrap_or_default()
    }

    pub fn display_metrics(&self) -> Option<DisplayMetrics> {
        DisplayMetrics::new(self)
    }

    pub fn inventory(&self) -> GlyphInventory {
        GlyphInventory::new(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_str() {
        let font = Font::from_json_str(
            r#"{
                "unitsPerEm": 2048,
                "glyphs": [{"index": 0}, {"index": 1, "metrics": {"advanceWidth": 1024}}],
                "cmap": {"65": 1},
                "metrics": {"ascender": 1900}
            }"#,
        )
        .unwrap();
        assert_eq!(font.units_per_em, 2048);
        assert_eq!(font.cmap.get(&65), Some(&1));
        assert_eq!(font.glyph(1).unwrap().metrics.advance_width, 1024);
        assert_eq!(font.metric(&MetricType::Ascender), Some(1900));
        assert!(font.gsub.is_none());
        assert!(font.features().is_empty());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Font::from_json_str(r#"{"glyphs": 3}"#),
            Err(AlternatesError::Json(_))
        ));
    }

    #[test]
    fn test_zero_upem_falls_back() {
        assert_eq!(Font::new(0).upem(), 1000.0);
        assert_eq!(Font::new(1000).upem(), 1000.0);
    }
}
