use crate::common::GlyphId;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// The font's glyph table. A glyph's position in the list is its glyph ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    pub fn get(&self, id: GlyphId) -> Option<&Glyph> {
        self.0.get(usize::try_from(id).ok()?)
    }

    pub fn contains(&self, id: GlyphId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Glyph> for GlyphList {
    fn from_iter<I: IntoIterator<Item = Glyph>>(iter: I) -> Self {
        GlyphList(iter.into_iter().collect())
    }
}

/// Horizontal metrics of a glyph, in font design units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphMetrics {
    #[serde(default)]
    pub left_side_bearing: i32,
    #[serde(default)]
    pub right_side_bearing: i32,
    #[serde(default)]
    pub advance_width: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub index: GlyphId,
    #[serde(default)]
    pub metrics: GlyphMetrics,
}

impl Glyph {
    pub fn new(index: GlyphId) -> Self {
        Glyph {
            index,
            metrics: GlyphMetrics::default(),
        }
    }

    pub fn with_metrics(
        index: GlyphId,
        left_side_bearing: i32,
        right_side_bearing: i32,
        advance_width: i32,
    ) -> Self {
        Glyph {
            index,
            metrics: GlyphMetrics {
                left_side_bearing,
                right_side_bearing,
                advance_width,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_id() {
        let glyphs: GlyphList = (0..3).map(Glyph::new).collect();
        assert_eq!(glyphs.get(2).unwrap().index, 2);
        assert!(glyphs.get(3).is_none());
        assert!(!glyphs.contains(99999));
    }

    #[test]
    fn test_deserialize_defaults_metrics() {
        let glyph: Glyph = serde_json::from_str(r#"{"index": 4}"#).unwrap();
        assert_eq!(glyph, Glyph::new(4));
        let glyph: Glyph = serde_json::from_str(
            r#"{"index": 5, "metrics": {"leftSideBearing": 100, "rightSideBearing": -20, "advanceWidth": 600}}"#,
        )
        .unwrap();
        assert_eq!(glyph, Glyph::with_metrics(5, 100, -20, 600));
    }
}
