use smol_str::SmolStr;

/// A glyph ID: the index of a glyph in the font's glyph table.
pub type GlyphId = u32;

/// OpenType glyph IDs are 16-bit.
pub const MAX_GLYPH_ID: GlyphId = u16::MAX as GlyphId;

/// A four-character OpenType feature tag, e.g. `liga` or `ss01`.
pub type FeatureTag = SmolStr;

/// The "Access All Alternates" meta-feature.
pub const AALT: &str = "aalt";

/// Render one `(tag, slot)` pair as it appears in `font-feature-settings`.
///
/// Slot 0 is a plain on/off feature; alternate-set slots are 1-based.
pub fn feature_setting(tag: &str, slot: usize) -> String {
    if slot > 0 {
        format!("\"{}\" {}", tag, slot)
    } else {
        format!("\"{}\"", tag)
    }
}

/// Build a full `font-feature-settings` value from a sequence of features and slots.
pub fn activation_string<'a>(steps: impl IntoIterator<Item = (&'a str, usize)>) -> String {
    steps
        .into_iter()
        .map(|(tag, slot)| feature_setting(tag, slot))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply a signed `deltaGlyphId` to a glyph, if the result is still a glyph ID.
pub(crate) fn apply_delta(glyph: GlyphId, delta: i32) -> Option<GlyphId> {
    GlyphId::try_from(i64::from(glyph) + i64::from(delta)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_feature_setting() {
        assert_eq!(feature_setting("smcp", 0), r#""smcp""#);
        assert_eq!(feature_setting("salt", 3), r#""salt" 3"#);
    }

    #[test]
    fn test_activation_string() {
        assert_eq!(
            activation_string([("ss01", 0), ("salt", 2)]),
            r#""ss01", "salt" 2"#
        );
        assert_eq!(activation_string(Vec::<(&str, usize)>::new()), "");
    }

    #[test]
    fn test_apply_delta() {
        assert_eq!(apply_delta(10, 5), Some(15));
        assert_eq!(apply_delta(10, -10), Some(0));
        assert_eq!(apply_delta(3, -4), None);
    }
}
