use std::collections::{BTreeMap, HashMap};

use crate::common::GlyphId;

/// Glyph ID to character lookups, inverted from the font's cmap.
///
/// When several codepoints map to one glyph, the last one in cmap iteration
/// order (the highest codepoint) wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseCmap(HashMap<GlyphId, char>);

impl ReverseCmap {
    pub fn new(cmap: &BTreeMap<u32, GlyphId>) -> Self {
        let mut reverse = HashMap::with_capacity(cmap.len());
        for (&codepoint, &glyph) in cmap {
            match char::from_u32(codepoint) {
                Some(ch) => {
                    reverse.insert(glyph, ch);
                }
                None => log::debug!("Skipping invalid codepoint U+{:04X}", codepoint),
            }
        }
        ReverseCmap(reverse)
    }

    pub fn get(&self, glyph: GlyphId) -> Option<char> {
        self.0.get(&glyph).copied()
    }

    /// Concatenate the characters of a glyph sequence.
    ///
    /// Glyphs without a character contribute nothing.
    pub fn text(&self, glyphs: impl IntoIterator<Item = GlyphId>) -> String {
        glyphs.into_iter().filter_map(|g| self.get(g)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
