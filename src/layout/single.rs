use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    common::{apply_delta, FeatureTag, GlyphId},
    layout::{Gsub, Subtable},
};

/// Destination glyphs keyed by alternate slot: 0 for plain substitutions,
/// 1-based for members of an alternate set.
pub type SlotMap = BTreeMap<usize, GlyphId>;

/// Every one-to-one substitution in a GSUB table, per source glyph and feature.
///
/// Features are kept in the order they first appear in the GSUB feature list.
/// The first subtable to define a (glyph, feature, slot) destination wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleGlyphIndex {
    entries: BTreeMap<GlyphId, IndexMap<FeatureTag, SlotMap>>,
    unhandled: IndexMap<FeatureTag, usize>,
}

impl SingleGlyphIndex {
    pub fn new(gsub: &Gsub) -> Self {
        let mut index = SingleGlyphIndex::default();
        for (tag, subtable) in gsub.feature_subtables() {
            match subtable {
                Subtable::Single {
                    coverage,
                    substitute,
                } => {
                    if coverage.len() != substitute.len() {
                        log::warn!(
                            "Feature '{}': coverage of {} glyphs but {} substitutes",
                            tag,
                            coverage.len(),
                            substitute.len()
                        );
                    }
                    for (from, &to) in coverage.iter().zip(substitute) {
                        index.insert(from, tag, 0, to);
                    }
                }
                Subtable::Delta { coverage, delta } => {
                    for from in coverage.iter() {
                        match apply_delta(from, *delta) {
                            Some(to) => index.insert(from, tag, 0, to),
                            None => log::warn!(
                                "Feature '{}': glyph {} + delta {} is not a glyph ID",
                                tag,
                                from,
                                delta
                            ),
                        }
                    }
                }
                Subtable::Alternate {
                    coverage,
                    alternate_sets,
                } => {
                    if coverage.len() != alternate_sets.len() {
                        log::warn!(
                            "Feature '{}': coverage of {} glyphs but {} alternate sets",
                            tag,
                            coverage.len(),
                            alternate_sets.len()
                        );
                    }
                    for (from, alternates) in coverage.iter().zip(alternate_sets) {
                        for (alt_index, &to) in alternates.iter().enumerate() {
                            index.insert(from, tag, alt_index + 1, to);
                        }
                    }
                }
                // Ligatures belong to the ligature index; contextual rules are not modeled
                Subtable::Ligature { .. } | Subtable::Contextual { .. } => {}
                Subtable::Unrecognized => {
                    *index.unhandled.entry(tag.clone()).or_default() += 1;
                }
            }
        }
        if !index.unhandled.is_empty() {
            log::info!("Unhandled subtables by feature: {:?}", index.unhandled);
        }
        log::debug!(
            "Indexed single substitutions for {} source glyphs",
            index.entries.len()
        );
        index
    }

    fn insert(&mut self, from: GlyphId, tag: &FeatureTag, slot: usize, to: GlyphId) {
        self.entries
            .entry(from)
            .or_default()
            .entry(tag.clone())
            .or_default()
            .entry(slot)
            .or_insert(to);
    }

    /// Source glyphs with at least one substitution, ascending.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.entries.keys().copied()
    }

    /// The substitutions available for a glyph, by feature.
    pub fn features(&self, glyph: GlyphId) -> Option<&IndexMap<FeatureTag, SlotMap>> {
        self.entries.get(&glyph)
    }

    pub fn get(&self, glyph: GlyphId, tag: &str, slot: usize) -> Option<GlyphId> {
        self.entries.get(&glyph)?.get(tag)?.get(&slot).copied()
    }

    /// Every (source, feature, slot, destination) entry in index order.
    pub fn iter(&self) -> impl Iterator<Item = (GlyphId, &FeatureTag, usize, GlyphId)> + '_ {
        self.entries.iter().flat_map(|(&from, features)| {
            features.iter().flat_map(move |(tag, slots)| {
                slots.iter().map(move |(&slot, &to)| (from, tag, slot, to))
            })
        })
    }

    /// Count of subtables with no recognized substitution mechanism, by feature.
    pub fn unhandled(&self) -> &IndexMap<FeatureTag, usize> {
        &self.unhandled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
