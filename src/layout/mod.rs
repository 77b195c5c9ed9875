//! The GSUB portion of the font model, and the indexes built over it.

mod ligature;
mod single;
mod subtable;

pub use ligature::LigatureIndex;
pub use single::SingleGlyphIndex;
pub use subtable::{Coverage, Ligature, RangeRecord, Subtable};

use serde::{Deserialize, Serialize};

use crate::common::FeatureTag;

/// A feature record: a tag and the lookups it switches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub tag: FeatureTag,
    #[serde(default, alias = "lookupListIndexes")]
    pub lookup_indexes: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    #[serde(default)]
    pub subtables: Vec<Subtable>,
}

/// The glyph substitution table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gsub {
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
    #[serde(default)]
    pub lookups: Vec<Lookup>,
}

impl Gsub {
    pub fn lookup(&self, index: usize) -> Option<&Lookup> {
        self.lookups.get(index)
    }

    /// Every subtable reachable from a feature, paired with that feature's tag.
    ///
    /// Order is feature order, then the feature's lookup order, then subtable
    /// order. A subtable shared by several features is visited once per feature.
    pub fn feature_subtables(&self) -> impl Iterator<Item = (&FeatureTag, &Subtable)> + '_ {
        self.features.iter().flat_map(move |feature| {
            feature
                .lookup_indexes
                .iter()
                .filter_map(move |&index| {
                    let lookup = self.lookup(index);
                    if lookup.is_none() {
                        log::warn!(
                            "Feature '{}' references missing lookup {}",
                            feature.tag,
                            index
                        );
                    }
                    lookup
                })
                .flat_map(move |lookup| {
                    lookup
                        .subtables
                        .iter()
                        .map(move |subtable| (&feature.tag, subtable))
                })
        })
    }
}
