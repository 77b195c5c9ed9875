use indexmap::IndexMap;

use crate::{
    cmap::ReverseCmap,
    common::{FeatureTag, GlyphId},
    layout::{Gsub, Subtable},
};

/// Ligature substitutions keyed by the text of their component glyphs.
///
/// Source texts keep the order they were first seen in; the first subtable to
/// define a (text, feature) destination wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LigatureIndex(IndexMap<String, IndexMap<FeatureTag, GlyphId>>);

impl LigatureIndex {
    pub fn new(gsub: &Gsub, reverse_cmap: &ReverseCmap) -> Self {
        let mut index = LigatureIndex::default();
        for (tag, subtable) in gsub.feature_subtables() {
            let Subtable::Ligature {
                coverage,
                ligature_sets,
            } = subtable
            else {
                continue;
            };
            if coverage.len() != ligature_sets.len() {
                log::warn!(
                    "Feature '{}': coverage of {} glyphs but {} ligature sets",
                    tag,
                    coverage.len(),
                    ligature_sets.len()
                );
            }
            for (first, ligatures) in coverage.iter().zip(ligature_sets) {
                for ligature in ligatures {
                    let text = reverse_cmap
                        .text(std::iter::once(first).chain(ligature.components.iter().copied()));
                    if text.chars().count() != ligature.components.len() + 1 {
                        log::debug!(
                            "Feature '{}': ligature glyph {} has components without characters",
                            tag,
                            ligature.lig_glyph
                        );
                    }
                    index
                        .0
                        .entry(text)
                        .or_default()
                        .entry(tag.clone())
                        .or_insert(ligature.lig_glyph);
                }
            }
        }
        index
    }

    pub fn get(&self, text: &str) -> Option<&IndexMap<FeatureTag, GlyphId>> {
        self.0.get(text)
    }

    /// Every (source text, feature, ligature glyph) entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureTag, GlyphId)> + '_ {
        self.0.iter().flat_map(|(text, features)| {
            features
                .iter()
                .map(move |(tag, &glyph)| (text.as_str(), tag, glyph))
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::{Coverage, FeatureRecord, Ligature, Lookup};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn ligature_gsub(tag: &str, first: Vec<GlyphId>, sets: Vec<Vec<Ligature>>) -> Gsub {
        Gsub {
            features: vec![FeatureRecord {
                tag: tag.into(),
                lookup_indexes: vec![0],
            }],
            lookups: vec![Lookup {
                subtables: vec![Subtable::Ligature {
                    coverage: Coverage::Glyphs { glyphs: first },
                    ligature_sets: sets,
                }],
            }],
        }
    }

    fn reverse() -> ReverseCmap {
        ReverseCmap::new(&BTreeMap::from([
            (u32::from('f'), 1),
            (u32::from('i'), 2),
            (u32::from('l'), 3),
        ]))
    }

    #[test]
    fn test_fi_ligature() {
        let gsub = ligature_gsub(
            "liga",
            vec![1],
            vec![vec![
                Ligature {
                    components: vec![2],
                    lig_glyph: 500,
                },
                Ligature {
                    components: vec![1, 3],
                    lig_glyph: 501,
                },
            ]],
        );
        let index = LigatureIndex::new(&gsub, &reverse());
        assert_eq!(index.get("fi").unwrap().get("liga"), Some(&500));
        assert_eq!(index.get("ffl").unwrap().get("liga"), Some(&501));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_unmapped_component_is_lossy_not_fatal() {
        let gsub = ligature_gsub(
            "dlig",
            vec![1],
            vec![vec![Ligature {
                components: vec![77],
                lig_glyph: 600,
            }]],
        );
        let index = LigatureIndex::new(&gsub, &reverse());
        assert_eq!(index.get("f").unwrap().get("dlig"), Some(&600));
    }

    #[test]
    fn test_ligature_sets_beyond_coverage_are_ignored() {
        let gsub = ligature_gsub(
            "liga",
            vec![1],
            vec![
                vec![Ligature {
                    components: vec![2],
                    lig_glyph: 500,
                }],
                vec![Ligature {
                    components: vec![3],
                    lig_glyph: 503,
                }],
            ],
        );
        let index = LigatureIndex::new(&gsub, &reverse());
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("fi").unwrap().get("liga"), Some(&500));
    }

    #[test]
    fn test_iter() {
        let gsub = ligature_gsub(
            "liga",
            vec![1, 3],
            vec![
                vec![Ligature {
                    components: vec![2],
                    lig_glyph: 500,
                }],
                vec![Ligature {
                    components: vec![3],
                    lig_glyph: 502,
                }],
            ],
        );
        let index = LigatureIndex::new(&gsub, &reverse());
        let entries: Vec<_> = index
            .iter()
            .map(|(text, tag, glyph)| (text.to_string(), tag.to_string(), glyph))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("fi".to_string(), "liga".to_string(), 500),
                ("ll".to_string(), "liga".to_string(), 502),
            ]
        );
    }
}
