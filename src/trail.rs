//! Chains of single-glyph substitutions reachable by combining features.

use std::collections::HashSet;

use crate::{
    common::{activation_string, FeatureTag, GlyphId, AALT},
    layout::SingleGlyphIndex,
};

/// One substitution in a trail: the feature and slot applied, and the glyph it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub feature: FeatureTag,
    pub slot: usize,
    pub glyph: GlyphId,
}

/// A chain of substitutions starting at a source glyph.
///
/// No feature appears twice in a trail, and `aalt` never appears at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    pub from: GlyphId,
    pub steps: Vec<Step>,
}

impl Trail {
    /// The glyph reached by applying every step. A trail always has at least one step.
    pub fn to(&self) -> GlyphId {
        self.steps.last().map_or(self.from, |step| step.glyph)
    }

    pub fn features(&self) -> Vec<FeatureTag> {
        self.steps.iter().map(|s| s.feature.clone()).collect()
    }

    pub fn slots(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.slot).collect()
    }

    /// The `font-feature-settings` value that activates this trail.
    pub fn activation(&self) -> String {
        activation_string(self.steps.iter().map(|s| (s.feature.as_str(), s.slot)))
    }
}

/// Depth-first enumeration of trails over a [`SingleGlyphIndex`].
pub struct TrailEnumerator<'a> {
    index: &'a SingleGlyphIndex,
}

impl<'a> TrailEnumerator<'a> {
    pub fn new(index: &'a SingleGlyphIndex) -> Self {
        Self { index }
    }

    /// Trails from every source glyph in the index, roots ascending.
    pub fn trails(&self) -> Vec<Trail> {
        let trails: Vec<Trail> = self
            .index
            .glyphs()
            .flat_map(|root| self.trails_from(root))
            .collect();
        log::debug!("Enumerated {} substitution trails", trails.len());
        trails
    }

    /// Trails rooted at one glyph.
    ///
    /// Each destination glyph is produced at most once per root, and the root
    /// itself counts as produced, so cyclic substitutions terminate.
    pub fn trails_from(&self, root: GlyphId) -> Vec<Trail> {
        let mut produced = HashSet::from([root]);
        let mut path = Vec::new();
        let mut trails = Vec::new();
        self.walk(root, root, &mut path, &mut produced, &mut trails);
        trails
    }

    fn walk(
        &self,
        root: GlyphId,
        current: GlyphId,
        path: &mut Vec<Step>,
        produced: &mut HashSet<GlyphId>,
        trails: &mut Vec<Trail>,
    ) {
        let Some(features) = self.index.features(current) else {
            return;
        };
        for (tag, slots) in features {
            if tag == AALT || path.iter().any(|step| &step.feature == tag) {
                continue;
            }
            for (&slot, &glyph) in slots {
                // produced is not unwound on backtrack
                if !produced.insert(glyph) {
                    continue;
                }
                path.push(Step {
                    feature: tag.clone(),
                    slot,
                    glyph,
                });
                trails.push(Trail {
                    from: root,
                    steps: path.clone(),
                });
                self.walk(root, glyph, path, produced, trails);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Coverage, FeatureRecord, Gsub, Lookup, Subtable};
    use pretty_assertions::assert_eq;

    /// One lookup per feature, each a list of (from, to) single substitutions
    /// or, with slot-bearing entries, an alternate set.
    fn index(features: &[(&str, Vec<(GlyphId, Vec<GlyphId>)>)]) -> SingleGlyphIndex {
        let mut gsub = Gsub::default();
        for (i, (tag, subs)) in features.iter().enumerate() {
            gsub.features.push(FeatureRecord {
                tag: (*tag).into(),
                lookup_indexes: vec![i],
            });
            let subtables = subs
                .iter()
                .map(|(from, to)| {
                    if to.len() == 1 {
                        Subtable::Single {
                            coverage: Coverage::Glyphs { glyphs: vec![*from] },
                            substitute: to.clone(),
                        }
                    } else {
                        Subtable::Alternate {
                            coverage: Coverage::Glyphs { glyphs: vec![*from] },
                            alternate_sets: vec![to.clone()],
                        }
                    }
                })
                .collect();
            gsub.lookups.push(Lookup { subtables });
        }
        SingleGlyphIndex::new(&gsub)
    }

    fn summary(trails: &[Trail]) -> Vec<(GlyphId, GlyphId, String)> {
        trails
            .iter()
            .map(|t| (t.from, t.to(), t.activation()))
            .collect()
    }

    #[test]
    fn test_cycle_terminates_with_one_trail() {
        let index = index(&[("x", vec![(1, vec![2])]), ("y", vec![(2, vec![1])])]);
        let enumerator = TrailEnumerator::new(&index);
        assert_eq!(
            summary(&enumerator.trails_from(1)),
            vec![(1, 2, r#""x""#.to_string())]
        );
        assert_eq!(
            summary(&enumerator.trails()),
            vec![(1, 2, r#""x""#.to_string()), (2, 1, r#""y""#.to_string())]
        );
    }

    #[test]
    fn test_chains_distinct_features() {
        // a -smcp-> A.sc -salt-> A.sc.alt1 / A.sc.alt2
        let index = index(&[
            ("smcp", vec![(1, vec![10])]),
            ("salt", vec![(10, vec![11, 12]), (1, vec![20])]),
        ]);
        let trails = TrailEnumerator::new(&index).trails_from(1);
        assert_eq!(
            summary(&trails),
            vec![
                (1, 10, r#""smcp""#.to_string()),
                (1, 11, r#""smcp", "salt" 1"#.to_string()),
                (1, 12, r#""smcp", "salt" 2"#.to_string()),
                (1, 20, r#""salt""#.to_string()),
            ]
        );
        assert_eq!(trails[2].slots(), vec![0, 2]);
    }

    #[test]
    fn test_feature_is_never_reused_in_a_trail() {
        let index = index(&[("ss01", vec![(1, vec![2]), (2, vec![3])])]);
        let trails = TrailEnumerator::new(&index).trails_from(1);
        assert_eq!(summary(&trails), vec![(1, 2, r#""ss01""#.to_string())]);
    }

    #[test]
    fn test_aalt_is_excluded() {
        let index = index(&[
            ("aalt", vec![(1, vec![2, 3])]),
            ("ss02", vec![(1, vec![3]), (2, vec![4])]),
        ]);
        let trails = TrailEnumerator::new(&index).trails();
        assert!(trails
            .iter()
            .all(|t| t.features().iter().all(|f| f != AALT)));
        assert_eq!(
            summary(&trails),
            vec![
                (1, 3, r#""ss02""#.to_string()),
                (2, 4, r#""ss02""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_destination_produced_once_per_root() {
        // Both ss01 and ss02 lead from 1 to 5; only the first path is kept.
        let index = index(&[
            ("ss01", vec![(1, vec![5])]),
            ("ss02", vec![(1, vec![5]), (5, vec![6])]),
        ]);
        let trails = TrailEnumerator::new(&index).trails_from(1);
        assert_eq!(
            summary(&trails),
            vec![
                (1, 5, r#""ss01""#.to_string()),
                (1, 6, r#""ss01", "ss02""#.to_string()),
            ]
        );
    }
}
