//! Merging single, chained and ligature substitutions into one map of alternates.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    cmap::ReverseCmap,
    common::{activation_string, FeatureTag, GlyphId, AALT},
    layout::{LigatureIndex, SingleGlyphIndex},
    metrics::NormalizedMetrics,
    trail::{Trail, TrailEnumerator},
    Font,
};

/// A glyph that some source text can be turned into, and how to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct Alternate {
    /// The first feature applied
    pub feature: FeatureTag,
    /// Every feature applied, in order
    pub features: Vec<FeatureTag>,
    /// The alternate slot used with each feature; 0 means "on"
    pub slots: Vec<usize>,
    /// Value for the CSS `font-feature-settings` property
    pub settings: String,
    /// The destination glyph's own character, if it has one in the cmap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode: Option<char>,
    pub left: f64,
    pub right: f64,
    pub width: f64,
}

impl Alternate {
    /// The slot of the first feature applied.
    pub fn slot(&self) -> usize {
        self.slots.first().copied().unwrap_or(0)
    }

    /// How indirect this alternate's path is: `aalt` is worst, then
    /// alternate-set members, then plain substitutions.
    fn rank(&self) -> u8 {
        if self.feature == AALT {
            2
        } else if self.slot() > 0 {
            1
        } else {
            0
        }
    }

    /// Whether `new` should replace this entry for the same destination glyph.
    fn replaceable_by(&self, new: &Alternate) -> bool {
        let rank = self.rank();
        rank > 0 && new.rank() <= rank
    }
}

/// Alternates by source text, then by destination glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternatesMap(IndexMap<String, BTreeMap<GlyphId, Alternate>>);

impl AlternatesMap {
    /// All alternates for exactly this source text.
    pub fn get(&self, text: &str) -> Option<&BTreeMap<GlyphId, Alternate>> {
        self.0.get(text)
    }

    pub fn alternate(&self, text: &str, glyph: GlyphId) -> Option<&Alternate> {
        self.0.get(text)?.get(&glyph)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, BTreeMap<GlyphId, Alternate>> {
        self.0.iter()
    }

    /// Every alternate in the map.
    pub fn alternates(&self) -> impl Iterator<Item = &Alternate> + '_ {
        self.0.values().flat_map(|alts| alts.values())
    }

    /// A map holding only the given source text, if present.
    pub fn restrict_to(&self, text: &str) -> AlternatesMap {
        AlternatesMap(
            self.0
                .get_key_value(text)
                .map(|(k, v)| (k.clone(), v.clone()))
                .into_iter()
                .collect(),
        )
    }

    /// Number of source texts with alternates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accumulates alternates for one font.
pub struct AlternatesBuilder<'a> {
    font: &'a Font,
    reverse_cmap: &'a ReverseCmap,
    upem: f64,
    map: AlternatesMap,
}

impl<'a> AlternatesBuilder<'a> {
    pub fn new(font: &'a Font, reverse_cmap: &'a ReverseCmap) -> Self {
        AlternatesBuilder {
            font,
            reverse_cmap,
            upem: font.upem(),
            map: AlternatesMap::default(),
        }
    }

    /// Record that `text` becomes glyph `to` under the given features and slots.
    ///
    /// Substitutions to nonexistent glyphs are dropped. An existing entry for
    /// the same destination is only replaced when it came through `aalt` or an
    /// alternate set, and the new path is no less direct.
    pub fn add_alternate(
        &mut self,
        text: &str,
        to: GlyphId,
        features: Vec<FeatureTag>,
        slots: Vec<usize>,
    ) {
        let Some(feature) = features.first().cloned() else {
            return;
        };
        let Some(glyph) = self.font.glyph(to) else {
            log::warn!(
                "\"{}\" + {} results in nonexistent glyph {}",
                text,
                feature,
                to
            );
            return;
        };
        let metrics = NormalizedMetrics::new(&glyph.metrics, self.upem);
        let settings = activation_string(
            features
                .iter()
                .map(|f| f.as_str())
                .zip(slots.iter().copied()),
        );
        let alternate = Alternate {
            feature,
            features,
            slots,
            settings,
            unicode: self.reverse_cmap.get(to),
            left: metrics.left,
            right: metrics.right,
            width: metrics.width,
        };
        let alternates = self.map.0.entry(text.to_string()).or_default();
        if let Some(existing) = alternates.get(&to) {
            if !existing.replaceable_by(&alternate) {
                log::debug!(
                    "Keeping {} over {} for \"{}\" -> {}",
                    existing.settings,
                    alternate.settings,
                    text,
                    to
                );
                return;
            }
        }
        alternates.insert(to, alternate);
    }

    /// Add each direct substitution of every glyph that has a character.
    pub fn add_singles(&mut self, index: &SingleGlyphIndex) {
        for (from, tag, slot, to) in index.iter() {
            let Some(ch) = self.reverse_cmap.get(from) else {
                continue;
            };
            self.add_alternate(&ch.to_string(), to, vec![tag.clone()], vec![slot]);
        }
    }

    /// Add every trail whose root glyph has a character.
    pub fn add_trails(&mut self, trails: &[Trail]) {
        for trail in trails {
            let Some(ch) = self.reverse_cmap.get(trail.from) else {
                continue;
            };
            self.add_alternate(&ch.to_string(), trail.to(), trail.features(), trail.slots());
        }
    }

    pub fn add_ligatures(&mut self, ligatures: &LigatureIndex) {
        for (text, tag, to) in ligatures.iter() {
            self.add_alternate(text, to, vec![tag.clone()], vec![0]);
        }
    }

    pub fn build(mut self) -> AlternatesMap {
        self.map.0.retain(|_, alternates| !alternates.is_empty());
        self.map
    }
}

/// Run the whole pipeline over a font. A font without a GSUB table has no alternates.
pub fn build_alternates(font: &Font) -> AlternatesMap {
    let Some(gsub) = &font.gsub else {
        log::info!("Font has no GSUB table; no alternates available");
        return AlternatesMap::default();
    };
    let reverse_cmap = ReverseCmap::new(&font.cmap);
    let singles = SingleGlyphIndex::new(gsub);
    let ligatures = LigatureIndex::new(gsub, &reverse_cmap);
    let trails = TrailEnumerator::new(&singles).trails();

    let mut builder = AlternatesBuilder::new(font, &reverse_cmap);
    builder.add_singles(&singles);
    builder.add_trails(&trails);
    builder.add_ligatures(&ligatures);
    let map = builder.build();
    log::info!(
        "Found alternates for {} source texts ({} ligature sequences)",
        map.len(),
        ligatures.len()
    );
    map
}
