//! Display labels for the feature combinations that produce a font's alternates.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    alternates::AlternatesMap,
    common::FeatureTag,
    features::{feature_name, is_default_enabled},
};

const STYLE_AXIS: [&str; 2] = ["onum", "lnum"];
const SPACING_AXIS: [&str; 2] = ["pnum", "tnum"];

// (spacing, style)
const FIGURE_STYLES: &[((&str, &str), &str)] = &[
    (("pnum", "onum"), "Proportional Old Style"),
    (("pnum", "lnum"), "Proportional Lining"),
    (("tnum", "onum"), "Tabular Old Style"),
    (("tnum", "lnum"), "Tabular Lining"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct FeatureLabel {
    /// The `font-feature-settings` value being labeled
    pub settings: String,
    pub label: String,
    /// Whether every feature involved is on by default
    pub default_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct FeatureLabels {
    pub labels: Vec<FeatureLabel>,
    /// The figure style the font shows with no figure features on, when it
    /// can be worked out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_figures: Option<String>,
}

impl FeatureLabels {
    pub fn get(&self, settings: &str) -> Option<&FeatureLabel> {
        self.labels.iter().find(|l| l.settings == settings)
    }
}

fn figure_style(spacing: &str, style: &str) -> Option<&'static str> {
    FIGURE_STYLES
        .iter()
        .find(|((sp, st), _)| *sp == spacing && *st == style)
        .map(|(_, label)| *label)
}

/// If exactly one tag of an axis is in use, the other one is the default.
fn inferred_default(axis: [&'static str; 2], observed: &HashSet<&str>) -> Option<&'static str> {
    match (observed.contains(axis[0]), observed.contains(axis[1])) {
        (true, false) => Some(axis[1]),
        (false, true) => Some(axis[0]),
        _ => None,
    }
}

struct Classifier {
    default_style: Option<&'static str>,
    default_spacing: Option<&'static str>,
}

impl Classifier {
    fn single(&self, tag: &str, slot: usize) -> String {
        let figure = if STYLE_AXIS.contains(&tag) {
            self.default_spacing
                .and_then(|spacing| figure_style(spacing, tag))
        } else if SPACING_AXIS.contains(&tag) {
            self.default_style.and_then(|style| figure_style(tag, style))
        } else {
            None
        };
        if let Some(label) = figure {
            return label.to_string();
        }
        let name = feature_name(tag);
        if slot > 0 {
            format!("{} {}", name, slot)
        } else {
            name
        }
    }

    fn pair(&self, first: &str, second: &str) -> Option<String> {
        let tags = [first, second];
        let spacing = tags.into_iter().find(|t| SPACING_AXIS.contains(t))?;
        let style = tags.into_iter().find(|t| STYLE_AXIS.contains(t))?;
        figure_style(spacing, style).map(str::to_string)
    }

    fn label(&self, features: &[FeatureTag], slots: &[usize]) -> Option<String> {
        match features {
            [tag] => Some(self.single(tag, slots.first().copied().unwrap_or(0))),
            [first, second] => self.pair(first, second),
            _ => None,
        }
    }
}

/// Label every distinct feature activation used in an alternates map.
///
/// Single features are labeled by name. Pairs of figure features (one of
/// `onum`/`lnum` with one of `pnum`/`tnum`) get a compound figure-style label,
/// and when only one side of a figure axis appears in the font, the other side
/// is taken as the default and folded into the labels.
pub fn classify(map: &AlternatesMap) -> FeatureLabels {
    let mut activations: IndexMap<&str, (&[FeatureTag], &[usize])> = IndexMap::new();
    for alternate in map.alternates() {
        activations
            .entry(alternate.settings.as_str())
            .or_insert((alternate.features.as_slice(), alternate.slots.as_slice()));
    }

    let observed: HashSet<&str> = activations
        .values()
        .flat_map(|(features, _)| features.iter().map(|f| f.as_str()))
        .filter(|tag| STYLE_AXIS.contains(tag) || SPACING_AXIS.contains(tag))
        .collect();
    let classifier = Classifier {
        default_style: inferred_default(STYLE_AXIS, &observed),
        default_spacing: inferred_default(SPACING_AXIS, &observed),
    };

    let labels = activations
        .into_iter()
        .filter_map(|(settings, (features, slots))| {
            let label = classifier.label(features, slots)?;
            Some(FeatureLabel {
                settings: settings.to_string(),
                label,
                default_enabled: features.iter().all(|f| is_default_enabled(f)),
            })
        })
        .collect();

    let default_figures = classifier
        .default_spacing
        .zip(classifier.default_style)
        .and_then(|(spacing, style)| figure_style(spacing, style))
        .map(str::to_string);

    FeatureLabels {
        labels,
        default_figures,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{alternates::AlternatesBuilder, cmap::ReverseCmap, Font, Glyph};
    use pretty_assertions::assert_eq;

    /// Build a map where each activation leads from "1" to its own glyph.
    fn map_of(activations: Vec<(Vec<&str>, Vec<usize>)>) -> AlternatesMap {
        let mut font = Font::new(1000);
        font.glyphs = (0..=activations.len() as u32 + 1).map(Glyph::new).collect();
        let reverse = ReverseCmap::default();
        let mut builder = AlternatesBuilder::new(&font, &reverse);
        for (i, (features, slots)) in activations.into_iter().enumerate() {
            builder.add_alternate(
                "1",
                i as u32 + 1,
                features.into_iter().map(FeatureTag::from).collect(),
                slots,
            );
        }
        builder.build()
    }

    fn summary(labels: &FeatureLabels) -> Vec<(&str, &str, bool)> {
        labels
            .labels
            .iter()
            .map(|l| (l.settings.as_str(), l.label.as_str(), l.default_enabled))
            .collect()
    }

    #[test]
    fn test_single_features() {
        let labels = classify(&map_of(vec![
            (vec!["smcp"], vec![0]),
            (vec!["salt"], vec![2]),
            (vec!["ss03"], vec![0]),
            (vec!["liga"], vec![0]),
            (vec!["xyzw"], vec![0]),
        ]));
        assert_eq!(
            summary(&labels),
            vec![
                (r#""smcp""#, "Small Caps", false),
                (r#""salt" 2"#, "Stylistic Alternates 2", false),
                (r#""ss03""#, "Stylistic Set 03", false),
                (r#""liga""#, "Standard Ligatures", true),
                (r#""xyzw""#, "xyzw", false),
            ]
        );
        assert_eq!(labels.default_figures, None);
    }

    #[test]
    fn test_repeated_activation_is_labeled_once() {
        let labels = classify(&map_of(vec![
            (vec!["smcp"], vec![0]),
            (vec!["smcp"], vec![0]),
        ]));
        assert_eq!(labels.labels.len(), 1);
    }

    #[test]
    fn test_combinations_of_other_features_are_not_labeled() {
        let labels = classify(&map_of(vec![(vec!["smcp", "salt"], vec![0, 1])]));
        assert!(labels.labels.is_empty());
    }

    #[test]
    fn test_figure_defaults_by_elimination() {
        let labels = classify(&map_of(vec![
            (vec!["onum"], vec![0]),
            (vec!["pnum"], vec![0]),
            (vec!["pnum", "onum"], vec![0, 0]),
        ]));
        assert_eq!(
            summary(&labels),
            vec![
                (r#""onum""#, "Tabular Old Style", false),
                (r#""pnum""#, "Proportional Lining", false),
                (r#""pnum", "onum""#, "Proportional Old Style", false),
            ]
        );
        assert_eq!(labels.default_figures.as_deref(), Some("Tabular Lining"));
    }

    #[test]
    fn test_figure_labels_when_both_styles_present() {
        let labels = classify(&map_of(vec![
            (vec!["onum"], vec![0]),
            (vec!["lnum"], vec![0]),
            (vec!["tnum"], vec![0]),
            (vec!["lnum", "tnum"], vec![0, 0]),
        ]));
        // style axis is ambiguous, spacing axis defaults to proportional
        assert_eq!(
            summary(&labels),
            vec![
                (r#""onum""#, "Proportional Old Style", false),
                (r#""lnum""#, "Proportional Lining", false),
                (r#""tnum""#, "Tabular Figures", false),
                (r#""lnum", "tnum""#, "Tabular Lining", false),
            ]
        );
        assert_eq!(labels.default_figures, None);
    }

    #[test]
    fn test_lookup_by_settings() {
        let labels = classify(&map_of(vec![(vec!["swsh"], vec![1])]));
        assert_eq!(labels.get(r#""swsh" 1"#).unwrap().label, "Swash 1");
        assert!(labels.get(r#""swsh""#).is_none());
    }
}
