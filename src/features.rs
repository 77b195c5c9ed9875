//! Human-readable names for registered OpenType feature tags.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{common::FeatureTag, layout::Gsub};

// https://learn.microsoft.com/en-us/typography/opentype/spec/featurelist
const REGISTERED_FEATURES: &[(&str, &str)] = &[
    ("aalt", "Access All Alternates"),
    ("abvf", "Above-base Forms"),
    ("abvm", "Above-base Mark Positioning"),
    ("abvs", "Above-base Substitutions"),
    ("afrc", "Alternative Fractions"),
    ("blwf", "Below-base Forms"),
    ("blwm", "Below-base Mark Positioning"),
    ("blws", "Below-base Substitutions"),
    ("c2pc", "Petite Capitals From Capitals"),
    ("c2sc", "Small Capitals From Capitals"),
    ("calt", "Contextual Alternates"),
    ("case", "Case-Sensitive Forms"),
    ("ccmp", "Glyph Composition / Decomposition"),
    ("clig", "Contextual Ligatures"),
    ("cpsp", "Capital Spacing"),
    ("cswh", "Contextual Swash"),
    ("curs", "Cursive Positioning"),
    ("dlig", "Discretionary Ligatures"),
    ("dnom", "Denominators"),
    ("expt", "Expert Forms"),
    ("falt", "Final Glyph on Line Alternates"),
    ("fin2", "Terminal Forms #2"),
    ("fin3", "Terminal Forms #3"),
    ("fina", "Terminal Forms"),
    ("frac", "Fractions"),
    ("hist", "Historical Forms"),
    ("hlig", "Historical Ligatures"),
    ("init", "Initial Forms"),
    ("isol", "Isolated Forms"),
    ("ital", "Italics"),
    ("jalt", "Justification Alternates"),
    ("kern", "Kerning"),
    ("liga", "Standard Ligatures"),
    ("lnum", "Lining Figures"),
    ("locl", "Localized Forms"),
    ("mark", "Mark Positioning"),
    ("med2", "Medial Forms #2"),
    ("medi", "Medial Forms"),
    ("mgrk", "Mathematical Greek"),
    ("mkmk", "Mark to Mark Positioning"),
    ("mset", "Mark Positioning via Substitution"),
    ("nalt", "Alternate Annotation Forms"),
    ("numr", "Numerators"),
    ("onum", "Oldstyle Figures"),
    ("ordn", "Ordinals"),
    ("ornm", "Ornaments"),
    ("pcap", "Petite Capitals"),
    ("pnum", "Proportional Figures"),
    ("rclt", "Required Contextual Alternates"),
    ("rlig", "Required Ligatures"),
    ("rvrn", "Required Variation Alternates"),
    ("salt", "Stylistic Alternates"),
    ("sinf", "Scientific Inferiors"),
    ("size", "Optical size"),
    ("smcp", "Small Caps"),
    ("subs", "Subscript"),
    ("sups", "Superscript"),
    ("swsh", "Swash"),
    ("titl", "Titling"),
    ("tnum", "Tabular Figures"),
    ("unic", "Unicase"),
    ("zero", "Slashed Zero"),
];

#[allow(clippy::unwrap_used)] // constant pattern
static STYLISTIC_SET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ss(\d\d)$").unwrap());

// "r" features are usually required and probably can't be turned off
#[allow(clippy::unwrap_used)]
static DEFAULT_ENABLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(liga|calt|r...)$").unwrap());

/// The registered name of a feature tag, if it has one.
pub fn registered_name(tag: &str) -> Option<&'static str> {
    REGISTERED_FEATURES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, name)| *name)
}

/// A display name for a feature tag: its registered name, `Stylistic Set NN`
/// for `ssNN` tags, and otherwise the tag itself.
pub fn feature_name(tag: &str) -> String {
    if let Some(name) = registered_name(tag) {
        return name.to_string();
    }
    if let Some(captures) = STYLISTIC_SET.captures(tag) {
        return format!("Stylistic Set {}", &captures[1]);
    }
    tag.to_string()
}

/// Whether browsers turn this feature on without being asked.
pub fn is_default_enabled(tag: &str) -> bool {
    DEFAULT_ENABLED.is_match(tag)
}

/// A feature the font offers, for a list of toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "types", typeshare::typeshare)]
pub struct FontFeature {
    pub tag: FeatureTag,
    pub name: String,
    pub default_enabled: bool,
}

/// The registered features in a GSUB table, in feature list order.
///
/// Each tag appears once. Tags without a registered name are left out.
pub fn font_features(gsub: &Gsub) -> Vec<FontFeature> {
    let mut seen = HashSet::new();
    gsub.features
        .iter()
        .filter(|record| seen.insert(record.tag.as_str()))
        .filter_map(|record| {
            let Some(name) = registered_name(&record.tag) else {
                log::debug!("Not listing unregistered feature '{}'", record.tag);
                return None;
            };
            Some(FontFeature {
                tag: record.tag.clone(),
                name: name.to_string(),
                default_enabled: is_default_enabled(&record.tag),
            })
        })
        .collect()
}
