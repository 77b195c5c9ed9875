use std::collections::HashSet;

use serde::Serialize;

use crate::{
    alternates::AlternatesMap,
    features::FontFeature,
    labels::{classify, FeatureLabels},
    metrics::{DisplayMetrics, GlyphInventory},
    AlternatesError, Font,
};

/// Everything a glyph picker needs to know about one font.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub alternates: AlternatesMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<FeatureLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FontFeature>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DisplayMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<GlyphInventory>,
}

impl Report {
    /// A report holding the font's alternates and display metrics.
    pub fn new(font: &Font) -> Self {
        Report {
            alternates: font.alternates(),
            labels: None,
            features: None,
            metrics: font.display_metrics(),
            inventory: None,
        }
    }

    /// Label the feature settings of the alternates currently in the report.
    ///
    /// Default figure styles are inferred from these alternates, so label
    /// before narrowing with [`Report::restrict_to`].
    pub fn with_labels(mut self) -> Self {
        self.labels = Some(classify(&self.alternates));
        self
    }

    pub fn with_inventory(mut self, font: &Font) -> Self {
        self.inventory = Some(font.inventory());
        self
    }

    pub fn with_features(mut self, font: &Font) -> Self {
        self.features = Some(font.features());
        self
    }

    /// Keep only the alternates for one source text, and the labels of the
    /// settings they use.
    pub fn restrict_to(mut self, text: &str) -> Self {
        self.alternates = self.alternates.restrict_to(text);
        if let Some(labels) = &mut self.labels {
            let used: HashSet<&str> = self
                .alternates
                .alternates()
                .map(|alt| alt.settings.as_str())
                .collect();
            labels.labels.retain(|label| used.contains(label.settings.as_str()));
        }
        self
    }

    pub fn to_json(&self) -> Result<String, AlternatesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
