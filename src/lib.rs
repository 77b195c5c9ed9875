#![deny(clippy::unwrap_used, clippy::expect_used)]
//! Find every glyph alternate a font's GSUB table can reach, the feature
//! settings that produce it, and labels for those settings.

mod alternates;
mod cache;
mod cmap;
mod common;
mod error;
pub mod features;
mod font;
mod glyph;
mod labels;
pub mod layout;
mod metrics;
mod report;
mod trail;

pub use crate::{
    alternates::{build_alternates, Alternate, AlternatesBuilder, AlternatesMap},
    cache::AlternatesCache,
    cmap::ReverseCmap,
    common::{activation_string, feature_setting, FeatureTag, GlyphId, AALT},
    error::AlternatesError,
    features::FontFeature,
    font::Font,
    glyph::{Glyph, GlyphList, GlyphMetrics},
    labels::{classify, FeatureLabel, FeatureLabels},
    metrics::{CharacterInfo, DisplayMetrics, GlyphInventory, MetricType, NormalizedMetrics},
    report::Report,
    trail::{Step, Trail, TrailEnumerator},
};
pub use smol_str::SmolStr;
use std::path::PathBuf;

/// Load a font model from disk. Only JSON font models are understood.
pub fn load(filename: impl Into<PathBuf>) -> Result<Font, AlternatesError> {
    let pb = filename.into();

    let mut font: Font = match pb.extension() {
        Some(ext) if ext == "json" => {
            let buffered = std::io::BufReader::new(std::fs::File::open(&pb)?);
            serde_json::from_reader(buffered)?
        }
        _ => return Err(AlternatesError::UnknownFileType { path: pb }),
    };
    log::debug!("Loaded {} glyphs from {}", font.glyphs.len(), pb.display());
    font.source = Some(pb);
    Ok(font)
}
