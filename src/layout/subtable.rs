use serde::{Deserialize, Serialize};

use crate::common::{GlyphId, MAX_GLYPH_ID};

/// An inclusive range of glyph IDs in a coverage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRecord {
    pub start: GlyphId,
    pub end: GlyphId,
}

impl RangeRecord {
    fn clamped_end(&self) -> GlyphId {
        self.end.min(MAX_GLYPH_ID)
    }
}

/// The set of glyphs a subtable applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coverage {
    /// An explicit list of glyph IDs
    Glyphs { glyphs: Vec<GlyphId> },
    /// Inclusive glyph ID ranges
    Ranges { ranges: Vec<RangeRecord> },
}

impl Coverage {
    /// Iterate over covered glyphs in coverage-index order, expanding ranges.
    ///
    /// Ranges stop at the largest possible glyph ID.
    pub fn iter(&self) -> Box<dyn Iterator<Item = GlyphId> + '_> {
        match self {
            Coverage::Glyphs { glyphs } => Box::new(glyphs.iter().copied()),
            Coverage::Ranges { ranges } => Box::new(ranges.iter().flat_map(|range| {
                if range.end > MAX_GLYPH_ID {
                    log::warn!(
                        "Coverage range {}..={} runs past glyph ID {}",
                        range.start,
                        range.end,
                        MAX_GLYPH_ID
                    );
                }
                range.start..=range.clamped_end()
            })),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Coverage::Glyphs { glyphs } => glyphs.len(),
            Coverage::Ranges { ranges } => ranges
                .iter()
                .filter(|r| r.clamped_end() >= r.start)
                .map(|r| (r.clamped_end() - r.start) as usize + 1)
                .sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a ligature set: the glyphs following the covered first glyph,
/// and the ligature glyph they form together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ligature {
    pub components: Vec<GlyphId>,
    pub lig_glyph: GlyphId,
}

/// A GSUB subtable, classified by its substitution mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSubtable", into = "RawSubtable")]
pub enum Subtable {
    /// One-to-one substitution, `substitute[i]` replaces the i-th covered glyph
    Single {
        coverage: Coverage,
        substitute: Vec<GlyphId>,
    },
    /// One-to-one substitution by a signed glyph ID offset
    Delta { coverage: Coverage, delta: i32 },
    /// One-to-many: each covered glyph has a set of optional alternates
    Alternate {
        coverage: Coverage,
        alternate_sets: Vec<Vec<GlyphId>>,
    },
    /// Many-to-one: each covered first glyph has a set of ligatures
    Ligature {
        coverage: Coverage,
        ligature_sets: Vec<Vec<Ligature>>,
    },
    /// Chained contextual rule; carried but not modeled
    Contextual { backtrack_coverage: Vec<Coverage> },
    /// Anything else
    Unrecognized,
}

/// The field-presence shape of a subtable as emitted by font table readers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubtable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    substitute: Option<Vec<GlyphId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delta_glyph_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternate_sets: Option<Vec<Vec<GlyphId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ligature_sets: Option<Vec<Vec<Ligature>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backtrack_coverage: Option<Vec<Coverage>>,
}

impl From<RawSubtable> for Subtable {
    fn from(raw: RawSubtable) -> Self {
        match raw {
            RawSubtable {
                coverage: Some(coverage),
                substitute: Some(substitute),
                ..
            } => Subtable::Single {
                coverage,
                substitute,
            },
            RawSubtable {
                coverage: Some(coverage),
                delta_glyph_id: Some(delta),
                ..
            } => Subtable::Delta { coverage, delta },
            RawSubtable {
                coverage: Some(coverage),
                alternate_sets: Some(alternate_sets),
                ..
            } => Subtable::Alternate {
                coverage,
                alternate_sets,
            },
            RawSubtable {
                coverage: Some(coverage),
                ligature_sets: Some(ligature_sets),
                ..
            } => Subtable::Ligature {
                coverage,
                ligature_sets,
            },
            RawSubtable {
                backtrack_coverage: Some(backtrack_coverage),
                ..
            } => Subtable::Contextual { backtrack_coverage },
            _ => Subtable::Unrecognized,
        }
    }
}

impl From<Subtable> for RawSubtable {
    fn from(subtable: Subtable) -> Self {
        match subtable {
            Subtable::Single {
                coverage,
                substitute,
            } => RawSubtable {
                coverage: Some(coverage),
                substitute: Some(substitute),
                ..Default::default()
            },
            Subtable::Delta { coverage, delta } => RawSubtable {
                coverage: Some(coverage),
                delta_glyph_id: Some(delta),
                ..Default::default()
            },
            Subtable::Alternate {
                coverage,
                alternate_sets,
            } => RawSubtable {
                coverage: Some(coverage),
                alternate_sets: Some(alternate_sets),
                ..Default::default()
            },
            Subtable::Ligature {
                coverage,
                ligature_sets,
            } => RawSubtable {
                coverage: Some(coverage),
                ligature_sets: Some(ligature_sets),
                ..Default::default()
            },
            Subtable::Contextual { backtrack_coverage } => RawSubtable {
                backtrack_coverage: Some(backtrack_coverage),
                ..Default::default()
            },
            Subtable::Unrecognized => RawSubtable::default(),
        }
    }
}
