use std::{collections::HashMap, sync::Arc};

use crate::{alternates::AlternatesMap, Font};

/// Built alternates maps, keyed by an identity for the font (its URL or path).
///
/// A font's map is built the first time it is asked for and shared after that.
#[derive(Debug, Default)]
pub struct AlternatesCache {
    maps: HashMap<String, Arc<AlternatesMap>>,
}

impl AlternatesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &str) -> Option<Arc<AlternatesMap>> {
        self.maps.get(identity).cloned()
    }

    /// The map for `identity`, building it from `font` if there isn't one yet.
    pub fn get_or_build(&mut self, identity: &str, font: &Font) -> Arc<AlternatesMap> {
        if let Some(map) = self.maps.get(identity) {
            log::debug!("Using cached alternates for {}", identity);
            return map.clone();
        }
        let map = Arc::new(font.alternates());
        self.maps.insert(identity.to_string(), map.clone());
        map
    }

    /// Forget the map for `identity`; returns whether there was one.
    pub fn invalidate(&mut self, identity: &str) -> bool {
        self.maps.remove(identity).is_some()
    }

    pub fn clear(&mut self) {
        self.maps.clear();
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::{Coverage, FeatureRecord, Gsub, Lookup, Subtable},
        Glyph,
    };

    fn font() -> Font {
        let mut font = Font::new(1000);
        font.glyphs = (0..4).map(Glyph::new).collect();
        font.cmap.insert(u32::from('a'), 1);
        font.gsub = Some(Gsub {
            features: vec![FeatureRecord {
                tag: "smcp".into(),
                lookup_indexes: vec![0],
            }],
            lookups: vec![Lookup {
                subtables: vec![Subtable::Single {
                    coverage: Coverage::Glyphs { glyphs: vec![1] },
                    substitute: vec![3],
                }],
            }],
        });
        font
    }

    #[test]
    fn test_builds_once() {
        let font = font();
        let mut cache = AlternatesCache::new();
        let first = cache.get_or_build("Sample.json", &font);
        // a different font under the same identity is not consulted
        let second = cache.get_or_build("Sample.json", &Font::new(1000));
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.alternate("a", 3).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let font = font();
        let mut cache = AlternatesCache::new();
        let first = cache.get_or_build("one", &font);
        cache.get_or_build("two", &font);
        assert!(cache.invalidate("one"));
        assert!(!cache.invalidate("one"));
        assert!(cache.get("one").is_none());
        let rebuilt = cache.get_or_build("one", &font);
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(*first, *rebuilt);
        cache.clear();
        assert!(cache.is_empty());
    }
}
