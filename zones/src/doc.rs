//! Document model: zones and the ordered in-memory store.
//!
//! A [`Zone`] is a plain [`NormalizedRect`] paired with a signed score. The
//! [`ZoneStore`] keeps zones in insertion order; the index of a zone is the
//! handle the engine uses for selection, so any removal shifts every later
//! index down by one and invalidates previously held indices.
//!
//! The renderer and hit-tester read from the store through [`ZoneStore::iter`]
//! in index order. Only the engine mutates it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use crate::consts::DEFAULT_ZONE_SCORE;
use crate::normalize::NormalizedRect;

/// A scored rectangle on the normalized canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    /// Geometry in normalized space. Never resized after creation.
    pub rect: NormalizedRect,
    /// Points awarded when the zone is hit in play. Positive rewards, negative penalizes.
    pub score: i32,
}

impl Zone {
    /// A zone with the default reward score.
    #[must_use]
    pub fn new(rect: NormalizedRect) -> Self {
        Self { rect, score: DEFAULT_ZONE_SCORE }
    }

    #[must_use]
    pub fn with_score(rect: NormalizedRect, score: i32) -> Self {
        Self { rect, score }
    }

    /// Whether hitting this zone adds points.
    #[must_use]
    pub fn is_reward(&self) -> bool {
        self.score > 0
    }
}

/// Ordered collection of zones. Overlap is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneStore {
    zones: Vec<Zone>,
}

impl ZoneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Append a zone and return its index (always the highest).
    pub fn add(&mut self, zone: Zone) -> usize {
        self.zones.push(zone);
        self.zones.len() - 1
    }

    /// Remove the zone at `index`, shifting later zones down by one.
    ///
    /// Returns `None` without touching the store if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Zone> {
        if index < self.zones.len() { Some(self.zones.remove(index)) } else { None }
    }

    /// Negate the score of the zone at `index` and return the new score.
    ///
    /// Out-of-range indices, and a score of `i32::MIN` (which has no
    /// positive counterpart), are a no-op and return `None`.
    pub fn toggle_score_sign(&mut self, index: usize) -> Option<i32> {
        let zone = self.zones.get_mut(index)?;
        zone.score = zone.score.checked_neg()?;
        Some(zone.score)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Zones in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<Zone> for ZoneStore {
    fn from_iter<I: IntoIterator<Item = Zone>>(iter: I) -> Self {
        Self { zones: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a ZoneStore {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
