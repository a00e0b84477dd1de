#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::ZoneStore;
use crate::normalize::{ScreenPoint, Size, to_screen};

/// Index of the first zone (lowest index) whose screen rectangle contains `pt`.
///
/// Each zone is projected into screen space against `reference` before the
/// containment check, so hits follow the background as the window resizes.
/// Overlapping zones resolve to the earliest one. An empty reference extent
/// never hits.
#[must_use]
pub fn hit_test(pt: ScreenPoint, store: &ZoneStore, reference: Size) -> Option<usize> {
    if reference.is_empty() {
        return None;
    }
    store
        .iter()
        .position(|zone| to_screen(zone.rect, reference).contains(pt))
}
