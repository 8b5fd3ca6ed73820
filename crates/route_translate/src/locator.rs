//! Re-associates vendor maneuver coordinates with indices in the decoded path.

use crate::geo::GeoPoint;

/// First index at or after `from_index` whose point matches `target` within
/// `tolerance_deg`. `None` once the scan runs off the end.
pub fn locate(
    points: &[GeoPoint],
    from_index: usize,
    target: GeoPoint,
    tolerance_deg: f64,
) -> Option<usize> {
    points
        .get(from_index..)?
        .iter()
        .position(|point| point.approx_eq(&target, tolerance_deg))
        .map(|relative| from_index + relative)
}

/// Monotonic search position carried across the maneuvers of one route.
///
/// Vendors emit maneuvers in route order, so each search resumes where the
/// previous match landed instead of rescanning from the start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchCursor {
    position: usize,
}

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Locate `target` from the current position. A hit moves the cursor onto
    /// the matched index; a miss leaves it where it was.
    pub fn advance(
        &mut self,
        points: &[GeoPoint],
        target: GeoPoint,
        tolerance_deg: f64,
    ) -> Option<usize> {
        let found = locate(points, self.position, target, tolerance_deg)?;
        self.position = found;
        Some(found)
    }
}
