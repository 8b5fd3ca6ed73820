use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::turn::TurnClassification;

/// Vendor-neutral route produced by a single parse call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRoute {
    /// Decoded path, in route order.
    pub points: Vec<GeoPoint>,
    /// Turn-by-turn maneuvers; `route_point_offset` is non-decreasing.
    pub maneuvers: Vec<Maneuver>,
}

impl NormalizedRoute {
    pub fn total_distance_m(&self) -> u64 {
        self.maneuvers.iter().map(|m| u64::from(m.distance_m)).sum()
    }

    pub fn total_duration_s(&self) -> u64 {
        self.maneuvers.iter().map(|m| u64::from(m.duration_s)).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    pub distance_m: u32,
    pub duration_s: u32,
    /// Metres per second over the maneuver's segment.
    pub average_speed: f32,
    pub street_name: String,
    pub instruction: String,
    pub turn: TurnClassification,
    /// Index into [`NormalizedRoute::points`] where the maneuver happens.
    pub route_point_offset: usize,
}

/// `distance / duration`, or 0 for a zero-length duration.
pub fn average_speed(distance_m: u32, duration_s: u32) -> f32 {
    if duration_s == 0 {
        return 0.0;
    }
    distance_m as f32 / duration_s as f32
}

/// Round a non-negative vendor quantity to the nearest whole unit.
/// Negative and non-finite inputs clamp to 0.
pub(crate) fn round_non_negative(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}
