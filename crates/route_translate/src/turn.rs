//! Canonical turn taxonomy shared by every vendor dialect.
//!
//! Vendors describe maneuvers with their own vocabulary (OSRM modifiers,
//! GraphHopper signs, ...). Dialects translate into [`TurnKind`] and attach a
//! turn angle, then [`TurnKind::for_driving_side`] applies the left-hand
//! traffic mirroring so every vendor ends up with the same conventions.

use serde::{Deserialize, Serialize};

use crate::geo::degrees_diff;

/// OSRM maneuver types that describe entering a roundabout.
pub const ROUNDABOUT_TYPES: [&str; 3] = ["roundabout", "rotary", "roundabout turn"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingSide {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    Right,
}

/// How far the maneuver deviates from the current heading, mildest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sharpness {
    Keep,
    Slight,
    Normal,
    Sharp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Right-hand traffic roundabouts.
    CounterClockwise,
    /// Left-hand traffic roundabouts.
    Clockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TurnKind {
    Straight,
    Turn {
        direction: TurnDirection,
        sharpness: Sharpness,
    },
    UTurn {
        direction: TurnDirection,
    },
    RoundaboutExit {
        exit: u32,
        rotation: Rotation,
    },
}

impl TurnKind {
    pub const fn turn(direction: TurnDirection, sharpness: Sharpness) -> Self {
        TurnKind::Turn {
            direction,
            sharpness,
        }
    }

    /// A U-turn in right-hand traffic swings across the left lane.
    pub const fn u_turn() -> Self {
        TurnKind::UTurn {
            direction: TurnDirection::Left,
        }
    }

    pub const fn roundabout_exit(exit: u32) -> Self {
        TurnKind::RoundaboutExit {
            exit,
            rotation: Rotation::CounterClockwise,
        }
    }

    /// Mirror the kinds whose geometry depends on the traffic side.
    ///
    /// Only the default-direction U-turn and roundabout rotation flip; an
    /// explicitly right-handed U-turn and plain turns are left alone.
    pub fn for_driving_side(self, side: DrivingSide) -> Self {
        match (self, side) {
            (
                TurnKind::UTurn {
                    direction: TurnDirection::Left,
                },
                DrivingSide::Left,
            ) => TurnKind::UTurn {
                direction: TurnDirection::Right,
            },
            (
                TurnKind::RoundaboutExit {
                    exit,
                    rotation: Rotation::CounterClockwise,
                },
                DrivingSide::Left,
            ) => TurnKind::RoundaboutExit {
                exit,
                rotation: Rotation::Clockwise,
            },
            (kind, _) => kind,
        }
    }

    pub fn is_roundabout(&self) -> bool {
        matches!(self, TurnKind::RoundaboutExit { .. })
    }
}

/// A canonical turn plus the signed turn angle in degrees, within (-180, 180].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnClassification {
    pub kind: TurnKind,
    pub angle: f32,
}

impl TurnClassification {
    pub fn straight() -> Self {
        Self {
            kind: TurnKind::Straight,
            angle: 0.0,
        }
    }

    /// Attach an angle, wrapping it into (-180, 180].
    pub fn with_angle(kind: TurnKind, angle_deg: f64) -> Self {
        Self {
            kind,
            angle: degrees_diff(angle_deg, 0.0) as f32,
        }
    }
}

/// Map an OSRM-style modifier onto a turn kind. Matching is exact and
/// case-sensitive; anything outside the vocabulary yields `None`.
pub fn kind_from_modifier(modifier: &str) -> Option<TurnKind> {
    use Sharpness::*;
    use TurnDirection::*;

    let kind = match modifier {
        "uturn" => TurnKind::u_turn(),
        "sharp right" => TurnKind::turn(Right, Sharp),
        "right" => TurnKind::turn(Right, Normal),
        "slight right" => TurnKind::turn(Right, Slight),
        "straight" => TurnKind::Straight,
        "slight left" => TurnKind::turn(Left, Slight),
        "left" => TurnKind::turn(Left, Normal),
        "sharp left" => TurnKind::turn(Left, Sharp),
        _ => return None,
    };
    Some(kind)
}

/// Classify a vendor maneuver.
///
/// Roundabout types prefer the explicit exit count, then the modifier; other
/// types use the modifier only. Anything unclassified is straight. The angle
/// is always derived from the bearings, independent of the kind.
pub fn classify(
    vendor_type: &str,
    vendor_modifier: Option<&str>,
    roundabout_exit: Option<u32>,
    bearing_before: i32,
    bearing_after: i32,
    side: DrivingSide,
) -> TurnClassification {
    let from_modifier = || vendor_modifier.and_then(kind_from_modifier);

    let identified = if ROUNDABOUT_TYPES.contains(&vendor_type) {
        roundabout_exit
            .map(TurnKind::roundabout_exit)
            .or_else(from_modifier)
    } else {
        from_modifier()
    };
    let kind = identified
        .unwrap_or(TurnKind::Straight)
        .for_driving_side(side);

    TurnClassification {
        kind,
        angle: degrees_diff(f64::from(bearing_after), f64::from(bearing_before)) as f32,
    }
}
