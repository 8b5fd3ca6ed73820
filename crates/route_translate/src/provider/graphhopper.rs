//! GraphHopper `/route` dialect.
//!
//! GraphHopper already reports each instruction's position as an index
//! interval into `points`, so no coordinate matching is needed. Turns come as
//! integer `sign` codes.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::geo::GeoPoint;
use crate::instruction::TurnRenderer;
use crate::polyline::{self, PRECISION_5};
use crate::route::{average_speed, round_non_negative, Maneuver, NormalizedRoute};
use crate::turn::{DrivingSide, Sharpness, TurnClassification, TurnDirection, TurnKind};

use super::error::{deserialize_at, required_at};
use super::{RouteParseError, VendorResponseParser};

const MS_PER_SECOND: f64 = 1000.0;

#[derive(Deserialize)]
struct GraphHopperInstruction {
    distance: f64,
    /// Milliseconds.
    time: f64,
    text: String,
    street_name: String,
    /// `[first, last]` point indices covered by the instruction.
    interval: [usize; 2],
    sign: i32,
    exit_number: Option<u32>,
    /// Radians.
    turn_angle: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphHopperParser {
    precision: u32,
}

impl Default for GraphHopperParser {
    fn default() -> Self {
        Self {
            precision: PRECISION_5,
        }
    }
}

impl GraphHopperParser {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}

/// Map a GraphHopper instruction sign onto a turn kind.
///
/// Signs without a turn meaning (finish, via reached, ...) yield `None`.
pub fn kind_from_sign(sign: i32) -> Option<TurnKind> {
    use Sharpness::*;
    use TurnDirection::*;

    let kind = match sign {
        -98 | -8 => TurnKind::u_turn(),
        -7 => TurnKind::turn(Left, Keep),
        -3 => TurnKind::turn(Left, Sharp),
        -2 => TurnKind::turn(Left, Normal),
        -1 => TurnKind::turn(Left, Slight),
        0 => TurnKind::Straight,
        1 => TurnKind::turn(Right, Slight),
        2 => TurnKind::turn(Right, Normal),
        3 => TurnKind::turn(Right, Sharp),
        6 => TurnKind::roundabout_exit(0),
        7 => TurnKind::turn(Right, Keep),
        8 => TurnKind::UTurn { direction: Right },
        _ => return None,
    };
    Some(kind)
}

fn classify_instruction(
    instruction: &GraphHopperInstruction,
    side: DrivingSide,
) -> TurnClassification {
    let Some(kind) = kind_from_sign(instruction.sign) else {
        return TurnClassification::straight();
    };

    if kind.is_roundabout() {
        // A roundabout without an exit count gives the driver nothing to act on.
        let Some(exit) = instruction.exit_number else {
            return TurnClassification::straight();
        };
        let angle = instruction.turn_angle.map_or(0.0, f64::to_degrees);
        return TurnClassification::with_angle(
            TurnKind::roundabout_exit(exit).for_driving_side(side),
            angle,
        );
    }

    TurnClassification::with_angle(kind.for_driving_side(side), 0.0)
}

impl VendorResponseParser for GraphHopperParser {
    fn root_array_key(&self) -> &'static str {
        "paths"
    }

    fn error_message_key(&self) -> &'static str {
        "message"
    }

    /// GraphHopper ships its own localised `text`, so the renderer is unused.
    fn parse(
        &self,
        route: &Value,
        _renderer: &dyn TurnRenderer,
        side: DrivingSide,
    ) -> Result<Option<NormalizedRoute>, RouteParseError> {
        let Some(encoded) = route.get("points").and_then(Value::as_str) else {
            return Ok(None);
        };
        let points: Vec<GeoPoint> = polyline::decode(encoded, self.precision)?;
        if points.is_empty() {
            return Ok(None);
        }

        let raw: Vec<Value> = required_at(route, "instructions", "")?;
        let instructions = raw
            .iter()
            .enumerate()
            .map(|(i, instruction)| deserialize_at(instruction, &format!("instructions[{i}]")))
            .collect::<Result<Vec<GraphHopperInstruction>, _>>()?;

        let mut maneuvers: Vec<Maneuver> = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            let offset = instruction.interval[0];
            let previous = maneuvers.last().map_or(0, |m| m.route_point_offset);
            if offset >= points.len() || offset < previous {
                debug!(
                    "dropping instruction `{}`: interval start {offset} out of order or past {} points",
                    instruction.text,
                    points.len()
                );
                continue;
            }

            let distance_m = round_non_negative(instruction.distance);
            let duration_s = round_non_negative(instruction.time / MS_PER_SECOND);
            let turn = classify_instruction(&instruction, side);
            maneuvers.push(Maneuver {
                distance_m,
                duration_s,
                average_speed: average_speed(distance_m, duration_s),
                instruction: instruction.text.trim().to_string(),
                street_name: instruction.street_name,
                turn,
                route_point_offset: offset,
            });
        }

        Ok(Some(NormalizedRoute { points, maneuvers }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::EnglishTurnRenderer;
    use crate::polyline::encode;
    use crate::turn::Rotation;
    use serde_json::json;

    fn path() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(48.13700, 11.57500),
            GeoPoint::new(48.13800, 11.57500),
            GeoPoint::new(48.13800, 11.57700),
        ]
    }

    fn instruction(sign: i32, interval: [usize; 2], text: &str) -> Value {
        json!({
            "distance": 55.6,
            "time": 7400,
            "text": text,
            "street_name": "Marienplatz",
            "interval": interval,
            "sign": sign,
        })
    }

    fn parse(
        route: &Value,
        side: DrivingSide,
    ) -> Result<Option<NormalizedRoute>, RouteParseError> {
        GraphHopperParser::default().parse(route, &EnglishTurnRenderer, side)
    }

    #[test]
    fn sign_vocabulary() {
        assert_eq!(kind_from_sign(-98), Some(TurnKind::u_turn()));
        assert_eq!(
            kind_from_sign(-7),
            Some(TurnKind::turn(TurnDirection::Left, Sharpness::Keep))
        );
        assert_eq!(
            kind_from_sign(3),
            Some(TurnKind::turn(TurnDirection::Right, Sharpness::Sharp))
        );
        assert_eq!(kind_from_sign(4), None);
        assert_eq!(kind_from_sign(5), None);
    }

    #[test]
    fn parses_instructions_with_intervals() {
        let route = json!({
            "points": encode(&path(), PRECISION_5).expect("encode"),
            "instructions": [
                instruction(0, [0, 1], "Continue onto Marienplatz"),
                instruction(2, [1, 2], "Turn right onto Marienplatz"),
                instruction(4, [2, 2], "Arrive at destination"),
            ],
        });
        let parsed = parse(&route, DrivingSide::Right)
            .expect("parse")
            .expect("route");

        assert_eq!(parsed.points.len(), 3);
        let offsets: Vec<_> = parsed
            .maneuvers
            .iter()
            .map(|m| m.route_point_offset)
            .collect();
        assert_eq!(offsets, vec![0, 1, 2]);

        let turn = &parsed.maneuvers[1];
        assert_eq!(turn.distance_m, 56);
        assert_eq!(turn.duration_s, 7);
        assert_eq!(turn.average_speed, 8.0);
        assert_eq!(
            turn.turn.kind,
            TurnKind::turn(TurnDirection::Right, Sharpness::Normal)
        );
        assert_eq!(turn.instruction, "Turn right onto Marienplatz");
        assert_eq!(parsed.maneuvers[2].turn.kind, TurnKind::Straight);
    }

    #[test]
    fn roundabout_carries_exit_and_angle() {
        let mut roundabout = instruction(6, [1, 2], "At roundabout, take exit 3");
        roundabout["exit_number"] = json!(3);
        roundabout["turn_angle"] = json!(std::f64::consts::FRAC_PI_2);
        let route = json!({
            "points": encode(&path(), PRECISION_5).expect("encode"),
            "instructions": [roundabout],
        });

        let parsed = parse(&route, DrivingSide::Left)
            .expect("parse")
            .expect("route");
        let turn = parsed.maneuvers[0].turn;
        assert_eq!(
            turn.kind,
            TurnKind::RoundaboutExit {
                exit: 3,
                rotation: Rotation::Clockwise
            }
        );
        assert!((turn.angle - 90.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_interval_is_dropped() {
        let route = json!({
            "points": encode(&path(), PRECISION_5).expect("encode"),
            "instructions": [
                instruction(0, [1, 2], "Continue"),
                instruction(2, [0, 1], "Turn right"),
                instruction(2, [9, 9], "Turn right"),
            ],
        });
        let parsed = parse(&route, DrivingSide::Right)
            .expect("parse")
            .expect("route");
        assert_eq!(parsed.maneuvers.len(), 1);
    }

    #[test]
    fn missing_points_is_no_result() {
        let route = json!({"instructions": []});
        assert!(matches!(parse(&route, DrivingSide::Right), Ok(None)));
    }

    #[test]
    fn missing_sign_fails() {
        let mut broken = instruction(0, [0, 1], "Continue");
        broken.as_object_mut().expect("object").remove("sign");
        let route = json!({
            "points": encode(&path(), PRECISION_5).expect("encode"),
            "instructions": [broken],
        });
        let err = parse(&route, DrivingSide::Right).expect_err("should fail");
        assert!(matches!(err, RouteParseError::MissingField { .. }));
        assert_eq!(err.path(), Some("instructions[0].sign"));
    }
}
