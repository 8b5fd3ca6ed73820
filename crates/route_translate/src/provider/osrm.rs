//! OSRM `/route` dialect.
//!
//! Reads `geometry` (polyline, precision 5 unless configured otherwise) and
//! walks `legs[].steps[]`, re-associating each step's maneuver location with
//! an index in the decoded path.

use log::{debug, trace};
use serde_json::Value;

use crate::geo::{GeoPoint, DEFAULT_COORDINATE_TOLERANCE_DEG};
use crate::instruction::{describe, TurnRenderer};
use crate::locator::SearchCursor;
use crate::polyline::PRECISION_5;
use crate::route::{average_speed, round_non_negative, Maneuver, NormalizedRoute};
use crate::turn::{classify, DrivingSide};

use super::error::{deserialize_at, required_at};
use super::{RouteParseError, VendorResponseParser};

mod response;

use response::{OsrmGeometry, OsrmLeg, OsrmStep};

/// Maneuver type OSRM emits for the final step of a leg.
const ARRIVE: &str = "arrive";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OsrmParser {
    precision: u32,
    tolerance_deg: f64,
}

impl Default for OsrmParser {
    fn default() -> Self {
        Self {
            precision: PRECISION_5,
            tolerance_deg: DEFAULT_COORDINATE_TOLERANCE_DEG,
        }
    }
}

impl OsrmParser {
    /// Use `polyline6` geometry (`geometries=polyline6` on the request).
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_coordinate_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg;
        self
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    fn maneuver(
        &self,
        step: OsrmStep,
        route_point_offset: usize,
        renderer: &dyn TurnRenderer,
        side: DrivingSide,
    ) -> Maneuver {
        let distance_m = round_non_negative(step.distance);
        let duration_s = round_non_negative(step.duration);

        let maneuver = &step.maneuver;
        let turn = classify(
            &maneuver.kind,
            maneuver.modifier.as_deref(),
            maneuver.exit,
            maneuver.bearing_before as i32,
            maneuver.bearing_after as i32,
            side,
        );
        let instruction = describe(renderer, &turn.kind, &step.name, maneuver.kind == ARRIVE);

        Maneuver {
            distance_m,
            duration_s,
            average_speed: average_speed(distance_m, duration_s),
            street_name: step.name,
            instruction,
            turn,
            route_point_offset,
        }
    }
}

impl VendorResponseParser for OsrmParser {
    fn root_array_key(&self) -> &'static str {
        "routes"
    }

    fn error_message_key(&self) -> &'static str {
        "message"
    }

    fn parse(
        &self,
        route: &Value,
        renderer: &dyn TurnRenderer,
        side: DrivingSide,
    ) -> Result<Option<NormalizedRoute>, RouteParseError> {
        let Some(geometry) = route.get("geometry").filter(|g| !g.is_null()) else {
            return Ok(None);
        };
        let points =
            deserialize_at::<OsrmGeometry>(geometry, "geometry")?.into_points(self.precision)?;
        if points.is_empty() {
            return Ok(None);
        }

        // Every step is read before any maneuver is built, so a malformed
        // step fails the whole route rather than truncating it.
        let legs: Vec<Value> = required_at(route, "legs", "")?;
        let mut steps = Vec::new();
        for (i, leg) in legs.iter().enumerate() {
            let leg_path = format!("legs[{i}]");
            let OsrmLeg { steps: leg_steps } = deserialize_at(leg, &leg_path)?;
            for (j, step) in leg_steps.iter().flatten().enumerate() {
                steps.push(OsrmStep::read(step, &format!("{leg_path}.steps[{j}]"))?);
            }
        }

        let mut cursor = SearchCursor::new();
        let mut maneuvers = Vec::new();
        for step in steps {
            let [lon, lat] = step.maneuver.location;
            let target = GeoPoint::new(lat, lon);
            let Some(offset) = cursor.advance(&points, target, self.tolerance_deg) else {
                debug!(
                    "dropping `{}` maneuver at ({lat}, {lon}): not found after point {}",
                    step.maneuver.kind,
                    cursor.position()
                );
                continue;
            };
            trace!("`{}` maneuver at point {offset}", step.maneuver.kind);
            maneuvers.push(self.maneuver(step, offset, renderer, side));
        }

        Ok(Some(NormalizedRoute { points, maneuvers }))
    }
}
