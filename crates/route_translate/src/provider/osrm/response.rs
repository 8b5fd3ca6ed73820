use serde::Deserialize;
use serde_json::Value;

use crate::geo::GeoPoint;
use crate::polyline::{self, PolylineError};
use crate::provider::error::{deserialize_at, required_at};
use crate::provider::RouteParseError;

/// Route geometry as OSRM returns it: an encoded polyline by default, or a
/// GeoJSON line string when queried with `geometries=geojson`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum OsrmGeometry {
    Encoded(String),
    GeoJson { coordinates: Vec<[f64; 2]> },
}

impl OsrmGeometry {
    pub(super) fn into_points(self, precision: u32) -> Result<Vec<GeoPoint>, PolylineError> {
        match self {
            OsrmGeometry::Encoded(encoded) => polyline::decode(&encoded, precision),
            // GeoJSON positions are [lng, lat].
            OsrmGeometry::GeoJson { coordinates } => Ok(coordinates
                .into_iter()
                .map(|[lon, lat]| GeoPoint::new(lat, lon))
                .collect()),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct OsrmLeg {
    /// Absent unless the request asked for `steps=true`. Steps stay raw so each
    /// can be read against its own path.
    #[serde(default)]
    pub(super) steps: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct OsrmStepFields {
    distance: f64,
    duration: f64,
    name: String,
}

pub(super) struct OsrmStep {
    pub(super) distance: f64,
    pub(super) duration: f64,
    pub(super) name: String,
    pub(super) maneuver: OsrmManeuver,
}

impl OsrmStep {
    /// Read the step at `path`, e.g. `legs[0].steps[3]`.
    pub(super) fn read(step: &Value, path: &str) -> Result<Self, RouteParseError> {
        let OsrmStepFields {
            distance,
            duration,
            name,
        } = deserialize_at(step, path)?;
        let maneuver = required_at(step, "maneuver", path)?;
        Ok(Self {
            distance,
            duration,
            name,
            maneuver,
        })
    }
}

#[derive(Deserialize)]
pub(super) struct OsrmManeuver {
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) modifier: Option<String>,
    /// `[lng, lat]`
    pub(super) location: [f64; 2],
    pub(super) bearing_before: f64,
    pub(super) bearing_after: f64,
    pub(super) exit: Option<u32>,
}
