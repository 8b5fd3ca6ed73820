#![allow(dead_code)]

use route_translate::geo::GeoPoint;
use route_translate::polyline::{encode, PRECISION_5};
use serde_json::{json, Value};

/// A short drive through Berlin-Mitte.
pub fn berlin_path() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(52.51630, 13.37770),
        GeoPoint::new(52.51645, 13.38010),
        GeoPoint::new(52.51660, 13.38250),
        GeoPoint::new(52.51790, 13.38280),
        GeoPoint::new(52.51920, 13.38310),
        GeoPoint::new(52.51910, 13.38600),
    ]
}

/// OSRM coordinates come with six decimals, one more than the polyline.
pub fn osrm_location(point: GeoPoint) -> Value {
    json!([point.lon + 0.000003, point.lat - 0.000004])
}

pub fn osrm_step(kind: &str, modifier: Option<&str>, at: GeoPoint, name: &str) -> Value {
    let mut maneuver = json!({
        "type": kind,
        "location": osrm_location(at),
        "bearing_before": 80,
        "bearing_after": 350,
    });
    if let Some(modifier) = modifier {
        maneuver["modifier"] = json!(modifier);
    }
    json!({
        "distance": 210.7,
        "duration": 30.2,
        "name": name,
        "mode": "driving",
        "maneuver": maneuver,
    })
}

/// A full `/route/v1/driving` response around `berlin_path`.
pub fn osrm_response() -> Value {
    let points = berlin_path();
    let mut roundabout = osrm_step("roundabout", Some("right"), points[4], "Platz");
    roundabout["maneuver"]["exit"] = json!(2);

    json!({
        "code": "Ok",
        "routes": [{
            "geometry": encode(&points, PRECISION_5).expect("encode"),
            "distance": 630.0,
            "duration": 90.0,
            "legs": [
                {
                    "steps": [
                        osrm_step("depart", None, points[0], "Ebertstraße"),
                        osrm_step("turn", Some("left"), points[2], "Wilhelmstraße"),
                    ],
                },
                {
                    "steps": [
                        osrm_step("depart", None, points[2], "Wilhelmstraße"),
                        roundabout,
                        osrm_step("arrive", None, points[5], "Reichstagufer"),
                    ],
                },
            ],
        }, {
            "geometry": "",
            "legs": [],
        }],
        "waypoints": [],
    })
}

pub fn graphhopper_response() -> Value {
    let points = berlin_path();
    json!({
        "paths": [{
            "distance": 630.0,
            "time": 90000,
            "points": encode(&points, PRECISION_5).expect("encode"),
            "instructions": [
                {
                    "distance": 320.0, "time": 40000, "sign": 0,
                    "text": "Continue onto Ebertstraße", "street_name": "Ebertstraße",
                    "interval": [0, 2],
                },
                {
                    "distance": 310.0, "time": 50000, "sign": -2,
                    "text": "Turn left onto Wilhelmstraße", "street_name": "Wilhelmstraße",
                    "interval": [2, 5],
                },
                {
                    "distance": 0.0, "time": 0, "sign": 4,
                    "text": "Arrive at destination", "street_name": "",
                    "interval": [5, 5],
                },
            ],
        }],
    })
}
