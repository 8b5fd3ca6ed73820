//! Pluggable vendor response parsers.
//!
//! Two dialects, selectable via [`ProviderKind`]:
//!
//! - **`OsrmParser`**: OSRM `/route` responses (`routes[].legs[].steps[]`).
//! - **`GraphHopperParser`**: GraphHopper `/route` responses (`paths[].instructions[]`).
//!
//! Both implement [`VendorResponseParser`]; the document-level helpers here
//! handle failure detection and candidate selection identically for every
//! dialect.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::DEFAULT_COORDINATE_TOLERANCE_DEG;
use crate::instruction::TurnRenderer;
use crate::route::NormalizedRoute;
use crate::turn::DrivingSide;

mod error;
pub mod graphhopper;
pub mod osrm;

pub use error::RouteParseError;
pub use graphhopper::GraphHopperParser;
pub use osrm::OsrmParser;

/// Which vendor dialect a response is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Osrm,
    GraphHopper,
}

/// Contract every vendor dialect implements. Implementations hold only
/// immutable settings, so one parser can serve many threads.
pub trait VendorResponseParser: Send + Sync {
    /// Key of the array holding candidate routes.
    fn root_array_key(&self) -> &'static str;

    /// Key of the human-readable failure message.
    fn error_message_key(&self) -> &'static str;

    /// Translate one candidate route. `Ok(None)` means the route carries no
    /// usable geometry.
    fn parse(
        &self,
        route: &Value,
        renderer: &dyn TurnRenderer,
        side: DrivingSide,
    ) -> Result<Option<NormalizedRoute>, RouteParseError>;
}

/// Settings shared by every dialect. Fields a vendor has no use for are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParserOptions {
    /// Overrides the vendor's default polyline precision.
    pub polyline_precision: Option<u32>,
    /// Locator tolerance; GraphHopper reports indices directly.
    pub coordinate_tolerance_deg: f64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            polyline_precision: None,
            coordinate_tolerance_deg: DEFAULT_COORDINATE_TOLERANCE_DEG,
        }
    }
}

/// Construct a boxed parser with vendor defaults.
pub fn build_parser(kind: ProviderKind) -> Box<dyn VendorResponseParser> {
    build_parser_with(kind, &ParserOptions::default())
}

/// Construct a boxed parser, applying `options` over the vendor defaults.
pub fn build_parser_with(
    kind: ProviderKind,
    options: &ParserOptions,
) -> Box<dyn VendorResponseParser> {
    match kind {
        ProviderKind::Osrm => {
            let mut parser =
                OsrmParser::default().with_coordinate_tolerance(options.coordinate_tolerance_deg);
            if let Some(precision) = options.polyline_precision {
                parser = parser.with_precision(precision);
            }
            Box::new(parser)
        }
        ProviderKind::GraphHopper => {
            let mut parser = GraphHopperParser::default();
            if let Some(precision) = options.polyline_precision {
                parser = parser.with_precision(precision);
            }
            Box::new(parser)
        }
    }
}

/// The vendor's failure message when the document carries no route array.
pub fn vendor_failure_message(
    document: &Value,
    parser: &dyn VendorResponseParser,
) -> Option<String> {
    if document.get(parser.root_array_key()).is_some() {
        return None;
    }
    let message = document
        .get(parser.error_message_key())
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("response has no `{}`", parser.root_array_key()));
    Some(message)
}

/// First candidate route. Vendors may return alternatives; only the first is used.
pub fn first_route<'a>(
    document: &'a Value,
    parser: &dyn VendorResponseParser,
) -> Option<&'a Value> {
    document.get(parser.root_array_key())?.as_array()?.first()
}

/// Full document flow: failure detection, candidate selection, dialect parse.
pub fn translate_document(
    document: &Value,
    parser: &dyn VendorResponseParser,
    renderer: &dyn TurnRenderer,
    side: DrivingSide,
) -> Result<Option<NormalizedRoute>, RouteParseError> {
    if let Some(message) = vendor_failure_message(document, parser) {
        debug!("routing service returned no routes: {message}");
        return Err(RouteParseError::VendorFailure(message));
    }

    let Some(route) = first_route(document, parser) else {
        debug!("`{}` is empty, no route found", parser.root_array_key());
        return Ok(None);
    };

    match parser.parse(route, renderer, side) {
        Ok(None) => {
            debug!("route has no usable geometry");
            Ok(None)
        }
        Err(err) => {
            warn!("failed to parse route response: {err}");
            Err(err)
        }
        parsed => parsed,
    }
}

/// Like [`translate_document`], starting from the raw response body.
pub fn translate_response(
    body: &[u8],
    parser: &dyn VendorResponseParser,
    renderer: &dyn TurnRenderer,
    side: DrivingSide,
) -> Result<Option<NormalizedRoute>, RouteParseError> {
    let document: Value = serde_json::from_slice(body).map_err(|err| {
        warn!("route response is not valid JSON: {err}");
        RouteParseError::Json(err)
    })?;
    translate_document(&document, parser, renderer, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::instruction::EnglishTurnRenderer;
    use crate::polyline::encode;
    use serde_json::json;

    #[test]
    fn provider_keys() {
        let osrm = build_parser(ProviderKind::Osrm);
        assert_eq!(osrm.root_array_key(), "routes");
        assert_eq!(osrm.error_message_key(), "message");

        let graphhopper = build_parser(ProviderKind::GraphHopper);
        assert_eq!(graphhopper.root_array_key(), "paths");
        assert_eq!(graphhopper.error_message_key(), "message");
    }

    #[test]
    fn options_override_vendor_precision() {
        let options = ParserOptions {
            polyline_precision: Some(6),
            ..ParserOptions::default()
        };
        let points = [GeoPoint::new(52.520008, 13.404954), GeoPoint::new(52.5201, 13.4051)];
        let route = json!({
            "points": encode(&points, 6).expect("encode"),
            "instructions": [],
        });

        let parsed = build_parser_with(ProviderKind::GraphHopper, &options)
            .parse(&route, &EnglishTurnRenderer, DrivingSide::Right)
            .expect("parse")
            .expect("route");
        assert!(parsed.points[0].approx_eq(&points[0], 1e-6));

        let default_precision = build_parser(ProviderKind::GraphHopper)
            .parse(&route, &EnglishTurnRenderer, DrivingSide::Right)
            .expect("parse")
            .expect("route");
        assert!(!default_precision.points[0].approx_eq(&points[0], 1.0));
    }

    #[test]
    fn provider_kind_default_is_osrm() {
        assert_eq!(ProviderKind::default(), ProviderKind::Osrm);
    }

    #[test]
    fn failure_message_comes_from_error_key() {
        let parser = OsrmParser::default();
        let doc = json!({"code": "NoRoute", "message": "Impossible route between points"});
        assert_eq!(
            vendor_failure_message(&doc, &parser).as_deref(),
            Some("Impossible route between points")
        );
    }

    #[test]
    fn failure_without_message_gets_generic_text() {
        let parser = OsrmParser::default();
        let doc = json!({"code": "InvalidQuery"});
        assert_eq!(
            vendor_failure_message(&doc, &parser).as_deref(),
            Some("response has no `routes`")
        );
    }

    #[test]
    fn present_root_array_is_not_failure() {
        let parser = OsrmParser::default();
        let doc = json!({"code": "Ok", "routes": [], "message": "ignored"});
        assert_eq!(vendor_failure_message(&doc, &parser), None);
        assert_eq!(first_route(&doc, &parser), None);
    }

    #[test]
    fn first_route_picks_first_alternative() {
        let parser = OsrmParser::default();
        let doc = json!({"routes": [{"id": 1}, {"id": 2}]});
        assert_eq!(first_route(&doc, &parser), Some(&json!({"id": 1})));
    }
}
