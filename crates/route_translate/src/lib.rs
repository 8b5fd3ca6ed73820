//! Translates third-party routing-engine responses into a vendor-neutral
//! route: a decoded polyline plus turn-by-turn maneuvers with canonical turn
//! classifications.

pub mod config;
pub mod geo;
pub mod instruction;
pub mod locator;
pub mod polyline;
pub mod provider;
pub mod route;
pub mod turn;

pub use config::{ConfigError, RouteTranslator, TranslatorConfig};
pub use geo::GeoPoint;
pub use provider::{ParserOptions, ProviderKind, RouteParseError, VendorResponseParser};
pub use route::{Maneuver, NormalizedRoute};
pub use turn::{DrivingSide, TurnClassification, TurnKind};
