//! Translator configuration, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::DEFAULT_COORDINATE_TOLERANCE_DEG;
use crate::instruction::{EnglishTurnRenderer, TurnRenderer};
use crate::polyline::MAX_PRECISION;
use crate::provider::{
    build_parser_with, translate_response, ParserOptions, ProviderKind, RouteParseError,
    VendorResponseParser,
};
use crate::route::NormalizedRoute;
use crate::turn::DrivingSide;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("polyline precision {0} exceeds {}", MAX_PRECISION)]
    Precision(u32),
    #[error("coordinate tolerance must be positive and finite, got {0}")]
    Tolerance(f64),
}

/// Settings for a [`RouteTranslator`]. Missing JSON fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub provider: ProviderKind,
    pub driving_side: DrivingSide,
    /// Overrides the vendor's default polyline precision.
    pub polyline_precision: Option<u32>,
    /// OSRM only; GraphHopper reports indices directly.
    pub coordinate_tolerance_deg: f64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Osrm,
            driving_side: DrivingSide::Right,
            polyline_precision: None,
            coordinate_tolerance_deg: DEFAULT_COORDINATE_TOLERANCE_DEG,
        }
    }
}

impl TranslatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(precision) = self.polyline_precision {
            if precision > MAX_PRECISION {
                return Err(ConfigError::Precision(precision));
            }
        }
        let tolerance = self.coordinate_tolerance_deg;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance(tolerance));
        }
        Ok(())
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_driving_side(mut self, side: DrivingSide) -> Self {
        self.driving_side = side;
        self
    }

    pub fn with_polyline_precision(mut self, precision: u32) -> Self {
        self.polyline_precision = Some(precision);
        self
    }

    pub fn with_coordinate_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.coordinate_tolerance_deg = tolerance_deg;
        self
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            polyline_precision: self.polyline_precision,
            coordinate_tolerance_deg: self.coordinate_tolerance_deg,
        }
    }
}

/// A configured parser plus the renderer and traffic side it runs with.
pub struct RouteTranslator {
    parser: Box<dyn VendorResponseParser>,
    renderer: Box<dyn TurnRenderer>,
    driving_side: DrivingSide,
}

impl RouteTranslator {
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            parser: build_parser_with(config.provider, &config.parser_options()),
            renderer: Box::new(EnglishTurnRenderer),
            driving_side: config.driving_side,
        })
    }

    /// Swap the instruction wording, e.g. for another locale.
    pub fn with_renderer(mut self, renderer: Box<dyn TurnRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn parser(&self) -> &dyn VendorResponseParser {
        self.parser.as_ref()
    }

    pub fn translate(&self, body: &[u8]) -> Result<Option<NormalizedRoute>, RouteParseError> {
        translate_response(
            body,
            self.parser.as_ref(),
            self.renderer.as_ref(),
            self.driving_side,
        )
    }
}
