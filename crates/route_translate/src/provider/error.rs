use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::polyline::PolylineError;

/// Errors encountered while translating a vendor response.
///
/// An empty route is not an error; parsers return `Ok(None)` for it.
/// Field paths are relative to the candidate route, e.g.
/// `legs[0].steps[1].maneuver.bearing_after`.
#[derive(Debug, Error)]
pub enum RouteParseError {
    /// The response body is not JSON at all.
    #[error("malformed route response: {0}")]
    Json(serde_json::Error),
    #[error("malformed route response: missing field `{path}`")]
    MissingField { path: String },
    #[error("malformed route response: `{path}`: {message}")]
    WrongType { path: String, message: String },
    #[error("malformed route geometry: {0}")]
    Polyline(#[from] PolylineError),
    /// The vendor answered with a failure instead of routes.
    #[error("routing service reported failure: {0}")]
    VendorFailure(String),
}

impl RouteParseError {
    /// True for defects in the response itself, as opposed to a vendor that
    /// cleanly reported it could not route.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, RouteParseError::VendorFailure(_))
    }

    /// JSON path of the offending field, when the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            RouteParseError::MissingField { path } | RouteParseError::WrongType { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Attach `path` to a serde failure raised while reading the value there.
    fn at(path: &str, err: serde_json::Error) -> Self {
        let message = err.to_string();
        // serde reports absent struct fields as "missing field `name`".
        let missing = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.strip_suffix('`'));
        match missing {
            Some(field) => RouteParseError::MissingField {
                path: join(path, field),
            },
            None => RouteParseError::WrongType {
                path: path.to_string(),
                message,
            },
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Deserialize `value`, reporting failures against `path`.
pub(crate) fn deserialize_at<'a, T: Deserialize<'a>>(
    value: &'a Value,
    path: &str,
) -> Result<T, RouteParseError> {
    T::deserialize(value).map_err(|err| RouteParseError::at(path, err))
}

/// Deserialize the required member `key` of the object found at `path`.
pub(crate) fn required_at<'a, T: Deserialize<'a>>(
    object: &'a Value,
    key: &str,
    path: &str,
) -> Result<T, RouteParseError> {
    let path = join(path, key);
    match object.get(key) {
        Some(value) => deserialize_at(value, &path),
        None => Err(RouteParseError::MissingField { path }),
    }
}
