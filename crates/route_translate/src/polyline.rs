//! Encoded polyline codec (the "Google" algorithm, variable precision).
//!
//! Each coordinate is stored as a zig-zag signed delta from the previous
//! point, scaled by `10^precision` and emitted as 5-bit chunks offset by 63.
//! Latitude comes first, then longitude.

use thiserror::Error;

use crate::geo::GeoPoint;

/// Precision used by OSRM `polyline` and GraphHopper `points`.
pub const PRECISION_5: u32 = 5;
/// Precision used by OSRM `polyline6` and Valhalla.
pub const PRECISION_6: u32 = 6;
/// Largest precision accepted; beyond this f64 loses the low digits anyway.
pub const MAX_PRECISION: u32 = 10;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION_BIT: u64 = 0x20;
const ASCII_OFFSET: u8 = 63;
const MAX_ENCODED_BYTE: u8 = 126;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("polyline truncated at byte {offset}")]
    Truncated { offset: usize },
    #[error("invalid polyline byte 0x{byte:02x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },
    #[error("polyline value overflows at byte {offset}")]
    Overflow { offset: usize },
    #[error("unsupported polyline precision {0} (max {})", MAX_PRECISION)]
    UnsupportedPrecision(u32),
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

fn scale_factor(precision: u32) -> Result<f64, PolylineError> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::UnsupportedPrecision(precision));
    }
    Ok(10f64.powi(precision as i32))
}

/// Decode `encoded` into points. An empty string yields an empty vector.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<GeoPoint>, PolylineError> {
    let factor = scale_factor(precision)?;
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);

    let mut offset = 0;
    let (mut lat, mut lon) = (0i64, 0i64);
    while offset < bytes.len() {
        let lat_delta = read_value(bytes, &mut offset)?;
        if offset >= bytes.len() {
            // A latitude without its longitude.
            return Err(PolylineError::Truncated { offset });
        }
        let lon_delta = read_value(bytes, &mut offset)?;

        lat = lat
            .checked_add(lat_delta)
            .ok_or(PolylineError::Overflow { offset })?;
        lon = lon
            .checked_add(lon_delta)
            .ok_or(PolylineError::Overflow { offset })?;
        points.push(GeoPoint::new(lat as f64 / factor, lon as f64 / factor));
    }

    Ok(points)
}

/// Encode `points` at the given precision. Inverse of [`decode`] up to rounding.
pub fn encode(points: &[GeoPoint], precision: u32) -> Result<String, PolylineError> {
    let factor = scale_factor(precision)?;
    let mut out = String::with_capacity(points.len() * 8);

    let (mut prev_lat, mut prev_lon) = (0i64, 0i64);
    for (index, point) in points.iter().enumerate() {
        if !point.lat.is_finite() || !point.lon.is_finite() {
            return Err(PolylineError::NonFiniteCoordinate { index });
        }
        // Out-of-range values saturate; deltas wrap, which zig-zag carries.
        let lat = (point.lat * factor).round() as i64;
        let lon = (point.lon * factor).round() as i64;
        write_value(lat.wrapping_sub(prev_lat), &mut out);
        write_value(lon.wrapping_sub(prev_lon), &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    Ok(out)
}

fn read_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;
    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated { offset: *offset });
        };
        if !(ASCII_OFFSET..=MAX_ENCODED_BYTE).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                offset: *offset,
                byte,
            });
        }
        let chunk = u64::from(byte - ASCII_OFFSET);
        let bits = chunk & CHUNK_MASK;
        // The chunk must fit in what is left of the 64-bit accumulator.
        if shift >= u64::BITS || bits > u64::MAX >> shift {
            return Err(PolylineError::Overflow { offset: *offset });
        }
        result |= bits << shift;
        *offset += 1;
        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
        shift += CHUNK_BITS;
    }

    // zig-zag
    Ok(((result >> 1) as i64) ^ -((result & 1) as i64))
}

fn write_value(value: i64, out: &mut String) {
    let mut bits = ((value << 1) ^ (value >> 63)) as u64;
    while bits >= CONTINUATION_BIT {
        out.push(char::from(
            ((CONTINUATION_BIT | (bits & CHUNK_MASK)) as u8) + ASCII_OFFSET,
        ));
        bits >>= CHUNK_BITS;
    }
    out.push(char::from(bits as u8 + ASCII_OFFSET));
}
