//! Axis-order disambiguation for raw coordinate pairs.
//!
//! Source documents mix `[lat, lng]` and `[lng, lat]` pairs. The order is
//! resolved with a plausibility check against the target country's
//! envelope: a pair whose first value looks like a longitude of the
//! country and whose second looks like one of its latitudes is swapped.
//! The thresholds live in [`KENYA_ENVELOPE`] and only [`to_lat_lng`] reads
//! them, so a CRS-aware transform can replace the heuristic in one place.

use carbon_map_geometry_models::{LatLng, MAX_LATITUDE, MAX_LONGITUDE};

use crate::GeometryError;

/// Longitude/latitude ranges that identify a reversed `(lng, lat)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversedEnvelope {
    /// Inclusive longitude range a reversed pair's first value falls in.
    pub lng: (f64, f64),
    /// Inclusive latitude range a reversed pair's second value falls in.
    pub lat: (f64, f64),
}

impl ReversedEnvelope {
    /// Whether `(a, b)` reads as `(lng, lat)` inside the envelope.
    #[must_use]
    pub fn is_reversed(&self, a: f64, b: f64) -> bool {
        (self.lng.0..=self.lng.1).contains(&a) && (self.lat.0..=self.lat.1).contains(&b)
    }
}

/// Envelope of the region covered by the source data.
pub const KENYA_ENVELOPE: ReversedEnvelope = ReversedEnvelope {
    lng: (25.0, 50.0),
    lat: (-5.0, 12.0),
};

/// Resolves a raw pair `(a, b)` into canonical latitude/longitude order.
///
/// * `a` within latitude range and `b` within longitude range: `a` is a
///   latitude candidate. If the pair also sits in the reversed envelope it
///   is swapped, otherwise it is kept.
/// * `a` outside latitude range: the pair is already `(lng, lat)` and is
///   swapped.
#[must_use]
pub fn to_lat_lng(a: f64, b: f64) -> LatLng {
    if a.abs() <= MAX_LATITUDE && b.abs() <= MAX_LONGITUDE {
        if KENYA_ENVELOPE.is_reversed(a, b) {
            return LatLng::new(b, a);
        }
        return LatLng::new(a, b);
    }
    LatLng::new(b, a)
}

/// Reads a raw JSON coordinate (`[a, b, ...]`) and normalizes it.
///
/// Components may be JSON numbers or numeric strings. Extra components
/// (altitude, measure) are ignored.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidCoordinate`] if the value is not an
/// array, has fewer than two numeric components, or normalizes to a point
/// outside the valid latitude/longitude ranges.
pub fn normalize_raw(value: &serde_json::Value) -> Result<LatLng, GeometryError> {
    let items = value
        .as_array()
        .ok_or_else(|| GeometryError::InvalidCoordinate {
            message: format!("expected an array, got {value}"),
        })?;

    let (Some(a), Some(b)) = (
        items.first().and_then(component),
        items.get(1).and_then(component),
    ) else {
        return Err(GeometryError::InvalidCoordinate {
            message: format!("expected two numeric components, got {value}"),
        });
    };

    let point = to_lat_lng(a, b);
    if !point.is_valid() {
        return Err(GeometryError::InvalidCoordinate {
            message: format!("pair ({a}, {b}) is outside the valid coordinate range"),
        });
    }
    Ok(point)
}

/// Extracts a finite number from a JSON number or numeric string.
fn component(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
