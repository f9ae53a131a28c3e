#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary geometry pipeline for carbon project areas.
//!
//! Turns uncurated coordinate data into rings the renderer can draw:
//!
//! 1. [`normalize`] resolves the axis order of a raw pair.
//! 2. [`parse`] extracts ordered point lists from loosely-shaped JSON.
//! 3. [`repair`] guarantees at least three distinct vertices.
//! 4. [`hull`] derives an enclosing ring from a point cloud.
//! 5. [`clip`] clamps rings that overshoot a known border.
//!
//! All operations are pure functions over slices of [`LatLng`].

pub mod clip;
pub mod hull;
pub mod normalize;
pub mod parse;
pub mod repair;

use carbon_map_geometry_models::LatLng;
use geo::{Area, Coord, LineString, Polygon};
use thiserror::Error;

/// Errors produced while reading raw coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The raw value cannot be turned into a valid point.
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate {
        /// Description of what went wrong.
        message: String,
    },
}

/// Arithmetic mean of the points, or `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let (lat, lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    let n = points.len() as f64;
    Some(LatLng::new(lat / n, lng / n))
}

/// Appends the first vertex when the ring is open.
pub fn close_ring(ring: &mut Vec<LatLng>) {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && first != last
    {
        ring.push(first);
    }
}

/// Converts a ring to a [`Polygon`] in the map plane (`x` = longitude,
/// `y` = latitude). The ring is closed by `geo` if needed.
#[must_use]
pub fn to_polygon(ring: &[LatLng]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lng, y: p.lat }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Signed area of the ring in square degrees; positive when the ring runs
/// counter-clockwise in the map plane.
#[must_use]
pub fn signed_area(ring: &[LatLng]) -> f64 {
    to_polygon(ring).signed_area()
}
