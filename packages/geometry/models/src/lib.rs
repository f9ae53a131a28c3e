#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and bounding box types shared by the boundary pipeline.
//!
//! Every coordinate that leaves the normalizer is a [`LatLng`] in decimal
//! degrees, latitude first. Downstream crates never see raw axis-ambiguous
//! pairs.

use serde::{Deserialize, Serialize};

/// Largest valid absolute latitude in decimal degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest valid absolute longitude in decimal degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A canonical `(latitude, longitude)` point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Creates a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and within the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= MAX_LATITUDE
            && self.lng.abs() <= MAX_LONGITUDE
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounding box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLngBounds {
    /// South-west corner (minimum latitude and longitude).
    pub south_west: LatLng,
    /// North-east corner (maximum latitude and longitude).
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Creates a degenerate box containing a single point.
    #[must_use]
    pub const fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Builds the bounding box of `points`, or `None` if it is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(*iter.next()?);
        for point in iter {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Whether `point` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_ranges() {
        assert!(LatLng::new(0.5, 36.9).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(!LatLng::new(90.5, 36.9).is_valid());
        assert!(!LatLng::new(0.5, -180.1).is_valid());
        assert!(!LatLng::new(f64::NAN, 36.9).is_valid());
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            LatLng::new(0.5, 36.9),
            LatLng::new(-1.2, 38.0),
            LatLng::new(2.3, 37.1),
        ];
        let bounds = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, LatLng::new(-1.2, 36.9));
        assert_eq!(bounds.north_east, LatLng::new(2.3, 38.0));
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn empty_bounds_is_none() {
        assert!(LatLngBounds::from_points(&[]).is_none());
    }
}
