//! Longitude clamping for datasets that overshoot a known border.
//!
//! This is not general polygon clipping: it only moves vertices west of a
//! bound onto the bound, which is enough for source rings that spill past
//! a straight stretch of an administrative border.

use carbon_map_geometry_models::LatLng;

/// Returns a copy of `points` with every longitude below `min_lng` raised
/// to `min_lng`. Latitudes are untouched.
#[must_use]
pub fn clamp_min_longitude(points: &[LatLng], min_lng: f64) -> Vec<LatLng> {
    let clipped: Vec<LatLng> = points
        .iter()
        .map(|p| {
            if p.lng < min_lng {
                LatLng::new(p.lat, min_lng)
            } else {
                *p
            }
        })
        .collect();

    let moved = points
        .iter()
        .zip(&clipped)
        .filter(|(before, after)| before != after)
        .count();
    if moved > 0 {
        log::debug!("Clamped {moved} of {} vertices to lng >= {min_lng}", points.len());
    }

    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    const TURKANA_MIN_LNG: f64 = 34.55;

    fn ring() -> Vec<LatLng> {
        vec![
            LatLng::new(4.6, 34.1),
            LatLng::new(4.9, 35.8),
            LatLng::new(2.8, 36.2),
            LatLng::new(2.4, 34.55),
            LatLng::new(3.1, 33.9),
        ]
    }

    #[test]
    fn every_longitude_respects_bound() {
        let clipped = clamp_min_longitude(&ring(), TURKANA_MIN_LNG);
        assert!(clipped.iter().all(|p| p.lng >= TURKANA_MIN_LNG));
    }

    #[test]
    fn latitudes_are_unchanged() {
        let original = ring();
        let clipped = clamp_min_longitude(&original, TURKANA_MIN_LNG);
        assert_eq!(clipped.len(), original.len());
        for (before, after) in original.iter().zip(&clipped) {
            assert!((before.lat - after.lat).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn in_bound_points_are_unmodified() {
        let original = ring();
        let clipped = clamp_min_longitude(&original, TURKANA_MIN_LNG);
        assert_eq!(clipped[1], original[1]);
        assert_eq!(clipped[2], original[2]);
        assert_eq!(clipped[3], original[3]);
        assert_eq!(clipped[0], LatLng::new(4.6, TURKANA_MIN_LNG));
        assert_eq!(clipped[4], LatLng::new(3.1, TURKANA_MIN_LNG));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(clamp_min_longitude(&[], TURKANA_MIN_LNG).is_empty());
    }
}
