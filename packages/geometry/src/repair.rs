//! Degeneracy repair so every displayable area renders as a visible shape.

use std::collections::BTreeSet;

use carbon_map_geometry_models::LatLng;

/// Half-width in degrees of the square synthesized for degenerate input.
pub const FALLBACK_HALF_WIDTH: f64 = 0.08;

/// Center used when neither a hint nor any point is available.
pub const DEFAULT_CENTER: LatLng = LatLng::new(0.0, 37.0);

/// Decimal places used as the equality key when counting distinct points
/// (about 1.1 m at the equator).
const DEDUP_SCALE: f64 = 100_000.0;

/// Returns a ring with at least three distinct vertices.
///
/// Input with three or more distinct points (compared at 5 decimal places)
/// is returned unmodified. Otherwise a square of half-width
/// [`FALLBACK_HALF_WIDTH`] is synthesized around `center_hint`, or the
/// first available point, or [`DEFAULT_CENTER`].
#[must_use]
pub fn ensure_visible_polygon(points: &[LatLng], center_hint: Option<LatLng>) -> Vec<LatLng> {
    if distinct_count(points) >= 3 {
        return points.to_vec();
    }

    let center = center_hint
        .or_else(|| points.first().copied())
        .unwrap_or(DEFAULT_CENTER);

    log::debug!(
        "Degenerate boundary ({} points), synthesizing square at ({}, {})",
        points.len(),
        center.lat,
        center.lng
    );

    fallback_square(center, FALLBACK_HALF_WIDTH)
}

/// Axis-aligned square around `center`, counter-clockwise in the map plane.
#[must_use]
pub fn fallback_square(center: LatLng, half_width: f64) -> Vec<LatLng> {
    let d = half_width;
    vec![
        LatLng::new(center.lat - d, center.lng - d),
        LatLng::new(center.lat - d, center.lng + d),
        LatLng::new(center.lat + d, center.lng + d),
        LatLng::new(center.lat + d, center.lng - d),
    ]
}

#[allow(clippy::cast_possible_truncation)]
fn dedup_key(point: LatLng) -> (i64, i64) {
    (
        (point.lat * DEDUP_SCALE).round() as i64,
        (point.lng * DEDUP_SCALE).round() as i64,
    )
}

fn distinct_count(points: &[LatLng]) -> usize {
    points
        .iter()
        .map(|p| dedup_key(*p))
        .collect::<BTreeSet<_>>()
        .len()
}
