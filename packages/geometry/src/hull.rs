//! Convex hull of a point cloud (Graham scan).
//!
//! Used to approximate an aggregate project's outer boundary from the
//! interior points that are known (member boundary samples and centers)
//! when no authoritative ring exists.

use carbon_map_geometry_models::LatLng;

/// Computes the convex hull of `points`.
///
/// The pivot is the point with the lowest latitude (ties: lowest
/// longitude). The remaining points are swept in order of polar angle
/// about the pivot, dropping the previous vertex whenever the last three
/// make a clockwise or collinear turn. The result runs counter-clockwise
/// in the map plane (`x` = longitude, `y` = latitude) and is not closed.
///
/// Inputs with fewer than three points are returned unchanged. Fully
/// collinear input collapses to its two extreme points.
#[must_use]
pub fn convex_hull(points: &[LatLng]) -> Vec<LatLng> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let Some(&pivot) = points.iter().min_by(|a, b| {
        a.lat
            .total_cmp(&b.lat)
            .then_with(|| a.lng.total_cmp(&b.lng))
    }) else {
        return Vec::new();
    };

    let mut rest: Vec<(f64, f64, LatLng)> = points
        .iter()
        .filter(|p| **p != pivot)
        .map(|p| {
            let dx = p.lng - pivot.lng;
            let dy = p.lat - pivot.lat;
            (dy.atan2(dx), dx.hypot(dy), *p)
        })
        .collect();
    rest.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut hull = vec![pivot];
    for (_, _, q) in rest {
        while hull.len() >= 2 {
            let a = hull[hull.len() - 2];
            let b = hull[hull.len() - 1];
            if cross(a, b, q) <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(q);
    }

    hull
}

/// Z component of `(b - a) x (q - a)` in the map plane. Positive for a
/// counter-clockwise (left) turn. Kept unfused so repeated points give an
/// exact zero.
#[allow(clippy::suboptimal_flops)]
fn cross(a: LatLng, b: LatLng, q: LatLng) -> f64 {
    (b.lng - a.lng) * (q.lat - a.lat) - (b.lat - a.lat) * (q.lng - a.lng)
}
