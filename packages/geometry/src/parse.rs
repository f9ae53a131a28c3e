//! Best-effort extraction of point lists from boundary fields.
//!
//! Boundary data arrives under several schema shapes (`main_boundary`,
//! `simplified_coordinates`, `sample_coordinates`, representative
//! `coordinates`), all of which are arrays of raw pairs. Entries that cannot
//! be read are dropped without failing the whole boundary.

use carbon_map_geometry_models::LatLng;

use crate::normalize::normalize_raw;

/// Parses an array of raw coordinate pairs into canonical points.
///
/// Returns an empty list when `value` is not an array. Unreadable entries
/// are skipped; surviving points keep their source order.
#[must_use]
pub fn parse_boundary(value: &serde_json::Value) -> Vec<LatLng> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    let points: Vec<LatLng> = entries
        .iter()
        .filter_map(|entry| normalize_raw(entry).ok())
        .collect();

    let dropped = entries.len() - points.len();
    if dropped > 0 {
        log::debug!(
            "Dropped {dropped} of {} unreadable boundary coordinates",
            entries.len()
        );
    }

    points
}

/// Parses the first candidate field that is present and non-null.
///
/// Mirrors the way representative boundaries are read: a present
/// `coordinates` field wins over `sample_coordinates` even if it yields no
/// points. Returns `None` when no candidate is present.
#[must_use]
pub fn first_present_boundary<'a>(
    candidates: impl IntoIterator<Item = Option<&'a serde_json::Value>>,
) -> Option<Vec<LatLng>> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_null())
        .map(parse_boundary)
}
