//! Selection of map shapes.
//!
//! [`select`] turns a clicked shape into a [`SelectionEvent`] for the
//! detail panel. [`HitIndex`] resolves a map location to the selectable
//! polygon under it, preferring the smallest polygon where several
//! overlap (a conservancy inside a larger project area).

use carbon_map_geometry::{close_ring, to_polygon};
use carbon_map_geometry_models::LatLng;
use carbon_map_project::detail::describe;
use carbon_map_render_models::{MapScene, SelectionEvent, ShapeId, ShapeKind};
use geo::{Area, BoundingRect, Contains, Polygon};
use rstar::{AABB, RTree, RTreeObject};

/// Builds the detail panel event for a shape.
///
/// Returns `None` for unknown or non-selectable shapes.
#[must_use]
pub fn select(scene: &MapScene, shape_id: ShapeId) -> Option<SelectionEvent> {
    let target = scene.shape(shape_id)?.selection.as_ref()?;
    let record = scene.record(target.record)?;
    log::debug!("Selected shape {} ({})", shape_id.0, target.title);
    Some(SelectionEvent {
        title: target.title.clone(),
        kind: record.kind(),
        detail: describe(record),
    })
}

/// A selectable polygon stored in the R-tree.
struct HitEntry {
    shape: ShapeId,
    area: f64,
    envelope: AABB<[f64; 2]>,
    polygon: Polygon<f64>,
}

impl RTreeObject for HitEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index over the selectable polygons of visible layers.
///
/// Built from a snapshot of the scene; rebuild after toggling layers.
pub struct HitIndex {
    tree: RTree<HitEntry>,
}

impl HitIndex {
    #[must_use]
    pub fn build(scene: &MapScene) -> Self {
        let entries: Vec<HitEntry> = scene
            .visible_shapes()
            .filter(|s| s.selection.is_some())
            .filter_map(|s| {
                let ShapeKind::Polygon { ring, .. } = &s.kind else {
                    return None;
                };
                let mut ring = ring.clone();
                close_ring(&mut ring);
                let polygon = to_polygon(&ring);
                let rect = polygon.bounding_rect()?;
                Some(HitEntry {
                    shape: s.id,
                    area: polygon.unsigned_area(),
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    polygon,
                })
            })
            .collect();

        log::debug!("Indexed {} selectable polygons", entries.len());

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Smallest selectable polygon containing `point`.
    #[must_use]
    pub fn hit_test(&self, point: LatLng) -> Option<ShapeId> {
        let query = geo::Point::new(point.lng, point.lat);
        let query_env = AABB::from_point([point.lng, point.lat]);

        self.tree
            .locate_in_envelope_intersecting(&query_env)
            .filter(|e| e.polygon.contains(&query))
            .min_by(|a, b| a.area.total_cmp(&b.area))
            .map(|e| e.shape)
    }

    /// Number of indexed polygons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Selects whatever selectable polygon lies under `point`.
#[must_use]
pub fn select_at(scene: &MapScene, index: &HitIndex, point: LatLng) -> Option<SelectionEvent> {
    select(scene, index.hit_test(point)?)
}

#[cfg(test)]
mod tests {
    use carbon_map_project_models::{AreaKind, SourceDocuments};

    use super::*;
    use crate::{RenderConfig, build_scene};

    fn scene() -> MapScene {
        let primary = serde_json::from_value(serde_json::json!({
            "projects": [
                {
                    "project_id": "VCS1468",
                    "conservancies": [
                        {"name": "Sera", "coordinates": {"lat": 1.1, "lng": 37.6}, "area_km2": 3450}
                    ]
                },
                {
                    "project_id": "VCS3340",
                    "short_name": "Boomitra Kenya",
                    "status": "Registered",
                    "boundary_coordinates": {
                        "main_boundary": [[0.0, 37.0], [0.0, 39.0], [2.0, 39.0], [2.0, 37.0]]
                    }
                }
            ]
        }))
        .unwrap();
        let comprehensive = serde_json::from_value(serde_json::json!({
            "projects": [{
                "project_id": "VCS1468",
                "conservancies": [{
                    "name": "Sera Conservancy",
                    "boundary_coordinates": {
                        "simplified_coordinates": [[1.0, 37.5], [1.0, 37.9], [1.4, 37.9], [1.4, 37.5]]
                    }
                }]
            }]
        }))
        .unwrap();
        build_scene(
            &SourceDocuments {
                primary: Some(primary),
                comprehensive: Some(comprehensive),
            },
            &RenderConfig::embedded(),
        )
    }

    fn shape_by_tooltip(scene: &MapScene, tooltip: &str) -> ShapeId {
        scene
            .layers
            .iter()
            .flat_map(|l| &l.shapes)
            .find(|s| s.tooltip == tooltip)
            .map(|s| s.id)
            .unwrap()
    }

    #[test]
    fn selecting_conservancy_boundary_shows_merged_details() {
        let scene = scene();
        let id = shape_by_tooltip(&scene, "Sera Conservancy");
        let event = select(&scene, id).unwrap();
        assert_eq!(event.title, "Sera Conservancy");
        assert_eq!(event.kind, AreaKind::Conservancy);
        assert_eq!(event.detail.get("land_area"), Some("3,450 km²"));
    }

    #[test]
    fn selecting_project_boundary_shows_project_details() {
        let scene = scene();
        let id = shape_by_tooltip(&scene, "Boomitra Kenya (VCS3340)");
        let event = select(&scene, id).unwrap();
        assert_eq!(event.title, "Boomitra Kenya");
        assert_eq!(event.kind, AreaKind::Project);
        assert_eq!(event.detail.get("project"), Some("Boomitra Kenya (VCS3340)"));
        assert_eq!(event.detail.get("status"), Some("Registered"));
    }

    #[test]
    fn aggregate_outline_is_not_selectable() {
        let scene = scene();
        let id = shape_by_tooltip(&scene, "NRT project boundary – whole project (VCS 1468)");
        assert!(select(&scene, id).is_none());
        assert!(select(&scene, ShapeId(10_000)).is_none());
    }

    #[test]
    fn hit_test_prefers_smallest_polygon() {
        let scene = scene();
        let index = HitIndex::build(&scene);
        assert_eq!(index.len(), 2);

        let inner = index.hit_test(LatLng::new(1.2, 37.7)).unwrap();
        assert_eq!(inner, shape_by_tooltip(&scene, "Sera Conservancy"));

        let outer = index.hit_test(LatLng::new(0.5, 38.5)).unwrap();
        assert_eq!(outer, shape_by_tooltip(&scene, "Boomitra Kenya (VCS3340)"));

        assert!(index.hit_test(LatLng::new(-2.0, 36.0)).is_none());
    }

    #[test]
    fn hidden_layers_are_not_hit() {
        let mut scene = scene();
        assert!(scene.set_layer_visible("nrt_conservancies", false));
        let index = HitIndex::build(&scene);
        assert_eq!(index.len(), 1);
        let event = select_at(&scene, &index, LatLng::new(1.2, 37.7)).unwrap();
        assert_eq!(event.kind, AreaKind::Project);
    }
}
