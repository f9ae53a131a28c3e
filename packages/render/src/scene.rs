//! Scene construction from the primary and comprehensive documents.

use std::collections::{BTreeMap, BTreeSet};

use carbon_map_geometry::{
    centroid, clip::clamp_min_longitude, close_ring, hull::convex_hull,
    parse::{first_present_boundary, parse_boundary},
    repair::ensure_visible_polygon,
    signed_area,
};
use carbon_map_geometry_models::LatLng;
use carbon_map_project::merge::merge_record;
use carbon_map_project_models::{AreaRecord, Conservancy, Project, SourceDocuments};
use carbon_map_render_models::{
    Layer, MapScene, MarkerIcon, RecordId, SelectionTarget, Shape, ShapeId, ShapeKind,
    ShapeStyle,
};

use crate::{RenderConfig, config::CategoryConfig, viewport};

/// Builds the full map scene.
///
/// Missing documents produce a partial scene; the aggregate project outline
/// is always drawn, from the fallback ring if nothing else is available.
#[must_use]
pub fn build_scene(sources: &SourceDocuments, config: &RenderConfig) -> MapScene {
    let aggregate_id = config.aggregate.project_id.as_str();
    let primary_conservancies = sources
        .primary
        .as_ref()
        .and_then(|d| d.project(aggregate_id))
        .map_or(&[][..], |p| p.conservancies.as_slice());
    let comprehensive_conservancies = sources
        .comprehensive
        .as_ref()
        .and_then(|d| d.project(aggregate_id))
        .map_or(&[][..], |p| p.conservancies.as_slice());

    let mut builder = SceneBuilder::new(config);

    builder.add_aggregate_outline(comprehensive_conservancies, primary_conservancies);
    builder.add_conservancy_boundaries(comprehensive_conservancies, primary_conservancies);
    builder.add_conservancy_markers(primary_conservancies);

    let projects = sources
        .primary
        .as_ref()
        .map_or(&[][..], |d| d.projects.as_slice());
    for project in projects.iter().filter(|p| p.id() != aggregate_id) {
        builder.add_project(project);
    }

    builder.finish()
}

/// Key used to de-duplicate marker positions (4 decimal places).
fn position_key(p: LatLng) -> String {
    format!("{:.4},{:.4}", p.lat, p.lng)
}

/// Rings enclosing less than this many square degrees are not drawn.
const MIN_RING_AREA: f64 = 1e-12;

/// Repairs a parsed boundary of at least three points into a drawable ring.
///
/// Returns `None` for shorter input and for rings that still enclose no
/// area after repair (distinct but collinear points).
fn drawable_ring(points: &[LatLng], center_hint: Option<LatLng>) -> Option<Vec<LatLng>> {
    if points.len() < 3 {
        return None;
    }
    let ring = ensure_visible_polygon(points, center_hint);
    (signed_area(&ring).abs() >= MIN_RING_AREA).then_some(ring)
}

struct SceneBuilder<'a> {
    config: &'a RenderConfig,
    layers: Vec<Layer>,
    records: Vec<AreaRecord>,
    next_shape: usize,
}

impl<'a> SceneBuilder<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        let layer = |id: &str, label: &str| Layer {
            id: id.to_string(),
            label: label.to_string(),
            visible: true,
            shapes: vec![],
        };

        let mut layers = vec![
            layer(&config.aggregate.layer, &config.aggregate.label),
            layer(&config.conservancies.layer, &config.conservancies.label),
        ];
        layers.extend(config.categories.iter().map(|c| layer(&c.id, &c.label)));
        layers.push(layer(&config.markers.layer, &config.markers.label));

        Self {
            config,
            layers,
            records: vec![],
            next_shape: 0,
        }
    }

    fn add_record(&mut self, record: AreaRecord) -> RecordId {
        self.records.push(record);
        RecordId(self.records.len() - 1)
    }

    fn push_shape(
        &mut self,
        layer_id: &str,
        kind: ShapeKind,
        tooltip: String,
        selection: Option<SelectionTarget>,
    ) {
        let Some(layer) = self.layers.iter_mut().find(|l| l.id == layer_id) else {
            log::warn!("No layer '{layer_id}', dropping shape '{tooltip}'");
            return;
        };
        layer.shapes.push(Shape {
            id: ShapeId(self.next_shape),
            kind,
            tooltip,
            selection,
        });
        self.next_shape += 1;
    }

    fn add_polygon(
        &mut self,
        layer_id: &str,
        ring: Vec<LatLng>,
        style: ShapeStyle,
        hover_style: ShapeStyle,
        tooltip: String,
        selection: Option<SelectionTarget>,
    ) {
        self.push_shape(
            layer_id,
            ShapeKind::Polygon {
                ring,
                style,
                hover_style,
            },
            tooltip,
            selection,
        );
    }

    fn add_marker(
        &mut self,
        position: LatLng,
        icon: MarkerIcon,
        tooltip: String,
        selection: SelectionTarget,
    ) {
        let layer_id = self.config.markers.layer.clone();
        self.push_shape(
            &layer_id,
            ShapeKind::Marker { position, icon },
            tooltip,
            Some(selection),
        );
    }

    /// Outer boundary of the aggregate project: the convex hull of every
    /// conservancy boundary point and center.
    fn add_aggregate_outline(&mut self, comprehensive: &[Conservancy], primary: &[Conservancy]) {
        let aggregate = &self.config.aggregate;

        let mut points: Vec<LatLng> = comprehensive
            .iter()
            .filter_map(Conservancy::simplified_boundary)
            .flat_map(parse_boundary)
            .collect();
        points.extend(primary.iter().filter_map(Conservancy::center));

        let mut ring = convex_hull(&points);
        if ring.len() < 3 {
            log::info!(
                "Aggregate outline from {} points is degenerate, using fallback ring",
                points.len()
            );
            ring = aggregate.fallback_ring();
        } else {
            log::debug!(
                "Aggregate outline: {} hull vertices from {} points",
                ring.len(),
                points.len()
            );
        }
        close_ring(&mut ring);

        let layer = aggregate.layer.clone();
        let tooltip = aggregate.tooltip.clone();
        let style = aggregate.style.clone();
        self.add_polygon(&layer, ring, style.clone(), style, tooltip, None);
    }

    fn add_conservancy_boundaries(
        &mut self,
        comprehensive: &[Conservancy],
        primary: &[Conservancy],
    ) {
        let layer = self.config.conservancies.layer.clone();
        let style = self.config.conservancies.style.clone();
        let hover_style = self.config.conservancies.hover.apply(&style);

        let mut drawn = 0usize;
        for conservancy in comprehensive {
            let Some(raw) = conservancy.simplified_boundary() else {
                continue;
            };
            let points = parse_boundary(raw);
            let merged = merge_record(primary, conservancy);
            let Some(ring) = drawable_ring(&points, merged.center().or(conservancy.center()))
            else {
                log::debug!(
                    "Skipping boundary of '{}': {} usable points enclose no area",
                    conservancy.title(),
                    points.len()
                );
                continue;
            };

            let title = conservancy.title().to_string();
            let record = self.add_record(AreaRecord::Conservancy(merged.clone()));
            self.add_polygon(
                &layer,
                ring,
                style.clone(),
                hover_style.clone(),
                title.clone(),
                Some(SelectionTarget { title, record }),
            );
            drawn += 1;
        }
        log::debug!(
            "Drew {drawn} of {} conservancy boundaries",
            comprehensive.len()
        );
    }

    fn add_conservancy_markers(&mut self, primary: &[Conservancy]) {
        let icon = self.config.markers.conservancy_icon.clone();
        for conservancy in primary {
            let Some(position) = conservancy.center() else {
                continue;
            };
            let title = conservancy.title().to_string();
            let record = self.add_record(AreaRecord::Conservancy(conservancy.clone()));
            self.add_marker(
                position,
                icon.clone(),
                title.clone(),
                SelectionTarget { title, record },
            );
        }
    }

    fn add_project(&mut self, project: &Project) {
        let Some(category) = self.config.category_for(project.id()).cloned() else {
            log::warn!(
                "No category for project '{}' and no default category",
                project.id()
            );
            return;
        };

        let title = project.display_name().to_string();
        let mut record = None;
        let mut select = |builder: &mut Self| SelectionTarget {
            title: title.clone(),
            record: *record
                .get_or_insert_with(|| builder.add_record(AreaRecord::Project(project.clone()))),
        };

        let boundaries = project.boundary_coordinates.as_ref();
        let center = project.center();

        if let Some(raw) = boundaries.and_then(|b| b.main_boundary.as_ref()) {
            let mut points = parse_boundary(raw);
            if let Some(min_lng) = self.config.clip_for(project.id()) {
                points = clamp_min_longitude(&points, min_lng);
            }
            if let Some(ring) = drawable_ring(&points, center) {
                let hover = self.config.project_hover.main_boundary.apply(&category.style);
                let target = select(&mut *self);
                self.add_polygon(
                    &category.id,
                    ring,
                    category.style.clone(),
                    hover,
                    format!("{} ({})", project.display_name(), project.id()),
                    Some(target),
                );
            } else {
                log::debug!(
                    "Skipping main boundary of '{}': {} usable points enclose no area",
                    project.id(),
                    points.len()
                );
            }
        }

        let mut region_centers = BTreeMap::new();
        for rep in boundaries.map_or(&[][..], |b| b.representative_boundaries.as_slice()) {
            let Some(points) = first_present_boundary([
                rep.coordinates.as_ref(),
                rep.sample_coordinates.as_ref(),
            ]) else {
                continue;
            };
            if points.is_empty() {
                continue;
            }

            let ring = ensure_visible_polygon(&points, center);
            let region = rep.label();
            if !region.is_empty()
                && let Some(c) = centroid(&ring)
            {
                region_centers.insert(region.to_string(), c);
            }

            let tooltip = if region.is_empty() {
                project.display_name().to_string()
            } else {
                format!("{} – {region}", project.display_name())
            };
            let hover = self.config.project_hover.representative.apply(&category.style);
            let target = select(&mut *self);
            self.add_polygon(
                &category.id,
                ring,
                category.style.clone(),
                hover,
                tooltip,
                Some(target),
            );
        }

        self.add_project_markers(project, &category, &region_centers, center, &mut select);
    }

    fn add_project_markers(
        &mut self,
        project: &Project,
        category: &CategoryConfig,
        region_centers: &BTreeMap<String, LatLng>,
        center: Option<LatLng>,
        select: &mut impl FnMut(&mut Self) -> SelectionTarget,
    ) {
        let icon = self.config.markers.project_icon.clone();

        if project.counties.is_empty() {
            if let Some(position) = center {
                let target = select(&mut *self);
                self.add_marker(
                    position,
                    icon,
                    format!("{} ({})", project.display_name(), project.id()),
                    target,
                );
            }
            return;
        }

        let mut used = BTreeSet::new();
        for county in &project.counties {
            let Some(position) = region_centers
                .get(county)
                .copied()
                .or_else(|| self.config.county_center(county))
            else {
                log::debug!(
                    "No position for county '{county}' of {} ({})",
                    project.id(),
                    category.id
                );
                continue;
            };
            if !used.insert(position_key(position)) {
                continue;
            }
            let target = select(&mut *self);
            self.add_marker(
                position,
                icon.clone(),
                format!("{} – {county} ({})", project.display_name(), project.id()),
                target,
            );
        }
    }

    fn finish(self) -> MapScene {
        let points: Vec<LatLng> = self
            .layers
            .iter()
            .flat_map(|l| &l.shapes)
            .flat_map(|s| s.points().iter().copied())
            .collect();
        let viewport = viewport::fit(&points, &self.config.viewport);

        log::info!(
            "Built map scene: {} layers, {} shapes, {} records",
            self.layers.len(),
            self.next_shape,
            self.records.len()
        );

        MapScene {
            layers: self.layers,
            records: self.records,
            viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use carbon_map_project_models::ProjectsDocument;
    use carbon_map_render_models::InteractionState;

    use super::*;

    fn primary() -> ProjectsDocument {
        serde_json::from_value(serde_json::json!({
            "projects": [
                {
                    "project_id": "VCS1468",
                    "short_name": "NRT",
                    "conservancies": [
                        {"name": "Sera Community Conservancy", "short_name": "Sera",
                         "coordinates": {"lat": 1.05, "lng": 37.75}, "population": 12500},
                        {"name": "Kalama", "lat": 0.95, "lng": 37.55},
                        {"name": "Melako"}
                    ]
                },
                {
                    "project_id": "VCS2623",
                    "short_name": "Komaza",
                    "counties": ["Kilifi", "Kwale"],
                    "coordinates": {"center_lat": -3.6, "center_lng": 39.7},
                    "boundary_coordinates": {
                        "representative_boundaries": [
                            {"region": "Kilifi", "coordinates": [[-3.5, 39.8]]},
                            {"landowner": "Smallholder", "sample_coordinates": [[39.9, -3.4], [-3.3, 39.9], [-3.3, 40.0]]},
                            {"region": "Empty", "coordinates": []}
                        ]
                    }
                },
                {
                    "project_id": "VCS5451",
                    "short_name": "KCSA",
                    "counties": ["Turkana", "Narok", "Narok", "Atlantis"],
                    "boundary_coordinates": {
                        "main_boundary": [[3.0, 34.0], [3.0, 36.0], [4.0, 35.0], "bad"]
                    }
                },
                {
                    "project_id": "VCS3340",
                    "name": "Boomitra Kenya",
                    "coordinates": {"lat": 0.3, "lng": 36.5}
                },
                {"project_id": "VCS9999", "name": "Unlisted"}
            ]
        }))
        .unwrap()
    }

    fn comprehensive() -> ProjectsDocument {
        serde_json::from_value(serde_json::json!({
            "projects": [{
                "project_id": "VCS1468",
                "conservancies": [
                    {
                        "name": "Sera Conservancy",
                        "boundary_coordinates": {
                            "simplified_coordinates": [[1.0, 37.7], [1.0, 37.9], [1.2, 37.8]]
                        }
                    },
                    {
                        "name": "Biliqo Bulesa",
                        "boundary_coordinates": {
                            "simplified_coordinates": [[37.9, 1.3], [38.1, 1.3], [38.0, 1.5]]
                        }
                    },
                    {
                        "name": "Too Small",
                        "boundary_coordinates": {"simplified_coordinates": [[1.0, 37.0], [1.1, 37.1]]}
                    },
                    {
                        "name": "Not An Array",
                        "boundary_coordinates": {"simplified_coordinates": "n/a"}
                    }
                ]
            }]
        }))
        .unwrap()
    }

    fn sources() -> SourceDocuments {
        SourceDocuments {
            primary: Some(primary()),
            comprehensive: Some(comprehensive()),
        }
    }

    fn polygons(scene: &MapScene, layer: &str) -> Vec<Shape> {
        scene
            .layer(layer)
            .unwrap()
            .shapes
            .iter()
            .filter(|s| matches!(s.kind, ShapeKind::Polygon { .. }))
            .cloned()
            .collect()
    }

    fn ring(shape: &Shape) -> &[LatLng] {
        match &shape.kind {
            ShapeKind::Polygon { ring, .. } => ring,
            ShapeKind::Marker { .. } => panic!("expected polygon"),
        }
    }

    #[test]
    fn layers_follow_control_order() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let labels: Vec<&str> = scene.layers.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "NRT project boundary",
                "NRT conservancy boundaries",
                "Komaza (VCS 2623)",
                "Boomitra Kenya (VCS 3340)",
                "KCSA (VCS 5451)",
                "Markers"
            ]
        );
        assert!(scene.layers.iter().all(|l| l.visible));
    }

    #[test]
    fn shape_ids_are_unique() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let ids: BTreeSet<ShapeId> = scene
            .layers
            .iter()
            .flat_map(|l| &l.shapes)
            .map(|s| s.id)
            .collect();
        let count = scene.layers.iter().map(|l| l.shapes.len()).sum::<usize>();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn aggregate_outline_is_closed_hull() {
        let config = RenderConfig::embedded();
        let scene = build_scene(&sources(), &config);
        let outline = polygons(&scene, "nrt_project");
        assert_eq!(outline.len(), 1);
        let shape = &outline[0];
        assert!(shape.selection.is_none());
        assert_eq!(shape.tooltip, "NRT project boundary – whole project (VCS 1468)");

        let ring = ring(shape);
        assert_eq!(ring.first(), ring.last());
        assert!(carbon_map_geometry::signed_area(ring) > 0.0);
        // Kalama center lies on the hull.
        assert!(ring.contains(&LatLng::new(0.95, 37.55)));
        assert_eq!(
            shape.style_for(InteractionState::Idle).unwrap().weight,
            config.aggregate.style.weight
        );
    }

    #[test]
    fn aggregate_outline_falls_back_without_sources() {
        let scene = build_scene(&SourceDocuments::default(), &RenderConfig::embedded());
        let outline = polygons(&scene, "nrt_project");
        let ring = ring(&outline[0]);
        assert_eq!(ring.len(), 14);
        assert_eq!(ring[0], LatLng::new(0.02, 36.82));
        assert_eq!(ring[13], ring[0]);
        assert_eq!(scene.viewport.zoom, 7);
        assert_eq!(scene.layers.iter().map(|l| l.shapes.len()).sum::<usize>(), 1);
    }

    #[test]
    fn conservancy_boundaries_select_merged_record() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let shapes = polygons(&scene, "nrt_conservancies");
        assert_eq!(shapes.len(), 2);

        let sera = &shapes[0];
        assert_eq!(sera.tooltip, "Sera Conservancy");
        let target = sera.selection.as_ref().unwrap();
        assert_eq!(target.title, "Sera Conservancy");
        let AreaRecord::Conservancy(merged) = scene.record(target.record).unwrap() else {
            panic!("expected conservancy record");
        };
        assert_eq!(merged.population, Some(12_500.0));

        let biliqo = &shapes[1];
        assert_eq!(ring(biliqo)[0], LatLng::new(1.3, 37.9));
        let AreaRecord::Conservancy(own) = scene
            .record(biliqo.selection.as_ref().unwrap().record)
            .unwrap()
        else {
            panic!("expected conservancy record");
        };
        assert_eq!(own.name.as_deref(), Some("Biliqo Bulesa"));

        let hover = sera.style_for(InteractionState::Hovered).unwrap();
        assert!((hover.fill_opacity - 0.35).abs() < 1e-9);
    }

    #[test]
    fn project_main_boundary_is_clipped() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let kcsa = polygons(&scene, "kcsa");
        let main = kcsa
            .iter()
            .find(|s| s.tooltip == "KCSA (VCS5451)")
            .unwrap();
        let ring = ring(main);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], LatLng::new(3.0, 34.55));
        assert!(ring.iter().all(|p| p.lng >= 34.55));
        assert_eq!(main.selection.as_ref().unwrap().title, "KCSA");
    }

    #[test]
    fn degenerate_boundaries_are_repaired_or_skipped() {
        let mut primary = primary();
        let kcsa = primary
            .projects
            .iter_mut()
            .find(|p| p.id() == "VCS5451")
            .unwrap();
        // Every point lies west of the clip bound and collapses onto it.
        kcsa.boundary_coordinates.as_mut().unwrap().main_boundary =
            Some(serde_json::json!([[3.0, 34.0], [3.5, 34.2], [4.0, 34.1]]));

        let mut comprehensive = comprehensive();
        comprehensive.projects[0].conservancies.push(
            serde_json::from_value(serde_json::json!({
                "name": "Dup",
                "boundary_coordinates": {
                    "simplified_coordinates": [[1.0, 37.0], [1.0, 37.0], [1.0, 37.0]]
                }
            }))
            .unwrap(),
        );

        let sources = SourceDocuments {
            primary: Some(primary),
            comprehensive: Some(comprehensive),
        };
        let scene = build_scene(&sources, &RenderConfig::embedded());

        let conservancies = polygons(&scene, "nrt_conservancies");
        assert_eq!(conservancies.len(), 3);
        let dup = conservancies.iter().find(|s| s.tooltip == "Dup").unwrap();
        let square = ring(dup);
        assert_eq!(square.len(), 4);
        let c = centroid(square).unwrap();
        assert!((c.lat - 1.0).abs() < 1e-9);
        assert!((c.lng - 37.0).abs() < 1e-9);

        let index = crate::interaction::HitIndex::build(&scene);
        let event =
            crate::interaction::select_at(&scene, &index, LatLng::new(1.0, 37.0)).unwrap();
        assert_eq!(event.title, "Dup");

        assert!(
            polygons(&scene, "kcsa")
                .iter()
                .all(|s| s.tooltip != "KCSA (VCS5451)")
        );
        for shape in scene.layers.iter().flat_map(|l| &l.shapes) {
            if let ShapeKind::Polygon { ring, .. } = &shape.kind {
                assert!(signed_area(ring).abs() > 0.0, "{} has no area", shape.tooltip);
            }
        }
    }

    #[test]
    fn representative_boundaries_are_repaired() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let komaza = polygons(&scene, "komaza");
        assert_eq!(komaza.len(), 2);

        let kilifi = &komaza[0];
        assert_eq!(kilifi.tooltip, "Komaza – Kilifi");
        let square = ring(kilifi);
        assert_eq!(square.len(), 4);
        // Centered on the project center, not the single sample point.
        let c = carbon_map_geometry::centroid(square).unwrap();
        assert!((c.lat + 3.6).abs() < 1e-9);
        assert!((c.lng - 39.7).abs() < 1e-9);

        let sample = &komaza[1];
        assert_eq!(sample.tooltip, "Komaza – Smallholder");
        assert_eq!(ring(sample)[0], LatLng::new(-3.4, 39.9));

        // Both shapes point at the same project record.
        assert_eq!(
            kilifi.selection.as_ref().unwrap().record,
            sample.selection.as_ref().unwrap().record
        );
    }

    #[test]
    fn county_markers_prefer_region_centroid() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let markers = &scene.layer("markers").unwrap().shapes;

        let kilifi = markers
            .iter()
            .find(|s| s.tooltip == "Komaza – Kilifi (VCS2623)")
            .unwrap();
        let ShapeKind::Marker { position, icon } = &kilifi.kind else {
            panic!("expected marker");
        };
        assert!((position.lat + 3.6).abs() < 1e-9);
        assert_eq!(icon.class_name, "other-project-marker");

        let kwale = markers
            .iter()
            .find(|s| s.tooltip == "Komaza – Kwale (VCS2623)")
            .unwrap();
        assert_eq!(kwale.points(), &[LatLng::new(-4.2, 39.5)]);
    }

    #[test]
    fn county_markers_are_deduplicated_and_unknown_skipped() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let kcsa_markers: Vec<&Shape> = scene
            .layer("markers")
            .unwrap()
            .shapes
            .iter()
            .filter(|s| s.tooltip.ends_with("(VCS5451)"))
            .collect();
        let tooltips: Vec<&str> = kcsa_markers.iter().map(|s| s.tooltip.as_str()).collect();
        assert_eq!(tooltips, ["KCSA – Turkana (VCS5451)", "KCSA – Narok (VCS5451)"]);
    }

    #[test]
    fn project_without_counties_gets_center_marker() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let markers = &scene.layer("markers").unwrap().shapes;
        let boomitra = markers
            .iter()
            .find(|s| s.tooltip == "Boomitra Kenya (VCS3340)")
            .unwrap();
        assert_eq!(boomitra.points(), &[LatLng::new(0.3, 36.5)]);
        assert!(polygons(&scene, "boomitra").is_empty());
        // No geometry and no center: nothing rendered.
        assert!(!markers.iter().any(|s| s.tooltip.contains("VCS9999")));
    }

    #[test]
    fn conservancy_markers_use_primary_record() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let markers: Vec<&Shape> = scene
            .layer("markers")
            .unwrap()
            .shapes
            .iter()
            .filter(|s| {
                matches!(&s.kind, ShapeKind::Marker { icon, .. } if icon.class_name == "conservancy-marker")
            })
            .collect();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].tooltip, "Sera Community Conservancy");
        assert_eq!(markers[1].points(), &[LatLng::new(0.95, 37.55)]);
    }

    #[test]
    fn viewport_covers_rendered_shapes() {
        let scene = build_scene(&sources(), &RenderConfig::embedded());
        let bounds = scene.viewport.bounds.unwrap();
        for shape in scene.layers.iter().flat_map(|l| &l.shapes) {
            for p in shape.points() {
                assert!(bounds.contains(*p), "{p:?} outside {bounds:?}");
            }
        }
        assert!(scene.viewport.zoom <= 7);
    }

    #[test]
    fn missing_comprehensive_document_still_renders_projects() {
        let sources = SourceDocuments {
            primary: Some(primary()),
            comprehensive: None,
        };
        let scene = build_scene(&sources, &RenderConfig::embedded());
        assert!(polygons(&scene, "nrt_conservancies").is_empty());
        assert_eq!(polygons(&scene, "komaza").len(), 2);
        // Two conservancy centers are not enough for a hull.
        assert_eq!(ring(&polygons(&scene, "nrt_project")[0]).len(), 14);
    }
}
