//! `GeoJSON` export of a map scene.
//!
//! Every shape becomes one feature. Polygon styles are written with the
//! simplestyle property names (`stroke`, `fill`, ...) so the output renders
//! styled in common `GeoJSON` viewers.

use carbon_map_geometry::{close_ring, to_polygon};
use carbon_map_render_models::{Layer, MapScene, Shape, ShapeKind};
use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use serde_json::{Map, Number, json};

/// Converts every shape of every layer to a feature.
#[must_use]
pub fn to_feature_collection(scene: &MapScene) -> FeatureCollection {
    let features: Vec<Feature> = scene
        .layers
        .iter()
        .flat_map(|layer| layer.shapes.iter().map(move |shape| to_feature(scene, layer, shape)))
        .collect();

    log::debug!("Exported {} features", features.len());

    FeatureCollection {
        bbox: scene.viewport.bounds.map(|b| {
            vec![
                b.south_west.lng,
                b.south_west.lat,
                b.north_east.lng,
                b.north_east.lat,
            ]
        }),
        features,
        foreign_members: None,
    }
}

fn to_feature(scene: &MapScene, layer: &Layer, shape: &Shape) -> Feature {
    let mut properties = Map::new();
    properties.insert("layer".to_string(), json!(layer.id));
    properties.insert("layerLabel".to_string(), json!(layer.label));
    properties.insert("visible".to_string(), json!(layer.visible));
    properties.insert("tooltip".to_string(), json!(shape.tooltip));

    if let Some(target) = &shape.selection {
        properties.insert("title".to_string(), json!(target.title));
        if let Some(record) = scene.record(target.record) {
            properties.insert("recordKind".to_string(), json!(record.kind().as_ref()));
        }
    }

    let geometry = match &shape.kind {
        ShapeKind::Polygon { ring, style, .. } => {
            properties.insert("stroke".to_string(), json!(style.color));
            properties.insert("stroke-width".to_string(), json!(style.weight));
            properties.insert("fill".to_string(), json!(style.fill_color));
            properties.insert("fill-opacity".to_string(), json!(style.fill_opacity));

            let mut ring = ring.clone();
            close_ring(&mut ring);
            Geometry::new(geojson::Value::from(&to_polygon(&ring)))
        }
        ShapeKind::Marker { position, icon } => {
            properties.insert("markerClass".to_string(), json!(icon.class_name));
            properties.insert("markerSize".to_string(), json!(icon.size));
            Geometry::new(geojson::Value::from(&geo::Point::new(
                position.lng,
                position.lat,
            )))
        }
    };

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::Number(Number::from(shape.id.0))),
        properties: Some(properties),
        foreign_members: None,
    }
}
