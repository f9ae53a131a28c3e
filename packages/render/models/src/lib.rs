#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map scene types handed to the map front end.
//!
//! A [`MapScene`] owns its layers and a record table; shapes refer to
//! records by [`RecordId`] so a record shared by several shapes (a project
//! with many sampled regions) is stored once.

use carbon_map_geometry_models::{LatLng, LatLngBounds};
use carbon_map_project_models::{AreaKind, AreaRecord, DetailPayload};
use serde::{Deserialize, Serialize};

/// Stroke and fill parameters of a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color (CSS hex).
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Fill color (CSS hex).
    pub fill_color: String,
    /// Fill opacity in `0.0..=1.0`.
    pub fill_opacity: f64,
}

/// Icon of a point marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    /// CSS class applied to the marker element.
    pub class_name: String,
    /// Square icon size in pixels.
    pub size: u32,
}

/// Index of a shape within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

/// Index of a record in a scene's record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// Transient interaction state of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// Not under the pointer.
    #[default]
    Idle,
    /// Under the pointer.
    Hovered,
}

/// What a shape draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// A filled polygon.
    Polygon {
        /// Vertex ring (at least three distinct vertices).
        ring: Vec<LatLng>,
        /// Resting style.
        style: ShapeStyle,
        /// Style while hovered.
        hover_style: ShapeStyle,
    },
    /// A point marker.
    Marker {
        /// Marker location.
        position: LatLng,
        /// Marker icon.
        icon: MarkerIcon,
    },
}

/// What clicking a shape selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTarget {
    /// Title shown in the detail panel.
    pub title: String,
    /// Record whose details are shown.
    pub record: RecordId,
}

/// A rendered, optionally selectable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Scene-unique identifier.
    pub id: ShapeId,
    /// Geometry and styling.
    pub kind: ShapeKind,
    /// Tooltip text.
    pub tooltip: String,
    /// Click target; `None` for purely decorative shapes.
    pub selection: Option<SelectionTarget>,
}

impl Shape {
    /// Style to draw a polygon with in the given state; `None` for markers.
    #[must_use]
    pub const fn style_for(&self, state: InteractionState) -> Option<&ShapeStyle> {
        match (&self.kind, state) {
            (ShapeKind::Polygon { style, .. }, InteractionState::Idle) => Some(style),
            (ShapeKind::Polygon { hover_style, .. }, InteractionState::Hovered) => {
                Some(hover_style)
            }
            (ShapeKind::Marker { .. }, _) => None,
        }
    }

    /// Every point the shape covers, for bounds computation.
    #[must_use]
    pub fn points(&self) -> &[LatLng] {
        match &self.kind {
            ShapeKind::Polygon { ring, .. } => ring,
            ShapeKind::Marker { position, .. } => std::slice::from_ref(position),
        }
    }
}

/// A named, togglable group of shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Stable identifier (e.g. `"komaza"`).
    pub id: String,
    /// Label shown in the layer control.
    pub label: String,
    /// Whether the layer is drawn.
    pub visible: bool,
    /// Shapes in draw order.
    pub shapes: Vec<Shape>,
}

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Map center.
    pub center: LatLng,
    /// Zoom level.
    pub zoom: u8,
    /// Bounds of every rendered point, when anything was rendered.
    pub bounds: Option<LatLngBounds>,
}

/// Emitted when the user selects an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    /// Detail panel title.
    pub title: String,
    /// Kind of the selected area.
    pub kind: AreaKind,
    /// Detail rows.
    pub detail: DetailPayload,
}

/// The complete renderable scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    /// Layers in draw order.
    pub layers: Vec<Layer>,
    /// Records referenced by shapes.
    pub records: Vec<AreaRecord>,
    /// Initial view.
    pub viewport: Viewport,
}

impl MapScene {
    /// Looks up a layer by id.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Shows or hides a layer. Returns `false` if no layer has that id.
    pub fn set_layer_visible(&mut self, id: &str, visible: bool) -> bool {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .map(|l| l.visible = visible)
            .is_some()
    }

    /// Looks up a shape by id across all layers.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.layers
            .iter()
            .flat_map(|l| &l.shapes)
            .find(|s| s.id == id)
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&AreaRecord> {
        self.records.get(id.0)
    }

    /// Shapes of visible layers, in draw order.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| &l.shapes)
    }
}
