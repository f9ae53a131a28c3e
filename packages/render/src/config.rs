//! Map rendering configuration.
//!
//! The default configuration is embedded at compile time from
//! `config/map.toml`; [`RenderConfig::load`] reads a replacement file.

use std::{collections::BTreeMap, path::Path};

use carbon_map_geometry_models::LatLng;
use carbon_map_render_models::{MarkerIcon, ShapeStyle};
use serde::Deserialize;

use crate::RenderError;

const DEFAULT_CONFIG: &str = include_str!("../config/map.toml");

/// Complete renderer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Category receiving projects no category lists.
    pub default_category: String,
    /// Viewport fitting parameters.
    pub viewport: ViewportConfig,
    /// The aggregate project drawn as one outer boundary.
    pub aggregate: AggregateConfig,
    /// Conservancy boundary layer.
    pub conservancies: ConservancyLayerConfig,
    /// Project category layers, in layer control order.
    pub categories: Vec<CategoryConfig>,
    /// Hover adjustments for project boundaries.
    pub project_hover: ProjectHoverConfig,
    /// Marker layer.
    pub markers: MarkerLayerConfig,
    /// Longitude clamps applied to project main boundaries.
    #[serde(default)]
    pub clip: Vec<ClipRule>,
    /// County name -> `[lat, lng]`.
    #[serde(default)]
    pub county_centers: BTreeMap<String, [f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportConfig {
    /// Map width in pixels.
    pub width: f64,
    /// Map height in pixels.
    pub height: f64,
    /// Padding applied on every side when fitting, in pixels.
    pub padding: f64,
    /// Zoom ceiling for fitted views.
    pub max_zoom: u8,
    /// `[lat, lng]` shown when nothing was rendered.
    pub default_center: [f64; 2],
    /// Zoom shown when nothing was rendered.
    pub default_zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregateConfig {
    pub project_id: String,
    pub layer: String,
    pub label: String,
    pub tooltip: String,
    pub style: ShapeStyle,
    /// `[lat, lng]` ring used when the hull is degenerate.
    pub fallback_ring: Vec<[f64; 2]>,
}

impl AggregateConfig {
    #[must_use]
    pub fn fallback_ring(&self) -> Vec<LatLng> {
        self.fallback_ring.iter().copied().map(LatLng::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConservancyLayerConfig {
    pub layer: String,
    pub label: String,
    pub style: ShapeStyle,
    pub hover: HoverRule,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryConfig {
    pub id: String,
    pub label: String,
    pub project_ids: Vec<String>,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectHoverConfig {
    pub main_boundary: HoverRule,
    pub representative: HoverRule,
}

/// Adjustment turning a resting style into its hover style.
///
/// An absolute `fill_opacity` wins over `fill_opacity_boost`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct HoverRule {
    #[serde(default)]
    pub fill_opacity: Option<f64>,
    #[serde(default)]
    pub fill_opacity_boost: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl HoverRule {
    #[must_use]
    pub fn apply(&self, style: &ShapeStyle) -> ShapeStyle {
        let fill_opacity = self.fill_opacity.unwrap_or_else(|| {
            (style.fill_opacity + self.fill_opacity_boost.unwrap_or(0.0)).min(1.0)
        });
        ShapeStyle {
            fill_opacity,
            weight: self.weight.unwrap_or(style.weight),
            ..style.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerLayerConfig {
    pub layer: String,
    pub label: String,
    pub conservancy_icon: MarkerIcon,
    pub project_icon: MarkerIcon,
}

/// Clamps a project's main boundary to a minimum longitude.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClipRule {
    pub project_id: String,
    pub min_lng: f64,
}

impl RenderConfig {
    /// Returns the embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse. It is a compile-time
    /// constant checked by the test suite.
    #[must_use]
    pub fn embedded() -> Self {
        toml::de::from_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse embedded map config: {e}"))
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// * If the text is not a valid configuration
    pub fn parse(text: &str) -> Result<Self, RenderError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the file is not a valid configuration
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        log::info!("Loaded map config from {}", path.display());
        Ok(config)
    }

    /// Category layer for a project id, falling back to the default
    /// category.
    #[must_use]
    pub fn category_for(&self, project_id: &str) -> Option<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.project_ids.iter().any(|id| id == project_id))
            .or_else(|| self.categories.iter().find(|c| c.id == self.default_category))
    }

    /// Minimum longitude configured for a project, if any.
    #[must_use]
    pub fn clip_for(&self, project_id: &str) -> Option<f64> {
        self.clip
            .iter()
            .find(|r| r.project_id == project_id)
            .map(|r| r.min_lng)
    }

    #[must_use]
    pub fn county_center(&self, county: &str) -> Option<LatLng> {
        self.county_centers.get(county).copied().map(LatLng::from)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::embedded()
    }
}
