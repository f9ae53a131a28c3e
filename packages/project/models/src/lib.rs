#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Source document schema and area record types.
//!
//! The two input documents (the primary project list and the comprehensive
//! document with conservancy polygons) share one schema. Every field is
//! optional: the documents are hand-curated and routinely omit data, so
//! consumers handle absence explicitly instead of failing the load.
//! Fields are also read leniently: `null` counts as absent, numbers may be
//! numeric strings (`"12,500"`), a value of the wrong type is dropped and
//! so is a malformed array element, without failing the document.
//! Boundary arrays stay as raw [`serde_json::Value`] because their entries
//! are axis-ambiguous and sometimes malformed; the geometry crate reads
//! them.

use carbon_map_geometry_models::LatLng;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// A loaded projects document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsDocument {
    /// Document-level metadata.
    #[serde(default, deserialize_with = "lenient::option")]
    pub metadata: Option<Metadata>,
    /// Registered carbon projects.
    #[serde(default, deserialize_with = "lenient::vec")]
    pub projects: Vec<Project>,
    /// Portfolio-wide credit totals.
    #[serde(default, deserialize_with = "lenient::option")]
    pub carbon_credits_summary: Option<CarbonCreditsSummary>,
    /// Portfolio-wide community benefit figures.
    #[serde(default, deserialize_with = "lenient::option")]
    pub community_benefits_summary: Option<CommunityBenefitsSummary>,
}

impl ProjectsDocument {
    /// Finds a project by its registry identifier (e.g. `"VCS1468"`).
    #[must_use]
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.project_id.as_deref() == Some(project_id))
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of projects the document describes.
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_projects: Option<u32>,
}

/// Portfolio-wide credit totals in tCO2e.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarbonCreditsSummary {
    /// Credits issued.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_issued_tco2e: Option<f64>,
    /// Credits retired.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_retired_tco2e: Option<f64>,
    /// Credits available for sale.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_available_tco2e: Option<f64>,
    /// Revenue in USD.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_revenue_usd: Option<f64>,
}

/// Portfolio-wide community benefit figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityBenefitsSummary {
    /// Share of revenue passed to communities, in percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub community_share_percent: Option<f64>,
    /// Total community investment in USD.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_investment_usd: Option<f64>,
}

/// A registered carbon project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Registry identifier, e.g. `"VCS2623"`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub project_id: Option<String>,
    /// Full project name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Short display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub short_name: Option<String>,
    /// Organization running the project.
    #[serde(default, deserialize_with = "lenient::text")]
    pub proponent: Option<String>,
    /// Registry status (e.g. "Registered").
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    /// Counties the project operates in.
    #[serde(default, deserialize_with = "lenient::vec")]
    pub counties: Vec<String>,
    /// Project area.
    #[serde(default, deserialize_with = "lenient::option")]
    pub area: Option<ProjectArea>,
    /// Representative location.
    #[serde(default, deserialize_with = "lenient::option")]
    pub coordinates: Option<Coordinates>,
    /// Boundary data, in whichever shape the source provides.
    #[serde(default, deserialize_with = "lenient::option")]
    pub boundary_coordinates: Option<BoundaryCoordinates>,
    /// Member conservancies (grouped projects only).
    #[serde(default, deserialize_with = "lenient::vec")]
    pub conservancies: Vec<Conservancy>,
}

impl Project {
    /// Display name: short name, then name, then project id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        first_non_empty([
            self.short_name.as_deref(),
            self.name.as_deref(),
            self.project_id.as_deref(),
        ])
        .unwrap_or_default()
    }

    /// Registry identifier or an empty string.
    #[must_use]
    pub fn id(&self) -> &str {
        self.project_id.as_deref().unwrap_or_default()
    }

    /// Representative center, if the source provides one.
    #[must_use]
    pub fn center(&self) -> Option<LatLng> {
        self.coordinates.as_ref().and_then(Coordinates::center)
    }
}

/// Project area figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectArea {
    /// Area in hectares.
    #[serde(default, deserialize_with = "lenient::number")]
    pub hectares: Option<f64>,
}

/// A representative location in one of the two shapes sources use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (`{lat, lng}` shape).
    #[serde(default, deserialize_with = "lenient::number")]
    pub lat: Option<f64>,
    /// Longitude (`{lat, lng}` shape).
    #[serde(default, deserialize_with = "lenient::number")]
    pub lng: Option<f64>,
    /// Latitude (`{center_lat, center_lng}` shape).
    #[serde(default, deserialize_with = "lenient::number")]
    pub center_lat: Option<f64>,
    /// Longitude (`{center_lat, center_lng}` shape).
    #[serde(default, deserialize_with = "lenient::number")]
    pub center_lng: Option<f64>,
}

impl Coordinates {
    /// The `{center_lat, center_lng}` pair if complete, else `{lat, lng}`.
    #[must_use]
    pub fn center(&self) -> Option<LatLng> {
        match (self.center_lat, self.center_lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => self.point(),
        }
    }

    /// The `{lat, lng}` pair if complete.
    #[must_use]
    pub fn point(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }
}

/// Boundary data in any of the shapes the sources use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCoordinates {
    /// Authoritative outer ring as raw pairs.
    #[serde(default)]
    pub main_boundary: Option<serde_json::Value>,
    /// Sampled boundaries of individual regions or landowners.
    #[serde(default, deserialize_with = "lenient::vec")]
    pub representative_boundaries: Vec<RepresentativeBoundary>,
    /// Simplified outer ring as raw pairs (conservancy polygons).
    #[serde(default)]
    pub simplified_coordinates: Option<serde_json::Value>,
}

/// A sampled boundary of one region or landowner within a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeBoundary {
    /// Region (usually a county) the sample belongs to.
    #[serde(default, deserialize_with = "lenient::text")]
    pub region: Option<String>,
    /// Landowner the sample belongs to.
    #[serde(default, deserialize_with = "lenient::text")]
    pub landowner: Option<String>,
    /// Full ring as raw pairs.
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
    /// Sampled points as raw pairs.
    #[serde(default)]
    pub sample_coordinates: Option<serde_json::Value>,
}

impl RepresentativeBoundary {
    /// Region name, else landowner, else an empty string.
    #[must_use]
    pub fn label(&self) -> &str {
        first_non_empty([self.region.as_deref(), self.landowner.as_deref()]).unwrap_or_default()
    }
}

/// A community conservancy inside a grouped project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conservancy {
    /// Full name, e.g. "Sera Community Conservancy".
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Short name, e.g. "Sera".
    #[serde(default, deserialize_with = "lenient::text")]
    pub short_name: Option<String>,
    /// Center location.
    #[serde(default, deserialize_with = "lenient::option")]
    pub coordinates: Option<Coordinates>,
    /// Center latitude when given at the top level.
    #[serde(default, deserialize_with = "lenient::number")]
    pub lat: Option<f64>,
    /// Center longitude when given at the top level.
    #[serde(default, deserialize_with = "lenient::number")]
    pub lng: Option<f64>,
    /// Land area in square kilometers.
    #[serde(default, deserialize_with = "lenient::number")]
    pub area_km2: Option<f64>,
    /// Land area in hectares.
    #[serde(default, deserialize_with = "lenient::number")]
    pub area_hectares: Option<f64>,
    /// Credits attributed to the conservancy.
    #[serde(default, deserialize_with = "lenient::option")]
    pub carbon_credits: Option<CarbonCredits>,
    /// Resident population.
    #[serde(default, deserialize_with = "lenient::number")]
    pub population: Option<f64>,
    /// Number of households.
    #[serde(default, deserialize_with = "lenient::number")]
    pub households: Option<f64>,
    /// Counties the conservancy spans.
    #[serde(default, deserialize_with = "lenient::vec")]
    pub counties: Vec<String>,
    /// Year or date of establishment (string or number in the sources).
    #[serde(default)]
    pub established: Option<serde_json::Value>,
    /// Boundary data.
    #[serde(default, deserialize_with = "lenient::option")]
    pub boundary_coordinates: Option<BoundaryCoordinates>,
}

impl Conservancy {
    /// Display title: name, then short name, then `"Conservancy"`.
    #[must_use]
    pub fn title(&self) -> &str {
        first_non_empty([self.name.as_deref(), self.short_name.as_deref()])
            .unwrap_or("Conservancy")
    }

    /// Center location from `coordinates.lat/lng`, falling back per
    /// component to the top-level `lat`/`lng`.
    #[must_use]
    pub fn center(&self) -> Option<LatLng> {
        let nested = self.coordinates.as_ref();
        let lat = nested.and_then(|c| c.lat).or(self.lat)?;
        let lng = nested.and_then(|c| c.lng).or(self.lng)?;
        Some(LatLng::new(lat, lng))
    }

    /// Simplified boundary field, if present.
    #[must_use]
    pub fn simplified_boundary(&self) -> Option<&serde_json::Value> {
        self.boundary_coordinates
            .as_ref()
            .and_then(|b| b.simplified_coordinates.as_ref())
            .filter(|v| v.is_array())
    }
}

/// Credits attributed to a conservancy, in tCO2e.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonCredits {
    /// Credits issued.
    #[serde(default, deserialize_with = "lenient::number")]
    pub issued_tco2e: Option<f64>,
    /// Credits retired.
    #[serde(default, deserialize_with = "lenient::number")]
    pub retired_tco2e: Option<f64>,
}

/// The two independently loaded documents the pipeline runs on.
///
/// Either may be absent (failed or missing load); the pipeline renders
/// whatever is present.
#[derive(Debug, Clone, Default)]
pub struct SourceDocuments {
    /// Primary project list with conservancy attributes.
    pub primary: Option<ProjectsDocument>,
    /// Comprehensive document with conservancy polygons.
    pub comprehensive: Option<ProjectsDocument>,
}

/// Kind of area a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AreaKind {
    /// A registered carbon project.
    Project,
    /// A conservancy inside a grouped project.
    Conservancy,
}

/// A named geographic unit selectable on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum AreaRecord {
    /// A registered carbon project.
    Project(Project),
    /// A conservancy inside a grouped project.
    Conservancy(Conservancy),
}

impl AreaRecord {
    /// Kind of area this record describes.
    #[must_use]
    pub const fn kind(&self) -> AreaKind {
        match self {
            Self::Project(_) => AreaKind::Project,
            Self::Conservancy(_) => AreaKind::Conservancy,
        }
    }
}

/// Placeholder shown for any absent detail value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One labeled row of a detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailField {
    /// Stable machine key (e.g. `"land_area"`).
    pub key: String,
    /// Human-readable label (e.g. "Land area").
    pub label: String,
    /// Formatted value, or [`NOT_AVAILABLE`].
    pub value: String,
}

/// Ordered rows describing a selected area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPayload {
    /// Rows in display order.
    pub fields: Vec<DetailField>,
}

impl DetailPayload {
    /// Appends a row.
    pub fn push(&mut self, key: &str, label: &str, value: impl Into<String>) {
        self.fields.push(DetailField {
            key: key.to_string(),
            label: label.to_string(),
            value: value.into(),
        });
    }

    /// Looks up a row value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;

    /// Elements that deserialize; `null` and non-arrays read as empty.
    pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok().flatten())
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(to_f64(&Value::deserialize(deserializer)?))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(to_f64(&Value::deserialize(deserializer)?)
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
            .map(|n| n as u32))
    }

    /// Numbers and numeric strings, with thousands separators allowed.
    fn to_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite())
    }
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}
