//! Detail panel payloads for selected areas.
//!
//! Every row is always present; absent source values render as
//! [`NOT_AVAILABLE`] so the panel layout does not shift between records.

use carbon_map_project_models::{
    AreaRecord, Conservancy, DetailPayload, NOT_AVAILABLE, Project,
};

use crate::format::{format_area_ha, format_area_km2, format_number};

/// Builds the detail rows for any area record.
#[must_use]
pub fn describe(record: &AreaRecord) -> DetailPayload {
    match record {
        AreaRecord::Project(p) => project_detail(p),
        AreaRecord::Conservancy(c) => conservancy_detail(c),
    }
}

/// Detail rows for a conservancy.
#[must_use]
pub fn conservancy_detail(c: &Conservancy) -> DetailPayload {
    let land_area = c.area_km2.map_or_else(
        || {
            c.area_hectares.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |ha| format!("{} (ha)", format_area_ha(ha)),
            )
        },
        format_area_km2,
    );

    let credits = c.carbon_credits.as_ref();
    let issued = credits.and_then(|cc| cc.issued_tco2e);
    let retired = credits.and_then(|cc| cc.retired_tco2e);

    let mut payload = DetailPayload::default();
    payload.push("land_area", "Land area", land_area);
    payload.push("carbon_issued", "Carbon issued", tonnes(issued));
    payload.push("carbon_retired", "Carbon retired", tonnes(retired));
    payload.push("households", "Households", count(c.households));
    payload.push("population", "Population", count(c.population));
    payload.push("counties", "Counties", counties(&c.counties));
    payload.push("established", "Established", established(c.established.as_ref()));
    payload
}

/// Detail rows for a project.
#[must_use]
pub fn project_detail(p: &Project) -> DetailPayload {
    let area = p
        .area
        .as_ref()
        .and_then(|a| a.hectares)
        .map_or_else(|| NOT_AVAILABLE.to_string(), format_area_ha);

    let mut payload = DetailPayload::default();
    payload.push(
        "project",
        "Project",
        format!("{} ({})", p.display_name(), p.id()),
    );
    payload.push("area", "Area", area);
    payload.push("counties", "Counties", counties(&p.counties));
    payload.push(
        "status",
        "Status",
        p.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE),
    );
    payload
}

fn tonnes(value: Option<f64>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |n| format!("{} tCO2e", format_number(n)),
    )
}

fn count(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_number)
}

fn counties(counties: &[String]) -> String {
    if counties.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        counties.join(", ")
    }
}

fn established(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
