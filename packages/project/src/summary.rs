//! Dashboard headline figures and per-project overview cards.

use carbon_map_project_models::{NOT_AVAILABLE, Project, ProjectsDocument};
use serde::Serialize;

use crate::format::{format_area_ha, format_millions, format_money};

/// Base URL of the Verra registry project pages.
const VERRA_PROJECT_URL: &str = "https://registry.verra.org/app/projectDetail/VCS/";

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Project count from the document metadata.
    pub total_projects: Option<u32>,
    /// Credits issued in tCO2e.
    pub credits_issued_tco2e: Option<f64>,
    /// Credits retired in tCO2e.
    pub credits_retired_tco2e: Option<f64>,
    /// Share of revenue passed to communities, in percent.
    pub community_share_percent: Option<f64>,
    /// Total invested in community benefits, in USD.
    pub community_investment_usd: Option<f64>,
    /// One card per project, in document order.
    pub projects: Vec<ProjectCard>,
}

impl DashboardSummary {
    /// Issued credits as `"3.2M"`, or the placeholder.
    #[must_use]
    pub fn credits_issued_label(&self) -> String {
        self.credits_issued_tco2e
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_millions)
    }

    /// Retired credits as `"1.1M"`, or the placeholder.
    #[must_use]
    pub fn credits_retired_label(&self) -> String {
        self.credits_retired_tco2e
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_millions)
    }

    /// Community investment as `"$1,250,000"`, or the placeholder.
    #[must_use]
    pub fn community_investment_label(&self) -> String {
        self.community_investment_usd
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_money)
    }
}

/// Overview of a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    /// Registry identifier (e.g. `"VCS2623"`).
    pub project_id: String,
    /// Display name.
    pub name: String,
    /// Organization running the project.
    pub proponent: String,
    /// Registry status.
    pub status: String,
    /// Formatted area, or the placeholder.
    pub area: String,
    /// Numeric Verra registry id (e.g. `"2623"`).
    pub registry_id: String,
    /// Verra registry page.
    pub registry_url: String,
}

impl From<&Project> for ProjectCard {
    fn from(p: &Project) -> Self {
        let registry_id = p.id().replace("VCS", "");
        Self {
            project_id: p.id().to_string(),
            name: p.display_name().to_string(),
            proponent: p.proponent.clone().unwrap_or_default(),
            status: p.status.clone().unwrap_or_default(),
            area: p
                .area
                .as_ref()
                .and_then(|a| a.hectares)
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_area_ha),
            registry_url: format!("{VERRA_PROJECT_URL}{registry_id}"),
            registry_id,
        }
    }
}

/// Computes the dashboard summary from the primary document.
///
/// Credit totals are summed over the conservancies of the aggregate
/// project; the document-level `carbon_credits_summary`, when it carries a
/// total, takes precedence.
#[must_use]
pub fn summarize(doc: &ProjectsDocument, aggregate_project_id: &str) -> DashboardSummary {
    let (mut issued, mut retired) = doc
        .project(aggregate_project_id)
        .map_or((None, None), conservancy_credit_totals);

    if let Some(summary) = &doc.carbon_credits_summary {
        issued = summary.total_issued_tco2e.or(issued);
        retired = summary.total_retired_tco2e.or(retired);
    }

    DashboardSummary {
        total_projects: doc.metadata.as_ref().and_then(|m| m.total_projects),
        credits_issued_tco2e: issued,
        credits_retired_tco2e: retired,
        community_share_percent: doc
            .community_benefits_summary
            .as_ref()
            .and_then(|c| c.community_share_percent),
        community_investment_usd: doc
            .community_benefits_summary
            .as_ref()
            .and_then(|c| c.total_investment_usd),
        projects: doc.projects.iter().map(ProjectCard::from).collect(),
    }
}

/// Sums issued and retired credits over a project's conservancies. A total
/// of zero is reported as absent.
fn conservancy_credit_totals(project: &Project) -> (Option<f64>, Option<f64>) {
    let (issued, retired) = project
        .conservancies
        .iter()
        .filter_map(|c| c.carbon_credits.as_ref())
        .fold((0.0, 0.0), |(issued, retired), cc| {
            (
                issued + cc.issued_tco2e.unwrap_or(0.0),
                retired + cc.retired_tco2e.unwrap_or(0.0),
            )
        });
    let positive = |n: f64| (n > 0.0).then_some(n);
    (positive(issued), positive(retired))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ProjectsDocument {
        serde_json::from_str(
            r#"{
                "metadata": {"total_projects": 2},
                "projects": [
                    {
                        "project_id": "VCS1468",
                        "short_name": "NRT",
                        "proponent": "Northern Rangelands Trust",
                        "status": "Registered",
                        "area": {"hectares": 2010000},
                        "conservancies": [
                            {"name": "Sera", "carbon_credits": {"issued_tco2e": 2000000, "retired_tco2e": 500000}},
                            {"name": "Kalama", "carbon_credits": {"issued_tco2e": 1200000}},
                            {"name": "Melako"}
                        ]
                    },
                    {"project_id": "VCS2623", "name": "Komaza Forestry"}
                ],
                "community_benefits_summary": {"community_share_percent": 60, "total_investment_usd": 1250000}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn sums_aggregate_conservancy_credits() {
        let summary = summarize(&document(), "VCS1468");
        assert_eq!(summary.total_projects, Some(2));
        assert_eq!(summary.credits_issued_tco2e, Some(3_200_000.0));
        assert_eq!(summary.credits_retired_tco2e, Some(500_000.0));
        assert_eq!(summary.credits_issued_label(), "3.2M");
        assert_eq!(summary.community_share_percent, Some(60.0));
        assert_eq!(summary.community_investment_label(), "$1,250,000");
    }

    #[test]
    fn document_totals_take_precedence() {
        let mut doc = document();
        doc.carbon_credits_summary = Some(carbon_map_project_models::CarbonCreditsSummary {
            total_issued_tco2e: Some(9_000_000.0),
            ..Default::default()
        });
        let summary = summarize(&doc, "VCS1468");
        assert_eq!(summary.credits_issued_tco2e, Some(9_000_000.0));
        assert_eq!(summary.credits_retired_tco2e, Some(500_000.0));
    }

    #[test]
    fn missing_aggregate_project_leaves_totals_absent() {
        let summary = summarize(&document(), "VCS0000");
        assert_eq!(summary.credits_issued_tco2e, None);
        assert_eq!(summary.credits_retired_label(), NOT_AVAILABLE);
    }

    #[test]
    fn builds_project_cards() {
        let summary = summarize(&document(), "VCS1468");
        assert_eq!(summary.projects.len(), 2);

        let nrt = &summary.projects[0];
        assert_eq!(nrt.name, "NRT");
        assert_eq!(nrt.area, "2.0M ha");
        assert_eq!(nrt.registry_id, "1468");
        assert_eq!(
            nrt.registry_url,
            "https://registry.verra.org/app/projectDetail/VCS/1468"
        );

        let komaza = &summary.projects[1];
        assert_eq!(komaza.name, "Komaza Forestry");
        assert_eq!(komaza.area, NOT_AVAILABLE);
        assert_eq!(komaza.proponent, "");
    }
}
