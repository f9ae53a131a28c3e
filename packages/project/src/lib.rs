#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Project and conservancy records: loading, merging and presentation data.
//!
//! The primary document carries conservancy attributes; the comprehensive
//! document carries conservancy polygons. The two share no key, so
//! [`merge`] pairs them by normalized name. [`detail`] turns a record into
//! the ordered rows the detail panel shows and [`summary`] computes the
//! dashboard headline figures.

pub mod detail;
pub mod format;
pub mod merge;
pub mod summary;

use carbon_map_project_models::ProjectsDocument;
use thiserror::Error;

/// Errors that can occur while reading a source document.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a projects document from JSON text.
///
/// # Errors
///
/// Returns [`ProjectError::Json`] if the text is not a valid JSON document.
/// Mistyped fields inside the document do not fail it.
pub fn parse_document(json: &str) -> Result<ProjectsDocument, ProjectError> {
    let document: ProjectsDocument = serde_json::from_str(json)?;
    log::debug!(
        "Parsed document with {} projects ({} conservancies)",
        document.projects.len(),
        document
            .projects
            .iter()
            .map(|p| p.conservancies.len())
            .sum::<usize>()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_object() {
        let doc = parse_document("{}").unwrap();
        assert!(doc.projects.is_empty());
        assert!(doc.metadata.is_none());
    }

    #[test]
    fn odd_field_types_keep_the_document() {
        let doc = parse_document(
            r#"{
                "metadata": {"total_projects": 5.0},
                "projects": [
                    {
                        "project_id": "VCS1468",
                        "counties": null,
                        "conservancies": [{"name": "Sera", "population": "12,500"}]
                    },
                    {"project_id": "VCS2623", "counties": ["Kilifi"]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.metadata.as_ref().and_then(|m| m.total_projects), Some(5));
        assert_eq!(doc.projects.len(), 2);
        let nrt = doc.project("VCS1468").unwrap();
        assert!(nrt.counties.is_empty());
        assert_eq!(nrt.conservancies[0].population, Some(12500.0));
        assert_eq!(doc.project("VCS2623").unwrap().counties, ["Kilifi"]);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_document("{\"projects\": ["),
            Err(ProjectError::Json(_))
        ));
    }
}
