//! Concurrent loading of the two source documents.
//!
//! A document that is missing, unreadable or not valid JSON is logged and
//! treated as absent; the pipeline renders whatever loaded.

use std::path::Path;

use carbon_map_project::parse_document;
use carbon_map_project_models::{ProjectsDocument, SourceDocuments};

/// Loads both documents concurrently.
pub async fn load_sources(primary: &Path, comprehensive: &Path) -> SourceDocuments {
    let (primary, comprehensive) =
        tokio::join!(load_document(primary), load_document(comprehensive));

    SourceDocuments {
        primary,
        comprehensive,
    }
}

async fn load_document(path: &Path) -> Option<ProjectsDocument> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            return None;
        }
    };

    match parse_document(&text) {
        Ok(document) => {
            log::info!(
                "Loaded {} ({} projects)",
                path.display(),
                document.projects.len()
            );
            Some(document)
        }
        Err(e) => {
            log::warn!("Could not parse {}: {e}", path.display());
            None
        }
    }
}
