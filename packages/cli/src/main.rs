#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the carbon project map.
//!
//! Loads the primary and comprehensive project documents, builds the map
//! scene and writes it (or a `GeoJSON` export, a selection or the
//! dashboard summary) as JSON to stdout or a file.

mod load;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use carbon_map_geometry_models::LatLng;
use carbon_map_project::summary::{DashboardSummary, summarize};
use carbon_map_project_models::SourceDocuments;
use carbon_map_render::{
    RenderConfig, build_scene,
    export::to_feature_collection,
    interaction::{HitIndex, select, select_at},
};
use carbon_map_render_models::{MapScene, ShapeId};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "carbon_map_cli", about = "Carbon project map pipeline")]
struct Cli {
    /// Primary project document
    #[arg(long, default_value = "kenya-carbon-projects.json")]
    primary: PathBuf,

    /// Comprehensive project document with conservancy boundaries
    #[arg(long, default_value = "kenya-carbon-projects-comprehensive.json")]
    comprehensive: PathBuf,

    /// Map configuration overriding the built-in one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layer ids to hide (repeatable)
    #[arg(long = "hide")]
    hidden_layers: Vec<String>,

    /// Write output here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the layered map scene
    Scene,
    /// Export the scene as a `GeoJSON` feature collection
    Geojson,
    /// Resolve a click into detail panel contents
    Select {
        /// Latitude of the clicked location
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        /// Longitude of the clicked location
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
        /// Select a shape by id instead of by location
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        shape: Option<usize>,
    },
    /// Compute the dashboard headline figures
    Summary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport {
    #[serde(flatten)]
    summary: DashboardSummary,
    credits_issued_label: String,
    credits_retired_label: String,
    community_investment_label: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::embedded(),
    };
    let sources = load::load_sources(&cli.primary, &cli.comprehensive).await;

    let json = match cli.command {
        Commands::Scene => {
            let scene = prepare_scene(&sources, &config, &cli.hidden_layers);
            serde_json::to_string_pretty(&scene)?
        }
        Commands::Geojson => {
            let scene = prepare_scene(&sources, &config, &cli.hidden_layers);
            serde_json::to_string_pretty(&to_feature_collection(&scene))?
        }
        Commands::Select { lat, lng, shape } => {
            let scene = prepare_scene(&sources, &config, &cli.hidden_layers);
            let event = match (shape, lat.zip(lng)) {
                (Some(id), _) => select(&scene, ShapeId(id)),
                (None, Some((lat, lng))) => {
                    let index = HitIndex::build(&scene);
                    select_at(&scene, &index, LatLng::new(lat, lng))
                }
                (None, None) => return Err("either --shape or --lat/--lng is required".into()),
            };
            if event.is_none() {
                log::info!("Nothing selectable there");
            }
            serde_json::to_string_pretty(&event)?
        }
        Commands::Summary => {
            let Some(primary) = &sources.primary else {
                return Err(
                    format!("{} is required for the summary", cli.primary.display()).into(),
                );
            };
            let summary = summarize(primary, &config.aggregate.project_id);
            serde_json::to_string_pretty(&SummaryReport {
                credits_issued_label: summary.credits_issued_label(),
                credits_retired_label: summary.credits_retired_label(),
                community_investment_label: summary.community_investment_label(),
                summary,
            })?
        }
    };

    write_output(cli.output.as_deref(), &json)?;

    Ok(())
}

/// Builds the scene and hides the requested layers.
fn prepare_scene(
    sources: &SourceDocuments,
    config: &RenderConfig,
    hidden_layers: &[String],
) -> MapScene {
    let mut scene = build_scene(sources, config);
    for id in hidden_layers {
        if !scene.set_layer_visible(id, false) {
            log::warn!("Unknown layer '{id}'");
        }
    }
    scene
}

fn write_output(path: Option<&Path>, json: &str) -> std::io::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, json)?;
        log::info!("Wrote {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    }
    Ok(())
}
