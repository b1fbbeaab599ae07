//! Main application entry point

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use pcoord_data::{open_source, Dataset};
use pcoord_views::{export_scene, ExportFormat, ParallelCoordinatesOptions, ParallelCoordinatesPlot};

mod painter;
mod viewer;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Parallel coordinates charts for CSV and JSON data",
    long_about = None
)]
struct Args {
    /// Dataset to chart (.csv, .tsv, .txt or .json)
    input: PathBuf,

    /// Chart options as JSON (camelCase keys)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Write the chart to an .svg or .html file instead of opening a window
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Force a dimension visible (repeatable)
    #[arg(long = "show", value_name = "LABEL")]
    show: Vec<String>,

    /// Force a dimension hidden (repeatable)
    #[arg(long = "hide", value_name = "LABEL")]
    hide: Vec<String>,
}

pub(crate) fn load_dataset(path: &Path) -> Result<Dataset> {
    let source = open_source(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let dataset = source
        .load()
        .with_context(|| format!("Failed to load {}", source.source_name()))?;
    info!(
        "Loaded {} records with {} dimensions from {}",
        dataset.record_count(),
        dataset.dimension_count(),
        path.display()
    );
    Ok(dataset)
}

fn load_options(path: &Path) -> Result<ParallelCoordinatesOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid options in {}", path.display()))
}

fn chart_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Parallel Coordinates".to_string())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let dataset = load_dataset(&args.input)?;
    let options = match &args.options {
        Some(path) => load_options(path)?,
        None => ParallelCoordinatesOptions::default(),
    };

    let mut plot = ParallelCoordinatesPlot::new(Uuid::new_v4(), chart_title(&args.input))
        .with_options(options);
    for label in &args.show {
        plot.set_dimension_visible(label, true);
    }
    for label in &args.hide {
        plot.set_dimension_visible(label, false);
    }

    if let Some(out) = &args.export {
        let format = ExportFormat::from_path(out)
            .ok_or_else(|| anyhow!("Cannot export to {}: use .svg or .html", out.display()))?;
        let scene = plot.try_render(&dataset)?;
        let menu = plot.dimension_menu(&dataset);
        let title = chart_title(&args.input);
        export_scene(&scene, &title, menu.as_ref(), out, format)?;
        return Ok(());
    }

    info!("Starting parallel coordinates viewer");
    viewer::run(plot, dataset, args.input)
}
