//! Markdown speedup report and per query charts built from benchmark runs.

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod markdown;
pub mod plot;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod format_test;

use cli::{InputArgs, PlotsCli, ReportCli};
use config::{ConfigErrors, ReportConfig};
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::info;
use tsbench_analysis::Analysis;
use tsbench_ingest::{collect_inputs, load_runs, IngestError};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to draw {path}: {message}")]
    Plot { path: PathBuf, message: String },
}

/// Collect, load and analyse every input, failing on the first unreadable file.
pub fn load_analysis(input: &InputArgs) -> Result<Analysis, ReportError> {
    let paths = collect_inputs(&input.files, &input.glob)?;
    info!(
        "Processing {} benchmark files (averaging by dbType)...",
        paths.len()
    );

    let runs = load_runs(&paths)?;
    Ok(Analysis::from_runs(runs))
}

pub fn generate_report(cli: &ReportCli) -> Result<PathBuf, ReportError> {
    let analysis = load_analysis(&cli.input)?;
    let report = markdown::render(&analysis);

    fs::write(&cli.output, report).map_err(|source| ReportError::Write {
        path: cli.output.clone(),
        source,
    })?;
    info!("Speedup report generated: {}", cli.output.display());

    Ok(cli.output.clone())
}

pub fn generate_plots(cli: &PlotsCli) -> Result<Vec<PathBuf>, ReportError> {
    // config problems surface before any input is read
    let config = ReportConfig::load(cli.config.as_deref())?;
    let palette = config.palette()?;

    let analysis = load_analysis(&cli.input)?;
    let plots = plot::render_plots(&analysis.queries, &cli.output, &palette, &config.plot)?;
    info!(
        "Generated {} plots in {}",
        plots.len(),
        cli.output.display()
    );

    Ok(plots)
}
