//! Load → transform → compute → write.

use std::path::PathBuf;

use log::info;

use crate::catalog::load_catalog;
use crate::error::Error;
use crate::geom::sphere::AngleConvention;
use crate::metrics::{MetricsConfig, MetricsReport, compute_metrics};
use crate::report::{ReportConfig, write_reports};
use crate::star::Catalog;

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Star table to read.
    pub input: PathBuf,
    pub convention: AngleConvention,
    pub metrics: MetricsConfig,
    pub report: ReportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("stars.txt"),
            convention: AngleConvention::default(),
            metrics: MetricsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub catalog: Catalog,
    pub metrics: MetricsReport,
    /// Matrix files written, in R, P, H order.
    pub files: Vec<PathBuf>,
}

/// Run the whole pipeline. Nothing is written unless the table loads cleanly
/// and every pass completes.
pub async fn run(config: &PipelineConfig) -> Result<PipelineOutput, Error> {
    let records = load_catalog(&config.input).await?;
    info!(
        "Loaded {} stars from {}",
        records.len(),
        config.input.display()
    );

    let mut catalog = Catalog::from_records(records, config.convention);
    let metrics = compute_metrics(&mut catalog, &config.metrics)?;
    let files = write_reports(&catalog, &config.report)?;

    Ok(PipelineOutput {
        catalog,
        metrics,
        files,
    })
}
