use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use asterism::geom::sphere::AngleConvention;
use asterism::metrics::{DegeneratePolicy, MetricsConfig};
use asterism::pipeline::{self, PipelineConfig};
use asterism::report::{ReportConfig, print_summary};

#[derive(Parser)]
#[command(
    name = "asterism",
    about = "Pairwise distance, probability and entropy matrices for a star table"
)]
#[command(version)]
struct Cli {
    /// Star table (first line: star count, then one star per line).
    #[arg(short, long, default_value = "stars.txt")]
    input: PathBuf,

    /// Directory for R.txt, P.txt and H.txt.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Decimal places in the matrix files.
    #[arg(long, default_value = "2")]
    precision: usize,

    /// Convert minutes/seconds with the 60/3600 divisors instead of the
    /// legacy catalog-size-dependent formula.
    #[arg(long)]
    sexagesimal: bool,

    /// Compute the rows of each pass in parallel.
    #[arg(long)]
    parallel: bool,

    /// Fail when a star's distance row sums to zero instead of reporting NaN spreads.
    #[arg(long)]
    strict: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input.clone(),
            convention: if self.sexagesimal {
                AngleConvention::Sexagesimal
            } else {
                AngleConvention::Legacy
            },
            metrics: MetricsConfig {
                parallel: self.parallel,
                degenerate: if self.strict {
                    DegeneratePolicy::Reject
                } else {
                    DegeneratePolicy::Propagate
                },
            },
            report: ReportConfig {
                output_dir: self.output_dir.clone(),
                precision: self.precision,
                ..ReportConfig::default()
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.pipeline_config();
    let output = pipeline::run(&config)
        .await
        .with_context(|| format!("Failed to process {}", config.input.display()))?;

    print_summary(&output.catalog, io::stdout().lock()).context("Failed to write summary")?;
    println!("Done.");
    Ok(())
}
