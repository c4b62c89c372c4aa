//! Matrix files and the per-star console summary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::star::{Catalog, Metric, StarState};

/// Configuration for the matrix files.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory receiving `R.txt`, `P.txt` and `H.txt`.
    pub output_dir: PathBuf,
    /// Decimal places per value.
    pub precision: usize,
    /// Written after every value, including the last one of a line.
    pub delimiter: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            precision: 2,
            delimiter: "   ".to_string(),
        }
    }
}

/// Write one metric as N lines of N fixed-precision values.
pub fn write_matrix<W: Write>(
    mut out: W,
    catalog: &Catalog,
    metric: Metric,
    config: &ReportConfig,
) -> io::Result<()> {
    for star in catalog.stars() {
        for value in star.row(metric).values.iter() {
            write!(out, "{:.*}{}", config.precision, value, config.delimiter)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Write the three matrix files, overwriting earlier runs.
///
/// Files are written one after another; a failure leaves the ones already
/// written in place. Returns the paths written.
pub fn write_reports(catalog: &Catalog, config: &ReportConfig) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        let path = config.output_dir.join(metric.file_name());
        let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        write_matrix(BufWriter::new(file), catalog, metric, config)
            .map_err(|e| Error::io(&path, e))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// `Num = <n>, Name = <name>: dR = <v>, dP = <v>, dH = <v>, Hsum = <v>`
pub fn summary_line(star: &StarState) -> String {
    format!(
        "Num = {}, Name = {}: dR = {}, dP = {}, dH = {}, Hsum = {}",
        star.record.catalog_number,
        star.record.name,
        star.distance.spread,
        star.probability.spread,
        star.entropy.spread,
        star.entropy.sum
    )
}

/// Write one summary line per star.
pub fn print_summary<W: Write>(catalog: &Catalog, mut out: W) -> io::Result<()> {
    for star in catalog.stars() {
        writeln!(out, "{}", summary_line(star))?;
    }
    out.flush()
}
