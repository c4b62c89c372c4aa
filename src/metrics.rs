//! Pairwise metrics over a transformed catalog.
//!
//! Three passes run in order, each finishing for every star before the next
//! starts:
//!
//! 1. distance: Euclidean distance from the star to every star (itself included);
//! 2. probability: the distance row divided by its own sum;
//! 3. entropy: `p * (1 - p)` for every probability `p` of the row.
//!
//! Each row keeps its sum, nonzero max/min and spread (see [`RowMetric`]).
//! Rows are independent within a pass, so a pass may run across threads.

use log::{debug, info, warn};
use ndarray::Array1;
use rayon::prelude::*;

use crate::error::Error;
use crate::geom::sphere::euclidean_distance;
use crate::star::{Catalog, RowMetric, StarState};

/// What to do with a star whose distance row sums to zero (N = 1, or every
/// star at the same position). Its spreads are undefined either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Record the spreads as NaN, leave the probability and entropy rows at
    /// zero, log a warning and carry on.
    #[default]
    Propagate,
    /// Abort the run with [`Error::DegenerateRow`].
    Reject,
}

/// Configuration for the metrics passes.
#[derive(Debug, Clone, Default)]
pub struct MetricsConfig {
    /// Evaluate the rows of each pass on the rayon thread pool.
    pub parallel: bool,
    pub degenerate: DegeneratePolicy,
}

/// Outcome of [`compute_metrics`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsReport {
    /// Indices of stars whose distance row sums to zero.
    pub degenerate_rows: Vec<usize>,
}

/// Distances from `origin` to every position, in order.
pub fn distance_row(origin: [f64; 3], positions: &[[f64; 3]]) -> Array1<f64> {
    positions
        .iter()
        .map(|&p| euclidean_distance(origin, p))
        .collect()
}

/// Row-normalize a distance row. A row with zero sum normalizes to all zeros.
pub fn probability_row(distance: &RowMetric) -> Array1<f64> {
    if distance.sum == 0.0 {
        return Array1::zeros(distance.len());
    }
    let sum = distance.sum;
    distance.values.mapv(|d| d / sum)
}

/// Binary entropy-like term `p(1 - p)` for each probability.
pub fn entropy_row(probability: &Array1<f64>) -> Array1<f64> {
    probability.mapv(|p| p * (1.0 - p))
}

fn for_each_star<F>(stars: &mut [StarState], parallel: bool, f: F)
where
    F: Fn(&mut StarState) + Send + Sync,
{
    if parallel {
        stars.par_iter_mut().for_each(f);
    } else {
        stars.iter_mut().for_each(f);
    }
}

/// Run the distance, probability and entropy passes over the whole catalog.
pub fn compute_metrics(
    catalog: &mut Catalog,
    config: &MetricsConfig,
) -> Result<MetricsReport, Error> {
    let positions = catalog.positions();
    debug!(
        "Distance pass over {} stars (parallel = {})",
        positions.len(),
        config.parallel
    );
    for_each_star(catalog.stars_mut(), config.parallel, |star| {
        star.distance = RowMetric::from_values(distance_row(star.position, &positions));
    });

    let degenerate_rows: Vec<usize> = catalog
        .stars()
        .iter()
        .enumerate()
        .filter(|(_, star)| star.distance.sum == 0.0)
        .map(|(i, _)| i)
        .collect();
    for &i in &degenerate_rows {
        let record = &catalog.stars()[i].record;
        match config.degenerate {
            DegeneratePolicy::Reject => {
                return Err(Error::DegenerateRow {
                    index: i,
                    catalog_number: record.catalog_number,
                });
            }
            DegeneratePolicy::Propagate => warn!(
                "Star #{} ({}, num = {}) has a zero distance sum; its spreads are undefined",
                i, record.name, record.catalog_number
            ),
        }
    }

    debug!("Probability pass");
    for_each_star(catalog.stars_mut(), config.parallel, |star| {
        star.probability = RowMetric::from_values(probability_row(&star.distance));
    });

    debug!("Entropy pass");
    for_each_star(catalog.stars_mut(), config.parallel, |star| {
        star.entropy = RowMetric::from_values(entropy_row(&star.probability.values));
    });

    info!(
        "Computed {0}x{0} distance, probability and entropy matrices",
        catalog.len()
    );
    Ok(MetricsReport { degenerate_rows })
}
