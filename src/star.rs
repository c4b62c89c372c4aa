//! Per-star derived state and the owned catalog the pipeline stages pass along.

use ndarray::{Array1, Array2};

use crate::catalog::StarRecord;
use crate::geom::sphere::{AngleConvention, dec_dms_to_rad, ra_hms_to_rad, spherical_to_cartesian};

/// The three pairwise quantities computed for every star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Distance,
    Probability,
    Entropy,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Distance, Metric::Probability, Metric::Entropy];

    /// Single-letter symbol used in file names and summary labels.
    pub fn symbol(self) -> &'static str {
        match self {
            Metric::Distance => "R",
            Metric::Probability => "P",
            Metric::Entropy => "H",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.symbol())
    }
}

/// One star's row of a pairwise metric together with its statistics.
#[derive(Debug, Clone)]
pub struct RowMetric {
    /// Value against every star of the catalog, in catalog order.
    pub values: Array1<f64>,
    /// Sum over all entries.
    pub sum: f64,
    /// Largest nonzero entry, or 0 if every entry is zero.
    pub max: f64,
    /// Smallest nonzero entry, or 0 if every entry is zero.
    pub min: f64,
    /// `(max - min) / (sum / N²)`; NaN when the row sums to zero.
    pub spread: f64,
}

impl RowMetric {
    pub fn zeros(n: usize) -> Self {
        Self::from_values(Array1::zeros(n))
    }

    /// Build a row and compute its statistics.
    pub fn from_values(values: Array1<f64>) -> Self {
        let n = values.len() as f64;
        let sum = values.sum();
        let (min, max) = values
            .iter()
            .copied()
            .filter(|&v| v != 0.0)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
            .unwrap_or((0.0, 0.0));
        let spread = if sum == 0.0 {
            f64::NAN
        } else {
            (max - min) / (sum / (n * n))
        };
        Self {
            values,
            sum,
            max,
            min,
            spread,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A catalog star with its angles, position and pairwise rows.
#[derive(Debug, Clone)]
pub struct StarState {
    pub record: StarRecord,
    pub ra_rad: f64,
    pub dec_rad: f64,
    /// Cartesian position in light-years.
    pub position: [f64; 3],
    pub distance: RowMetric,
    pub probability: RowMetric,
    pub entropy: RowMetric,
}

impl StarState {
    /// Convert a record's angles and place the star in Cartesian space.
    ///
    /// `n` is the catalog size; it sizes the rows and, under the legacy
    /// convention, scales the declination minutes and seconds.
    pub fn from_record(record: StarRecord, n: usize, convention: AngleConvention) -> Self {
        let ra_rad = ra_hms_to_rad(
            record.ra_hours,
            record.ra_minutes,
            record.ra_seconds,
            convention,
        );
        let dec_rad = dec_dms_to_rad(
            record.dec_degrees,
            record.dec_minutes,
            record.dec_seconds,
            n,
            convention,
        );
        let position = spherical_to_cartesian(ra_rad, dec_rad, record.distance_ly as f64);
        Self {
            record,
            ra_rad,
            dec_rad,
            position,
            distance: RowMetric::zeros(n),
            probability: RowMetric::zeros(n),
            entropy: RowMetric::zeros(n),
        }
    }

    pub fn row(&self, metric: Metric) -> &RowMetric {
        match metric {
            Metric::Distance => &self.distance,
            Metric::Probability => &self.probability,
            Metric::Entropy => &self.entropy,
        }
    }
}

/// All stars of one run, in table order.
#[derive(Debug, Clone)]
pub struct Catalog {
    stars: Vec<StarState>,
}

impl Catalog {
    /// Transform every record. All positions exist before any pairwise pass runs.
    pub fn from_records(records: Vec<StarRecord>, convention: AngleConvention) -> Self {
        let n = records.len();
        let stars = records
            .into_iter()
            .map(|record| StarState::from_record(record, n, convention))
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[StarState] {
        &self.stars
    }

    pub(crate) fn stars_mut(&mut self) -> &mut [StarState] {
        &mut self.stars
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.stars.iter().map(|s| s.position).collect()
    }

    /// Square matrix of one metric; row `i` is star `i`'s row.
    pub fn matrix(&self, metric: Metric) -> Array2<f64> {
        let n = self.len();
        Array2::from_shape_fn((n, n), |(i, j)| self.stars[i].row(metric).values[j])
    }
}
