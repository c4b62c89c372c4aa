//! Pairwise star-catalog metrics.
//!
//! Asterism reads a small table of stars (right ascension, declination,
//! distance), places every star in Cartesian space and computes three N×N
//! matrices over all pairs: distance, row-normalized "topological
//! probability", and the entropy-like term `p(1 - p)`. The matrices are
//! written as text files alongside a per-star summary of row spreads.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Star table parsing and async loading |
//! | [`geom`] | Angle conversion, spherical → Cartesian, distances |
//! | [`star`] | Per-star state, row statistics, the owned [`Catalog`](star::Catalog) |
//! | [`metrics`] | Distance, probability and entropy passes |
//! | [`report`] | `R.txt` / `P.txt` / `H.txt` and the console summary |
//! | [`pipeline`] | End-to-end run |

pub mod catalog;
pub mod error;
pub mod geom;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod star;

pub use error::{Error, FormatError};
