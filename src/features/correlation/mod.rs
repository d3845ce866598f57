//! Circular histogram comparison
//!
//! Five interchangeable measures score how alike two histograms are at a given
//! circular displacement:
//! - Intersection
//! - City-block (L1)
//! - Euclidean (L2)
//! - Bhattacharyya
//! - Cross-correlation
//!
//! Every measure is higher-is-better, so the displacement search can maximise
//! any of them.

pub mod displacement;
pub mod measures;

pub use displacement::{find_optimal_displacement, optimal_correlation};
pub use measures::{Bhattacharyya, CityBlock, CrossCorrelation, Euclidean, Intersection};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::histogram::Histogram;

/// A stateless similarity measure between two histograms
pub trait HistogramCorrelation: Sync {
    /// Score `a` against `b` rotated by `displacement` classes
    ///
    /// Class `c` of `a` is paired with class `c + displacement` of `b`.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::IncompatibleHistogram` if the histograms differ
    /// in class width or class count.
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64>;
}

/// Selectable correlation measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationMeasure {
    /// Shared mass, in `[0, 1]`
    Intersection,
    /// One minus the L1 distance relative to the reference mass
    CityBlock,
    /// Negated L2 distance
    Euclidean,
    /// Log of the Bhattacharyya coefficient
    Bhattacharyya,
    /// Mean product of paired counts
    CrossCorrelation,
}

impl CorrelationMeasure {
    /// All measures, in declaration order
    pub const ALL: [CorrelationMeasure; 5] = [
        CorrelationMeasure::Intersection,
        CorrelationMeasure::CityBlock,
        CorrelationMeasure::Euclidean,
        CorrelationMeasure::Bhattacharyya,
        CorrelationMeasure::CrossCorrelation,
    ];

    /// Strategy implementing this measure
    pub fn strategy(&self) -> &'static dyn HistogramCorrelation {
        match self {
            CorrelationMeasure::Intersection => &Intersection,
            CorrelationMeasure::CityBlock => &CityBlock,
            CorrelationMeasure::Euclidean => &Euclidean,
            CorrelationMeasure::Bhattacharyya => &Bhattacharyya,
            CorrelationMeasure::CrossCorrelation => &CrossCorrelation,
        }
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            CorrelationMeasure::Intersection => "intersection",
            CorrelationMeasure::CityBlock => "city_block",
            CorrelationMeasure::Euclidean => "euclidean",
            CorrelationMeasure::Bhattacharyya => "bhattacharyya",
            CorrelationMeasure::CrossCorrelation => "cross_correlation",
        }
    }

    /// Parse a name produced by [`CorrelationMeasure::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl Default for CorrelationMeasure {
    fn default() -> Self {
        CorrelationMeasure::Intersection
    }
}

impl HistogramCorrelation for CorrelationMeasure {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        self.strategy().correlate(a, displacement, b)
    }
}
