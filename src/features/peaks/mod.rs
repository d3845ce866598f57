//! Peak detection over histograms
//!
//! Tone-scale extraction only depends on the [`PeakDetector`] trait; any
//! detector can be plugged in. [`LocalMaximaPeakDetector`] is the default.

pub mod peak_picking;

pub use peak_picking::LocalMaximaPeakDetector;

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// A detected peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Bin centre of the peak in domain units
    pub position: f64,
    /// Count at the peak
    pub height: f64,
}

/// Extracts peaks from a (usually smoothed) histogram
pub trait PeakDetector {
    /// Detect peaks, ranked by height (highest first)
    ///
    /// # Arguments
    ///
    /// * `histogram` - Histogram to search
    /// * `min_window` - Number of classes on each side a peak must dominate
    /// * `min_height` - Minimum peak height; below 1.0 it is relative to the highest class
    fn detect(&self, histogram: &Histogram, min_window: usize, min_height: f64) -> Vec<Peak>;
}
