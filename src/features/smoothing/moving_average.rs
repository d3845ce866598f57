//! Moving-average smoothing

use super::{convolve, EdgeMode};
use crate::error::{HistogramError, Result};
use crate::histogram::Histogram;

/// Moving-average kernel of `2 * window + 1` weights summing to one
///
/// The weighted variant is triangular: the centre class carries `1 / (window + 1)`
/// of the mass and weights fall off linearly towards the window edges.
pub fn moving_average_kernel(weighted: bool, window: usize) -> Vec<f64> {
    let len = 2 * window + 1;
    if weighted {
        let norm = ((window + 1) * (window + 1)) as f64;
        (0..len)
            .map(|k| {
                let distance = (k as i64 - window as i64).unsigned_abs() as usize;
                (window + 1 - distance) as f64 / norm
            })
            .collect()
    } else {
        vec![1.0 / len as f64; len]
    }
}

impl Histogram {
    /// Moving-average smoothing over `window` classes on each side
    ///
    /// Windows are clipped at the domain edges. See [`Histogram::smooth_with_edges`].
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` for a negative window.
    pub fn smooth(&self, weighted: bool, window: i32) -> Result<Histogram> {
        self.smooth_with_edges(weighted, window, EdgeMode::Clip)
    }

    /// Moving-average smoothing with explicit edge handling
    ///
    /// A window of zero returns an unchanged copy.
    pub fn smooth_with_edges(&self, weighted: bool, window: i32, edges: EdgeMode) -> Result<Histogram> {
        if window < 0 {
            return Err(HistogramError::InvalidArgument(format!(
                "smoothing window must be non-negative, got {}",
                window
            )));
        }
        if window == 0 {
            return Ok(self.clone());
        }

        log::debug!(
            "Smoothing {} classes with {} window {} ({:?} edges)",
            self.number_of_classes(),
            if weighted { "weighted" } else { "flat" },
            window,
            edges
        );

        let kernel = moving_average_kernel(weighted, window as usize);
        Ok(convolve(self, &kernel, edges))
    }
}
