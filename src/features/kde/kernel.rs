//! Accumulation kernels

use serde::{Deserialize, Serialize};

use crate::error::{HistogramError, Result};
use crate::features::smoothing::gaussian::gaussian_kernel;

/// Shape added to the accumulator for every sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Kernel {
    /// Gaussian bump with a standard deviation in domain units
    Gaussian {
        /// Standard deviation
        std_dev: f64,
    },
    /// Flat block of height 1.0 spanning `width` domain units
    Rectangular {
        /// Total width
        width: f64,
    },
}

impl Kernel {
    /// Discretised kernel weights for a given class width
    ///
    /// Always of odd length with the centre weight at 1.0.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` for a non-positive or non-finite size.
    pub fn weights(&self, class_width: f64) -> Result<Vec<f64>> {
        match *self {
            Kernel::Gaussian { std_dev } => {
                if std_dev <= 0.0 || !std_dev.is_finite() {
                    return Err(HistogramError::InvalidArgument(format!(
                        "Gaussian kernel needs a positive standard deviation, got {}",
                        std_dev
                    )));
                }
                Ok(gaussian_kernel(std_dev / class_width))
            }
            Kernel::Rectangular { width } => {
                if width <= 0.0 || !width.is_finite() {
                    return Err(HistogramError::InvalidArgument(format!(
                        "rectangular kernel needs a positive width, got {}",
                        width
                    )));
                }
                let half = (width / (2.0 * class_width)).floor() as usize;
                Ok(vec![1.0; 2 * half + 1])
            }
        }
    }
}
