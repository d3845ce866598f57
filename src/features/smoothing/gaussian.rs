//! Gaussian smoothing

use super::{convolve, EdgeMode};
use crate::error::{HistogramError, Result};
use crate::histogram::Histogram;

/// Number of standard deviations covered on each side of the kernel centre (~99% of the mass)
pub const GAUSSIAN_SPAN: f64 = 2.58;

/// Discrete Gaussian kernel with `std_dev_bins` expressed in classes
///
/// The kernel has odd length `2 * ceil(2.58 * std_dev_bins) + 1` and a centre
/// weight of 1.0. Returns `[1.0]` for a non-positive deviation, or one so
/// small that its variance underflows.
pub fn gaussian_kernel(std_dev_bins: f64) -> Vec<f64> {
    let two_var = 2.0 * std_dev_bins * std_dev_bins;
    if std_dev_bins.is_nan() || std_dev_bins <= 0.0 || !two_var.is_normal() {
        return vec![1.0];
    }
    let half = (GAUSSIAN_SPAN * std_dev_bins).ceil() as i64;
    (-half..=half)
        .map(|j| (-((j * j) as f64) / two_var).exp())
        .collect()
}

impl Histogram {
    /// Gaussian smoothing with a standard deviation in domain units
    ///
    /// Windows are clipped at the domain edges. A deviation of zero returns an
    /// unchanged copy.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` for a negative or non-finite deviation.
    pub fn gaussian_smooth(&self, std_dev: f64) -> Result<Histogram> {
        self.gaussian_smooth_with_edges(std_dev, EdgeMode::Clip)
    }

    /// Gaussian smoothing with explicit edge handling
    pub fn gaussian_smooth_with_edges(&self, std_dev: f64, edges: EdgeMode) -> Result<Histogram> {
        if std_dev < 0.0 || !std_dev.is_finite() {
            return Err(HistogramError::InvalidArgument(format!(
                "standard deviation must be non-negative, got {}",
                std_dev
            )));
        }
        if std_dev == 0.0 {
            return Ok(self.clone());
        }

        let kernel = gaussian_kernel(std_dev / self.class_width());
        log::debug!(
            "Gaussian smoothing {} classes, sigma={:.2}, kernel length {}",
            self.number_of_classes(),
            std_dev,
            kernel.len()
        );
        Ok(convolve(self, &kernel, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_shape() {
        let kernel = gaussian_kernel(2.0);
        // ceil(5.16) = 6 on each side
        assert_eq!(kernel.len(), 13);
        assert_eq!(kernel[6], 1.0);
        assert_eq!(kernel[0], kernel[12]);
        assert!(kernel[5] < 1.0 && kernel[5] > kernel[4]);
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
    }

    #[test]
    fn test_negative_deviation_rejected() {
        let h = Histogram::new(0.0, 1200.0, 200, true, false).unwrap();
        assert!(matches!(
            h.gaussian_smooth(-3.0),
            Err(HistogramError::InvalidArgument(_))
        ));
        assert!(h.gaussian_smooth(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_deviation_is_noop() {
        let mut h = Histogram::new(0.0, 1200.0, 200, true, false).unwrap();
        h.add(600.0).unwrap();
        assert_eq!(h.gaussian_smooth(0.0).unwrap(), h);
    }

    #[test]
    fn test_subnormal_deviation_keeps_counts() {
        assert_eq!(gaussian_kernel(1e-320), vec![1.0]);
        assert_eq!(gaussian_kernel(1e-170), vec![1.0]);

        let mut h = Histogram::new(0.0, 1200.0, 200, true, false).unwrap();
        for i in 0..50 {
            h.add((i * 24) as f64).unwrap();
        }
        let smoothed = h.gaussian_smooth(1e-320).unwrap();
        assert_eq!(smoothed.sum_frequency(), 50);
        assert_eq!(smoothed, h);
    }

    #[test]
    fn test_mass_conserved() {
        let mut h = Histogram::new(0.0, 1200.0, 200, true, false).unwrap();
        for i in 0..500 {
            h.add((i * 37 % 1200) as f64).unwrap();
        }
        for _ in 0..200 {
            h.add(3.0).unwrap();
        }
        let n = h.number_of_classes() as i64;
        for std_dev in [1.0, 6.0, 12.5, 30.0] {
            for edges in [EdgeMode::Clip, EdgeMode::Wrap] {
                let smoothed = h.gaussian_smooth_with_edges(std_dev, edges).unwrap();
                assert!((smoothed.sum_frequency() - h.sum_frequency()).abs() <= n);
            }
        }
    }

    #[test]
    fn test_single_spike_becomes_symmetric_bump() {
        let mut h = Histogram::new(0.0, 1200.0, 200, true, false).unwrap();
        for _ in 0..1000 {
            h.add(603.0).unwrap();
        }
        let smoothed = h.gaussian_smooth(12.0).unwrap();
        assert_eq!(smoothed.max_bin_count(), smoothed.count(603.0));
        assert_eq!(smoothed.count(591.0), smoothed.count(615.0));
        assert!(smoothed.count(591.0) < smoothed.count(603.0));
        assert!(smoothed.count(591.0) > 0);
    }
}
