//! Histogram smoothing
//!
//! Two convolution smoothers over class counts:
//! - Moving average, flat or triangularly weighted
//! - Gaussian kernel
//!
//! Both rescale the result so the total count is preserved up to rounding, and
//! both leave the input untouched and return a new histogram.

pub mod gaussian;
pub mod moving_average;

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// How the smoothing window behaves at the domain edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Drop window positions outside the domain and renormalise the remaining weights
    ///
    /// Applied to circular histograms too, matching exported scale files
    /// produced by earlier tooling.
    #[default]
    Clip,
    /// Wrap the window around circular histograms
    ///
    /// Linear histograms still clip.
    Wrap,
}

/// Convolve class counts with a symmetric odd-length kernel and rescale to the original mass
pub(crate) fn convolve(histogram: &Histogram, kernel: &[f64], edges: EdgeMode) -> Histogram {
    let counts = histogram.bin_counts();
    let n = counts.len() as i64;
    let half = (kernel.len() / 2) as i64;
    let wrap = edges == EdgeMode::Wrap && histogram.wraps();

    let mut smoothed = vec![0.0f64; counts.len()];
    for (i, slot) in smoothed.iter_mut().enumerate() {
        let mut acc = 0.0;
        let mut weight = 0.0;
        for (k, &w) in kernel.iter().enumerate() {
            let j = i as i64 + k as i64 - half;
            let j = if wrap {
                j.rem_euclid(n)
            } else if j < 0 || j >= n {
                continue;
            } else {
                j
            };
            acc += w * counts[j as usize] as f64;
            weight += w;
        }
        if weight > 0.0 {
            *slot = acc / weight;
        }
    }

    let original_total = histogram.sum_frequency() as f64;
    let smoothed_total: f64 = smoothed.iter().sum();
    let scale = if smoothed_total != 0.0 {
        original_total / smoothed_total
    } else {
        0.0
    };

    let mut result = Histogram::with_shape_of(histogram);
    for (slot, value) in result.counts_mut().iter_mut().zip(smoothed.iter()) {
        *slot = (value * scale).round() as i64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kernel() {
        let h = Histogram::from_counts(0.0, 100.0, false, vec![1, 5, 0, 2]).unwrap();
        assert_eq!(convolve(&h, &[1.0], EdgeMode::Clip), h);
    }

    #[test]
    fn test_clip_versus_wrap() {
        let h = Histogram::from_counts(0.0, 1200.0, true, vec![9, 0, 0, 0, 0, 0]).unwrap();
        let clipped = convolve(&h, &[1.0, 1.0, 1.0], EdgeMode::Clip);
        let wrapped = convolve(&h, &[1.0, 1.0, 1.0], EdgeMode::Wrap);
        // Clipping never spreads mass across the 0/1200 seam
        assert_eq!(clipped.bin_counts()[5], 0);
        assert!(wrapped.bin_counts()[5] > 0);
        assert_eq!(wrapped.bin_counts()[5], wrapped.bin_counts()[1]);
    }

    #[test]
    fn test_wrap_on_linear_histogram_clips() {
        let h = Histogram::from_counts(0.0, 60.0, false, vec![9, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(
            convolve(&h, &[1.0, 1.0, 1.0], EdgeMode::Wrap),
            convolve(&h, &[1.0, 1.0, 1.0], EdgeMode::Clip)
        );
    }
}
