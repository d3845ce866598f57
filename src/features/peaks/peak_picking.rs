//! Local-maximum peak picking
//!
//! Finds classes that dominate a window of neighbours on both sides. Circular
//! histograms look across the domain seam, so a peak straddling 0/1200 cents is
//! found once.

use std::cmp::Ordering;

use super::{Peak, PeakDetector};
use crate::histogram::Histogram;

/// Default peak detector: windowed local maxima above a height threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMaximaPeakDetector;

impl PeakDetector for LocalMaximaPeakDetector {
    /// # Algorithm
    ///
    /// 1. Resolve the threshold (relative to the highest class when in `(0, 1)`)
    /// 2. Keep classes strictly above every left neighbour and at least equal to
    ///    every right neighbour within `min_window`; plateaus yield their first class
    /// 3. Sort by height, highest first; equal heights keep domain order
    fn detect(&self, histogram: &Histogram, min_window: usize, min_height: f64) -> Vec<Peak> {
        let counts = histogram.bin_counts();
        let n = counts.len();

        log::debug!(
            "Finding peaks in {} classes, window={}, min_height={:.3}",
            n,
            min_window,
            min_height
        );

        let max_value = histogram.max_bin_count();
        if max_value <= 0 {
            return vec![];
        }

        let threshold = if min_height > 0.0 && min_height < 1.0 {
            max_value as f64 * min_height
        } else {
            min_height
        };

        // A window reaching around the whole circle would compare a class with itself
        let window = if histogram.wraps() {
            min_window.min(n.saturating_sub(1) / 2)
        } else {
            min_window
        };

        let neighbour = |i: usize, offset: i64| -> Option<i64> {
            let j = i as i64 + offset;
            if histogram.wraps() {
                Some(counts[j.rem_euclid(n as i64) as usize])
            } else if j < 0 || j >= n as i64 {
                None
            } else {
                Some(counts[j as usize])
            }
        };

        let mut peaks = Vec::new();
        for (i, &value) in counts.iter().enumerate() {
            if value <= 0 || (value as f64) < threshold {
                continue;
            }

            let dominates = (1..=window as i64).all(|offset| {
                let left_ok = neighbour(i, -offset).map_or(true, |left| value > left);
                let right_ok = neighbour(i, offset).map_or(true, |right| value >= right);
                left_ok && right_ok
            });

            if dominates {
                peaks.push(Peak {
                    position: histogram.layout().centre(i),
                    height: value as f64,
                });
            }
        }

        // Stable sort keeps domain order among equal heights
        peaks.sort_by(|a, b| b.height.partial_cmp(&a.height).unwrap_or(Ordering::Equal));

        log::debug!("Found {} peaks", peaks.len());

        peaks
    }
}
