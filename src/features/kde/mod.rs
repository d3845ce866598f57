//! Kernel density accumulation
//!
//! Builds histograms from sparse samples by adding a whole kernel per sample
//! instead of a single unit increment. Circular accumulators wrap the kernel
//! across the domain seam; linear ones clip it at the edges.
//!
//! # Example
//!
//! ```
//! use tonescale_dsp::features::kde::{Kernel, KernelDensityEstimate};
//!
//! let mut kde = KernelDensityEstimate::new(0.0, 1200.0, 200, true, Kernel::Gaussian { std_dev: 12.0 })?;
//! kde.add(702.0)?;
//! kde.add(1902.0)?; // same pitch class
//!
//! let histogram = kde.to_histogram();
//! assert_eq!(histogram.max_bin_count(), histogram.count(702.0));
//! # Ok::<(), tonescale_dsp::HistogramError>(())
//! ```

pub mod kernel;

pub use kernel::Kernel;

use crate::error::{HistogramError, Result};
use crate::histogram::{BinLayout, Histogram};

/// Real-valued accumulator of kernel contributions
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensityEstimate {
    layout: BinLayout,
    kernel: Kernel,
    weights: Vec<f64>,
    accumulator: Vec<f64>,
    samples: usize,
}

impl KernelDensityEstimate {
    /// Create an empty accumulator over `[start, stop)`
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` for invalid bounds and
    /// `HistogramError::InvalidArgument` for an invalid kernel.
    pub fn new(
        start: f64,
        stop: f64,
        number_of_classes: usize,
        wraps: bool,
        kernel: Kernel,
    ) -> Result<Self> {
        let layout = BinLayout::new(start, stop, number_of_classes, wraps)?;
        Self::with_layout(layout, kernel)
    }

    /// Create an empty accumulator sharing the layout of an existing histogram
    pub fn with_layout(layout: BinLayout, kernel: Kernel) -> Result<Self> {
        let weights = kernel.weights(layout.class_width())?;
        Ok(Self {
            layout,
            kernel,
            weights,
            accumulator: vec![0.0; layout.number_of_classes()],
            samples: 0,
        })
    }

    /// Bin geometry
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Kernel added per sample
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Number of samples currently accumulated
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Raw accumulator values in class order
    pub fn values(&self) -> &[f64] {
        &self.accumulator
    }

    /// Add one kernel centred on `value`
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::OutOfRange` if a linear accumulator cannot place the value.
    pub fn add(&mut self, value: f64) -> Result<()> {
        let centre = self.locate(value)?;
        self.apply(centre, 1.0);
        self.samples += 1;
        Ok(())
    }

    /// Remove a kernel previously added at `value`
    pub fn remove(&mut self, value: f64) -> Result<()> {
        let centre = self.locate(value)?;
        self.apply(centre, -1.0);
        self.samples = self.samples.saturating_sub(1);
        Ok(())
    }

    /// Accumulated density at the class containing `value`, zero outside the domain
    pub fn value_at(&self, value: f64) -> f64 {
        self.layout
            .index_of(value)
            .map(|i| self.accumulator[i])
            .unwrap_or(0.0)
    }

    /// Sum of all accumulator values
    pub fn area(&self) -> f64 {
        self.accumulator.iter().sum()
    }

    /// Rescale so the accumulator sums to `target_area`
    ///
    /// An empty accumulator is left unchanged.
    pub fn normalize_area(&mut self, target_area: f64) -> &mut Self {
        let area = self.area();
        if area > 0.0 {
            let factor = target_area / area;
            self.accumulator.iter_mut().for_each(|v| *v *= factor);
        } else {
            log::warn!("Cannot normalize empty density estimate");
        }
        self
    }

    /// Copy the accumulator into a histogram, rounding every class to the nearest count
    pub fn to_histogram(&self) -> Histogram {
        let mut histogram = Histogram::from_layout(self.layout, false);
        for (slot, value) in histogram.counts_mut().iter_mut().zip(self.accumulator.iter()) {
            *slot = value.round() as i64;
        }
        histogram
    }

    fn locate(&self, value: f64) -> Result<usize> {
        self.layout
            .index_of(value)
            .ok_or(HistogramError::OutOfRange {
                value,
                start: self.layout.start(),
                stop: self.layout.stop(),
            })
    }

    fn apply(&mut self, centre: usize, sign: f64) {
        let n = self.accumulator.len() as i64;
        let half = (self.weights.len() / 2) as i64;
        for (k, &w) in self.weights.iter().enumerate() {
            let j = centre as i64 + k as i64 - half;
            let j = if self.layout.wraps() {
                j.rem_euclid(n)
            } else if j < 0 || j >= n {
                continue;
            } else {
                j
            };
            self.accumulator[j as usize] += sign * w;
        }
    }
}
