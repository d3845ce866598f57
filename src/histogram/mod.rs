//! Fixed-width histograms over bounded or circular domains
//!
//! A [`Histogram`] owns one signed count per class. Classes are laid out once
//! at construction and never added or removed afterwards; only counts change.
//!
//! - Binning and lookup ([`Histogram::add`], [`Histogram::count`], [`Histogram::set_count`])
//! - Descriptive statistics (see `statistics`)
//! - Arithmetic combinators and rotation (see `arithmetic`)
//!
//! # Example
//!
//! ```
//! use tonescale_dsp::histogram::Histogram;
//!
//! // One octave in 20 cent classes, wrapping around at 1200 cents
//! let mut histogram = Histogram::new(0.0, 1200.0, 60, true, false)?;
//! histogram.add(100.0)?;
//! histogram.add(1300.0)?; // same pitch class, one octave up
//!
//! assert_eq!(histogram.count(100.0), 2);
//! assert_eq!(histogram.sum_frequency(), 2);
//! # Ok::<(), tonescale_dsp::HistogramError>(())
//! ```

mod arithmetic;
pub mod layout;
mod statistics;

pub use arithmetic::NORMALIZED_MASS;
pub use layout::{precision_guard, BinLayout, PRECISION_FACTOR};

use crate::error::{HistogramError, Result};

/// Histogram with a fixed number of equal-width classes
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    layout: BinLayout,
    ignore_out_of_range: bool,
    counts: Vec<i64>,
}

impl Histogram {
    /// Create an empty histogram
    ///
    /// # Arguments
    ///
    /// * `start` - Lower bound of the domain
    /// * `stop` - Upper bound of the domain (exclusive)
    /// * `number_of_classes` - Number of equal-width classes
    /// * `wraps` - Whether the domain is circular
    /// * `ignore_out_of_range` - Drop out-of-domain values instead of returning an error
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` if `stop <= start` or no classes are requested.
    pub fn new(
        start: f64,
        stop: f64,
        number_of_classes: usize,
        wraps: bool,
        ignore_out_of_range: bool,
    ) -> Result<Self> {
        let layout = BinLayout::new(start, stop, number_of_classes, wraps)?;
        Ok(Self::from_layout(layout, ignore_out_of_range))
    }

    /// Create an empty histogram over an existing layout
    pub fn from_layout(layout: BinLayout, ignore_out_of_range: bool) -> Self {
        Self {
            layout,
            ignore_out_of_range,
            counts: vec![0; layout.number_of_classes()],
        }
    }

    /// Create a histogram from explicit per-class counts
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` for invalid bounds or an empty count vector.
    pub fn from_counts(start: f64, stop: f64, wraps: bool, counts: Vec<i64>) -> Result<Self> {
        let layout = BinLayout::new(start, stop, counts.len(), wraps)?;
        Ok(Self {
            layout,
            ignore_out_of_range: false,
            counts,
        })
    }

    /// Empty histogram with the same bounds, classes and policies as `other`
    pub fn with_shape_of(other: &Histogram) -> Self {
        Self::from_layout(other.layout, other.ignore_out_of_range)
    }

    /// Bin geometry
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Lower bound of the domain
    pub fn start(&self) -> f64 {
        self.layout.start()
    }

    /// Upper bound of the domain
    pub fn stop(&self) -> f64 {
        self.layout.stop()
    }

    /// Width of one class
    pub fn class_width(&self) -> f64 {
        self.layout.class_width()
    }

    /// Number of classes
    pub fn number_of_classes(&self) -> usize {
        self.layout.number_of_classes()
    }

    /// Whether the domain is circular
    pub fn wraps(&self) -> bool {
        self.layout.wraps()
    }

    /// Whether out-of-domain values are silently dropped
    pub fn ignores_out_of_range(&self) -> bool {
        self.ignore_out_of_range
    }

    /// Per-class counts in class order
    pub fn bin_counts(&self) -> &[i64] {
        &self.counts
    }

    /// Bin centres in class order
    pub fn keys(&self) -> Vec<f64> {
        (0..self.number_of_classes())
            .map(|i| self.layout.centre(i))
            .collect()
    }

    /// Whether `value` maps to a class of this histogram
    pub fn value_in_range(&self, value: f64) -> bool {
        self.layout.index_of(value).is_some()
    }

    /// Count one occurrence of `value`
    ///
    /// Circular histograms fold the value into the domain first.
    ///
    /// # Returns
    ///
    /// `true` if the value was counted, `false` if it was out of range and dropped.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::OutOfRange` for out-of-domain (or non-finite)
    /// values when the histogram does not ignore them.
    pub fn add(&mut self, value: f64) -> Result<bool> {
        match self.resolve(value)? {
            Some(index) => {
                self.counts[index] += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count of the class containing `value`, zero outside the domain
    pub fn count(&self, value: f64) -> i64 {
        self.layout
            .index_of(value)
            .map(|index| self.counts[index])
            .unwrap_or(0)
    }

    /// Overwrite the count of the class containing `value`
    ///
    /// Follows the same out-of-range policy as [`Histogram::add`].
    pub fn set_count(&mut self, value: f64, count: i64) -> Result<bool> {
        match self.resolve(value)? {
            Some(index) => {
                self.counts[index] = count;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count of the class at `index`
    pub fn count_at(&self, index: usize) -> Option<i64> {
        self.counts.get(index).copied()
    }

    /// Overwrite the count of the class at `index`
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` if the index is past the last class.
    pub fn set_count_at(&mut self, index: usize, count: i64) -> Result<()> {
        let n = self.counts.len();
        let slot = self.counts.get_mut(index).ok_or_else(|| {
            HistogramError::InvalidArgument(format!(
                "class index {} out of bounds for {} classes",
                index, n
            ))
        })?;
        *slot = count;
        Ok(())
    }

    /// Reset every count to zero
    pub fn clear(&mut self) -> &mut Self {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self
    }

    /// Export as `key;count` lines, one per class
    pub fn export(&self) -> String {
        let mut out = String::with_capacity(self.counts.len() * 12);
        for (index, count) in self.counts.iter().enumerate() {
            out.push_str(&format!("{};{}\n", self.layout.centre(index), count));
        }
        out
    }

    /// Fail unless `other` shares bounds and class count
    pub(crate) fn check_compatible(&self, other: &Histogram) -> Result<()> {
        if self.layout.same_shape(&other.layout) {
            Ok(())
        } else {
            Err(HistogramError::IncompatibleHistogram(format!(
                "[{}, {}) with {} classes vs [{}, {}) with {} classes",
                self.start(),
                self.stop(),
                self.number_of_classes(),
                other.start(),
                other.stop(),
                other.number_of_classes()
            )))
        }
    }

    /// Fail unless `other` shares class width and class count
    pub(crate) fn check_comparable(&self, other: &Histogram) -> Result<()> {
        if self.layout.comparable(&other.layout) {
            Ok(())
        } else {
            Err(HistogramError::IncompatibleHistogram(format!(
                "class width {} x {} vs class width {} x {}",
                self.class_width(),
                self.number_of_classes(),
                other.class_width(),
                other.number_of_classes()
            )))
        }
    }

    pub(crate) fn counts_mut(&mut self) -> &mut [i64] {
        &mut self.counts
    }

    /// Map a value to its class index under the out-of-range policy
    fn resolve(&self, value: f64) -> Result<Option<usize>> {
        match self.layout.index_of(value) {
            Some(index) => Ok(Some(index)),
            None if self.ignore_out_of_range => {
                log::trace!(
                    "Dropping value {} outside [{}, {})",
                    value,
                    self.start(),
                    self.stop()
                );
                Ok(None)
            }
            None => Err(HistogramError::OutOfRange {
                value,
                start: self.start(),
                stop: self.stop(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch_classes() -> Histogram {
        Histogram::new(0.0, 1200.0, 60, true, false).unwrap()
    }

    #[test]
    fn test_construction_rejects_inverted_range() {
        let result = Histogram::new(100.0, 50.0, 10, false, false);
        assert!(matches!(result, Err(HistogramError::Range(_))));
    }

    #[test]
    fn test_construction_populates_all_classes() {
        let histogram = pitch_classes();
        assert_eq!(histogram.number_of_classes(), 60);
        assert_eq!(histogram.keys().len(), 60);
        assert_eq!(histogram.class_width(), 20.0);
        assert_eq!(histogram.sum_frequency(), 0);
        assert_eq!(histogram.keys()[0], 10.0);
        assert_eq!(histogram.keys()[59], 1190.0);
    }

    #[test]
    fn test_add_increments_exactly_one_class() {
        let mut histogram = Histogram::new(0.0, 1000.0, 100, false, false).unwrap();
        for value in [5.0, 123.4, 500.0, 999.9] {
            let before = histogram.bin_counts().to_vec();
            assert!(histogram.add(value).unwrap());
            let after = histogram.bin_counts();
            let changed: Vec<usize> = (0..before.len())
                .filter(|&i| before[i] != after[i])
                .collect();
            assert_eq!(changed.len(), 1);
            assert_eq!(after[changed[0]] - before[changed[0]], 1);
            assert_eq!(histogram.count(value), after[changed[0]]);
        }
    }

    #[test]
    fn test_wrap_invariance() {
        let mut histogram = pitch_classes();
        for k in -3..=3 {
            histogram.add(250.0 + 1200.0 * k as f64).unwrap();
        }
        assert_eq!(histogram.count(250.0), 7);
        assert_eq!(histogram.sum_frequency(), 7);
    }

    #[test]
    fn test_concrete_pitch_class_scenario() {
        let mut histogram = pitch_classes();
        for _ in 0..10 {
            histogram.add(100.0).unwrap();
        }
        for _ in 0..5 {
            histogram.add(700.0).unwrap();
        }
        assert_eq!(histogram.count(100.0), 10);
        assert_eq!(histogram.count(700.0), 5);
        assert_eq!(histogram.sum_frequency(), 15);
    }

    #[test]
    fn test_out_of_range_policy() {
        let mut strict = Histogram::new(100.0, 200.0, 10, false, false).unwrap();
        assert!(matches!(
            strict.add(250.0),
            Err(HistogramError::OutOfRange { .. })
        ));
        assert!(strict.add(f64::NAN).is_err());
        assert_eq!(strict.sum_frequency(), 0);

        let mut lenient = Histogram::new(100.0, 200.0, 10, false, true).unwrap();
        assert!(!lenient.add(250.0).unwrap());
        assert!(!lenient.add(-5.0).unwrap());
        assert_eq!(lenient.sum_frequency(), 0);
        assert_eq!(lenient.count(250.0), 0);
    }

    #[test]
    fn test_linear_domain_edges() {
        let mut low = Histogram::new(100.0, 200.0, 10, false, false).unwrap();
        assert!(matches!(
            low.add(99.99999),
            Err(HistogramError::OutOfRange { .. })
        ));
        assert!(!low.value_in_range(99.99999));
        assert_eq!(low.sum_frequency(), 0);

        let mut high = Histogram::new(0.0, 1200.0, 60, false, false).unwrap();
        assert!(high.add(1199.99999).unwrap());
        assert_eq!(high.count_at(59), Some(1));
        assert_eq!(high.cumulative_frequency(1199.99999), 1);
    }

    #[test]
    fn test_set_count() {
        let mut histogram = pitch_classes();
        histogram.set_count(430.0, 42).unwrap();
        assert_eq!(histogram.count(430.0), 42);
        assert_eq!(histogram.count(1630.0), 42);
        histogram.set_count_at(0, 3).unwrap();
        assert_eq!(histogram.count(0.0), 3);
        assert!(histogram.set_count_at(60, 1).is_err());
    }

    #[test]
    fn test_with_shape_of_is_empty_clone() {
        let mut histogram = pitch_classes();
        histogram.add(300.0).unwrap();
        let clone = Histogram::with_shape_of(&histogram);
        assert_eq!(clone.sum_frequency(), 0);
        assert_eq!(clone.layout(), histogram.layout());
    }

    #[test]
    fn test_export() {
        let mut histogram = Histogram::new(0.0, 40.0, 2, false, false).unwrap();
        histogram.add(25.0).unwrap();
        assert_eq!(histogram.export(), "10;0\n30;1\n");
    }

    #[test]
    fn test_clear() {
        let mut histogram = pitch_classes();
        histogram.add(10.0).unwrap();
        histogram.clear();
        assert_eq!(histogram.sum_frequency(), 0);
    }
}
