//! Bin layout over a bounded or circular domain
//!
//! Bins are addressed by integer index; positions are derived arithmetically
//! from the index only when a caller asks for a bin centre. The one place where
//! floating point keys turn into indices is [`BinLayout::index_of`], which runs
//! the fractional index through [`precision_guard`] before flooring.

use crate::error::{HistogramError, Result};

/// Multiplier used to absorb representation error in bin arithmetic
pub const PRECISION_FACTOR: f64 = 10_000.0;

/// Snap a value to a multiple of `1 / PRECISION_FACTOR`
///
/// `0.3 / 0.1` evaluates to `2.9999999999999996`; flooring that directly
/// would land one bin too low.
#[inline]
pub fn precision_guard(value: f64) -> f64 {
    (value * PRECISION_FACTOR).round() / PRECISION_FACTOR
}

/// Geometry of a histogram: bounds, class width and wrapping behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    start: f64,
    stop: f64,
    class_width: f64,
    number_of_classes: usize,
    wraps: bool,
}

impl BinLayout {
    /// Create a layout of `number_of_classes` equal bins over `[start, stop)`
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` if the bounds are not finite, if
    /// `stop <= start`, or if no classes are requested.
    pub fn new(start: f64, stop: f64, number_of_classes: usize, wraps: bool) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(HistogramError::Range(format!(
                "bounds must be finite, got [{}, {})",
                start, stop
            )));
        }
        if stop <= start {
            return Err(HistogramError::Range(format!(
                "stop ({}) must be greater than start ({})",
                stop, start
            )));
        }
        if number_of_classes == 0 {
            return Err(HistogramError::Range(
                "a histogram needs at least one class".to_string(),
            ));
        }

        Ok(Self {
            start,
            stop,
            class_width: (stop - start) / number_of_classes as f64,
            number_of_classes,
            wraps,
        })
    }

    /// Lower bound of the domain
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound of the domain
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Width of one class
    pub fn class_width(&self) -> f64 {
        self.class_width
    }

    /// Number of classes
    pub fn number_of_classes(&self) -> usize {
        self.number_of_classes
    }

    /// Whether the domain is circular
    pub fn wraps(&self) -> bool {
        self.wraps
    }

    /// Width of the whole domain
    pub fn span(&self) -> f64 {
        self.stop - self.start
    }

    /// Fold a value into `[start, stop)` for circular layouts
    ///
    /// Linear layouts return the value unchanged.
    pub fn fold(&self, value: f64) -> f64 {
        if self.wraps {
            self.start + (value - self.start).rem_euclid(self.span())
        } else {
            value
        }
    }

    /// Index of the bin containing `value`, if any
    ///
    /// Circular layouts fold the value first and always yield an index for
    /// finite input. Linear layouts yield `None` outside `[start, stop)`.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }

        // Domain membership is decided on the raw value, never on the guarded index
        if !self.wraps && (value < self.start || value >= self.stop) {
            return None;
        }

        let folded = self.fold(value);
        let position = precision_guard((folded - self.start) / self.class_width);
        let index = position.floor() as i64;
        let n = self.number_of_classes as i64;

        if self.wraps {
            // rem_euclid on a tiny negative remainder can produce exactly `span`
            Some(index.rem_euclid(n) as usize)
        } else {
            Some(index.clamp(0, n - 1) as usize)
        }
    }

    /// Centre of the bin at `index`
    pub fn centre(&self, index: usize) -> f64 {
        precision_guard(self.start + self.class_width * (index as f64 + 0.5))
    }

    /// Rotate an index by a signed number of bins, wrapping around the layout
    pub fn rotate(&self, index: usize, shift: i64) -> usize {
        (index as i64 + shift).rem_euclid(self.number_of_classes as i64) as usize
    }

    /// Whether two layouts share bounds and class count
    pub fn same_shape(&self, other: &BinLayout) -> bool {
        self.number_of_classes == other.number_of_classes
            && approx_eq(self.start, other.start)
            && approx_eq(self.stop, other.stop)
    }

    /// Whether two layouts share class width and class count
    pub fn comparable(&self, other: &BinLayout) -> bool {
        self.number_of_classes == other.number_of_classes
            && approx_eq(self.class_width, other.class_width)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1.0 / PRECISION_FACTOR
}
