//! Arithmetic combinators and rotation
//!
//! Binary operations require both histograms to share bounds and class count;
//! a mismatch is reported before any count is touched.

use super::Histogram;
use crate::error::Result;

/// Total mass a histogram is rescaled to by [`Histogram::normalize`]
pub const NORMALIZED_MASS: i64 = 100_000;

impl Histogram {
    /// Add the counts of `other` class by class
    pub fn add_histogram(&mut self, other: &Histogram) -> Result<&mut Self> {
        self.add_displaced(other, 0)
    }

    /// Add the counts of `other` rotated by `offset` classes
    ///
    /// Equivalent to adding `other.displaced(offset)`.
    pub fn add_displaced(&mut self, other: &Histogram, offset: i64) -> Result<&mut Self> {
        self.check_compatible(other)?;
        for i in 0..self.counts.len() {
            let source = self.layout.rotate(i, -offset);
            self.counts[i] += other.counts[source];
        }
        Ok(self)
    }

    /// Keep the larger count of each class
    pub fn max_with(&mut self, other: &Histogram) -> Result<&mut Self> {
        self.check_compatible(other)?;
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = (*mine).max(*theirs);
        }
        Ok(self)
    }

    /// Subtract the counts of `other` class by class
    pub fn subtract(&mut self, other: &Histogram) -> Result<&mut Self> {
        self.check_compatible(other)?;
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine -= *theirs;
        }
        Ok(self)
    }

    /// Multiply every count by `factor`, rounding to the nearest integer
    pub fn multiply(&mut self, factor: f64) -> &mut Self {
        for c in self.counts.iter_mut() {
            *c = (*c as f64 * factor).round() as i64;
        }
        self
    }

    /// Raise every count to `exponent`, keeping its sign, rounding to the nearest integer
    pub fn raise(&mut self, exponent: f64) -> &mut Self {
        for c in self.counts.iter_mut() {
            let magnitude = (c.unsigned_abs() as f64).powf(exponent);
            *c = (c.signum() as f64 * magnitude).round() as i64;
        }
        self
    }

    /// Add a constant to every count
    pub fn add_to_each_bin(&mut self, amount: i64) -> &mut Self {
        for c in self.counts.iter_mut() {
            *c += amount;
        }
        self
    }

    /// Rescale so the counts sum to [`NORMALIZED_MASS`]
    ///
    /// Empty (or net-negative) histograms are left unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        let total = self.sum_frequency();
        if total <= 0 {
            log::warn!("Cannot normalize histogram with total count {}", total);
            return self;
        }
        self.multiply(NORMALIZED_MASS as f64 / total as f64)
    }

    /// Subtract the lowest class count from every class
    pub fn baseline(&mut self) -> &mut Self {
        let minimum = self.min_bin_count();
        self.add_to_each_bin(-minimum)
    }

    /// Copy with counts rotated by `shift` classes
    ///
    /// The count of class `i` moves to class `i + shift`, wrapping around.
    pub fn displaced(&self, shift: i64) -> Histogram {
        let mut rotated = Histogram::with_shape_of(self);
        for (i, &c) in self.counts.iter().enumerate() {
            rotated.counts[self.layout.rotate(i, shift)] = c;
        }
        rotated
    }
}
