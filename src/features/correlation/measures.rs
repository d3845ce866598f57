//! The five correlation strategies
//!
//! All of them walk every class `i` of the reference histogram and pair it with
//! class `(i + displacement) mod n` of the candidate, then aggregate.

use super::HistogramCorrelation;
use crate::error::Result;
use crate::histogram::Histogram;

/// Sum `combine(a[i], b[i + displacement])` over all classes of `a`
fn circular_sum<F>(a: &Histogram, displacement: i64, b: &Histogram, combine: F) -> Result<f64>
where
    F: Fn(i64, i64) -> f64,
{
    a.check_comparable(b)?;
    let n = a.number_of_classes() as i64;
    let shift = displacement.rem_euclid(n) as usize;
    let (ours, theirs) = (a.bin_counts(), b.bin_counts());
    let n = n as usize;

    Ok((0..n)
        .map(|i| combine(ours[i], theirs[(i + shift) % n]))
        .sum())
}

/// Histogram intersection: `sum(min(a, b)) / max(|a|, |b|)`
///
/// 1.0 for identical histograms, 0.0 when no mass is shared or both are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intersection;

impl HistogramCorrelation for Intersection {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        let shared = circular_sum(a, displacement, b, |x, y| x.min(y) as f64)?;
        let denominator = a.sum_frequency().max(b.sum_frequency());
        if denominator <= 0 {
            return Ok(0.0);
        }
        Ok(shared / denominator as f64)
    }
}

/// City-block (L1) similarity: `1 - sum(|a - b|) / |a|`
///
/// 1.0 for identical histograms; an empty reference scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityBlock;

impl HistogramCorrelation for CityBlock {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        let distance = circular_sum(a, displacement, b, |x, y| (x - y).abs() as f64)?;
        let reference = a.sum_frequency();
        if reference <= 0 {
            return Ok(0.0);
        }
        Ok(-(distance / reference as f64) + 1.0)
    }
}

/// Euclidean (L2) similarity: `-sqrt(sum((a - b)^2))`
///
/// 0.0 for identical histograms, more negative the further apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl HistogramCorrelation for Euclidean {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        let squared = circular_sum(a, displacement, b, |x, y| {
            let d = (x - y) as f64;
            d * d
        })?;
        Ok(-squared.sqrt())
    }
}

/// Bhattacharyya similarity: `ln(sum(sqrt(a * b)))`
///
/// Negative products contribute nothing. No overlap yields negative infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bhattacharyya;

impl HistogramCorrelation for Bhattacharyya {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        let coefficient = circular_sum(a, displacement, b, |x, y| {
            ((x as f64) * (y as f64)).max(0.0).sqrt()
        })?;
        Ok(coefficient.ln())
    }
}

/// Cross-correlation: `sum(a * b) / n`
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossCorrelation;

impl HistogramCorrelation for CrossCorrelation {
    fn correlate(&self, a: &Histogram, displacement: i64, b: &Histogram) -> Result<f64> {
        let products = circular_sum(a, displacement, b, |x, y| (x as f64) * (y as f64))?;
        Ok(products / a.number_of_classes() as f64)
    }
}
