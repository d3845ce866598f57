//! Displacement search
//!
//! Finds the circular shift of one histogram that best matches another, which
//! makes tone-scale comparison independent of transposition. The search tries
//! every displacement, so a comparison costs `n` strategy calls of `O(n)` each.

use super::HistogramCorrelation;
use crate::error::Result;
use crate::histogram::Histogram;

/// Displacement of `b` (in classes) that maximises `measure` against `a`
///
/// Ties keep the lowest displacement found. The result is reported as the
/// smallest-magnitude representative in `(-n/2, n/2]`.
///
/// # Errors
///
/// Returns `HistogramError::IncompatibleHistogram` if the histograms cannot be compared.
///
/// # Example
///
/// ```
/// use tonescale_dsp::features::correlation::{find_optimal_displacement, Intersection};
/// use tonescale_dsp::histogram::Histogram;
///
/// let mut a = Histogram::new(0.0, 1200.0, 60, true, false)?;
/// a.add(100.0)?;
/// a.add(500.0)?;
/// a.add(500.0)?;
/// let b = a.displaced(-4);
///
/// assert_eq!(find_optimal_displacement(&a, &b, &Intersection)?, -4);
/// # Ok::<(), tonescale_dsp::HistogramError>(())
/// ```
pub fn find_optimal_displacement<C>(a: &Histogram, b: &Histogram, measure: &C) -> Result<i64>
where
    C: HistogramCorrelation + ?Sized,
{
    optimal_correlation(a, b, measure).map(|(displacement, _)| displacement)
}

/// Optimal displacement together with its score
pub fn optimal_correlation<C>(a: &Histogram, b: &Histogram, measure: &C) -> Result<(i64, f64)>
where
    C: HistogramCorrelation + ?Sized,
{
    a.check_comparable(b)?;
    let n = a.number_of_classes() as i64;

    log::debug!("Searching {} displacements for optimal correlation", n);

    let mut best_displacement = 0i64;
    let mut best_score = f64::NEG_INFINITY;
    let mut scored = false;

    for displacement in 0..n {
        let score = measure.correlate(a, displacement, b)?;
        if !scored || score > best_score {
            best_displacement = displacement;
            best_score = score;
            scored = !score.is_nan();
        }
    }

    Ok((smallest_representative(best_displacement, n), best_score))
}

/// Map a displacement in `[0, n)` to `(-n/2, n/2]`
fn smallest_representative(displacement: i64, n: i64) -> i64 {
    if displacement * 2 > n {
        displacement - n
    } else {
        displacement
    }
}
