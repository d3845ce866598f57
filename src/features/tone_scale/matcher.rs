//! Transposition-invariant scale matching
//!
//! A [`ScaleMatcher`] owns a set of named reference pitch-class histograms and
//! ranks them against a query by optimal circular correlation. References are
//! scored in parallel; each worker only reads its own reference and the query.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::pitch_class::PitchClassHistogram;
use crate::config::ToneScaleConfig;
use crate::error::{HistogramError, Result};
use crate::features::correlation::{optimal_correlation, CorrelationMeasure};

/// Score of one reference against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleMatch {
    /// Reference name
    pub name: String,
    /// Best displacement in classes: class `i` of the query is paired with
    /// class `i + displacement` of the reference
    ///
    /// A query that is the reference transposed up by `k` classes reports `-k`.
    pub displacement: i64,
    /// Same displacement in cents
    pub displacement_cents: f64,
    /// Correlation score at that rotation
    pub score: f64,
}

/// Ranks reference tone scales against query histograms
#[derive(Debug, Clone)]
pub struct ScaleMatcher {
    measure: CorrelationMeasure,
    references: Vec<(String, PitchClassHistogram)>,
}

impl ScaleMatcher {
    /// Create an empty matcher using `measure`
    pub fn new(measure: CorrelationMeasure) -> Self {
        Self {
            measure,
            references: Vec::new(),
        }
    }

    /// Create an empty matcher using the configured correlation measure
    pub fn from_config(config: &ToneScaleConfig) -> Self {
        Self::new(config.correlation_measure)
    }

    /// Correlation measure in use
    pub fn measure(&self) -> CorrelationMeasure {
        self.measure
    }

    /// Register a reference histogram
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::IncompatibleHistogram` if its class layout differs
    /// from the references already registered.
    pub fn add_reference(&mut self, name: impl Into<String>, histogram: PitchClassHistogram) -> Result<()> {
        if let Some((_, first)) = self.references.first() {
            if first.number_of_classes() != histogram.number_of_classes() {
                return Err(HistogramError::IncompatibleHistogram(format!(
                    "reference has {} classes, matcher uses {}",
                    histogram.number_of_classes(),
                    first.number_of_classes()
                )));
            }
        }
        self.references.push((name.into(), histogram));
        Ok(())
    }

    /// Number of registered references
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether no references are registered
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Score every reference against `query`, best first
    ///
    /// Equal scores keep registration order.
    pub fn rank(&self, query: &PitchClassHistogram) -> Result<Vec<ScaleMatch>> {
        log::debug!(
            "Ranking {} reference scales with {}",
            self.references.len(),
            self.measure.name()
        );

        let strategy = self.measure.strategy();
        let mut matches = self
            .references
            .par_iter()
            .map(|(name, reference)| {
                let (displacement, score) = optimal_correlation(query, reference, strategy)?;
                Ok(ScaleMatch {
                    name: name.clone(),
                    displacement,
                    displacement_cents: displacement as f64 * reference.class_width(),
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(matches)
    }

    /// Best-scoring reference, if any are registered
    pub fn best(&self, query: &PitchClassHistogram) -> Result<Option<ScaleMatch>> {
        Ok(self.rank(query)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(positions: &[f64]) -> PitchClassHistogram {
        let n = positions.len();
        PitchClassHistogram::create_tone_scale(positions, &vec![100.0; n], &vec![12.0; n], &vec![6.0; n], 6.0)
            .unwrap()
    }

    fn matcher() -> ScaleMatcher {
        let mut matcher = ScaleMatcher::new(CorrelationMeasure::Intersection);
        matcher
            .add_reference("major", scale(&[3.0, 201.0, 399.0, 501.0, 699.0, 903.0, 1101.0]))
            .unwrap();
        matcher
            .add_reference("pentatonic", scale(&[3.0, 201.0, 399.0, 699.0, 903.0]))
            .unwrap();
        matcher
            .add_reference("whole tone", scale(&[3.0, 201.0, 399.0, 603.0, 801.0, 999.0]))
            .unwrap();
        matcher
    }

    #[test]
    fn test_transposed_query_matches_reference() {
        let matcher = matcher();
        // Pentatonic transposed up by 30 classes (180 cents)
        let query = PitchClassHistogram::from_histogram(
            scale(&[3.0, 201.0, 399.0, 699.0, 903.0]).displaced(30),
        )
        .unwrap();
        let ranked = matcher.rank(&query).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "pentatonic");
        assert!((ranked[0].score - 1.0).abs() < 1e-12);
        // query[i] meets reference[i + d], so the reference sits 30 classes lower
        assert_eq!(ranked[0].displacement, -30);
        assert_eq!(ranked[0].displacement_cents, -180.0);
        assert!(ranked[1].score <= ranked[0].score);
    }

    #[test]
    fn test_displacement_pairs_query_with_shifted_reference() {
        let matcher = matcher();
        let reference = scale(&[3.0, 201.0, 399.0, 699.0, 903.0]);
        let query = PitchClassHistogram::from_histogram(reference.displaced(30)).unwrap();
        let best = matcher.best(&query).unwrap().unwrap();
        assert_eq!(best.displacement, -30);
        // query[i] lines up with reference[i + displacement] in every class
        let n = query.number_of_classes() as i64;
        for i in 0..n {
            let j = (i + best.displacement).rem_euclid(n) as usize;
            assert_eq!(query.count_at(i as usize), reference.count_at(j));
        }
    }

    #[test]
    fn test_rejects_mismatched_reference() {
        let mut matcher = matcher();
        let coarse = PitchClassHistogram::new(20.0).unwrap();
        assert!(matcher.add_reference("coarse", coarse).is_err());
        assert_eq!(matcher.len(), 3);
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = ScaleMatcher::new(CorrelationMeasure::CityBlock);
        assert!(matcher.is_empty());
        let query = PitchClassHistogram::new(6.0).unwrap();
        assert_eq!(matcher.best(&query).unwrap(), None);
    }
}
