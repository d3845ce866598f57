//! Configuration parameters for tone-scale analysis

use serde::{Deserialize, Serialize};

use crate::error::{HistogramError, Result};
use crate::features::correlation::CorrelationMeasure;
use crate::features::smoothing::EdgeMode;

/// Tone-scale analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneScaleConfig {
    // Binning
    /// Width of one histogram class in cents (default: 6.0, 200 classes per octave)
    pub class_width_cents: f64,

    /// Lower bound of the full-range pitch histogram in absolute cents (default: 0.0)
    pub pitch_range_start_cents: f64,

    /// Upper bound of the full-range pitch histogram in absolute cents (default: 9600.0)
    /// Eight octaves above C-1, roughly 8 Hz to 2093 Hz
    pub pitch_range_stop_cents: f64,

    /// Drop samples outside the pitch range instead of failing (default: true)
    pub ignore_out_of_range: bool,

    // Accumulation
    /// Build the pitch-class histogram with Gaussian kernels instead of unit increments (default: true)
    pub use_kernel_density: bool,

    /// Standard deviation of the accumulation kernel in cents (default: 7.5)
    pub kde_std_dev_cents: f64,

    // Smoothing
    /// Standard deviation for Gaussian smoothing before peak picking, in cents (default: 6.0)
    /// Zero disables smoothing
    pub smoothing_std_dev_cents: f64,

    /// Edge handling of the smoothing window (default: Clip)
    pub smoothing_edges: EdgeMode,

    // Peak picking
    /// Minimum number of bins on each side a peak must dominate (default: 5)
    pub peak_min_window_bins: usize,

    /// Minimum peak height (default: 0.05)
    /// Values below 1.0 are relative to the highest bin, values from 1.0 up are absolute counts
    pub peak_min_height: f64,

    // Tone-scale fitting
    /// Cut-off width of synthesized peaks in cents (default: 12.0)
    /// Contributions further than ten widths from a peak are skipped
    pub fitting_width_cents: f64,

    /// Standard deviation of synthesized peaks in cents (default: 6.0)
    pub fitting_std_dev_cents: f64,

    /// Intersection score above which a histogram counts as melodic (default: 0.5)
    pub melodic_threshold: f64,

    // Comparison
    /// Correlation measure used for scale matching (default: Intersection)
    pub correlation_measure: CorrelationMeasure,
}

impl Default for ToneScaleConfig {
    fn default() -> Self {
        Self {
            class_width_cents: 6.0,
            pitch_range_start_cents: 0.0,
            pitch_range_stop_cents: 9600.0,
            ignore_out_of_range: true,
            use_kernel_density: true,
            kde_std_dev_cents: 7.5,
            smoothing_std_dev_cents: 6.0,
            smoothing_edges: EdgeMode::Clip,
            peak_min_window_bins: 5,
            peak_min_height: 0.05,
            fitting_width_cents: 12.0,
            fitting_std_dev_cents: 6.0,
            melodic_threshold: 0.5,
            correlation_measure: CorrelationMeasure::Intersection,
        }
    }
}

impl ToneScaleConfig {
    /// Check that all parameters describe a usable analysis setup
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` for an inverted pitch range and
    /// `HistogramError::InvalidArgument` for non-positive widths or negative deviations.
    pub fn validate(&self) -> Result<()> {
        if !self.class_width_cents.is_finite()
            || self.class_width_cents <= 0.0
            || self.class_width_cents > 1200.0
        {
            return Err(HistogramError::InvalidArgument(format!(
                "class width must be in (0, 1200] cents, got {}",
                self.class_width_cents
            )));
        }
        if self.pitch_range_stop_cents <= self.pitch_range_start_cents {
            return Err(HistogramError::Range(format!(
                "pitch range stop ({}) must exceed start ({})",
                self.pitch_range_stop_cents, self.pitch_range_start_cents
            )));
        }
        for (name, value) in [
            ("kde_std_dev_cents", self.kde_std_dev_cents),
            ("smoothing_std_dev_cents", self.smoothing_std_dev_cents),
            ("fitting_std_dev_cents", self.fitting_std_dev_cents),
            ("fitting_width_cents", self.fitting_width_cents),
            ("peak_min_height", self.peak_min_height),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(HistogramError::InvalidArgument(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }
        if self.fitting_std_dev_cents == 0.0 {
            return Err(HistogramError::InvalidArgument(
                "fitting_std_dev_cents must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.melodic_threshold) {
            return Err(HistogramError::InvalidArgument(format!(
                "melodic threshold must be in [0, 1], got {}",
                self.melodic_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ToneScaleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = ToneScaleConfig {
            pitch_range_start_cents: 4800.0,
            pitch_range_stop_cents: 1200.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(HistogramError::Range(_))));
    }

    #[test]
    fn test_negative_deviation_rejected() {
        let config = ToneScaleConfig {
            smoothing_std_dev_cents: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HistogramError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ToneScaleConfig =
            serde_json::from_str(r#"{"class_width_cents": 10.0}"#).unwrap();
        assert_eq!(config.class_width_cents, 10.0);
        assert_eq!(config.pitch_range_stop_cents, 9600.0);
        assert_eq!(config.correlation_measure, CorrelationMeasure::Intersection);
    }
}
