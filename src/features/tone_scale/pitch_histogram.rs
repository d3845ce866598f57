//! Full-range pitch histograms with per-octave pitch-class views
//!
//! Every accepted value is counted both in the linear histogram and in the
//! pitch-class histogram of its octave, so octave-level questions ("which
//! octaves carry the melody?") need no second pass over the samples.

use std::ops::Deref;

use super::pitch_class::{classes_per_octave, PitchClassHistogram};
use crate::config::ToneScaleConfig;
use crate::error::{HistogramError, Result};
use crate::histogram::Histogram;
use crate::pitch::{octave_of, PitchSample, CENTS_PER_OCTAVE};

/// Linear pitch histogram in absolute cents plus one pitch-class histogram per octave
#[derive(Debug, Clone, PartialEq)]
pub struct PitchHistogram {
    histogram: Histogram,
    octaves: Vec<PitchClassHistogram>,
    first_octave: i64,
}

impl PitchHistogram {
    /// Create an empty pitch histogram over `[start, stop)` absolute cents
    ///
    /// The class width is snapped to a whole division of the octave, and `stop`
    /// to the nearest whole number of classes above `start`, so linear classes
    /// and octave slices share one width.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Range` if `stop <= start` and
    /// `HistogramError::InvalidArgument` for an unusable class width.
    pub fn new(start: f64, stop: f64, class_width: f64, ignore_out_of_range: bool) -> Result<Self> {
        let per_octave = classes_per_octave(class_width)?;
        let effective_width = CENTS_PER_OCTAVE / per_octave as f64;
        if !start.is_finite() || !stop.is_finite() || stop <= start {
            return Err(HistogramError::Range(format!(
                "pitch range [{}, {}) is empty or not finite",
                start, stop
            )));
        }
        let classes = (((stop - start) / effective_width).round() as usize).max(1);
        let stop = start + classes as f64 * effective_width;
        let histogram = Histogram::new(start, stop, classes, false, ignore_out_of_range)?;

        let first_octave = octave_of(start);
        let last_octave = octave_of(stop - effective_width / 2.0).max(first_octave);
        let octaves = (first_octave..=last_octave)
            .map(|_| PitchClassHistogram::with_classes(per_octave))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            histogram,
            octaves,
            first_octave,
        })
    }

    /// Create an empty pitch histogram from the configured range and class width
    pub fn from_config(config: &ToneScaleConfig) -> Result<Self> {
        Self::new(
            config.pitch_range_start_cents,
            config.pitch_range_stop_cents,
            config.class_width_cents,
            config.ignore_out_of_range,
        )
    }

    /// Count one pitch in absolute cents
    ///
    /// # Returns
    ///
    /// `true` if the value was counted, `false` if it was out of range and dropped.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::OutOfRange` for out-of-range values unless the
    /// histogram ignores them.
    pub fn add(&mut self, cents: f64) -> Result<bool> {
        if !self.histogram.add(cents)? {
            return Ok(false);
        }
        let slot = (octave_of(cents) - self.first_octave).clamp(0, self.octaves.len() as i64 - 1);
        self.octaves[slot as usize].add(cents)?;
        Ok(true)
    }

    /// Count every sample, returning how many were accepted
    pub fn add_samples(&mut self, samples: &[PitchSample]) -> Result<usize> {
        let mut accepted = 0;
        for sample in samples {
            if self.add(sample.pitch_cents)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Octave number of the first slice
    pub fn first_octave(&self) -> i64 {
        self.first_octave
    }

    /// Per-octave pitch-class histograms, lowest octave first
    pub fn octaves(&self) -> &[PitchClassHistogram] {
        &self.octaves
    }

    /// Pitch-class histogram of one octave number
    pub fn octave(&self, octave: i64) -> Option<&PitchClassHistogram> {
        usize::try_from(octave - self.first_octave)
            .ok()
            .and_then(|i| self.octaves.get(i))
    }

    /// Sum of the `count` octave slices carrying the most samples
    ///
    /// Equal totals favour the lower octave.
    pub fn most_energy_rich_octaves(&self, count: usize) -> Result<PitchClassHistogram> {
        let mut ranked: Vec<&PitchClassHistogram> = self.octaves.iter().collect();
        ranked.sort_by(|a, b| b.sum_frequency().cmp(&a.sum_frequency()));
        merge(&self.octaves[0], ranked.into_iter().take(count))
    }

    /// All octave slices folded into one pitch-class histogram
    pub fn pitch_class_histogram(&self) -> Result<PitchClassHistogram> {
        merge(&self.octaves[0], self.octaves.iter())
    }

    /// Underlying linear histogram
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

impl Deref for PitchHistogram {
    type Target = Histogram;

    fn deref(&self) -> &Histogram {
        &self.histogram
    }
}

fn merge<'a, I>(shape: &PitchClassHistogram, slices: I) -> Result<PitchClassHistogram>
where
    I: Iterator<Item = &'a PitchClassHistogram>,
{
    let mut merged = PitchClassHistogram::with_classes(shape.number_of_classes())?;
    for slice in slices {
        merged.add_histogram(slice)?;
    }
    Ok(merged)
}
