//! Tone scales for tuning export

use serde::{Deserialize, Serialize};

use crate::features::peaks::Peak;
use crate::pitch::{cents_to_pitch_class, CENTS_PER_OCTAVE};

/// A named set of pitch-class positions, in cents, ready for scale-file writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneScale {
    /// Scale name
    pub name: String,
    /// Positions in `[0, 1200)` cents, ascending
    pub positions: Vec<f64>,
}

impl ToneScale {
    /// Build a tone scale from arbitrary positions, folding and sorting them
    pub fn new(name: impl Into<String>, positions: impl IntoIterator<Item = f64>) -> Self {
        let mut positions: Vec<f64> = positions
            .into_iter()
            .filter(|p| p.is_finite())
            .map(cents_to_pitch_class)
            .collect();
        positions.sort_by(|a, b| a.total_cmp(b));
        Self {
            name: name.into(),
            positions,
        }
    }

    /// Build a tone scale from detected peaks
    pub fn from_peaks(name: impl Into<String>, peaks: &[Peak]) -> Self {
        Self::new(name, peaks.iter().map(|p| p.position))
    }

    /// Number of tones
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the scale has no tones
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Steps between consecutive tones, including the step back to the octave
    ///
    /// The steps of a non-empty scale sum to 1200 cents.
    pub fn intervals(&self) -> Vec<f64> {
        let mut steps: Vec<f64> = self.positions.windows(2).map(|w| w[1] - w[0]).collect();
        if let (Some(first), Some(last)) = (self.positions.first(), self.positions.last()) {
            steps.push(first + CENTS_PER_OCTAVE - last);
        }
        steps
    }
}
