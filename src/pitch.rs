//! Pitch units and sample ingestion
//!
//! Absolute cents are measured from C-1 (8.1758 Hz, MIDI key 0), so MIDI key
//! `k` sits at `100 * k` cents and every octave spans 1200 cents.

use serde::{Deserialize, Serialize};

/// Cents per octave
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Frequency of absolute cent zero (C-1) in Hz
pub const REFERENCE_FREQUENCY_HZ: f64 = 8.175798915643707;

/// Convert a frequency in Hz to absolute cents
///
/// `None` for non-positive or non-finite frequencies.
///
/// # Example
///
/// ```
/// use tonescale_dsp::pitch::hz_to_absolute_cents;
///
/// // A4 is MIDI key 69
/// let cents = hz_to_absolute_cents(440.0).unwrap();
/// assert!((cents - 6900.0).abs() < 1e-6);
/// ```
pub fn hz_to_absolute_cents(hz: f64) -> Option<f64> {
    if hz > 0.0 && hz.is_finite() {
        Some(CENTS_PER_OCTAVE * (hz / REFERENCE_FREQUENCY_HZ).log2())
    } else {
        None
    }
}

/// Convert absolute cents to a frequency in Hz
pub fn absolute_cents_to_hz(cents: f64) -> f64 {
    REFERENCE_FREQUENCY_HZ * 2f64.powf(cents / CENTS_PER_OCTAVE)
}

/// Fold absolute cents into one octave, `[0, 1200)`
pub fn cents_to_pitch_class(cents: f64) -> f64 {
    let folded = cents.rem_euclid(CENTS_PER_OCTAVE);
    // rem_euclid can round up to the modulus for tiny negative input
    if folded >= CENTS_PER_OCTAVE {
        0.0
    } else {
        folded
    }
}

/// Octave number of an absolute cent value (octave 0 starts at C-1)
pub fn octave_of(cents: f64) -> i64 {
    (cents / CENTS_PER_OCTAVE).floor() as i64
}

/// One pitch estimate from a pitch tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchSample {
    /// Pitch in absolute cents
    pub pitch_cents: f64,
    /// Time of the estimate in seconds
    pub timestamp: f64,
}

impl PitchSample {
    /// Create a sample from a pitch in absolute cents
    pub fn new(pitch_cents: f64, timestamp: f64) -> Self {
        Self {
            pitch_cents,
            timestamp,
        }
    }

    /// Create a sample from a frequency in Hz
    ///
    /// `None` for unvoiced (non-positive) or invalid frequencies.
    pub fn from_hertz(hz: f64, timestamp: f64) -> Option<Self> {
        hz_to_absolute_cents(hz).map(|pitch_cents| Self::new(pitch_cents, timestamp))
    }

    /// Pitch folded into one octave
    pub fn pitch_class(&self) -> f64 {
        cents_to_pitch_class(self.pitch_cents)
    }
}
