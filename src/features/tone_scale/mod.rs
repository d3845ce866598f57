//! Tone-scale histograms
//!
//! Pitch-specific layers over the binning engine:
//! - One-octave circular pitch-class histograms with tone-scale synthesis
//! - Full-range pitch histograms with per-octave slices
//! - Tone scales for tuning export
//! - Transposition-invariant scale matching

pub mod matcher;
pub mod pitch_class;
pub mod pitch_histogram;
pub mod scale;

pub use matcher::{ScaleMatch, ScaleMatcher};
pub use pitch_class::PitchClassHistogram;
pub use pitch_histogram::PitchHistogram;
pub use scale::ToneScale;
