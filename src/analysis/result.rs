//! Analysis result types

use serde::{Deserialize, Serialize};

use crate::features::peaks::Peak;
use crate::features::tone_scale::{PitchClassHistogram, PitchHistogram, ToneScale};

/// Conditions worth surfacing to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisFlag {
    /// Some samples fell outside the pitch range and were dropped
    SamplesDropped(usize),
    /// No peaks survived peak picking
    NoPeaks,
    /// The pitch-class histogram looks like noise rather than a tone scale
    NotMelodic,
}

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Number of samples passed in
    pub sample_count: usize,

    /// Samples counted in the pitch histogram
    pub accepted_samples: usize,

    /// Samples dropped as out of range
    pub dropped_samples: usize,

    /// Time between the first and last sample in seconds
    pub duration_seconds: f64,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,

    /// Crate version that produced the result
    pub algorithm_version: String,

    /// How the pitch-class histogram was built ("kernel_density" or "increment")
    pub accumulation: String,

    /// Analysis flags
    pub flags: Vec<AnalysisFlag>,
}

/// Full result of a tone-scale analysis
#[derive(Debug, Clone)]
pub struct ToneScaleAnalysis {
    /// Full-range pitch histogram with octave slices
    pub pitch_histogram: PitchHistogram,

    /// Pitch-class histogram the tone scale is extracted from
    pub pitch_class_histogram: PitchClassHistogram,

    /// Smoothed pitch-class histogram used for peak picking
    pub smoothed: PitchClassHistogram,

    /// Detected peaks, highest first
    pub peaks: Vec<Peak>,

    /// Peak positions as an exportable tone scale
    pub tone_scale: ToneScale,

    /// Fit between the pitch-class histogram and a tone scale synthesized from the peaks (0.0-1.0)
    pub melodic_score: f64,

    /// Whether the melodic score exceeds the configured threshold
    pub is_melodic: bool,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

/// Serializable part of a [`ToneScaleAnalysis`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Exported tone scale
    pub tone_scale: ToneScale,
    /// Detected peaks, highest first
    pub peaks: Vec<Peak>,
    /// Melodic score (0.0-1.0)
    pub melodic_score: f64,
    /// Melodic classification
    pub is_melodic: bool,
    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl ToneScaleAnalysis {
    /// Drop the histograms and keep what is worth exporting
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            tone_scale: self.tone_scale.clone(),
            peaks: self.peaks.clone(),
            melodic_score: self.melodic_score,
            is_melodic: self.is_melodic,
            metadata: self.metadata.clone(),
        }
    }
}
