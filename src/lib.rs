//! # Tonescale DSP
//!
//! Circular histograms and tone-scale comparison for pitch analysis.
//!
//! ## Features
//!
//! - **Binning**: fixed-width histograms over linear or circular (octave) domains
//! - **Comparison**: intersection, city-block, Euclidean, Bhattacharyya and
//!   cross-correlation measures with a brute-force circular displacement search
//! - **Smoothing**: moving-average and Gaussian smoothing with mass preservation
//! - **Kernel density**: histograms built from Gaussian or rectangular kernels
//! - **Tone scales**: pitch-class histograms, tone-scale synthesis, melodic
//!   classification, per-octave pitch histograms and scale matching
//!
//! ## Quick Start
//!
//! ```
//! use tonescale_dsp::{analyze_pitch_samples, PitchSample, ToneScaleConfig};
//!
//! // A4, C#5 and E5 sung a few times (absolute cents, MIDI key * 100)
//! let samples: Vec<PitchSample> = [6900.0, 7300.0, 7600.0]
//!     .iter()
//!     .cycle()
//!     .take(300)
//!     .enumerate()
//!     .map(|(i, &cents)| PitchSample::new(cents + (i % 5) as f64 - 2.0, i as f64 * 0.01))
//!     .collect();
//!
//! let result = analyze_pitch_samples(&samples, &ToneScaleConfig::default())?;
//! println!("Tone scale: {:?}", result.tone_scale.positions);
//! println!("Melodic: {} ({:.2})", result.is_melodic, result.melodic_score);
//! # Ok::<(), tonescale_dsp::HistogramError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Pitch samples → Pitch histogram → Pitch-class histogram (KDE or increments)
//!               → Smoothing → Peak detection → Tone scale / scale matching
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod histogram;
pub mod pitch;

// Re-export main types
pub use analysis::result::{AnalysisFlag, AnalysisMetadata, AnalysisSummary, ToneScaleAnalysis};
pub use config::ToneScaleConfig;
pub use error::{HistogramError, Result};
pub use features::correlation::{CorrelationMeasure, HistogramCorrelation};
pub use features::peaks::{LocalMaximaPeakDetector, Peak, PeakDetector};
pub use features::tone_scale::{PitchClassHistogram, PitchHistogram, ScaleMatcher, ToneScale};
pub use histogram::Histogram;
pub use pitch::PitchSample;

/// Main analysis function
///
/// Turns a sequence of pitch estimates into a tone scale using the default
/// peak detector. See [`analyze_pitch_samples_with`].
///
/// # Errors
///
/// Returns `HistogramError` for an invalid configuration, empty input, or
/// out-of-range samples when `ignore_out_of_range` is disabled.
pub fn analyze_pitch_samples(
    samples: &[PitchSample],
    config: &ToneScaleConfig,
) -> Result<ToneScaleAnalysis> {
    analyze_pitch_samples_with(samples, config, &LocalMaximaPeakDetector)
}

/// Analysis with a caller-supplied peak detector
///
/// # Pipeline
///
/// 1. Count every sample in a full-range pitch histogram (octave slices included)
/// 2. Build the pitch-class histogram, by kernel density accumulation of the
///    accepted samples or by folding the octave slices
/// 3. Smooth it and detect peaks
/// 4. Export the peak positions as a tone scale and score how melodic the histogram is
pub fn analyze_pitch_samples_with<D>(
    samples: &[PitchSample],
    config: &ToneScaleConfig,
    detector: &D,
) -> Result<ToneScaleAnalysis>
where
    D: PeakDetector + ?Sized,
{
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!("Starting tone-scale analysis of {} pitch samples", samples.len());

    config.validate()?;

    if samples.is_empty() {
        return Err(HistogramError::InvalidArgument(
            "Empty pitch samples".to_string(),
        ));
    }

    // 1. Full-range pitch histogram
    let mut pitch_histogram = PitchHistogram::from_config(config)?;
    let mut accepted = Vec::with_capacity(samples.len());
    for sample in samples {
        if pitch_histogram.add(sample.pitch_cents)? {
            accepted.push(sample.pitch_cents);
        }
    }
    let dropped = samples.len() - accepted.len();
    if dropped > 0 {
        log::debug!("Dropped {} samples outside the pitch range", dropped);
    }

    // 2. Pitch-class histogram (a zero-width kernel degenerates to plain increments)
    let use_kernel_density = config.use_kernel_density && config.kde_std_dev_cents > 0.0;
    let pitch_class_histogram = if use_kernel_density {
        PitchClassHistogram::from_kernel_density(
            accepted.iter().copied(),
            config.class_width_cents,
            config.kde_std_dev_cents,
        )?
    } else {
        pitch_histogram.pitch_class_histogram()?
    };

    // 3. Smoothing and peak picking
    let smoothed = pitch_class_histogram.smoothed_for_peaks(config)?;
    let peaks = detector.detect(
        &smoothed,
        config.peak_min_window_bins,
        config.peak_min_height,
    );
    log::debug!("Detected {} tone-scale peaks", peaks.len());

    // 4. Tone scale and melodic classification
    let tone_scale = ToneScale::from_peaks("analysis", &peaks);
    let melodic_score = pitch_class_histogram.fitting_score(&peaks, config)?;
    let is_melodic = melodic_score > config.melodic_threshold;

    let mut flags = Vec::new();
    if dropped > 0 {
        flags.push(AnalysisFlag::SamplesDropped(dropped));
    }
    if peaks.is_empty() {
        flags.push(AnalysisFlag::NoPeaks);
    }
    if !is_melodic {
        flags.push(AnalysisFlag::NotMelodic);
    }

    let (first, last) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.timestamp), hi.max(s.timestamp))
        });

    let processing_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    Ok(ToneScaleAnalysis {
        pitch_histogram,
        pitch_class_histogram,
        smoothed,
        peaks,
        tone_scale,
        melodic_score,
        is_melodic,
        metadata: AnalysisMetadata {
            sample_count: samples.len(),
            accepted_samples: accepted.len(),
            dropped_samples: dropped,
            duration_seconds: (last - first).max(0.0),
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            accumulation: if use_kernel_density {
                "kernel_density".to_string()
            } else {
                "increment".to_string()
            },
            flags,
        },
    })
}
