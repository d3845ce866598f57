//! One-octave circular pitch-class histograms
//!
//! A [`PitchClassHistogram`] is a [`Histogram`] fixed to `[0, 1200)` cents with
//! wrapping enabled. On top of the plain histogram it can synthesize theoretical
//! tone scales from peak lists and judge whether its own content is melodic.

use std::ops::{Deref, DerefMut};

use super::scale::ToneScale;
use crate::config::ToneScaleConfig;
use crate::error::{HistogramError, Result};
use crate::features::correlation::{HistogramCorrelation, Intersection};
use crate::features::kde::{Kernel, KernelDensityEstimate};
use crate::features::peaks::{Peak, PeakDetector};
use crate::histogram::Histogram;
use crate::pitch::{cents_to_pitch_class, CENTS_PER_OCTAVE};

/// Synthesized bumps are skipped further than this many widths from their peak
const BUMP_CUTOFF_WIDTHS: f64 = 10.0;

/// Circular histogram over one octave
#[derive(Debug, Clone, PartialEq)]
pub struct PitchClassHistogram {
    histogram: Histogram,
}

impl PitchClassHistogram {
    /// Empty pitch-class histogram with classes of roughly `class_width` cents
    ///
    /// The class count is `round(1200 / class_width)`, so the effective width
    /// always tiles the octave exactly.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` for a non-positive width or one
    /// wider than the octave.
    pub fn new(class_width: f64) -> Result<Self> {
        Self::with_classes(classes_per_octave(class_width)?)
    }

    /// Empty pitch-class histogram with `number_of_classes` classes
    pub fn with_classes(number_of_classes: usize) -> Result<Self> {
        let histogram = Histogram::new(0.0, CENTS_PER_OCTAVE, number_of_classes, true, false)?;
        Ok(Self { histogram })
    }

    /// Wrap an existing histogram that already covers `[0, 1200)` and wraps
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::IncompatibleHistogram` for any other shape.
    pub fn from_histogram(histogram: Histogram) -> Result<Self> {
        let octave = Self::with_classes(histogram.number_of_classes())?;
        if !histogram.wraps() {
            return Err(HistogramError::IncompatibleHistogram(
                "pitch-class histograms must wrap".to_string(),
            ));
        }
        octave.histogram.check_compatible(&histogram)?;
        Ok(Self { histogram })
    }

    /// Kernel density accumulator with the same layout as a pitch-class histogram
    pub fn density_estimate(class_width: f64, kernel: Kernel) -> Result<KernelDensityEstimate> {
        let layout = *Self::new(class_width)?.layout();
        KernelDensityEstimate::with_layout(layout, kernel)
    }

    /// Build a pitch-class histogram by Gaussian kernel accumulation of `pitches`
    pub fn from_kernel_density<I>(pitches: I, class_width: f64, std_dev: f64) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut kde = Self::density_estimate(class_width, Kernel::Gaussian { std_dev })?;
        for pitch in pitches {
            kde.add(pitch)?;
        }
        log::debug!("Accumulated {} kernels into pitch-class histogram", kde.sample_count());
        Self::from_histogram(kde.to_histogram())
    }

    /// Synthesize a tone-scale histogram as a mixture of Gaussian bumps
    ///
    /// # Arguments
    ///
    /// * `peaks` - Peak positions in cents (folded into one octave)
    /// * `heights` - Height of each bump
    /// * `widths` - Cut-off width of each bump; contributions past ten widths are skipped
    /// * `std_devs` - Standard deviation of each bump in cents
    /// * `class_width` - Class width of the result in cents
    ///
    /// Bumps are laid out over three octaves so that peaks near the 0/1200 seam
    /// spill into the neighbouring octave, then the three octaves are folded back.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::InvalidArgument` if the slices differ in length or a
    /// deviation is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use tonescale_dsp::features::tone_scale::PitchClassHistogram;
    ///
    /// let fifths = PitchClassHistogram::create_tone_scale(
    ///     &[0.0, 702.0],
    ///     &[100.0, 80.0],
    ///     &[12.0, 12.0],
    ///     &[6.0, 6.0],
    ///     6.0,
    /// )?;
    /// // The bump on the seam is split evenly between both ends of the octave
    /// assert_eq!(fifths.count(0.0), fifths.count(1199.0));
    /// assert!(fifths.count(702.0) > fifths.count(400.0));
    /// # Ok::<(), tonescale_dsp::HistogramError>(())
    /// ```
    pub fn create_tone_scale(
        peaks: &[f64],
        heights: &[f64],
        widths: &[f64],
        std_devs: &[f64],
        class_width: f64,
    ) -> Result<Self> {
        if heights.len() != peaks.len() || widths.len() != peaks.len() || std_devs.len() != peaks.len() {
            return Err(HistogramError::InvalidArgument(format!(
                "peaks, heights, widths and std_devs must have equal lengths, got {}, {}, {}, {}",
                peaks.len(),
                heights.len(),
                widths.len(),
                std_devs.len()
            )));
        }
        if let Some(bad) = std_devs.iter().find(|&&s| s <= 0.0 || !s.is_finite()) {
            return Err(HistogramError::InvalidArgument(format!(
                "standard deviations must be positive, got {}",
                bad
            )));
        }

        let mut result = Self::new(class_width)?;
        let n = result.number_of_classes();
        let width = result.class_width();

        let mut buffer = vec![0.0f64; 3 * n];
        for (k, slot) in buffer.iter_mut().enumerate() {
            let position = (k as f64 + 0.5) * width;
            for i in 0..peaks.len() {
                // Peaks live in the middle octave of the working buffer
                let centre = cents_to_pitch_class(peaks[i]) + CENTS_PER_OCTAVE;
                let distance = (position - centre).abs();
                if distance > BUMP_CUTOFF_WIDTHS * widths[i] {
                    continue;
                }
                let two_var = 2.0 * std_devs[i] * std_devs[i];
                *slot += heights[i] * (-(distance * distance) / two_var).exp();
            }
        }

        for (i, slot) in result.histogram.counts_mut().iter_mut().enumerate() {
            *slot = (buffer[i] + buffer[i + n] + buffer[i + 2 * n]).round() as i64;
        }
        Ok(result)
    }

    /// Synthesize a tone-scale histogram from detected peaks with uniform bump shapes
    pub fn from_peaks(peaks: &[Peak], width: f64, std_dev: f64, class_width: f64) -> Result<Self> {
        let positions: Vec<f64> = peaks.iter().map(|p| p.position).collect();
        let heights: Vec<f64> = peaks.iter().map(|p| p.height).collect();
        let widths = vec![width; peaks.len()];
        let std_devs = vec![std_dev; peaks.len()];
        Self::create_tone_scale(&positions, &heights, &widths, &std_devs, class_width)
    }

    /// Smoothed copy used for peak picking
    pub fn smoothed_for_peaks(&self, config: &ToneScaleConfig) -> Result<PitchClassHistogram> {
        let smoothed = self
            .histogram
            .gaussian_smooth_with_edges(config.smoothing_std_dev_cents, config.smoothing_edges)?;
        Ok(Self {
            histogram: smoothed,
        })
    }

    /// Peaks of the smoothed histogram
    pub fn detect_peaks<D>(&self, detector: &D, config: &ToneScaleConfig) -> Result<Vec<Peak>>
    where
        D: PeakDetector + ?Sized,
    {
        let smoothed = self.smoothed_for_peaks(config)?;
        Ok(detector.detect(
            &smoothed,
            config.peak_min_window_bins,
            config.peak_min_height,
        ))
    }

    /// Intersection between this histogram and a tone scale fitted to `peaks`
    ///
    /// 0.0 when there are no peaks.
    pub fn fitting_score(&self, peaks: &[Peak], config: &ToneScaleConfig) -> Result<f64> {
        if peaks.is_empty() {
            return Ok(0.0);
        }
        let fitting = Self::from_peaks(
            peaks,
            config.fitting_width_cents,
            config.fitting_std_dev_cents,
            self.class_width(),
        )?;
        Intersection.correlate(&self.histogram, 0, &fitting.histogram)
    }

    /// How well the histogram is explained by a few well-defined peaks, in `[0, 1]`
    pub fn melodic_score<D>(&self, detector: &D, config: &ToneScaleConfig) -> Result<f64>
    where
        D: PeakDetector + ?Sized,
    {
        let peaks = self.detect_peaks(detector, config)?;
        self.fitting_score(&peaks, config)
    }

    /// Whether the histogram has well-defined pitch peaks rather than noise
    ///
    /// Smooths, detects peaks, fits a synthetic tone scale to them and compares
    /// the fit with this histogram. Scores above `config.melodic_threshold` are melodic.
    pub fn is_melodic<D>(&self, detector: &D, config: &ToneScaleConfig) -> Result<bool>
    where
        D: PeakDetector + ?Sized,
    {
        let score = self.melodic_score(detector, config)?;
        log::debug!("Melodic score {:.3}", score);
        Ok(score > config.melodic_threshold)
    }

    /// Tone scale made of the detected peak positions
    pub fn tone_scale<D>(&self, name: &str, detector: &D, config: &ToneScaleConfig) -> Result<ToneScale>
    where
        D: PeakDetector + ?Sized,
    {
        let peaks = self.detect_peaks(detector, config)?;
        Ok(ToneScale::from_peaks(name, &peaks))
    }

    /// Underlying histogram
    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }
}

impl Deref for PitchClassHistogram {
    type Target = Histogram;

    fn deref(&self) -> &Histogram {
        &self.histogram
    }
}

impl DerefMut for PitchClassHistogram {
    fn deref_mut(&mut self) -> &mut Histogram {
        &mut self.histogram
    }
}

/// Number of classes tiling one octave for a requested class width
pub(crate) fn classes_per_octave(class_width: f64) -> Result<usize> {
    if !class_width.is_finite() || class_width <= 0.0 || class_width > CENTS_PER_OCTAVE {
        return Err(HistogramError::InvalidArgument(format!(
            "class width must be in (0, 1200] cents, got {}",
            class_width
        )));
    }
    Ok(((CENTS_PER_OCTAVE / class_width).round() as usize).max(1))
}
