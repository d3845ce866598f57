//! Integration tests for the tone-scale engine

use tonescale_dsp::features::correlation::{
    find_optimal_displacement, optimal_correlation, CityBlock, Euclidean, Intersection,
};
use tonescale_dsp::features::smoothing::EdgeMode;
use tonescale_dsp::{
    analyze_pitch_samples, AnalysisFlag, CorrelationMeasure, Histogram, HistogramCorrelation,
    HistogramError, PitchClassHistogram, PitchSample, ScaleMatcher, ToneScaleConfig,
};

/// Deterministic jitter in [-amplitude, amplitude] without pulling in a RNG
fn jitter(i: usize, amplitude: f64) -> f64 {
    let x = ((i as u64).wrapping_mul(2_654_435_761) % 1000) as f64 / 1000.0;
    (x * 2.0 - 1.0) * amplitude
}

/// Pitch track cycling through `scale` (pitch classes) across two octaves
fn sung_scale(scale: &[f64], repetitions: usize, base_octave_cents: f64) -> Vec<PitchSample> {
    let mut samples = Vec::new();
    let mut i = 0;
    for rep in 0..repetitions {
        for &pc in scale {
            let octave = if rep % 3 == 0 { 1200.0 } else { 0.0 };
            samples.push(PitchSample::new(
                base_octave_cents + octave + pc + jitter(i, 4.0),
                i as f64 * 0.01,
            ));
            i += 1;
        }
    }
    samples
}

fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1200.0);
    d.min(1200.0 - d)
}

fn pitch_class_scenario() -> Histogram {
    let mut h = Histogram::new(0.0, 1200.0, 60, true, false).unwrap();
    for _ in 0..10 {
        h.add(100.0).unwrap();
    }
    for _ in 0..5 {
        h.add(700.0).unwrap();
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_pitch_class_scenario() {
        let h = pitch_class_scenario();
        assert_eq!(h.count(100.0), 10);
        assert_eq!(h.count(700.0), 5);
        assert_eq!(h.sum_frequency(), 15);
        assert_eq!(Intersection.correlate(&h, 0, &h).unwrap(), 1.0);
        assert_eq!(Euclidean.correlate(&h, 0, &h).unwrap(), 0.0);
    }

    #[test]
    fn test_city_block_full_rotation_periodicity() {
        let h = pitch_class_scenario();
        let copy = h.clone();
        let n = h.number_of_classes() as i64;
        assert_eq!(
            CityBlock.correlate(&h, n, &copy).unwrap(),
            CityBlock.correlate(&h, 0, &copy).unwrap()
        );
    }

    #[test]
    fn test_error_scenarios() {
        assert!(matches!(
            Histogram::new(100.0, 50.0, 10, false, false),
            Err(HistogramError::Range(_))
        ));
        let h = pitch_class_scenario();
        assert!(matches!(
            h.smooth(false, -1),
            Err(HistogramError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_displacement_symmetry_for_all_rotations() {
        let mut h = pitch_class_scenario();
        h.add(250.0).unwrap();
        h.add(1010.0).unwrap();
        h.add(1010.0).unwrap();
        let n = h.number_of_classes() as i64;
        for d in 0..n {
            let (found, score) = optimal_correlation(&h, &h.displaced(d), &Intersection).unwrap();
            assert_eq!(found.rem_euclid(n), d);
            assert!(found * 2 <= n && found * 2 > -n);
            assert_eq!(score, 1.0);
        }
    }

    #[test]
    fn test_smoothing_then_matching_is_transposition_invariant() {
        let base = PitchClassHistogram::create_tone_scale(
            &[0.0, 204.0, 386.0, 498.0, 702.0, 884.0, 1088.0],
            &[90.0, 40.0, 60.0, 50.0, 80.0, 30.0, 20.0],
            &[12.0; 7],
            &[8.0; 7],
            6.0,
        )
        .unwrap();
        let transposed = base.displaced(17);
        for edges in [EdgeMode::Clip, EdgeMode::Wrap] {
            let a = base.gaussian_smooth_with_edges(6.0, edges).unwrap();
            let b = transposed.gaussian_smooth_with_edges(6.0, edges).unwrap();
            let found = find_optimal_displacement(&a, &b, &Intersection).unwrap();
            assert_eq!(found, 17, "{:?}", edges);
        }
    }

    #[test]
    fn test_analyze_sung_pentatonic() {
        let scale = [0.0, 200.0, 400.0, 700.0, 900.0];
        let samples = sung_scale(&scale, 60, 6000.0);
        let config = ToneScaleConfig::default();

        let result = analyze_pitch_samples(&samples, &config).expect("Analysis should succeed");

        assert_eq!(result.metadata.sample_count, samples.len());
        assert_eq!(result.metadata.dropped_samples, 0);
        assert_eq!(result.metadata.accumulation, "kernel_density");
        assert!(result.metadata.duration_seconds > 2.9);

        assert_eq!(result.tone_scale.len(), 5, "peaks: {:?}", result.peaks);
        // The tonic may be detected just below the octave seam
        for expected in scale {
            assert!(
                result
                    .tone_scale
                    .positions
                    .iter()
                    .any(|found| circular_distance(*found, expected) <= 12.0),
                "{} missing from {:?}",
                expected,
                result.tone_scale.positions
            );
        }

        assert!(result.is_melodic, "score {}", result.melodic_score);
        assert!(result.metadata.flags.is_empty());

        // Octave slices saw the two registers
        assert!(result.pitch_histogram.octave(5).unwrap().sum_frequency() > 0);
        assert!(result.pitch_histogram.octave(6).unwrap().sum_frequency() > 0);
        let top = result.pitch_histogram.most_energy_rich_octaves(1).unwrap();
        assert_eq!(
            top.sum_frequency(),
            result.pitch_histogram.octave(5).unwrap().sum_frequency()
        );

        println!(
            "Pentatonic: {:?}, score={:.3}, processing={:.2}ms",
            result.tone_scale.positions, result.melodic_score, result.metadata.processing_time_ms
        );
    }

    #[test]
    fn test_analyze_with_increments() {
        let samples = sung_scale(&[0.0, 500.0, 700.0], 40, 4800.0);
        let config = ToneScaleConfig {
            use_kernel_density: false,
            ..Default::default()
        };
        let result = analyze_pitch_samples(&samples, &config).unwrap();
        assert_eq!(result.metadata.accumulation, "increment");
        assert_eq!(
            result.pitch_class_histogram.sum_frequency(),
            samples.len() as i64
        );
        assert_eq!(result.tone_scale.len(), 3);
    }

    #[test]
    fn test_analyze_drops_out_of_range() {
        let mut samples = sung_scale(&[0.0, 700.0], 20, 6000.0);
        samples.push(PitchSample::new(20_000.0, 1.0));
        samples.push(PitchSample::new(-50.0, 1.1));
        let result = analyze_pitch_samples(&samples, &ToneScaleConfig::default()).unwrap();
        assert_eq!(result.metadata.dropped_samples, 2);
        assert!(result
            .metadata
            .flags
            .contains(&AnalysisFlag::SamplesDropped(2)));

        let strict = ToneScaleConfig {
            ignore_out_of_range: false,
            ..Default::default()
        };
        assert!(matches!(
            analyze_pitch_samples(&samples, &strict),
            Err(HistogramError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_analyze_rejects_empty_input() {
        assert!(analyze_pitch_samples(&[], &ToneScaleConfig::default()).is_err());
    }

    #[test]
    fn test_noise_is_not_melodic() {
        // Evenly spread pitches: no tone scale to find
        let samples: Vec<PitchSample> = (0..2400)
            .map(|i| PitchSample::new(6000.0 + i as f64 * 0.5, i as f64 * 0.01))
            .collect();
        let result = analyze_pitch_samples(&samples, &ToneScaleConfig::default()).unwrap();
        assert!(!result.is_melodic, "score {}", result.melodic_score);
        assert!(result.metadata.flags.contains(&AnalysisFlag::NotMelodic));
    }

    #[test]
    fn test_scale_matcher_finds_transposed_scale() {
        let config = ToneScaleConfig::default();
        let reference = |positions: &[f64]| {
            let n = positions.len();
            PitchClassHistogram::create_tone_scale(
                positions,
                &vec![100.0; n],
                &vec![config.fitting_width_cents; n],
                &vec![config.fitting_std_dev_cents; n],
                config.class_width_cents,
            )
            .unwrap()
        };

        let mut matcher = ScaleMatcher::from_config(&config);
        assert_eq!(matcher.measure(), CorrelationMeasure::Intersection);
        matcher
            .add_reference("major", reference(&[0.0, 200.0, 400.0, 500.0, 700.0, 900.0, 1100.0]))
            .unwrap();
        matcher
            .add_reference("minor pentatonic", reference(&[0.0, 300.0, 500.0, 700.0, 1000.0]))
            .unwrap();

        // Minor pentatonic sung from D
        let sung: Vec<f64> = [0.0, 300.0, 500.0, 700.0, 1000.0]
            .iter()
            .map(|pc| pc + 200.0)
            .collect();
        let samples = sung_scale(&sung, 50, 6000.0);
        let result = analyze_pitch_samples(&samples, &config).unwrap();

        let best = matcher.best(&result.pitch_class_histogram).unwrap().unwrap();
        assert_eq!(best.name, "minor pentatonic");
        // query[i] meets reference[i + d]: D sits 200 cents above the reference tonic
        assert!((best.displacement_cents + 200.0).abs() <= 12.0, "{:?}", best);
    }
}
