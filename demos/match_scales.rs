//! Example: Match a pitch track against reference scales
//!
//! Builds a small library of reference tone scales, analyses a synthetic
//! transposed melody and ranks the references by optimal circular correlation
//! under every correlation measure.

use tonescale_dsp::{
    analyze_pitch_samples, CorrelationMeasure, PitchClassHistogram, PitchSample, ScaleMatcher,
    ToneScaleConfig,
};

fn reference(positions: &[f64], config: &ToneScaleConfig) -> tonescale_dsp::Result<PitchClassHistogram> {
    let n = positions.len();
    PitchClassHistogram::create_tone_scale(
        positions,
        &vec![100.0; n],
        &vec![config.fitting_width_cents; n],
        &vec![config.fitting_std_dev_cents; n],
        config.class_width_cents,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ToneScaleConfig::default();
    let library: [(&str, &[f64]); 4] = [
        ("major", &[0.0, 200.0, 400.0, 500.0, 700.0, 900.0, 1100.0]),
        ("minor pentatonic", &[0.0, 300.0, 500.0, 700.0, 1000.0]),
        ("whole tone", &[0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]),
        ("slendro", &[0.0, 240.0, 480.0, 720.0, 960.0]),
    ];

    // Minor pentatonic sung a fourth up
    let sung = [500.0, 800.0, 1000.0, 1200.0, 1500.0];
    let samples: Vec<PitchSample> = (0..1000)
        .map(|i| {
            let cents = 6000.0 + sung[(i / 20) % sung.len()] + ((i as f64) * 0.5).sin() * 6.0;
            PitchSample::new(cents, i as f64 * 0.01)
        })
        .collect();
    let query = analyze_pitch_samples(&samples, &config)?.pitch_class_histogram;

    for measure in CorrelationMeasure::ALL {
        let mut matcher = ScaleMatcher::new(measure);
        for (name, positions) in &library {
            matcher.add_reference(*name, reference(positions, &config)?)?;
        }

        println!("{}:", measure.name());
        for m in matcher.rank(&query)? {
            println!(
                "  {:<18} score {:>10.4}  shift {:>7.1} cents",
                m.name, m.score, m.displacement_cents
            );
        }
    }

    Ok(())
}
