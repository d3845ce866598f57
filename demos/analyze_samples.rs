//! Example: Analyze a pitch track
//!
//! Reads pitch estimates in Hz (one per line, optionally `time,hz`) from a file
//! given on the command line, or synthesises a short melody when none is given,
//! then prints the detected tone scale.

use std::fs;

use tonescale_dsp::{analyze_pitch_samples, PitchSample, ToneScaleConfig};

fn load_track(path: &str) -> Result<Vec<PitchSample>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let mut samples = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (time, hz) = match line.split_once(',') {
            Some((t, f)) => (t.trim().parse::<f64>()?, f.trim().parse::<f64>()?),
            None => (i as f64 * 0.01, line.parse::<f64>()?),
        };
        // Unvoiced frames are reported as 0 Hz
        if let Some(sample) = PitchSample::from_hertz(hz, time) {
            samples.push(sample);
        }
    }
    Ok(samples)
}

fn synthetic_track() -> Vec<PitchSample> {
    // A slendro-like five-tone scale with some vibrato
    let scale = [0.0, 240.0, 480.0, 720.0, 960.0];
    (0..1500)
        .map(|i| {
            let pc = scale[(i / 30) % scale.len()];
            let vibrato = ((i as f64) * 0.6).sin() * 8.0;
            PitchSample::new(5700.0 + pc + vibrato, i as f64 * 0.01)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let samples = match std::env::args().nth(1) {
        Some(path) => load_track(&path)?,
        None => synthetic_track(),
    };

    // Configure analysis
    let config = ToneScaleConfig::default();

    // Analyze
    let result = analyze_pitch_samples(&samples, &config)?;

    // Print results
    println!("Analysis Results:");
    println!("  Samples: {} ({} dropped)", result.metadata.sample_count, result.metadata.dropped_samples);
    println!("  Tone scale: {:?}", result.tone_scale.positions);
    println!("  Intervals: {:?}", result.tone_scale.intervals());
    println!("  Melodic: {} (score: {:.2})", result.is_melodic, result.melodic_score);
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);
    println!();
    println!("{}", serde_json::to_string_pretty(&result.summary())?);

    Ok(())
}
