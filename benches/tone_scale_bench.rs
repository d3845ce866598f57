//! Performance benchmarks for histogram comparison and tone-scale analysis

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tonescale_dsp::features::correlation::{find_optimal_displacement, Intersection};
use tonescale_dsp::features::kde::{Kernel, KernelDensityEstimate};
use tonescale_dsp::histogram::BinLayout;
use tonescale_dsp::{analyze_pitch_samples, PitchClassHistogram, PitchSample, ToneScaleConfig};

fn synthetic_samples(count: usize) -> Vec<PitchSample> {
    let scale = [0.0, 200.0, 400.0, 500.0, 700.0, 900.0, 1100.0];
    (0..count)
        .map(|i| {
            let pc = scale[i % scale.len()];
            let vibrato = ((i as f64) * 0.37).sin() * 15.0;
            PitchSample::new(6000.0 + pc + vibrato, i as f64 * 0.0058)
        })
        .collect()
}

fn major_scale() -> PitchClassHistogram {
    let positions = [0.0, 204.0, 386.0, 498.0, 702.0, 884.0, 1088.0];
    PitchClassHistogram::create_tone_scale(&positions, &[100.0; 7], &[12.0; 7], &[6.0; 7], 6.0)
        .expect("valid tone scale")
}

fn bench_displacement_search(c: &mut Criterion) {
    let reference = major_scale();
    let query = reference.displaced(37);

    c.bench_function("optimal_displacement_200_classes", |b| {
        b.iter(|| find_optimal_displacement(black_box(&query), black_box(&reference), &Intersection));
    });
}

fn bench_smoothing(c: &mut Criterion) {
    let histogram = major_scale();

    c.bench_function("gaussian_smooth_200_classes", |b| {
        b.iter(|| black_box(&histogram).gaussian_smooth(black_box(6.0)));
    });
    c.bench_function("moving_average_200_classes", |b| {
        b.iter(|| black_box(&histogram).smooth(true, black_box(3)));
    });
}

fn bench_kernel_density(c: &mut Criterion) {
    let samples = synthetic_samples(10_000);
    let layout = BinLayout::new(0.0, 1200.0, 200, true).expect("valid layout");

    c.bench_function("kde_accumulate_10k", |b| {
        b.iter(|| {
            let mut kde = KernelDensityEstimate::with_layout(
                layout,
                Kernel::Gaussian { std_dev: 7.5 },
            )
            .expect("valid kernel");
            for sample in &samples {
                let _ = kde.add(black_box(sample.pitch_cents));
            }
            kde.to_histogram()
        });
    });
}

fn bench_analyze_samples(c: &mut Criterion) {
    // One minute of pitch estimates at ~172 Hz
    let samples = synthetic_samples(10_340);
    let config = ToneScaleConfig::default();

    c.bench_function("analyze_pitch_samples_60s", |b| {
        b.iter(|| {
            let _ = analyze_pitch_samples(black_box(&samples), black_box(&config));
        });
    });
}

criterion_group!(
    benches,
    bench_displacement_search,
    bench_smoothing,
    bench_kernel_density,
    bench_analyze_samples
);
criterion_main!(benches);
