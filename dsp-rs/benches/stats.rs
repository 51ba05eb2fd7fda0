use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsp_rs::signal::wave::{oscillate, OscillatorConfig, Waveform};
use dsp_rs::Sample;

/// One second of seeded noise at 44.1 kHz.
fn noise() -> Sample {
    oscillate(
        OscillatorConfig {
            seed: 42,
            ..OscillatorConfig::new(Waveform::Noise, 1.0, 44_100.)
        },
        44_100,
    )
    .expect("noise config should be valid")
}

fn deviation(c: &mut Criterion) {
    let x = noise();
    c.bench_function("deviation_44100", |b| {
        b.iter(|| black_box(x.deviation().expect("non-degenerate input")))
    });
}

fn running_sum(c: &mut Criterion) {
    let x = noise();
    c.bench_function("running_sum_44100", |b| {
        b.iter(|| black_box(x.running_sum().first_difference()))
    });
}

fn convolution(c: &mut Criterion) {
    let x = noise();
    let h: Sample = (0..64).map(|i| 1.0 / (i + 1) as f64).collect();
    c.bench_function("convolution_44100x64", |b| {
        b.iter(|| black_box(x.convolution(black_box(&h))))
    });
}

criterion_group!(benches, deviation, running_sum, convolution);
criterion_main!(benches);
