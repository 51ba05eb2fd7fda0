use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dasp_signal::{rate, Signal as DaspSignal};
use dsp_rs::kernel::KernelLifecycle;
use dsp_rs::signal::dft::{DftConfig, ForwardDftKernel, PolarConfig, PolarKernel};
use dsp_rs::signal::traits::{ForwardDft1D, PolarConvert1D};
use dsp_rs::Sample;

/// Two tones at 44.1 kHz, `n` samples long.
fn two_tone(n: usize) -> Sample {
    let sample_hz = 44_100.;
    let mut low = rate(sample_hz).const_hz(440.).sine();
    let mut high = rate(sample_hz).const_hz(3_520.).sine();
    (0..n).map(|_| low.next() + 0.25 * high.next()).collect()
}

///
/// Direct forward transform, O(N²).
///
fn forward(c: &mut Criterion) {
    let kernel = ForwardDftKernel::try_new(DftConfig).expect("dft kernel config should be valid");
    let mut group = c.benchmark_group("forward_dft");
    for n in [256usize, 1_024, 4_096] {
        let x = two_tone(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &x, |b, x| {
            b.iter(|| {
                black_box(
                    ForwardDft1D::<f64>::run_alloc(&kernel, x.as_slice())
                        .expect("forward dft should accept any input"),
                )
            })
        });
    }
    group.finish();
}

fn inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse_dft");
    for n in [256usize, 1_024, 4_096] {
        let dft = two_tone(n).dft().expect("forward dft");
        group.bench_with_input(BenchmarkId::from_parameter(n), &dft, |b, dft| {
            b.iter(|| black_box(dft.clone().inverse()))
        });
    }
    group.finish();
}

fn polar(c: &mut Criterion) {
    let kernel = PolarKernel::try_new(PolarConfig::default()).expect("polar kernel config");
    let dft = two_tone(4_096).dft().expect("forward dft");
    c.bench_function("polar_4096", |b| {
        b.iter(|| {
            black_box(
                PolarConvert1D::<f64>::run_alloc(&kernel, dft.rex(), dft.imx())
                    .expect("equal length coefficients"),
            )
        })
    });
}

criterion_group!(benches, forward, inverse, polar);
criterion_main!(benches);
