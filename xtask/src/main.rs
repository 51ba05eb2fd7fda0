use anyhow::{anyhow, bail, Context, Result};
use dsp_rs::io::save_sample;
use dsp_rs::kernel::KernelLifecycle;
use dsp_rs::signal::accumulate::{AccumulateConfig, FirstDifferenceKernel, RunningSumKernel};
use dsp_rs::signal::convolve::{convolution, ConvolveConfig, ConvolveKernel, ConvolveMode};
use dsp_rs::signal::dft::{
    DftConfig, ForwardDftKernel, InverseDftKernel, MagnitudeKernel, PolarConfig, PolarKernel,
    PolarPhase,
};
use dsp_rs::signal::traits::{
    Convolve1D, FirstDifference1D, ForwardDft1D, InverseDft1D, Magnitude1D, PolarConvert1D,
    RunningSum1D,
};
use dsp_rs::signal::wave::{oscillate, OscillatorConfig, Waveform};
use dsp_rs::stats::{VarianceConfig, VarianceKernel, VarianceReduce1D};
use dsp_rs::{Dft, Sample};
use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_FIXTURE_DIR: &str = "target/fixtures";
const CONTRACT_DIR: &str = "target/contracts";

#[derive(Debug, Serialize, Clone)]
struct ContractRow {
    case_id: String,
    len: usize,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    reference_ns: f64,
    speedup_vs_baseline: f64,
    speedup_vs_reference: f64,
}

#[derive(Debug, Serialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    reference: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        Some("fixtures") => {
            let dir = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_DIR));
            run_fixtures(&dir)
        }
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- fixtures [dir]");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

/// Shared synthetic input: three tones plus an offset.
fn synthetic_signal(n: usize) -> Sample {
    (0..n)
        .map(|i| {
            let x = i as f64 / 27.0;
            0.5 + x.sin() + 0.35 * (2.3 * x).cos() + 0.1 * (7.0 * x).sin()
        })
        .collect()
}

fn smoothing_kernel() -> Sample {
    (0..31)
        .map(|i| {
            let x = (i as f64 - 15.0) / 4.0;
            (-(x * x) / 2.0).exp()
        })
        .collect()
}

fn run_fixtures(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let input = synthetic_signal(256);
    let kernel = smoothing_kernel();
    let dft = input.dft()?;
    let polar = dft.polar();

    let samples: [(&str, Sample); 12] = [
        ("input.dat", input.clone()),
        ("convolution_kernel.dat", kernel.clone()),
        ("convolution.dat", input.convolution(&kernel)),
        ("running_sum.dat", input.running_sum()),
        ("first_difference.dat", input.first_difference()),
        ("dft_rex.dat", dft.rex().clone()),
        ("dft_imx.dat", dft.imx().clone()),
        ("magnitude.dat", dft.magnitude()),
        ("polar_magnitude.dat", polar.rex().clone()),
        ("polar_phase.dat", polar.imx().clone()),
        ("complex_rex.dat", dft.complex().rex().clone()),
        ("inverse.dat", dft.clone().inverse()),
    ];
    for (name, sample) in &samples {
        let path = dir.join(name);
        save_sample(&path, sample).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {} ({} values)", path.display(), sample.len());
    }

    let stats = json!({
        "mean": input.mean()?.value(),
        "variance": input.variance()?.value(),
        "deviation": input.deviation()?.value(),
    });
    let stats_path = dir.join("stats.json");
    fs::write(&stats_path, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("writing {}", stats_path.display()))?;
    println!("wrote {}", stats_path.display());
    Ok(())
}

fn run_contracts() -> Result<()> {
    let out_dir = PathBuf::from(CONTRACT_DIR);
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let mut rows = Vec::new();
    let signal = synthetic_signal(512);
    let x = signal.as_slice();

    // Forward DFT against an FFT oracle.
    {
        let kernel = ForwardDftKernel::try_new(DftConfig)?;
        let (rex, imx) = ForwardDft1D::<f64>::run_alloc(&kernel, x)
            .map_err(|e| anyhow!("forward dft candidate execution failed: {e}"))?;
        let candidate = interleave(&rex, &imx);
        let baseline = signal.dft()?.bins();
        let reference = fft_bins(x);
        ensure_same_length("forward_dft", &candidate, &interleave_complex(&baseline))?;

        let candidate_ns = benchmark_avg_ns(20, || {
            ForwardDft1D::<f64>::run_alloc(&kernel, x)
                .map(|_| ())
                .map_err(|e| anyhow!("forward dft candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(20, || signal.dft().map(|_| ()).map_err(Into::into))?;
        let reference_ns = benchmark_avg_ns(200, || {
            fft_bins(x);
            Ok(())
        })?;
        rows.push(build_row(
            "forward_dft",
            &candidate,
            &reference,
            [candidate_ns, baseline_ns, reference_ns],
        )?);
    }

    // Magnitude against |FFT|.
    {
        let dft = signal.dft()?;
        let kernel = MagnitudeKernel::try_new(DftConfig)?;
        let candidate = Magnitude1D::<f64>::run_alloc(&kernel, dft.rex(), dft.imx())
            .map_err(|e| anyhow!("magnitude candidate execution failed: {e}"))?;
        let reference: Vec<f64> = fft_complex(x)
            .iter()
            .take(x.len() / 2)
            .map(|c| c.norm())
            .collect();

        let candidate_ns = benchmark_avg_ns(2_000, || {
            Magnitude1D::<f64>::run_alloc(&kernel, dft.rex(), dft.imx())
                .map(|_| ())
                .map_err(|e| anyhow!("magnitude candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(2_000, || {
            dft.magnitude();
            Ok(())
        })?;
        let reference_ns = benchmark_avg_ns(200, || {
            fft_complex(x);
            Ok(())
        })?;
        rows.push(build_row(
            "magnitude",
            &candidate,
            &reference,
            [candidate_ns, baseline_ns, reference_ns],
        )?);
    }

    // Four-quadrant polar phase against arg(FFT).
    {
        let dft = signal.dft()?;
        let kernel = PolarKernel::try_new(PolarConfig {
            phase: PolarPhase::Atan2,
            ..PolarConfig::default()
        })?;
        let (_, candidate) = PolarConvert1D::<f64>::run_alloc(&kernel, dft.rex(), dft.imx())
            .map_err(|e| anyhow!("polar candidate execution failed: {e}"))?;
        let reference: Vec<f64> = fft_complex(x)
            .iter()
            .take(x.len() / 2)
            .map(|c| c.arg())
            .collect();

        let candidate_ns = benchmark_avg_ns(2_000, || {
            PolarConvert1D::<f64>::run_alloc(&kernel, dft.rex(), dft.imx())
                .map(|_| ())
                .map_err(|e| anyhow!("polar candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(2_000, || {
            dft.polar_with(PolarPhase::Atan2);
            Ok(())
        })?;
        let reference_ns = benchmark_avg_ns(200, || {
            fft_complex(x);
            Ok(())
        })?;
        rows.push(build_row(
            "polar_atan2",
            &candidate,
            &reference,
            [candidate_ns, baseline_ns, reference_ns],
        )?);
    }

    // Inverse DFT of a band-limited input must reconstruct it.
    {
        let band_limited = oscillate(
            OscillatorConfig::new(Waveform::SquareBandLimited, 8.0, 512.0),
            512,
        )?;
        let dft = band_limited.dft()?;
        let kernel = InverseDftKernel::try_new(DftConfig)?;
        let (rex, imx) = dft.clone().into_parts();
        let candidate = InverseDft1D::<f64>::run_alloc(&kernel, &mut rex.clone(), &mut imx.clone())
            .map_err(|e| anyhow!("inverse dft candidate execution failed: {e}"))?;

        let candidate_ns = benchmark_avg_ns(20, || {
            InverseDft1D::<f64>::run_alloc(&kernel, &mut rex.clone(), &mut imx.clone())
                .map(|_| ())
                .map_err(|e| anyhow!("inverse dft candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(20, || {
            Dft::new(rex.clone(), imx.clone())?.inverse();
            Ok(())
        })?;
        rows.push(build_row(
            "inverse_dft",
            &candidate,
            band_limited.as_slice(),
            [candidate_ns, baseline_ns, f64::NAN],
        )?);
    }

    // Convolution against the full-mode kernel, trailing zero appended.
    {
        let h = smoothing_kernel();
        let kernel = ConvolveKernel::try_new(ConvolveConfig {
            mode: ConvolveMode::Full,
        })?;
        let mut candidate = Convolve1D::<f64>::run_alloc(&kernel, x, h.as_slice())
            .map_err(|e| anyhow!("convolve candidate execution failed: {e}"))?;
        candidate.push(0.0);
        let baseline = convolution(x, h.as_slice());

        let candidate_ns = benchmark_avg_ns(200, || {
            Convolve1D::<f64>::run_alloc(&kernel, x, h.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("convolve candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(200, || {
            convolution(x, h.as_slice());
            Ok(())
        })?;
        rows.push(build_row(
            "convolution",
            &candidate,
            &baseline,
            [candidate_ns, baseline_ns, f64::NAN],
        )?);
    }

    // Running sum followed by first difference recovers the input.
    {
        let sum_kernel = RunningSumKernel::try_new(AccumulateConfig)?;
        let diff_kernel = FirstDifferenceKernel::try_new(AccumulateConfig)?;
        let summed = RunningSum1D::<f64>::run_alloc(&sum_kernel, x)
            .map_err(|e| anyhow!("running sum candidate execution failed: {e}"))?;
        let candidate = FirstDifference1D::<f64>::run_alloc(&diff_kernel, &summed)
            .map_err(|e| anyhow!("first difference candidate execution failed: {e}"))?;

        let candidate_ns = benchmark_avg_ns(2_000, || {
            RunningSum1D::<f64>::run_alloc(&sum_kernel, x)
                .map(|_| ())
                .map_err(|e| anyhow!("running sum candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(2_000, || {
            signal.running_sum();
            Ok(())
        })?;
        rows.push(build_row(
            "running_sum_first_difference",
            &candidate,
            x,
            [candidate_ns, baseline_ns, f64::NAN],
        )?);
    }

    // Variance against a two-pass textbook estimate.
    {
        let kernel = VarianceKernel::try_new(VarianceConfig::default())?;
        let (candidate, _) = VarianceReduce1D::<f64>::run(&kernel, x)
            .map_err(|e| anyhow!("variance candidate execution failed: {e}"))?;
        let n = x.len() as f64;
        let mean = x.iter().sum::<f64>() / n;
        let reference = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);

        let candidate_ns = benchmark_avg_ns(2_000, || {
            VarianceReduce1D::<f64>::run(&kernel, x)
                .map(|_| ())
                .map_err(|e| anyhow!("variance candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(2_000, || signal.variance().map(|_| ()).map_err(Into::into))?;
        rows.push(build_row(
            "variance",
            &[candidate],
            &[reference],
            [candidate_ns, baseline_ns, f64::NAN],
        )?);
    }

    for row in &rows {
        println!(
            "{:<30} max_abs={:.3e} rmse={:.3e} r={:.9} candidate={:.0}ns",
            row.case_id, row.max_abs, row.rmse, row.pearson_r, row.rust_candidate_ns
        );
    }

    let bundle = ContractBundle {
        generated_epoch_seconds: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        reference: "rustfft".to_string(),
        rows,
    };
    let summary = out_dir.join("summary.json");
    fs::write(&summary, serde_json::to_string_pretty(&bundle)?)
        .with_context(|| format!("writing {}", summary.display()))?;
    println!("wrote {}", summary.display());
    Ok(())
}

fn fft_complex(x: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = x.iter().map(|v| Complex::new(*v, 0.0)).collect();
    FftPlanner::new()
        .plan_fft_forward(buffer.len())
        .process(&mut buffer);
    buffer
}

/// First `N / 2` FFT bins, flattened as `re, im` pairs.
fn fft_bins(x: &[f64]) -> Vec<f64> {
    let bins: Vec<_> = fft_complex(x).into_iter().take(x.len() / 2).collect();
    bins.iter().flat_map(|c| [c.re, c.im]).collect()
}

fn interleave(rex: &[f64], imx: &[f64]) -> Vec<f64> {
    rex.iter().zip(imx.iter()).flat_map(|(r, i)| [*r, *i]).collect()
}

fn interleave_complex(bins: &[dsp_rs::na::Complex<f64>]) -> Vec<f64> {
    bins.iter().flat_map(|c| [c.re, c.im]).collect()
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

/// `timings` is `[candidate, baseline, reference]` in ns; NaN when not measured.
fn build_row(
    case_id: &str,
    candidate: &[f64],
    reference: &[f64],
    timings: [f64; 3],
) -> Result<ContractRow> {
    ensure_same_length(case_id, candidate, reference)?;
    let [candidate_ns, baseline_ns, reference_ns] = timings;
    Ok(ContractRow {
        case_id: case_id.to_string(),
        len: candidate.len(),
        pearson_r: pearson(candidate, reference),
        mae: mean_abs_error(candidate, reference),
        rmse: root_mean_squared_error(candidate, reference),
        max_abs: max_abs_error(candidate, reference),
        rust_candidate_ns: candidate_ns,
        rust_baseline_ns: baseline_ns,
        reference_ns,
        speedup_vs_baseline: baseline_ns / candidate_ns,
        speedup_vs_reference: reference_ns / candidate_ns,
    })
}

fn mean_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

fn root_mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    (a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64)
        .sqrt()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}
