//! Direct discrete Fourier transform in rectangular and polar form.
//!
//! [`Dft`] is the owned coefficient pair used by [`Sample`]; the generic kernels
//! in this module run the same transforms over any [`Read1D`]/[`Write1D`]
//! buffers of `f32` or `f64`.
//!
//! [`Read1D`]: crate::kernel::Read1D
//! [`Write1D`]: crate::kernel::Write1D

mod kernels;

pub use kernels::*;

use crate::error::{Error, Result};
use crate::kernel::{KernelLifecycle, Read1D};
use crate::sample::{Sample, DEFAULT_TOLERANCE};
use crate::signal::traits::{CoefficientPair, ForwardDft1D, InverseDft1D};
use alloc::vec::Vec;
use nalgebra::Complex;
use num_traits::{Float, FloatConst};

/// Rectangular (`rex`, `imx`) or polar (`magnitude`, `phase`) coefficients.
///
/// Both halves always have the same length. The caller tracks which of the
/// two forms a value holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dft {
    rex: Sample,
    imx: Sample,
}

impl Dft {
    /// Pair up coefficient halves.
    ///
    /// ```
    /// use dsp_rs::{Dft, Error, Sample};
    ///
    /// let err = Dft::new(Sample::zeros(50), Sample::zeros(25)).unwrap_err();
    /// assert_eq!(err, Error::ShapeMismatch { rex: 50, imx: 25 });
    /// ```
    pub fn new(rex: Sample, imx: Sample) -> Result<Self> {
        if rex.len() != imx.len() {
            return Err(Error::ShapeMismatch {
                rex: rex.len(),
                imx: imx.len(),
            });
        }
        Ok(Self { rex, imx })
    }

    /// Forward transform of a time-domain input.
    ///
    /// ```
    /// use dsp_rs::Dft;
    ///
    /// let dft = Dft::forward(&[1., 1., 1., 1.]).unwrap();
    /// assert_eq!(dft.len(), 2);
    /// assert_eq!(dft.rex()[0], 4.);
    /// assert!(dft.rex()[1].abs() < 1e-12);
    /// ```
    pub fn forward<I>(input: &I) -> Result<Self>
    where
        I: Read1D<f64> + ?Sized,
    {
        let (rex, imx) = ForwardDftKernel.run_alloc(input)?;
        Self::new(rex.into(), imx.into())
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.rex.len()
    }

    /// Whether there are no bins.
    pub fn is_empty(&self) -> bool {
        self.rex.is_empty()
    }

    /// Cosine coefficients, or magnitudes in polar form.
    pub fn rex(&self) -> &Sample {
        &self.rex
    }

    /// Negated sine coefficients, or phases in polar form.
    pub fn imx(&self) -> &Sample {
        &self.imx
    }

    /// Split into `(rex, imx)`.
    pub fn into_parts(self) -> (Sample, Sample) {
        (self.rex, self.imx)
    }

    /// Per-bin magnitude.
    pub fn magnitude(&self) -> Sample {
        let mut out = Sample::zeros(self.len());
        magnitude_impl(self.rex.as_slice(), self.imx.as_slice(), out.as_mut_slice());
        out
    }

    /// Polar form with [`PolarPhase::Reference`] phases.
    pub fn polar(&self) -> Dft {
        self.polar_with(PolarPhase::Reference)
    }

    /// Polar form: `rex` holds magnitudes and `imx` phases.
    pub fn polar_with(&self, phase: PolarPhase) -> Dft {
        let mut magnitude = Sample::zeros(self.len());
        let mut phases = Sample::zeros(self.len());
        polar_impl(
            self.rex.as_slice(),
            self.imx.as_slice(),
            magnitude.as_mut_slice(),
            phases.as_mut_slice(),
            phase,
            DEFAULT_TOLERANCE,
        );
        Dft {
            rex: magnitude,
            imx: phases,
        }
    }

    /// Synthesize `2 · len()` time-domain values. The coefficients are scaled
    /// in place, so the transform is consumed.
    ///
    /// ```
    /// use dsp_rs::{Dft, Sample};
    ///
    /// let x = Sample::new(vec![1., 1., 1., 1.]);
    /// let y = x.dft().unwrap().inverse();
    /// assert!(y.iter().zip(x.iter()).all(|(a, b)| (a.value() - b.value()).abs() < 1e-12));
    /// assert!(Dft::default().inverse().is_empty());
    /// ```
    pub fn inverse(self) -> Sample {
        let Dft { mut rex, mut imx } = self;
        let mut out = Sample::zeros(2 * rex.len());
        inverse_impl(rex.as_mut_slice(), imx.as_mut_slice(), out.as_mut_slice());
        out
    }

    /// Direct complex re-synthesis, see [`ResynthesisKernel`].
    pub fn complex(&self) -> Dft {
        let mut rex = Sample::zeros(self.len());
        let mut imx = Sample::zeros(self.len());
        resynthesize_impl(
            self.rex.as_slice(),
            self.imx.as_slice(),
            rex.as_mut_slice(),
            imx.as_mut_slice(),
        );
        Dft { rex, imx }
    }

    /// Component-wise comparison with an explicit tolerance factor.
    pub fn almost_equals(&self, other: &Dft, tolerance: f64) -> bool {
        self.rex.almost_equals(&other.rex, tolerance) && self.imx.almost_equals(&other.imx, tolerance)
    }

    /// Component-wise comparison with [`DEFAULT_TOLERANCE`].
    pub fn equals(&self, other: &Dft) -> bool {
        self.almost_equals(other, DEFAULT_TOLERANCE)
    }

    /// Rectangular coefficients as complex bins, `re = rex` and `im = imx`.
    pub fn bins(&self) -> Vec<Complex<f64>> {
        self.rex
            .iter()
            .zip(self.imx.iter())
            .map(|(re, im)| Complex::new(re.value(), im.value()))
            .collect()
    }

    /// Build from complex bins.
    pub fn from_bins(bins: &[Complex<f64>]) -> Self {
        Dft {
            rex: bins.iter().map(|c| c.re).collect(),
            imx: bins.iter().map(|c| c.im).collect(),
        }
    }
}

/// Forward direct DFT of `x`, returning `(rex, imx)` with `x.len() / 2` bins.
///
/// ```
/// use approx::assert_relative_eq;
/// use dsp_rs::signal::dft::forward_dft;
///
/// let (rex, imx) = forward_dft(&[0.0f32, 1.0, 0.0, -1.0]);
/// assert_relative_eq!(rex[1], 0.0, epsilon = 1e-6);
/// assert_relative_eq!(imx[1], -2.0, epsilon = 1e-6);
/// ```
pub fn forward_dft<F>(x: &[F]) -> CoefficientPair<F>
where
    F: Float + FloatConst,
{
    let bins = x.len() / 2;
    let mut rex = alloc::vec![F::zero(); bins];
    let mut imx = alloc::vec![F::zero(); bins];
    forward_impl(x, &mut rex, &mut imx);
    (rex, imx)
}

/// Inverse direct DFT of `(rex, imx)`, returning `2 · rex.len()` values.
pub fn inverse_dft<F>(mut rex: Vec<F>, mut imx: Vec<F>) -> Result<Vec<F>>
where
    F: Float + FloatConst,
{
    let kernel = InverseDftKernel::try_new(DftConfig)?;
    Ok(kernel.run_alloc(&mut rex, &mut imx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::ExecInvariantViolation;
    use crate::signal::traits::{Magnitude1D, PolarConvert1D, Resynthesize1D};
    use crate::Signal;
    use alloc::vec;
    use approx::assert_relative_eq;
    use core::f64::consts::PI;
    use rand::Rng;
    use rustfft::{num_complex::Complex as FftComplex, FftPlanner};

    fn random_sample(n: usize) -> Sample {
        let mut rng = rand::rng();
        (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    #[test]
    fn constant_input_has_dc_only() {
        let dft = Sample::new(vec![1., 1., 1., 1.]).dft().unwrap();
        assert_eq!(dft.len(), 2);
        assert_relative_eq!(dft.rex()[0], 4.0);
        assert_relative_eq!(dft.rex()[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dft.imx()[0], 0.0);
        assert_relative_eq!(dft.imx()[1], 0.0, epsilon = 1e-12);

        let magnitude = dft.magnitude();
        assert_relative_eq!(magnitude[0], 4.0);
        assert_relative_eq!(magnitude[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn odd_length_input_drops_the_last_bin_only() {
        let x = Sample::new(vec![1., 2., 3., 4., 5.]);
        let dft = x.dft().unwrap();
        assert_eq!(dft.len(), 2);
        let n = x.len() as f64;
        for i in 0..dft.len() {
            let (mut re, mut im) = (0.0, 0.0);
            for (j, v) in x.iter().enumerate() {
                let angle = 2.0 * PI * (i * j) as f64 / n;
                re += v.value() * angle.cos();
                im -= v.value() * angle.sin();
            }
            assert_relative_eq!(dft.rex()[i], re, epsilon = 1e-12);
            assert_relative_eq!(dft.imx()[i], im, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_matches_fft() {
        for n in [8usize, 15, 64, 101] {
            let x = random_sample(n);
            let dft = x.dft().unwrap();

            let mut buffer: Vec<FftComplex<f64>> =
                x.iter().map(|v| FftComplex::new(v.value(), 0.0)).collect();
            FftPlanner::new().plan_fft_forward(n).process(&mut buffer);

            for (k, bin) in buffer.iter().take(n / 2).enumerate() {
                assert_relative_eq!(dft.rex()[k], bin.re, epsilon = 1e-9);
                assert_relative_eq!(dft.imx()[k], bin.im, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        assert_eq!(
            Dft::new(Sample::zeros(50), Sample::zeros(25)),
            Err(Error::ShapeMismatch { rex: 50, imx: 25 })
        );
        assert!(Dft::new(Sample::zeros(25), Sample::zeros(25)).is_ok());
    }

    #[test]
    fn inverse_reconstructs_band_limited_input() {
        let n = 32usize;
        let mut rng = rand::rng();
        let mut x = Sample::zeros(n);
        // Every bin below Nyquist; the Nyquist bin is not part of the transform.
        for k in 0..n / 2 {
            let amplitude = rng.random_range(-1.0..1.0);
            let offset = rng.random_range(-PI..PI);
            for (t, v) in x.as_mut_slice().iter_mut().enumerate() {
                *v += amplitude * (2.0 * PI * (k * t) as f64 / n as f64 + offset).cos();
            }
        }
        let y = x.dft().unwrap().inverse();
        assert_eq!(y.len(), n);
        for (a, b) in y.iter().zip(x.iter()) {
            assert_relative_eq!(a.value(), b.value(), epsilon = 1e-9);
        }
    }

    #[test]
    fn inverse_of_random_even_input_drops_only_the_nyquist_component() {
        for n in [2usize, 10, 64] {
            let x = random_sample(n);
            let y = x.dft().unwrap().inverse();
            assert_eq!(y.len(), x.len());

            // X[N/2] = sum of x[j]·(-1)^j, spread as X[N/2]·(-1)^t / N.
            let sign = |t: usize| if t % 2 == 0 { 1.0 } else { -1.0 };
            let nyquist: f64 = x.iter().enumerate().map(|(j, v)| sign(j) * v.value()).sum();
            for (t, (a, b)) in y.iter().zip(x.iter()).enumerate() {
                let expected = b.value() - nyquist * sign(t) / n as f64;
                assert_relative_eq!(a.value(), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn magnitude_is_exact_per_bin() {
        let dft = random_sample(40).dft().unwrap();
        let magnitude = dft.magnitude();
        for i in 0..dft.len() {
            let (re, im) = (dft.rex()[i], dft.imx()[i]);
            assert_eq!(magnitude[i], (re * re + im * im).sqrt());
        }
    }

    #[test]
    fn reference_phase_rules() {
        let dft = Dft::new(
            Sample::new(vec![3., -1e6, -1e6, 0.]),
            Sample::new(vec![4., -1., 2., 0.]),
        )
        .unwrap();
        let polar = dft.polar();

        assert_relative_eq!(polar.rex()[0], 5.0);
        // |rex| below the lax zero threshold is replaced by 1e-20.
        assert_relative_eq!(polar.imx()[0], PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(polar.imx()[1], -PI);
        assert_relative_eq!(polar.imx()[2], PI);
        assert_eq!(polar.imx()[3], 0.0);

        // The receiver keeps its original coefficients.
        assert_eq!(dft.rex().as_slice(), &[3., -1e6, -1e6, 0.]);
    }

    #[test]
    fn atan2_phase_is_four_quadrant() {
        let dft = Dft::new(
            Sample::new(vec![3., -1., -1., 0.]),
            Sample::new(vec![4., -1., 2., 0.]),
        )
        .unwrap();
        let polar = dft.polar_with(PolarPhase::Atan2);
        for i in 0..dft.len() {
            assert_eq!(polar.imx()[i], dft.imx()[i].atan2(dft.rex()[i]));
        }
        assert_eq!(polar.rex(), &dft.magnitude());
    }

    #[test]
    fn complex_reads_each_bin_by_row_index() {
        let dft = Dft::new(Sample::new(vec![1., 2.]), Sample::new(vec![3., 4.])).unwrap();
        let out = dft.complex();
        assert_relative_eq!(out.rex()[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.imx()[0], -6.0, epsilon = 1e-12);
        assert_relative_eq!(out.rex()[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out.imx()[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn complex_collapses_to_scaled_dc() {
        let n = 12usize;
        let dft = Dft::new(random_sample(n), random_sample(n)).unwrap();
        let out = dft.complex();
        assert_relative_eq!(out.rex()[0], n as f64 * dft.rex()[0], epsilon = 1e-9);
        assert_relative_eq!(out.imx()[0], -(n as f64) * dft.imx()[0], epsilon = 1e-9);
        for i in 1..n {
            assert_relative_eq!(out.rex()[i], 0.0, epsilon = 1e-9);
            assert_relative_eq!(out.imx()[i], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn bins_view_rectangular_pair() {
        let dft = random_sample(16).dft().unwrap();
        let bins = dft.bins();
        assert_eq!(bins.len(), dft.len());
        assert_eq!(bins[3].re, dft.rex()[3]);
        assert_eq!(bins[3].im, dft.imx()[3]);
        assert_eq!(Dft::from_bins(&bins), dft);
    }

    #[test]
    fn equality_is_component_wise() {
        let dft = random_sample(16).dft().unwrap();
        assert!(dft.equals(&dft.clone()));
        let (rex, _) = dft.clone().into_parts();
        let shorter = Dft::new(rex.iter().skip(1).collect(), Sample::zeros(rex.len() - 1)).unwrap();
        assert!(!dft.equals(&shorter));
        assert_eq!(Signal(dft.rex()[0]), dft.rex().get(0).unwrap());
    }

    #[test]
    fn kernels_check_coefficient_lengths() {
        let rex = vec![1.0f64, 2.0];
        let imx = vec![1.0f64];
        assert_eq!(
            MagnitudeKernel.run_alloc(&rex, &imx),
            Err(ExecInvariantViolation::LengthMismatch {
                arg: "imx",
                expected: 2,
                got: 1
            })
        );

        let kernel = PolarKernel::try_new(PolarConfig::default()).expect("kernel");
        let mut magnitude = vec![0.0f64; 3];
        let mut phase = vec![0.0f64; 2];
        assert!(kernel
            .run_into(&rex, &rex, &mut magnitude, &mut phase)
            .is_err());

        let mut out_rex = vec![0.0f64; 2];
        let mut out_imx = vec![0.0f64; 2];
        ResynthesisKernel
            .run_into(&rex, &rex, &mut out_rex, &mut out_imx)
            .expect("matching lengths");
    }

    #[test]
    fn polar_kernel_keeps_config_and_rejects_bad_tolerance() {
        let kernel = PolarKernel::try_new(PolarConfig::default()).expect("default config");
        assert_eq!(kernel.phase(), PolarPhase::Reference);
        assert_eq!(kernel.tolerance(), DEFAULT_TOLERANCE);
        let kernel = PolarKernel::try_new(PolarConfig {
            phase: PolarPhase::Atan2,
            tolerance: 1e-3,
        })
        .expect("positive tolerance");
        assert_eq!(kernel.phase(), PolarPhase::Atan2);
        assert_relative_eq!(kernel.tolerance(), 1e-3);

        let err = PolarKernel::try_new(PolarConfig {
            tolerance: 0.0,
            ..PolarConfig::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            crate::kernel::ConfigError::InvalidArgument { arg: "tolerance", .. }
        ));
    }

    #[test]
    fn generic_kernels_run_on_f32() {
        let x = [1.0f32, 0.0, -1.0, 0.0];
        let (rex, imx) = forward_dft(&x);
        assert_relative_eq!(rex[1], 2.0, epsilon = 1e-6);
        let y = inverse_dft(rex, imx).unwrap();
        for (a, b) in y.iter().zip(x.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }

        let mut out = vec![0.0f32; 3];
        let err = InverseDftKernel
            .run_into(&mut vec![0.0f32; 2], &mut vec![0.0f32; 2], &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 4,
                got: 3
            }
        );
    }
}
