//! Trait-first kernels for the direct discrete Fourier transform.
//!
//! All transforms here are the O(N²) direct summations. Coefficients come in
//! the rectangular pair `(rex, imx)` where `imx` holds the *negated* sine
//! correlation.

use crate::kernel::{expect_len, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::sample::{almost_equals, DEFAULT_TOLERANCE};
use crate::signal::traits::{
    CoefficientPair, ForwardDft1D, InverseDft1D, Magnitude1D, PolarConvert1D, Resynthesize1D,
};
use alloc::vec;
use alloc::vec::Vec;
use dsp_rs_core::float_from;
use num_traits::{Float, FloatConst};

/// Stand-in for a zero real part when computing the reference phase.
const ZERO_REX_SUBSTITUTE: f64 = 1e-20;

fn two_pi<F: Float + FloatConst>() -> F {
    F::PI() + F::PI()
}

fn check_pair<T>(rex: &[T], imx: &[T]) -> Result<(), ExecInvariantViolation> {
    expect_len("imx", rex.len(), imx.len())
}

pub(crate) fn forward_impl<F>(x: &[F], rex: &mut [F], imx: &mut [F])
where
    F: Float + FloatConst,
{
    let size: F = float_from(x.len());
    for (i, (re, im)) in rex.iter_mut().zip(imx.iter_mut()).enumerate() {
        *re = F::zero();
        *im = F::zero();
        for (j, xj) in x.iter().enumerate() {
            let angle = float_from::<F, _>(2 * i * j) * F::PI() / size;
            *re = *re + *xj * angle.cos();
            *im = *im - *xj * angle.sin();
        }
    }
}

pub(crate) fn magnitude_impl<F>(rex: &[F], imx: &[F], out: &mut [F])
where
    F: Float,
{
    for ((out, re), im) in out.iter_mut().zip(rex.iter()).zip(imx.iter()) {
        *out = (*re * *re + *im * *im).sqrt();
    }
}

pub(crate) fn polar_impl<F>(
    rex: &[F],
    imx: &[F],
    magnitude: &mut [F],
    phase: &mut [F],
    mode: PolarPhase,
    tolerance: F,
) where
    F: Float + FloatConst,
{
    magnitude_impl(rex, imx, magnitude);
    for ((phase, re), im) in phase.iter_mut().zip(rex.iter()).zip(imx.iter()) {
        *phase = match mode {
            PolarPhase::Atan2 => im.atan2(*re),
            PolarPhase::Reference => reference_phase(*re, *im, tolerance),
        };
    }
}

fn reference_phase<F>(mut re: F, im: F, tolerance: F) -> F
where
    F: Float + FloatConst,
{
    let mut phase = F::zero();
    if almost_equals(re, F::zero(), tolerance) {
        re = float_from(ZERO_REX_SUBSTITUTE);
        phase = (im / re).atan();
    }
    if re < F::zero() && im < F::zero() {
        phase = phase - F::PI();
    }
    if re < F::zero() && im >= F::zero() {
        phase = phase + F::PI();
    }
    phase
}

pub(crate) fn inverse_impl<F>(rex: &mut [F], imx: &mut [F], out: &mut [F])
where
    F: Float + FloatConst,
{
    let length = rex.len();
    if length == 0 {
        return;
    }
    let scale: F = float_from(length);
    for (re, im) in rex.iter_mut().zip(imx.iter_mut()) {
        *re = *re / scale;
        *im = -*im / scale;
    }
    let two: F = float_from(2);
    rex[0] = rex[0] / two;
    imx[0] = -imx[0] / two;

    let size: F = float_from(2 * length);
    for (i, out) in out.iter_mut().enumerate() {
        *out = F::zero();
        for (j, (re, im)) in rex.iter().zip(imx.iter()).enumerate() {
            let angle = float_from::<F, _>(i * j) * two_pi::<F>() / size;
            *out = *out + *re * angle.cos();
            *out = *out + *im * angle.sin();
        }
    }
}

pub(crate) fn resynthesize_impl<F>(rex: &[F], imx: &[F], out_rex: &mut [F], out_imx: &mut [F])
where
    F: Float + FloatConst,
{
    let len = rex.len();
    let size: F = float_from(len);
    for (i, (fr, fi)) in out_rex.iter_mut().zip(out_imx.iter_mut()).enumerate() {
        // Every term of bin `i` reads coefficient `i`; only the kernel angle varies with `j`.
        let (re, im) = (rex[i], imx[i]);
        *fr = F::zero();
        *fi = F::zero();
        for j in 0..len {
            let angle = two_pi::<F>() * float_from::<F, _>(i * j) / size;
            let sr = angle.cos();
            let si = -angle.sin();
            *fr = *fr + (re * sr - im * si);
            *fi = *fi + (im * si - im * sr);
        }
    }
}

/// Constructor config for [`ForwardDftKernel`], [`MagnitudeKernel`],
/// [`InverseDftKernel`] and [`ResynthesisKernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DftConfig;

/// Trait-first forward direct DFT kernel.
///
/// An input of `N` samples produces `N / 2` bins (integer division); with odd
/// `N` the last sample still contributes to every bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardDftKernel;

impl ForwardDftKernel {
    /// Number of bins produced for an input of `n` samples.
    pub fn bins(&self, n: usize) -> usize {
        n / 2
    }
}

impl KernelLifecycle for ForwardDftKernel {
    type Config = DftConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<F> ForwardDft1D<F> for ForwardDftKernel
where
    F: Float + FloatConst,
{
    fn run_into<I, OR, OI>(
        &self,
        input: &I,
        rex: &mut OR,
        imx: &mut OI,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
        OR: Write1D<F> + ?Sized,
        OI: Write1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let expected = self.bins(input.len());
        let rex = rex.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        expect_len("rex", expected, rex.len())?;
        let imx = imx.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        expect_len("imx", expected, imx.len())?;

        forward_impl(input, rex, imx);
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<CoefficientPair<F>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let bins = self.bins(input.len());
        let mut rex = vec![F::zero(); bins];
        let mut imx = vec![F::zero(); bins];
        forward_impl(input, &mut rex, &mut imx);
        Ok((rex, imx))
    }
}

/// Trait-first magnitude kernel, `sqrt(rex² + imx²)` per bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagnitudeKernel;

impl KernelLifecycle for MagnitudeKernel {
    type Config = DftConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<F> Magnitude1D<F> for MagnitudeKernel
where
    F: Float,
{
    fn run_into<IR, II, O>(
        &self,
        rex: &IR,
        imx: &II,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out", rex.len(), out.len())?;

        magnitude_impl(rex, imx, out);
        Ok(())
    }

    fn run_alloc<IR, II>(&self, rex: &IR, imx: &II) -> Result<Vec<F>, ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let mut out = vec![F::zero(); rex.len()];
        magnitude_impl(rex, imx, &mut out);
        Ok(out)
    }
}

/// How [`PolarKernel`] derives the phase of each bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolarPhase {
    /// Phase rules of the reference implementation, applied in order:
    ///
    /// 1. when `rex` equals zero under [`almost_equals`], substitute `1e-20`
    ///    and take `atan(imx / rex)`;
    /// 2. when `rex < 0` and `imx < 0`, subtract π;
    /// 3. when `rex < 0` and `imx >= 0`, add π.
    ///
    /// Bins that match none of the rules keep a phase of zero. The zero test
    /// uses the scaled-and-rounded comparison, which with the default
    /// tolerance treats any `|rex| < 5e5` as zero.
    #[default]
    Reference,
    /// Four-quadrant `atan2(imx, rex)`.
    Atan2,
}

/// Constructor config for [`PolarKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarConfig {
    /// Phase rule.
    pub phase: PolarPhase,
    /// Tolerance factor of the zero test used by [`PolarPhase::Reference`].
    pub tolerance: f64,
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            phase: PolarPhase::Reference,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Trait-first rectangular to polar conversion kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarKernel {
    phase: PolarPhase,
    tolerance: f64,
}

impl PolarKernel {
    /// Return configured phase rule.
    pub fn phase(&self) -> PolarPhase {
        self.phase
    }

    /// Return configured tolerance factor.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl KernelLifecycle for PolarKernel {
    type Config = PolarConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "tolerance",
                reason: "tolerance must be finite and > 0",
            });
        }
        Ok(Self {
            phase: config.phase,
            tolerance: config.tolerance,
        })
    }
}

impl<F> PolarConvert1D<F> for PolarKernel
where
    F: Float + FloatConst,
{
    fn run_into<IR, II, OM, OP>(
        &self,
        rex: &IR,
        imx: &II,
        magnitude: &mut OM,
        phase: &mut OP,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
        OM: Write1D<F> + ?Sized,
        OP: Write1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let magnitude = magnitude
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("magnitude", rex.len(), magnitude.len())?;
        let phase = phase
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("phase", rex.len(), phase.len())?;

        polar_impl(
            rex,
            imx,
            magnitude,
            phase,
            self.phase,
            float_from(self.tolerance),
        );
        Ok(())
    }

    fn run_alloc<IR, II>(
        &self,
        rex: &IR,
        imx: &II,
    ) -> Result<CoefficientPair<F>, ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let mut magnitude = vec![F::zero(); rex.len()];
        let mut phase = vec![F::zero(); rex.len()];
        polar_impl(
            rex,
            imx,
            &mut magnitude,
            &mut phase,
            self.phase,
            float_from(self.tolerance),
        );
        Ok((magnitude, phase))
    }
}

/// Trait-first inverse direct DFT kernel.
///
/// `L` bins synthesize `2L` time-domain values. The coefficient buffers are
/// used as scratch: they are scaled in place before synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseDftKernel;

impl InverseDftKernel {
    /// Number of output values for `bins` coefficients.
    pub fn output_len(&self, bins: usize) -> usize {
        2 * bins
    }
}

impl KernelLifecycle for InverseDftKernel {
    type Config = DftConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<F> InverseDft1D<F> for InverseDftKernel
where
    F: Float + FloatConst,
{
    fn run_into<IR, II, O>(
        &self,
        rex: &mut IR,
        imx: &mut II,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Write1D<F> + ?Sized,
        II: Write1D<F> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let rex = rex.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        let imx = imx.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out", self.output_len(rex.len()), out.len())?;

        inverse_impl(rex, imx, out);
        Ok(())
    }

    fn run_alloc<IR, II>(&self, rex: &mut IR, imx: &mut II) -> Result<Vec<F>, ExecInvariantViolation>
    where
        IR: Write1D<F> + ?Sized,
        II: Write1D<F> + ?Sized,
    {
        let rex = rex.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        let imx = imx.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let mut out = vec![F::zero(); self.output_len(rex.len())];
        inverse_impl(rex, imx, &mut out);
        Ok(out)
    }
}

/// Trait-first direct complex re-synthesis kernel.
///
/// For every pair `(i, j)` with `sr = cos(2π·i·j/N)` and `si = -sin(2π·i·j/N)`:
///
/// ```text
/// out_rex[i] += rex[i]·sr − imx[i]·si
/// out_imx[i] += imx[i]·si − imx[i]·sr
/// ```
///
/// The coefficients are indexed by `i`, not `j`, so each output bin depends
/// on its own input bin only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResynthesisKernel;

impl KernelLifecycle for ResynthesisKernel {
    type Config = DftConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<F> Resynthesize1D<F> for ResynthesisKernel
where
    F: Float + FloatConst,
{
    fn run_into<IR, II, OR, OI>(
        &self,
        rex: &IR,
        imx: &II,
        out_rex: &mut OR,
        out_imx: &mut OI,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
        OR: Write1D<F> + ?Sized,
        OI: Write1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let out_rex = out_rex
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out_rex", rex.len(), out_rex.len())?;
        let out_imx = out_imx
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out_imx", rex.len(), out_imx.len())?;

        resynthesize_impl(rex, imx, out_rex, out_imx);
        Ok(())
    }

    fn run_alloc<IR, II>(
        &self,
        rex: &IR,
        imx: &II,
    ) -> Result<CoefficientPair<F>, ExecInvariantViolation>
    where
        IR: Read1D<F> + ?Sized,
        II: Read1D<F> + ?Sized,
    {
        let rex = rex.read_slice().map_err(ExecInvariantViolation::from)?;
        let imx = imx.read_slice().map_err(ExecInvariantViolation::from)?;
        check_pair(rex, imx)?;
        let mut out_rex = vec![F::zero(); rex.len()];
        let mut out_imx = vec![F::zero(); rex.len()];
        resynthesize_impl(rex, imx, &mut out_rex, &mut out_imx);
        Ok((out_rex, out_imx))
    }
}
