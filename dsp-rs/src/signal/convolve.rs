//! Linear convolution of time-domain samples.

use crate::error::Result;
use crate::kernel::{expect_len, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::Convolve1D;
use alloc::vec::Vec;
use dsp_rs_core::num_rs;
use ndarray::ArrayView1;
use num_traits::NumAssign;

pub use dsp_rs_core::num_rs::ConvolveMode;

/// Constructor config for [`ConvolveKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvolveConfig {
    /// Output shape; see [`ConvolveMode`].
    pub mode: ConvolveMode,
}

/// Trait-first 1D convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveKernel {
    mode: ConvolveMode,
}

impl ConvolveKernel {
    /// Return configured mode.
    pub fn mode(&self) -> ConvolveMode {
        self.mode
    }

    /// Output length for inputs of lengths `n` and `m`, `None` if either is empty.
    pub fn output_len(&self, n: usize, m: usize) -> Option<usize> {
        self.mode.output_len(n, m)
    }
}

impl KernelLifecycle for ConvolveKernel {
    type Config = ConvolveConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self { mode: config.mode })
    }
}

fn check_inputs<T>(in1: &[T], in2: &[T]) -> core::result::Result<(), ExecInvariantViolation> {
    if in1.is_empty() {
        return Err(ConfigError::EmptyInput { arg: "in1" }.into());
    }
    if in2.is_empty() {
        return Err(ConfigError::EmptyInput { arg: "in2" }.into());
    }
    Ok(())
}

fn convolve_impl<T>(in1: &[T], in2: &[T], mode: ConvolveMode) -> Vec<T>
where
    T: NumAssign + Copy,
{
    // Callers reject empty inputs, the only failure of the core routine.
    num_rs::convolve(ArrayView1::from(in1), ArrayView1::from(in2), mode)
        .map(|out| out.to_vec())
        .unwrap_or_default()
}

impl<T> Convolve1D<T> for ConvolveKernel
where
    T: NumAssign + Copy,
{
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let in1 = in1.read_slice().map_err(ExecInvariantViolation::from)?;
        let in2 = in2.read_slice().map_err(ExecInvariantViolation::from)?;
        check_inputs(in1, in2)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        let expected = self
            .output_len(in1.len(), in2.len())
            .ok_or(ConfigError::EmptyInput { arg: "in1" })?;
        expect_len("out", expected, out.len())?;
        out.copy_from_slice(&convolve_impl(in1, in2, self.mode));
        Ok(())
    }

    fn run_alloc<I1, I2>(
        &self,
        in1: &I1,
        in2: &I2,
    ) -> core::result::Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
    {
        let in1 = in1.read_slice().map_err(ExecInvariantViolation::from)?;
        let in2 = in2.read_slice().map_err(ExecInvariantViolation::from)?;
        check_inputs(in1, in2)?;
        Ok(convolve_impl(in1, in2, self.mode))
    }
}

/// Convolve `in1` with `in2`, shaping the output by `mode`.
///
/// ```
/// use dsp_rs::signal::convolve::{convolve, ConvolveMode};
///
/// let y = convolve(&[1., 2., 3.], &[0., 1., 0.5], ConvolveMode::Full).unwrap();
/// assert_eq!(y, vec![0., 1., 2.5, 4., 1.5]);
/// ```
pub fn convolve<T>(in1: &[T], in2: &[T], mode: ConvolveMode) -> Result<Vec<T>>
where
    T: NumAssign + Copy,
{
    let kernel = ConvolveKernel::try_new(ConvolveConfig { mode })?;
    Ok(kernel.run_alloc(in1, in2)?)
}

/// Direct double-sum convolution `out[i + j] += x[i] * h[j]` with an output of
/// `x.len() + h.len()` values.
///
/// That is one longer than the full linear convolution: the final value is
/// never written and stays zero. Empty inputs are allowed and give all zeros.
///
/// ```
/// use dsp_rs::signal::convolve::convolution;
///
/// let y = convolution(&[1., 2., 3.], &[0., 1., 0.5]);
/// assert_eq!(y, vec![0., 1., 2.5, 4., 1.5, 0.]);
/// ```
pub fn convolution<T>(x: &[T], h: &[T]) -> Vec<T>
where
    T: NumAssign + Copy,
{
    let len = x.len() + h.len();
    if x.is_empty() || h.is_empty() {
        return alloc::vec![T::zero(); len];
    }
    let mut out = convolve_impl(x, h, ConvolveMode::Full);
    out.resize(len, T::zero());
    out
}
