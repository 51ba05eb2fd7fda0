//! Running sum and first difference.
//!
//! The two are inverses of each other: `first_difference(running_sum(x)) == x`
//! up to rounding, because the first difference keeps `x[0]` unchanged.

use crate::kernel::{expect_len, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::{FirstDifference1D, RunningSum1D};
use alloc::vec::Vec;
use dsp_rs_core::num_rs::{cumsum, diff};
use ndarray::ArrayView1;
use num_traits::NumAssign;

/// Cumulative sum: `out[0] = x[0]`, `out[i] = out[i - 1] + x[i]`.
///
/// ```
/// use dsp_rs::signal::accumulate::running_sum;
///
/// assert_eq!(running_sum(&[1., 2., 3., 4.]), vec![1., 3., 6., 10.]);
/// ```
pub fn running_sum<T>(x: &[T]) -> Vec<T>
where
    T: NumAssign + Copy,
{
    cumsum(ArrayView1::from(x)).to_vec()
}

/// First difference: `out[0] = x[0]`, `out[i] = x[i] - x[i - 1]`.
///
/// ```
/// use dsp_rs::signal::accumulate::first_difference;
///
/// assert_eq!(first_difference(&[1., 3., 6., 10.]), vec![1., 2., 3., 4.]);
/// ```
pub fn first_difference<T>(x: &[T]) -> Vec<T>
where
    T: NumAssign + Copy,
{
    diff(ArrayView1::from(x), Some(T::zero())).to_vec()
}

/// Constructor config for [`RunningSumKernel`] and [`FirstDifferenceKernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AccumulateConfig;

/// Trait-first running-sum kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningSumKernel;

impl KernelLifecycle for RunningSumKernel {
    type Config = AccumulateConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<T> RunningSum1D<T> for RunningSumKernel
where
    T: NumAssign + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out", input.len(), out.len())?;

        let mut acc = T::zero();
        for (out, xi) in out.iter_mut().zip(input.iter()) {
            acc += *xi;
            *out = acc;
        }
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        Ok(running_sum(input))
    }
}

/// Trait-first first-difference kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDifferenceKernel;

impl KernelLifecycle for FirstDifferenceKernel {
    type Config = AccumulateConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<T> FirstDifference1D<T> for FirstDifferenceKernel
where
    T: NumAssign + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        expect_len("out", input.len(), out.len())?;

        let mut previous = T::zero();
        for (out, xi) in out.iter_mut().zip(input.iter()) {
            *out = *xi - previous;
            previous = *xi;
        }
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        Ok(first_difference(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn first_element_passes_through_unchanged() {
        let x = [-2.5f64, 1.0, 0.0];
        assert_eq!(running_sum(&x)[0], -2.5);
        assert_eq!(first_difference(&x)[0], -2.5);
        assert!(running_sum::<f64>(&[]).is_empty());
        assert!(first_difference::<f64>(&[]).is_empty());
    }

    #[test]
    fn differences_of_running_sum_recover_input() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let len = rng.random_range(1..200);
            let x: Vec<f64> = (0..len).map(|_| rng.random_range(-10.0..10.0)).collect();
            let sums = running_sum(&x);
            for i in 1..len {
                assert_relative_eq!(sums[i] - sums[i - 1], x[i], epsilon = 1e-9);
            }
            let recovered = first_difference(&sums);
            for (r, xi) in recovered.iter().zip(x.iter()) {
                assert_relative_eq!(*r, *xi, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn kernels_match_free_functions() {
        let x = vec![1.0f64, 4.0, 9.0, 16.0];
        let sum_kernel = RunningSumKernel::try_new(AccumulateConfig).expect("stateless");
        let diff_kernel = FirstDifferenceKernel::try_new(AccumulateConfig).expect("stateless");

        let mut out = vec![0.0; 4];
        sum_kernel.run_into(&x, &mut out).expect("running sum");
        assert_eq!(out, running_sum(&x));
        assert_eq!(sum_kernel.run_alloc(&x).expect("running sum"), out);

        diff_kernel.run_into(&x, &mut out).expect("first difference");
        assert_eq!(out, vec![1.0, 3.0, 5.0, 7.0]);
        assert_eq!(diff_kernel.run_alloc(&x).expect("first difference"), out);
    }

    #[test]
    fn kernels_reject_wrong_output_length() {
        let x = [1.0f64, 2.0, 3.0];
        let mut out = [0.0f64; 2];
        let err = RunningSumKernel
            .run_into(&x, &mut out)
            .expect_err("mismatched output length should error");
        assert!(matches!(err, ExecInvariantViolation::LengthMismatch { .. }));
        let err = FirstDifferenceKernel
            .run_into(&x, &mut out)
            .expect_err("mismatched output length should error");
        assert!(matches!(err, ExecInvariantViolation::LengthMismatch { .. }));
    }
}
