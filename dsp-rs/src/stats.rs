//! Descriptive statistics over time-domain samples.
//!
//! Reductions fail with [`ExecInvariantViolation::DegenerateInput`] instead of
//! returning NaN or dividing by zero when there are too few observations.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use core::{borrow::Borrow, iter::Sum};
use dsp_rs_core::float_from;
use num_traits::{Float, Num, NumCast};

/// 1D mean reduction capability.
pub trait MeanReduce1D<T> {
    /// Compute the mean and sample count.
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D variance reduction capability.
pub trait VarianceReduce1D<T> {
    /// Compute the variance and sample count.
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D standard-deviation reduction capability.
pub trait StdevReduce1D<T> {
    /// Compute the standard deviation and sample count.
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Empty config for stateless kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsConfig;

/// Constructor config for [`VarianceKernel`] and [`StdevKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceConfig {
    /// Delta degrees of freedom: the divisor is `N - ddof`.
    pub ddof: usize,
}

impl Default for VarianceConfig {
    /// Bessel's correction, `N - 1`.
    fn default() -> Self {
        Self { ddof: 1 }
    }
}

/// Trait-first mean kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanKernel;

impl KernelLifecycle for MeanKernel {
    type Config = StatsConfig;

    fn try_new(_: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl<T> MeanReduce1D<T> for MeanKernel
where
    T: Num + NumCast + Copy,
{
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        mean(input.iter())
    }
}

/// Trait-first variance kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceKernel {
    ddof: usize,
}

impl VarianceKernel {
    /// Return configured delta degrees of freedom.
    pub fn ddof(&self) -> usize {
        self.ddof
    }
}

impl KernelLifecycle for VarianceKernel {
    type Config = VarianceConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self { ddof: config.ddof })
    }
}

impl<T> VarianceReduce1D<T> for VarianceKernel
where
    T: Float + Sum,
{
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        variance(input.iter(), self.ddof)
    }
}

/// Trait-first standard deviation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdevKernel {
    ddof: usize,
}

impl StdevKernel {
    /// Return configured delta degrees of freedom.
    pub fn ddof(&self) -> usize {
        self.ddof
    }
}

impl KernelLifecycle for StdevKernel {
    type Config = VarianceConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self { ddof: config.ddof })
    }
}

impl<T> StdevReduce1D<T> for StdevKernel
where
    T: Float + Sum,
{
    fn run<I>(&self, input: &I) -> Result<(T, usize), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        stdev(input.iter(), self.ddof)
    }
}

///
/// Compute the mean of the signal, `y`
///
/// Return the mean and the number of points averaged
///
/// ```
/// use approx::assert_relative_eq;
/// use dsp_rs::stats::mean;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(3f64, mean(y.iter()).unwrap().0);
///
/// let y: [i64; 5] = [1,2,3,4,5];
/// assert_eq!(3i64, mean(y.iter()).unwrap().0);
///
/// let y: &[f32] = &[];
/// assert!(mean::<_, f32>(y.iter()).is_err());
///
/// ```
///
pub fn mean<YI, F>(y: YI) -> Result<(F, usize), ExecInvariantViolation>
where
    F: Num + NumCast + Copy,
    YI: Iterator,
    YI::Item: Borrow<F>,
{
    let (sum, count) = y.fold((F::zero(), 0usize), |acc, yi| {
        (acc.0 + *yi.borrow(), acc.1 + 1)
    });
    if count == 0 {
        return Err(ExecInvariantViolation::DegenerateInput {
            op: "mean",
            required: 1,
            got: 0,
        });
    }
    let n = F::from(count).ok_or(ExecInvariantViolation::InvalidState {
        reason: "sample count is not representable in the element type",
    })?;
    Ok((sum / n, count))
}

///
/// Compute the variance of the signal, `y`, dividing the summed squared
/// deviations by `N - ddof`.
///
/// Return the variance and the number of points
///
/// ```
/// use approx::assert_relative_eq;
/// use dsp_rs::stats::variance;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(2.5f64, variance(y.iter(), 1).unwrap().0);
/// assert_relative_eq!(2f64, variance(y.iter(), 0).unwrap().0);
///
/// let y: [f64; 1] = [1.];
/// assert!(variance::<_, f64>(y.iter(), 1).is_err());
///
/// ```
///
pub fn variance<YI, F>(y: YI, ddof: usize) -> Result<(F, usize), ExecInvariantViolation>
where
    F: Float + Sum,
    YI: Iterator + Clone,
    YI::Item: Borrow<F>,
{
    let n = y.clone().count();
    if n <= ddof {
        return Err(ExecInvariantViolation::DegenerateInput {
            op: "variance",
            required: ddof + 1,
            got: n,
        });
    }
    let (avg, n) = mean(y.clone())?;
    let sum: F = y
        .map(|f| {
            let delta = *f.borrow() - avg;
            delta * delta
        })
        .sum::<F>();
    Ok((sum / float_from::<F, _>(n - ddof), n))
}

///
/// Compute the standard deviation of the signal, `y`
///
/// Return the standard deviation and the number of points
///
/// ```
/// use approx::assert_relative_eq;
/// use dsp_rs::stats::stdev;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(1.58113883008, stdev::<_, f64>(y.iter(), 1).unwrap().0, max_relative = 1e-8);
///
/// let y: &[f32] = &[];
/// assert!(stdev::<_, f32>(y.iter(), 1).is_err());
///
/// ```
pub fn stdev<YI, F>(y: YI, ddof: usize) -> Result<(F, usize), ExecInvariantViolation>
where
    F: Float + Sum,
    YI: Iterator + Clone,
    YI::Item: Borrow<F>,
{
    let (v, n) = variance(y, ddof)?;
    Ok((v.sqrt(), n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use approx::assert_relative_eq;
    use ndarray::{s, Array1};

    #[test]
    fn bessel_corrected_deviation() {
        let y = [2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // 32 / 7 under Bessel's correction, 32 / 8 without it
        let (sd, n) = stdev::<_, f64>(y.iter(), 1).expect("eight observations");
        assert_eq!(n, 8);
        assert_relative_eq!(sd, (32.0f64 / 7.0).sqrt(), max_relative = 1e-12);

        let (population, _) = stdev::<_, f64>(y.iter(), 0).expect("eight observations");
        assert_relative_eq!(population, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn mean_rejects_empty_input() {
        let y: [f64; 0] = [];
        assert_eq!(
            mean::<_, f64>(y.iter()),
            Err(ExecInvariantViolation::DegenerateInput {
                op: "mean",
                required: 1,
                got: 0,
            })
        );
    }

    #[test]
    fn variance_requires_more_points_than_ddof() {
        let y = [3.0f64];
        assert_eq!(
            variance::<_, f64>(y.iter(), 1),
            Err(ExecInvariantViolation::DegenerateInput {
                op: "variance",
                required: 2,
                got: 1,
            })
        );
        assert_eq!(variance::<_, f64>(y.iter(), 0), Ok((0.0, 1)));
    }

    #[test]
    fn kernels_reduce_arrays() {
        let y = Array1::from(vec![1.0f64, 2.0, 3.0, 4.0, 5.0]);

        let mean_kernel = MeanKernel::try_new(StatsConfig).expect("stateless kernel");
        assert_eq!(MeanReduce1D::<f64>::run(&mean_kernel, &y), Ok((3.0, 5)));

        let var_kernel =
            VarianceKernel::try_new(VarianceConfig::default()).expect("default config");
        let (var, _) = VarianceReduce1D::<f64>::run(&var_kernel, &y).expect("variance");
        assert_relative_eq!(var, 2.5);

        let sd_kernel = StdevKernel::try_new(VarianceConfig { ddof: 0 }).expect("ddof 0");
        let (sd, _) = StdevReduce1D::<f64>::run(&sd_kernel, &y).expect("stdev");
        assert_relative_eq!(sd, 2.0f64.sqrt());
    }

    #[test]
    fn kernels_reject_strided_views() {
        let y = Array1::from(vec![1.0f64, 2.0, 3.0, 4.0]);
        let strided = y.slice(s![..;2]);
        let kernel = MeanKernel::try_new(StatsConfig).expect("stateless kernel");
        let err = MeanReduce1D::<f64>::run(&kernel, &strided).expect_err("non-contiguous");
        assert!(matches!(err, ExecInvariantViolation::Config(_)));
    }
}
