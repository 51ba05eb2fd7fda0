//! Scalar signal values and ordered sample sequences.
//!
//! Equality between values uses a scaled-and-rounded rule rather than an
//! epsilon comparison:
//!
//! ```text
//! |round((a - b) · tolerance)| < tolerance
//! ```
//!
//! With the default tolerance of `1e-6` this accepts any difference below
//! `5e5`, so it is a very lax comparison. It is kept bit-for-bit because
//! stored fixtures and downstream checks rely on it.

use crate::error::Result;
use crate::kernel::SampleStream;
use crate::signal::{accumulate, convolve, dft::Dft};
use crate::stats;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};
use ndarray::Array1;
use num_traits::Float;

/// Tolerance factor used by [`Signal::equals`] and [`Sample::equals`].
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Compare `a` and `b` with the scaled-and-rounded rule.
///
/// ```
/// use dsp_rs::sample::almost_equals;
///
/// assert!(almost_equals(1.0f64, 1.0, 1e-6));
/// // Differences are scaled by the tolerance before rounding.
/// assert!(almost_equals(1.0f64, 2.0, 1e-6));
/// assert!(!almost_equals(1.0f64, 2.0, 1.0));
/// ```
pub fn almost_equals<F: Float>(a: F, b: F, tolerance: F) -> bool {
    ((a - b) * tolerance).round().abs() < tolerance
}

/// One scalar sample value.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Signal(pub f64);

impl Signal {
    /// Wrap a raw value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Square root of the value. Negative values give NaN.
    pub fn deviation(self) -> Signal {
        Signal(Float::sqrt(self.0))
    }

    /// Compare with `other` using an explicit tolerance factor.
    pub fn almost_equals(self, other: Signal, tolerance: f64) -> bool {
        almost_equals(self.0, other.0, tolerance)
    }

    /// Compare with `other` using [`DEFAULT_TOLERANCE`].
    pub fn equals(self, other: Signal) -> bool {
        self.almost_equals(other, DEFAULT_TOLERANCE)
    }
}

impl From<f64> for Signal {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Signal> for f64 {
    fn from(value: Signal) -> Self {
        value.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! signal_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Signal {
            type Output = Signal;

            fn $method(self, rhs: Signal) -> Signal {
                Signal(self.0 $op rhs.0)
            }
        }
    };
}

signal_binop!(Add, add, +);
signal_binop!(Sub, sub, -);
signal_binop!(Mul, mul, *);
signal_binop!(Div, div, /);

impl Neg for Signal {
    type Output = Signal;

    fn neg(self) -> Signal {
        Signal(-self.0)
    }
}

/// Ordered sequence of [`Signal`] values.
///
/// ```
/// use dsp_rs::Sample;
///
/// let s = Sample::new(vec![1., 2., 3., 4., 5.]);
/// assert_eq!(s.mean().unwrap().value(), 3.);
/// assert_eq!(s.running_sum().as_slice(), &[1., 3., 6., 10., 15.]);
/// assert_eq!(s.first_difference().as_slice(), &[1., 1., 1., 1., 1.]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// Wrap raw values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// `n` zero values.
    pub fn zeros(n: usize) -> Self {
        Self(alloc::vec![0.0; n])
    }

    /// Collect up to `n` values from a stream. Stops early if the stream ends.
    pub fn from_stream<S>(stream: &mut S, n: usize) -> Self
    where
        S: SampleStream<Signal> + ?Sized,
    {
        let mut values = Vec::with_capacity(n);
        while values.len() < n {
            match stream.next_sample() {
                Some(Signal(v)) => values.push(v),
                None => break,
            }
        }
        Self(values)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sample holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Signal> {
        self.0.get(index).copied().map(Signal)
    }

    /// Iterate values as [`Signal`].
    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.0.iter().copied().map(Signal)
    }

    /// Borrow raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Mutably borrow raw values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Take raw values.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Copy into an owned `ndarray` vector.
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.0.clone())
    }

    /// Append a value.
    pub fn push(&mut self, value: Signal) {
        self.0.push(value.0);
    }

    /// Element-wise comparison with an explicit tolerance factor. Samples of
    /// different lengths are never equal.
    pub fn almost_equals(&self, other: &Sample, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| almost_equals(*a, *b, tolerance))
    }

    /// Element-wise comparison using [`DEFAULT_TOLERANCE`].
    pub fn equals(&self, other: &Sample) -> bool {
        self.almost_equals(other, DEFAULT_TOLERANCE)
    }

    /// Arithmetic mean. Fails on an empty sample.
    pub fn mean(&self) -> Result<Signal> {
        let (avg, _) = stats::mean::<_, f64>(self.0.iter())?;
        Ok(Signal(avg))
    }

    /// Unbiased variance, dividing by `N - 1`. Fails with fewer than two values.
    pub fn variance(&self) -> Result<Signal> {
        let (var, _) = stats::variance::<_, f64>(self.0.iter(), 1)?;
        Ok(Signal(var))
    }

    /// Standard deviation, the square root of [`Sample::variance`].
    pub fn deviation(&self) -> Result<Signal> {
        Ok(self.variance()?.deviation())
    }

    /// Cumulative sum, same length.
    pub fn running_sum(&self) -> Sample {
        Sample(accumulate::running_sum(&self.0))
    }

    /// Linear convolution of length `len(self) + len(other)`; the last value
    /// is always zero.
    pub fn convolution(&self, other: &Sample) -> Sample {
        Sample(convolve::convolution(&self.0, &other.0))
    }

    /// `out[0] = in[0]`, `out[i] = in[i] - in[i - 1]`.
    pub fn first_difference(&self) -> Sample {
        Sample(accumulate::first_difference(&self.0))
    }

    /// Forward direct DFT with `len() / 2` bins.
    pub fn dft(&self) -> Result<Dft> {
        Dft::forward(self)
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Signal> for Sample {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        Self(iter.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl From<Array1<f64>> for Sample {
    fn from(values: Array1<f64>) -> Self {
        Self(values.into_iter().collect())
    }
}

impl From<Sample> for Vec<f64> {
    fn from(sample: Sample) -> Self {
        sample.0
    }
}

impl Index<usize> for Sample {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Sample {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
