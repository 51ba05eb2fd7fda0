//! Trait interfaces for signal-processing capabilities.
//!
//! These traits define the trait-first API shape used by the kernels in
//! [`accumulate`](super::accumulate), [`convolve`](super::convolve),
//! [`dft`](super::dft) and [`wave`](super::wave).

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use alloc::vec::Vec;

/// Pair of equal-length coefficient buffers, `(rex, imx)` or `(magnitude, phase)`.
pub type CoefficientPair<T> = (Vec<T>, Vec<T>);

/// 1D convolution capability.
pub trait Convolve1D<T> {
    /// Run convolution into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run convolution and allocate output.
    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// 1D running-sum capability.
pub trait RunningSum1D<T> {
    /// Accumulate into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Accumulate and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D first-difference capability.
pub trait FirstDifference1D<T> {
    /// Difference into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Difference and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Forward direct DFT capability.
pub trait ForwardDft1D<T> {
    /// Transform into caller-provided `rex` and `imx` buffers of length `N / 2`.
    fn run_into<I, OR, OI>(
        &self,
        input: &I,
        rex: &mut OR,
        imx: &mut OI,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        OR: Write1D<T> + ?Sized,
        OI: Write1D<T> + ?Sized;

    /// Transform and allocate `(rex, imx)`.
    fn run_alloc<I>(&self, input: &I) -> Result<CoefficientPair<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Magnitude spectrum capability.
pub trait Magnitude1D<T> {
    /// Compute per-bin magnitude into a caller-provided output buffer.
    fn run_into<IR, II, O>(
        &self,
        rex: &IR,
        imx: &II,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Compute per-bin magnitude and allocate output.
    fn run_alloc<IR, II>(&self, rex: &IR, imx: &II) -> Result<Vec<T>, ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized;
}

/// Rectangular to polar conversion capability.
pub trait PolarConvert1D<T> {
    /// Convert into caller-provided `magnitude` and `phase` buffers.
    fn run_into<IR, II, OM, OP>(
        &self,
        rex: &IR,
        imx: &II,
        magnitude: &mut OM,
        phase: &mut OP,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized,
        OM: Write1D<T> + ?Sized,
        OP: Write1D<T> + ?Sized;

    /// Convert and allocate `(magnitude, phase)`.
    fn run_alloc<IR, II>(
        &self,
        rex: &IR,
        imx: &II,
    ) -> Result<CoefficientPair<T>, ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized;
}

/// Inverse direct DFT capability.
///
/// The coefficient buffers are scaled in place before synthesis, so their
/// contents are unspecified once a run returns.
pub trait InverseDft1D<T> {
    /// Synthesize into a caller-provided output buffer of length `2 * rex.len()`.
    fn run_into<IR, II, O>(
        &self,
        rex: &mut IR,
        imx: &mut II,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Write1D<T> + ?Sized,
        II: Write1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Synthesize and allocate output.
    fn run_alloc<IR, II>(&self, rex: &mut IR, imx: &mut II) -> Result<Vec<T>, ExecInvariantViolation>
    where
        IR: Write1D<T> + ?Sized,
        II: Write1D<T> + ?Sized;
}

/// Direct complex re-synthesis capability.
pub trait Resynthesize1D<T> {
    /// Re-synthesize into caller-provided `rex` and `imx` output buffers.
    fn run_into<IR, II, OR, OI>(
        &self,
        rex: &IR,
        imx: &II,
        out_rex: &mut OR,
        out_imx: &mut OI,
    ) -> Result<(), ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized,
        OR: Write1D<T> + ?Sized,
        OI: Write1D<T> + ?Sized;

    /// Re-synthesize and allocate `(rex, imx)`.
    fn run_alloc<IR, II>(
        &self,
        rex: &IR,
        imx: &II,
    ) -> Result<CoefficientPair<T>, ExecInvariantViolation>
    where
        IR: Read1D<T> + ?Sized,
        II: Read1D<T> + ?Sized;
}

/// Stateful waveform generation capability.
pub trait Oscillate1D<T> {
    /// Fill a caller-provided buffer with the next `out.len()` values.
    fn run_into<O>(&mut self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the next `len` values and allocate output.
    fn run_alloc(&mut self, len: usize) -> Result<Vec<T>, ExecInvariantViolation>;
}
