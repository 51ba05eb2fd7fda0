//! Oscillators: phase-accumulating waveform generators.
//!
//! Phase is tracked in cycles. Every step yields the value at the current
//! phase, then advances by `frequency / sample_rate` and wraps into `[0, 1)`.
//! Oscillators are infinite iterators of [`Signal`](crate::Signal), so they
//! plug into [`Sample::from_stream`](crate::Sample::from_stream).

use crate::error::Result;
use crate::kernel::KernelLifecycle;
use crate::sample::Sample;

mod kernels;
pub use kernels::*;

/// Generate `len` values from a fresh oscillator.
///
/// ```
/// use dsp_rs::signal::wave::{oscillate, OscillatorConfig, Waveform};
///
/// let saw = oscillate(OscillatorConfig::new(Waveform::Saw, 1.0, 4.0), 4).unwrap();
/// assert_eq!(saw.as_slice(), &[1.0, 0.5, 0.0, -0.5]);
/// ```
pub fn oscillate(config: OscillatorConfig, len: usize) -> Result<Sample> {
    let mut osc = OscillatorKernel::try_new(config)?;
    Ok(Sample::from_stream(&mut osc, len))
}
