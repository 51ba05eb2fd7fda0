//! Trait-first kernels for phase-accumulating oscillators.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::sample::Signal;
use crate::signal::traits::Oscillate1D;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of the generated waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// `sin(2πp)`.
    Sine,
    /// Falling ramp `1 - 2p`.
    Saw,
    /// `1` for the first half cycle, `-1` for the second.
    Square,
    /// `4p - 1` rising to `1`, then `3 - 4p` falling back.
    Triangle,
    /// Uniform values in `[-1, 1)`, redrawn every step unless the frequency is zero.
    Noise,
    /// Additive sawtooth from the first `H` harmonics.
    SawBandLimited,
    /// Additive square from the first `H` odd harmonics.
    SquareBandLimited,
    /// Additive triangle from the first `H` odd harmonics.
    TriangleBandLimited,
}

impl Waveform {
    /// Whether the waveform is a harmonic sum.
    pub fn is_band_limited(self) -> bool {
        matches!(
            self,
            Waveform::SawBandLimited | Waveform::SquareBandLimited | Waveform::TriangleBandLimited
        )
    }
}

/// Constructor config for [`OscillatorKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorConfig {
    /// Waveform to generate.
    pub waveform: Waveform,
    /// Frequency in Hz, `>= 0`.
    pub frequency: f64,
    /// Sample rate in Hz, `> 0`.
    pub sample_rate: f64,
    /// Starting phase in cycles, `[0, 1)`.
    pub phase: f64,
    /// Harmonic count for band-limited waveforms. `None` uses every harmonic
    /// below Nyquist, up to [`MAX_HARMONICS`]. An explicit count is used as given.
    pub harmonics: Option<usize>,
    /// Seed for [`Waveform::Noise`].
    pub seed: u64,
}

impl OscillatorConfig {
    /// Config starting at phase zero with default harmonics and seed.
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Self {
            waveform,
            frequency,
            sample_rate,
            phase: 0.0,
            harmonics: None,
            seed: 0,
        }
    }
}

/// Upper bound on the default harmonic count, which each step sums in full.
pub const MAX_HARMONICS: usize = 256;

/// Number of harmonics that stay below Nyquist. Odd-only series count the
/// terms `(2k - 1)·f`. Clamped to `[1, MAX_HARMONICS]`.
fn harmonics_below_nyquist(waveform: Waveform, frequency: f64, sample_rate: f64) -> usize {
    if frequency == 0.0 {
        return 1;
    }
    let ratio = 0.5 * sample_rate / frequency;
    let count = match waveform {
        Waveform::SquareBandLimited | Waveform::TriangleBandLimited => {
            Float::ceil((ratio + 1.0) / 2.0) - 1.0
        }
        _ => Float::ceil(ratio) - 1.0,
    };
    (count as usize).clamp(1, MAX_HARMONICS)
}

/// Stateful oscillator producing one [`Signal`] per step.
///
/// ```
/// use dsp_rs::kernel::KernelLifecycle;
/// use dsp_rs::signal::wave::{OscillatorConfig, OscillatorKernel, Waveform};
///
/// let osc = OscillatorKernel::try_new(OscillatorConfig::new(Waveform::Square, 1.0, 4.0)).unwrap();
/// let values: Vec<f64> = osc.take(5).map(f64::from).collect();
/// assert_eq!(values, vec![1., 1., -1., -1., 1.]);
/// ```
#[derive(Debug, Clone)]
pub struct OscillatorKernel {
    waveform: Waveform,
    increment: f64,
    phase: f64,
    harmonics: usize,
    rng: StdRng,
    held: f64,
}

impl OscillatorKernel {
    /// Configured waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current phase in cycles.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase advance per step, `frequency / sample_rate`.
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Harmonic count used by band-limited waveforms.
    pub fn harmonics(&self) -> usize {
        self.harmonics
    }

    fn value_at(&mut self, p: f64) -> f64 {
        let phi = TAU * p;
        match self.waveform {
            Waveform::Sine => Float::sin(phi),
            Waveform::Saw => 1.0 - 2.0 * p,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if p < 0.5 {
                    4.0 * p - 1.0
                } else {
                    3.0 - 4.0 * p
                }
            }
            Waveform::Noise => {
                if self.increment != 0.0 {
                    self.held = self.rng.random_range(-1.0..1.0);
                }
                self.held
            }
            Waveform::SawBandLimited => {
                let sum: f64 = (1..=self.harmonics)
                    .map(|k| {
                        let k = k as f64;
                        Float::sin(k * phi) / k
                    })
                    .sum();
                2.0 / PI * sum
            }
            Waveform::SquareBandLimited => {
                let sum: f64 = (1..=self.harmonics)
                    .map(|k| {
                        let j = (2 * k - 1) as f64;
                        Float::sin(j * phi) / j
                    })
                    .sum();
                4.0 / PI * sum
            }
            Waveform::TriangleBandLimited => {
                let sum: f64 = (1..=self.harmonics)
                    .map(|k| {
                        let j = (2 * k - 1) as f64;
                        Float::cos(j * phi) / (j * j)
                    })
                    .sum();
                -8.0 / (PI * PI) * sum
            }
        }
    }

    /// Value at the current phase, then advance and wrap the phase.
    pub fn step(&mut self) -> Signal {
        let value = self.value_at(self.phase);
        self.phase = (self.phase + self.increment) % 1.0;
        Signal(value)
    }
}

impl KernelLifecycle for OscillatorKernel {
    type Config = OscillatorConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sample_rate",
                reason: "sample rate must be finite and > 0",
            });
        }
        if !config.frequency.is_finite() || config.frequency < 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "frequency",
                reason: "frequency must be finite and >= 0",
            });
        }
        if !(0.0..1.0).contains(&config.phase) {
            return Err(ConfigError::InvalidArgument {
                arg: "phase",
                reason: "phase must be in [0, 1)",
            });
        }
        let harmonics = match config.harmonics {
            Some(0) => {
                return Err(ConfigError::InvalidArgument {
                    arg: "harmonics",
                    reason: "harmonic count must be > 0",
                })
            }
            Some(h) => h,
            None => harmonics_below_nyquist(config.waveform, config.frequency, config.sample_rate),
        };

        let mut rng = StdRng::seed_from_u64(config.seed);
        let held = rng.random_range(-1.0..1.0);
        Ok(Self {
            waveform: config.waveform,
            increment: config.frequency / config.sample_rate,
            phase: config.phase,
            harmonics,
            rng,
            held,
        })
    }
}

impl Iterator for OscillatorKernel {
    type Item = Signal;

    fn next(&mut self) -> Option<Signal> {
        Some(self.step())
    }
}

impl Oscillate1D<f64> for OscillatorKernel {
    fn run_into<O>(&mut self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<f64> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        out.iter_mut().for_each(|v| *v = self.step().value());
        Ok(())
    }

    fn run_alloc(&mut self, len: usize) -> Result<Vec<f64>, ExecInvariantViolation> {
        Ok((0..len).map(|_| self.step().value()).collect())
    }
}
