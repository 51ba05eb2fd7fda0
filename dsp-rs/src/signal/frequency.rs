//! Equal-temperament pitch frequencies referenced to A4 = 440 Hz.

use crate::kernel::ConfigError;
use core::fmt;
use num_traits::Float;

/// Concert pitch of A4 in Hz.
pub const A4_HZ: f64 = 440.0;

/// Pitch class, numbered by semitone offset from A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Note {
    /// A, offset 0.
    A = 0,
    /// A♯ / B♭.
    ASharp,
    /// B.
    B,
    /// C.
    C,
    /// C♯ / D♭.
    CSharp,
    /// D.
    D,
    /// D♯ / E♭.
    DSharp,
    /// E.
    E,
    /// F.
    F,
    /// F♯ / G♭.
    FSharp,
    /// G.
    G,
    /// G♯ / A♭, offset 11.
    GSharp,
}

impl Note {
    /// Semitones above A.
    pub fn offset(self) -> i32 {
        self as i32
    }
}

/// A positive, finite frequency in Hz.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    /// Validate a raw Hz value.
    pub fn new(hz: f64) -> Result<Self, ConfigError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "hz",
                reason: "frequency must be finite and > 0",
            });
        }
        Ok(Self(hz))
    }

    /// `440 · 2^(((octave - 4) · 12 + note) / 12)`.
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use dsp_rs::signal::frequency::{Frequency, Note};
    ///
    /// assert_eq!(Frequency::from_note(4, Note::A).hz(), 440.0);
    /// assert_relative_eq!(Frequency::from_note(5, Note::A).hz(), 880.0);
    /// assert_relative_eq!(Frequency::standard_c().hz(), 261.6255653, epsilon = 1e-6);
    /// ```
    pub fn from_note(octave: i32, note: Note) -> Self {
        let semitones = f64::from((octave - 4) * 12 + note.offset());
        Self(A4_HZ * Float::powf(2.0, semitones / 12.0))
    }

    /// Middle C, octave 3 in this numbering.
    pub fn standard_c() -> Self {
        Self::from_note(3, Note::C)
    }

    /// Value in Hz.
    pub fn hz(self) -> f64 {
        self.0
    }
}

impl From<Frequency> for f64 {
    fn from(value: Frequency) -> Self {
        value.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn semitone_steps() {
        let a = Frequency::from_note(4, Note::A).hz();
        let a_sharp = Frequency::from_note(4, Note::ASharp).hz();
        assert_relative_eq!(a_sharp / a, Float::powf(2.0f64, 1.0 / 12.0), epsilon = 1e-12);
        assert_relative_eq!(Frequency::from_note(3, Note::A).hz(), 220.0, epsilon = 1e-12);
        assert_relative_eq!(Frequency::from_note(4, Note::GSharp).hz(), 830.6093952, epsilon = 1e-6);
    }

    #[test]
    fn standard_c_is_middle_c() {
        assert_relative_eq!(Frequency::standard_c().hz(), 261.6255653005986, epsilon = 1e-9);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(Frequency::new(0.0).is_err());
        assert!(Frequency::new(-10.0).is_err());
        assert!(Frequency::new(f64::NAN).is_err());
        assert_eq!(Frequency::new(440.0).map(f64::from), Ok(440.0));
    }
}
