use crate::kernel::{ConfigError, ExecInvariantViolation};
use core::fmt;

/// Errors raised whilst running dsp-rs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The real and imaginary parts of a transform have different lengths.
    ShapeMismatch {
        /// Length of the real (cosine) part.
        rex: usize,
        /// Length of the imaginary (negative sine) part.
        imx: usize,
    },
    /// A statistic was requested on too few observations.
    DegenerateInput {
        /// Name of the operation.
        op: &'static str,
        /// Minimum number of observations.
        required: usize,
        /// Observations received.
        got: usize,
    },
    /// A kernel rejected its configuration.
    Config(ConfigError),
    /// A kernel invariant was violated at execution time.
    Exec(ExecInvariantViolation),
    /// A numpy-parity helper rejected its arguments.
    Core(dsp_rs_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { rex, imx } => write!(
                f,
                "Invalid argument: rex and imx must have the same length, got {rex} and {imx}."
            ),
            Error::DegenerateInput { op, required, got } => write!(
                f,
                "Degenerate input for `{op}`: needs at least {required} values, got {got}."
            ),
            Error::Config(err) => write!(f, "{err}"),
            Error::Exec(err) => write!(f, "{err}"),
            Error::Core(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Exec(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::ShapeMismatch { .. } | Error::DegenerateInput { .. } => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Error::Config(value)
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::DegenerateInput { op, required, got } => {
                Error::DegenerateInput { op, required, got }
            }
            ExecInvariantViolation::Config(err) => Error::Config(err),
            other => Error::Exec(other),
        }
    }
}

impl From<dsp_rs_core::Error> for Error {
    fn from(value: dsp_rs_core::Error) -> Self {
        Error::Core(value)
    }
}

/// Result alias for dsp-rs operations.
pub type Result<T> = core::result::Result<T, Error>;
