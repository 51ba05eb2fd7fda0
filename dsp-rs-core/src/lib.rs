//! Numeric helpers shared by `dsp-rs`.
//!
//! Functions in [`num_rs`] follow the behaviour of their numpy counterparts
//! and operate on one-dimensional [`ndarray`] views.

#![no_std]
#![deny(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;
use core::fmt;
use num_traits::{Float, ToPrimitive};

pub mod num_rs;

/// Errors raised by the numpy-parity helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argument passed into a function was invalid.
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Convert a count or index into a float.
///
/// Primitive integers always convert into the float types; a value that
/// cannot be represented becomes NaN instead of panicking.
///
/// ```
/// use dsp_rs_core::float_from;
///
/// let n: f64 = float_from(8usize);
/// assert_eq!(n, 8.0);
/// ```
pub fn float_from<F, N>(n: N) -> F
where
    F: Float,
    N: ToPrimitive,
{
    F::from(n).unwrap_or_else(F::nan)
}
