//! Direct discrete Fourier transform and descriptive statistics over
//! real-valued samples.
//!
//! ```
//! use dsp_rs::Sample;
//!
//! let x = Sample::new(vec![1., 1., 1., 1.]);
//! let dft = x.dft().unwrap();
//! assert_eq!(dft.magnitude().as_slice()[0], 4.);
//! let y = dft.inverse();
//! assert!(y.iter().zip(x.iter()).all(|(a, b)| (a.value() - b.value()).abs() < 1e-12));
//! ```
//!
//! Every operation is also available as a trait-first kernel (see
//! [`kernel`] and [`signal::traits`]) that runs over slices, `Vec`s and
//! contiguous `ndarray` views of `f32` or `f64`.

#![no_std]
#![deny(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod kernel;
pub mod sample;
pub mod signal;
pub mod stats;

#[cfg(feature = "std")]
pub mod io;

pub use sample::{Sample, Signal};
pub use signal::dft::Dft;

/// Re-export of the linear algebra crate backing [`Dft::bins`].
pub use nalgebra as na;
